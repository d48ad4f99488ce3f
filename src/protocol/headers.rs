/// Name of the only length-bearing header.
pub const BODY_SIZE: &str = "Body-Size";

/// Ordered header list with case-insensitive lookup.
///
/// Insertion order is kept so headers can be displayed exactly as they
/// arrived. Duplicate names are allowed; lookups return the last one, the
/// same value a line-by-line reader ends up with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Retrieves a header value by name, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The declared body length.
    ///
    /// Missing or unparsable values count as 0, so a malformed declaration
    /// is indistinguishable from "no body".
    pub fn body_size(&self) -> usize {
        self.get(BODY_SIZE)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Splits a `name: value` line on its first colon.
///
/// Returns `None` for lines without a colon or with an empty name; those
/// lines are skipped rather than rejected.
pub fn parse_header_line(line: &str) -> Option<(String, String)> {
    let (name, value) = line.split_once(':')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let value = value.trim_start().trim_end_matches(['\r', '\n']);

    Some((name.to_string(), value.to_string()))
}
