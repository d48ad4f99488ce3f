use std::fmt;

use crate::protocol::PROTOCOL_VERSION;
use crate::protocol::headers::Headers;

/// CHLP request methods.
///
/// Parsing is case-insensitive. Unknown verbs are kept verbatim in
/// `Other` so the server can answer them with 501 instead of failing the
/// decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Fetch a file from the served root
    GET,
    /// POST - Store the body as a new upload
    POST,
    /// ECHO - Return the body unchanged
    ECHO,
    /// Any verb the server does not implement
    Other(String),
}

impl Method {
    /// Parses a method token, ignoring ASCII case.
    ///
    /// ```
    /// # use chlp::protocol::request::Method;
    /// assert_eq!(Method::parse("get"), Method::GET);
    /// assert_eq!(Method::parse("Echo"), Method::ECHO);
    /// assert_eq!(Method::parse("PUT"), Method::Other("PUT".to_string()));
    /// ```
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("GET") {
            Method::GET
        } else if s.eq_ignore_ascii_case("POST") {
            Method::POST
        } else if s.eq_ignore_ascii_case("ECHO") {
            Method::ECHO
        } else {
            Method::Other(s.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::ECHO => "ECHO",
            Method::Other(s) => s,
        }
    }

    /// Whether requests with this method carry a body read from a file.
    pub fn takes_body(&self) -> bool {
        matches!(self, Method::POST | Method::ECHO)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The first line of a request: `METHOD RESOURCE VERSION`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    pub resource: String,
    pub version: String,
}

impl RequestLine {
    /// Splits a start line on whitespace.
    ///
    /// Needs at least three tokens; anything after the third is ignored.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();

        let method = parts.next()?;
        let resource = parts.next()?;
        let version = parts.next()?;

        Some(Self {
            method: Method::parse(method),
            resource: resource.to_string(),
            version: version.to_string(),
        })
    }
}

impl fmt::Display for RequestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.method, self.resource, self.version)
    }
}

/// A complete CHLP request.
#[derive(Debug, Clone)]
pub struct Request {
    pub line: RequestLine,
    /// Headers as received; empty for outgoing requests, where the codec
    /// adds `Body-Size` itself
    pub headers: Headers,
    pub body: Vec<u8>,
}

impl Request {
    pub fn new(method: Method, resource: impl Into<String>) -> Self {
        Self {
            line: RequestLine {
                method,
                resource: resource.into(),
                version: PROTOCOL_VERSION.to_string(),
            },
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn method(&self) -> &Method {
        &self.line.method
    }

    pub fn resource(&self) -> &str {
        &self.line.resource
    }
}
