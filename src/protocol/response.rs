use std::fmt;

use crate::protocol::PROTOCOL_VERSION;
use crate::protocol::headers::Headers;

/// Status codes the server emits.
///
/// - `Ok` (200): request handled
/// - `BadRequest` (400): malformed start line or rejected resource path
/// - `NotFound` (404): requested file does not exist
/// - `InternalServerError` (500): file could not be read or stored
/// - `NotImplemented` (501): unknown method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
    /// 501 Not Implemented
    NotImplemented,
}

impl StatusCode {
    /// Returns the numeric status code.
    ///
    /// ```
    /// # use chlp::protocol::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
            StatusCode::NotImplemented => 501,
        }
    }

    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::NotImplemented => "Not Implemented",
        }
    }

    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            200 => Some(StatusCode::Ok),
            400 => Some(StatusCode::BadRequest),
            404 => Some(StatusCode::NotFound),
            500 => Some(StatusCode::InternalServerError),
            501 => Some(StatusCode::NotImplemented),
            _ => None,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

/// A response produced by the server's handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }

    /// Creates a 200 OK response with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: StatusCode::Ok,
            body: body.into(),
        }
    }

    pub fn bad_request() -> Self {
        Self::new(StatusCode::BadRequest)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NotFound)
    }

    pub fn internal_error() -> Self {
        Self::new(StatusCode::InternalServerError)
    }

    pub fn not_implemented() -> Self {
        Self::new(StatusCode::NotImplemented)
    }

    /// `CHLP/1.0 <code> <reason>`
    pub fn status_line(&self) -> String {
        format!("{} {}", PROTOCOL_VERSION, self.status)
    }
}

/// A decoded response status line: `VERSION CODE REASON...`.
///
/// The reason phrase is free text and may contain spaces. The code is kept
/// as a raw number because peers may send codes this crate never emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub version: String,
    pub code: u16,
    pub reason: String,
}

impl StatusLine {
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.trim_start().splitn(2, char::is_whitespace);

        let version = parts.next()?;
        let rest = parts.next()?.trim_start();

        let (code, reason) = match rest.split_once(char::is_whitespace) {
            Some((code, reason)) => (code, reason.trim()),
            None => (rest, ""),
        };

        Some(Self {
            version: version.to_string(),
            code: code.parse().ok()?,
            reason: reason.to_string(),
        })
    }

    pub fn status(&self) -> Option<StatusCode> {
        StatusCode::from_u16(self.code)
    }
}

/// A response as seen by the client.
#[derive(Debug, Clone)]
pub struct ResponseMessage {
    /// The status line exactly as received
    pub raw_status_line: String,
    /// `None` when the status line does not follow `VERSION CODE REASON`
    pub status_line: Option<StatusLine>,
    pub headers: Headers,
    /// Header lines verbatim, in arrival order
    pub header_lines: Vec<String>,
    pub body: Vec<u8>,
}

impl ResponseMessage {
    pub fn status(&self) -> Option<StatusCode> {
        self.status_line.as_ref().and_then(StatusLine::status)
    }
}
