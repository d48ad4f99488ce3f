use thiserror::Error;

/// Errors raised while decoding or encoding a CHLP message.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed start line: {0:?}")]
    MalformedStartLine(String),

    #[error("stream closed before the end of the header block")]
    UnterminatedHeaders,

    #[error("body truncated: expected {expected} bytes, received {received}")]
    ShortBody { expected: usize, received: usize },

    #[error("body of {size} bytes exceeds the limit of {limit} bytes")]
    BodyTooLarge { size: usize, limit: usize },

    #[error("no response")]
    NoResponse,
}

impl FrameError {
    /// Framing errors are the peer's fault; everything else is transport.
    pub fn is_framing(&self) -> bool {
        !matches!(self, FrameError::Io(_))
    }
}
