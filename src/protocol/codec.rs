//! Encoding and decoding of framed messages.
//!
//! Decoding is exposed step by step (start line, header block, body)
//! because the server answers a malformed start line before reading any
//! headers. `decode_request` and `decode_response` chain the steps for
//! callers that only want the finished message.

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::protocol::error::FrameError;
use crate::protocol::headers::{BODY_SIZE, Headers, parse_header_line};
use crate::protocol::io::{recv_exact, send_all};
use crate::protocol::line::read_line;
use crate::protocol::request::{Request, RequestLine};
use crate::protocol::response::{ResponseMessage, StatusLine};

/// Headers read up to the blank line, or up to the end of the stream.
#[derive(Debug, Clone, Default)]
pub struct HeaderBlock {
    pub headers: Headers,
    /// Every header line as received, including ones that did not parse
    pub lines: Vec<String>,
    /// `false` when the stream ended before the blank terminator line
    pub terminated: bool,
}

pub async fn read_start_line<S>(stream: &mut S) -> Result<Option<String>, FrameError>
where
    S: AsyncRead + Unpin,
{
    Ok(read_line(stream).await?)
}

/// Reads `name: value` lines until the blank line.
///
/// Lines that are not `name: value` are skipped.
pub async fn read_headers<S>(stream: &mut S) -> Result<HeaderBlock, FrameError>
where
    S: AsyncRead + Unpin,
{
    let mut block = HeaderBlock::default();

    while let Some(line) = read_line(stream).await? {
        if line.is_empty() {
            block.terminated = true;
            break;
        }

        match parse_header_line(&line) {
            Some((name, value)) => block.headers.append(name, value),
            None => tracing::debug!(line = %line, "Ignoring malformed header line"),
        }
        block.lines.push(line);
    }

    Ok(block)
}

/// Reads exactly `size` bytes of body.
///
/// A size above `limit`, or one the allocator refuses, is `BodyTooLarge`;
/// a peer that closes early is `ShortBody`.
pub async fn read_body<S>(
    stream: &mut S,
    size: usize,
    limit: usize,
) -> Result<Vec<u8>, FrameError>
where
    S: AsyncRead + Unpin,
{
    if size == 0 {
        return Ok(Vec::new());
    }

    if size > limit {
        return Err(FrameError::BodyTooLarge { size, limit });
    }

    let mut body = Vec::new();
    body.try_reserve_exact(size)
        .map_err(|_| FrameError::BodyTooLarge { size, limit })?;
    body.resize(size, 0);

    let received = recv_exact(stream, &mut body).await?;
    if received < size {
        return Err(FrameError::ShortBody {
            expected: size,
            received,
        });
    }

    Ok(body)
}

/// Decodes one request.
///
/// `Ok(None)` means the peer closed before sending anything.
pub async fn decode_request<S>(stream: &mut S, limit: usize) -> Result<Option<Request>, FrameError>
where
    S: AsyncRead + Unpin,
{
    let Some(line) = read_start_line(stream).await? else {
        return Ok(None);
    };

    let request_line = RequestLine::parse(&line).ok_or(FrameError::MalformedStartLine(line))?;

    let block = read_headers(stream).await?;
    if !block.terminated {
        return Err(FrameError::UnterminatedHeaders);
    }

    let body = read_body(stream, block.headers.body_size(), limit).await?;

    Ok(Some(Request {
        line: request_line,
        headers: block.headers,
        body,
    }))
}

/// Decodes one response.
///
/// A header block cut short by the peer is accepted as-is; the declared
/// body size (0 if it never arrived) still has to be satisfied.
pub async fn decode_response<S>(stream: &mut S, limit: usize) -> Result<ResponseMessage, FrameError>
where
    S: AsyncRead + Unpin,
{
    let raw_status_line = read_start_line(stream)
        .await?
        .ok_or(FrameError::NoResponse)?;

    let block = read_headers(stream).await?;
    let body = read_body(stream, block.headers.body_size(), limit).await?;

    Ok(ResponseMessage {
        status_line: StatusLine::parse(&raw_status_line),
        raw_status_line,
        headers: block.headers,
        header_lines: block.lines,
        body,
    })
}

/// Serializes the start line and the `Body-Size` header.
pub fn encode_head(start_line: &str, body_len: usize) -> Vec<u8> {
    format!("{start_line}\n{BODY_SIZE}: {body_len}\n\n").into_bytes()
}

/// Writes a complete message: head, then body, each sent in full.
pub async fn write_message<S>(
    stream: &mut S,
    start_line: &str,
    body: &[u8],
) -> Result<(), FrameError>
where
    S: AsyncWrite + Unpin,
{
    send_all(stream, &encode_head(start_line, body.len())).await?;

    if !body.is_empty() {
        send_all(stream, body).await?;
    }

    stream.flush().await?;
    Ok(())
}
