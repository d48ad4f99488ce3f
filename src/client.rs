//! Client side: one request, one response, one connection.

use std::io::Write;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tracing::debug;

use crate::protocol::codec::{decode_response, write_message};
use crate::protocol::error::FrameError;
use crate::protocol::request::Request;
use crate::protocol::response::ResponseMessage;

pub struct Client {
    host: String,
    port: u16,
    max_body_size: usize,
}

impl Client {
    /// `host` may be a name or a literal IPv4 or IPv6 address; resolution
    /// happens at connect time.
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
            max_body_size: usize::MAX,
        }
    }

    /// Caps the response body the client is willing to buffer.
    pub fn with_max_body_size(mut self, limit: usize) -> Self {
        self.max_body_size = limit;
        self
    }

    pub async fn send(&self, request: &Request) -> anyhow::Result<ResponseMessage> {
        let mut stream = TcpStream::connect((self.host.as_str(), self.port))
            .await
            .with_context(|| format!("Failed to connect to {} port {}", self.host, self.port))?;

        debug!(host = %self.host, port = self.port, "Connected");

        let response = exchange(&mut stream, request, self.max_body_size)
            .await
            .context("Request failed")?;

        Ok(response)
    }
}

/// Writes `request` and decodes the single response that follows.
pub async fn exchange<S>(
    stream: &mut S,
    request: &Request,
    max_body_size: usize,
) -> Result<ResponseMessage, FrameError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    write_message(stream, &request.line.to_string(), &request.body).await?;
    decode_response(stream, max_body_size).await
}

/// Prints a response the way the CLI shows it: status line, header lines
/// exactly as received, a blank line, then the body followed by a newline.
pub fn write_response<W: Write>(out: &mut W, response: &ResponseMessage) -> std::io::Result<()> {
    writeln!(out, "{}", response.raw_status_line)?;
    for line in &response.header_lines {
        writeln!(out, "{}", line)?;
    }
    writeln!(out)?;

    if !response.body.is_empty() {
        out.write_all(&response.body)?;
        writeln!(out)?;
    }

    out.flush()
}
