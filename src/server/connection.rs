use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::protocol::codec::{read_body, read_headers, read_start_line, write_message};
use crate::protocol::error::FrameError;
use crate::protocol::request::RequestLine;
use crate::protocol::response::Response;
use crate::server::handler::{HandlerContext, dispatch};

/// Serves exactly one request on one stream, then closes it.
pub struct Connection<S> {
    stream: S,
    ctx: Arc<HandlerContext>,
    state: ConnectionState,
}

#[derive(Debug)]
pub enum ConnectionState {
    AwaitStartLine,
    AwaitHeaders(RequestLine),
    ReadBody(RequestLine, usize),
    Dispatch(RequestLine, Vec<u8>),
    Respond(Response),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, ctx: Arc<HandlerContext>) -> Self {
        Self {
            stream,
            ctx,
            state: ConnectionState::AwaitStartLine,
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Drives the state machine to `Closed`.
    ///
    /// An error means the connection was abandoned without a response
    /// (peer left mid-request, body could not be buffered, or the socket
    /// failed). The stream is shut down either way.
    pub async fn run(&mut self) -> Result<(), FrameError> {
        let result = self.drive().await;

        self.state = ConnectionState::Closed;
        if let Err(e) = self.stream.shutdown().await {
            debug!(error = %e, "Shutdown failed");
        }

        result
    }

    async fn drive(&mut self) -> Result<(), FrameError> {
        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Closed);

            self.state = match state {
                ConnectionState::AwaitStartLine => self.await_start_line().await?,

                ConnectionState::AwaitHeaders(line) => self.await_headers(line).await?,

                ConnectionState::ReadBody(line, size) => {
                    let body = read_body(&mut self.stream, size, self.ctx.max_body_size).await?;
                    ConnectionState::Dispatch(line, body)
                }

                ConnectionState::Dispatch(line, body) => {
                    let received = body.len();
                    let response = dispatch(&self.ctx, &line, body).await;

                    info!(
                        method = %line.method,
                        resource = %line.resource,
                        body_size = received,
                        status = response.status.as_u16(),
                        "Request handled"
                    );

                    ConnectionState::Respond(response)
                }

                ConnectionState::Respond(response) => {
                    write_message(&mut self.stream, &response.status_line(), &response.body)
                        .await?;
                    ConnectionState::Closed
                }

                ConnectionState::Closed => return Ok(()),
            };
        }
    }

    async fn await_start_line(&mut self) -> Result<ConnectionState, FrameError> {
        let Some(line) = read_start_line(&mut self.stream).await? else {
            debug!("Peer closed before sending a request");
            return Ok(ConnectionState::Closed);
        };

        match RequestLine::parse(&line) {
            Some(request_line) => Ok(ConnectionState::AwaitHeaders(request_line)),
            None => {
                warn!(line = %line, "Malformed start line");
                Ok(ConnectionState::Respond(Response::bad_request()))
            }
        }
    }

    async fn await_headers(&mut self, line: RequestLine) -> Result<ConnectionState, FrameError> {
        let block = read_headers(&mut self.stream).await?;
        if !block.terminated {
            return Err(FrameError::UnterminatedHeaders);
        }

        match block.headers.body_size() {
            0 => Ok(ConnectionState::Dispatch(line, Vec::new())),
            size => Ok(ConnectionState::ReadBody(line, size)),
        }
    }
}
