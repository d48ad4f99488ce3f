use tracing::{debug, error, warn};

use crate::config::ServerConfig;
use crate::protocol::request::{Method, RequestLine};
use crate::protocol::response::Response;
use crate::server::storage::{FetchError, Storage};

/// Everything a connection needs besides its socket.
///
/// Built once at startup and shared read-only between connections.
#[derive(Debug, Clone)]
pub struct HandlerContext {
    pub storage: Storage,
    pub max_body_size: usize,
}

impl HandlerContext {
    pub fn new(storage: Storage, max_body_size: usize) -> Self {
        Self {
            storage,
            max_body_size,
        }
    }

    pub fn from_config(cfg: &ServerConfig) -> Self {
        Self::new(Storage::from_config(cfg), cfg.max_body_size)
    }
}

/// Routes a decoded request to its method handler.
pub async fn dispatch(ctx: &HandlerContext, line: &RequestLine, body: Vec<u8>) -> Response {
    match &line.method {
        Method::GET => handle_get(ctx, &line.resource).await,
        Method::POST => handle_post(ctx, &body).await,
        Method::ECHO => handle_echo(body),
        Method::Other(verb) => {
            debug!(method = %verb, "Unsupported method");
            Response::not_implemented()
        }
    }
}

async fn handle_get(ctx: &HandlerContext, resource: &str) -> Response {
    match ctx.storage.read(resource).await {
        Ok(contents) => Response::ok(contents),
        Err(FetchError::Rejected) => {
            warn!(resource = %resource, "Rejected resource path");
            Response::bad_request()
        }
        Err(FetchError::NotFound) => Response::not_found(),
        Err(FetchError::Io(e)) => {
            error!(resource = %resource, error = %e, "Failed to read resource");
            Response::internal_error()
        }
    }
}

async fn handle_post(ctx: &HandlerContext, body: &[u8]) -> Response {
    match ctx.storage.store_upload(body).await {
        Ok(path) => {
            debug!(path = %path.display(), bytes = body.len(), "Stored upload");
            Response::ok(Vec::new())
        }
        Err(e) => {
            error!(error = %e, "Failed to store upload");
            Response::internal_error()
        }
    }
}

fn handle_echo(body: Vec<u8>) -> Response {
    Response::ok(body)
}
