use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{Instrument, error, info, info_span, warn};

use crate::config::ServerConfig;
use crate::server::connection::Connection;
use crate::server::handler::HandlerContext;

/// Accept loop handing each connection to its own task.
pub struct Listener {
    listener: TcpListener,
    ctx: Arc<HandlerContext>,
}

impl Listener {
    /// Creates the storage directories and binds the listening socket.
    pub async fn bind(cfg: &ServerConfig) -> anyhow::Result<Self> {
        let ctx = HandlerContext::from_config(cfg);
        ctx.storage
            .prepare()
            .await
            .context("Failed to create storage directories")?;

        let addr = cfg.listen_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

        info!(
            "Listening on {} (serving {})",
            addr,
            ctx.storage.www_dir().display()
        );

        Ok(Self {
            listener,
            ctx: Arc::new(ctx),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs until the task is dropped. Failed accepts are logged and
    /// skipped.
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            let (socket, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    error!("Accept failed: {}", e);
                    continue;
                }
            };

            let ctx = Arc::clone(&self.ctx);
            tokio::spawn(
                async move {
                    info!("Accepted connection");

                    let mut conn = Connection::new(socket, ctx);
                    match conn.run().await {
                        Ok(()) => info!("Connection closed"),
                        Err(e) if e.is_framing() => warn!(error = %e, "Connection dropped"),
                        Err(e) => error!(error = %e, "Connection error"),
                    }
                }
                .instrument(info_span!("connection", %peer)),
            );
        }
    }
}
