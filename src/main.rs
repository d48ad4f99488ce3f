use chlp::config::{ServerArgs, ServerConfig};
use chlp::logging;
use chlp::server::Listener;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = ServerConfig::load(ServerArgs::parse())?;

    logging::init(&cfg.log_level);

    tracing::info!(
        listen = %cfg.listen_addr(),
        www_dir = %cfg.www_dir.display(),
        uploads_dir = %cfg.uploads_dir.display(),
        max_body_size = cfg.max_body_size,
        "Starting chlp-server"
    );

    let listener = Listener::bind(&cfg).await?;

    tokio::select! {
        res = listener.run() => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
