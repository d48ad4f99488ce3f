use std::path::PathBuf;

use anyhow::Context;
use chlp::client::{Client, write_response};
use chlp::logging;
use chlp::protocol::{Method, Request};
use clap::Parser;

#[derive(Parser)]
#[command(name = "chlp-client")]
#[command(about = "Sends a single CHLP/1.0 request and prints the response", long_about = None)]
struct Cli {
    /// Server host name or address
    host: String,

    /// Server port
    port: u16,

    /// Request method (GET, POST, ECHO)
    method: String,

    /// Resource path, e.g. /index.html
    path: String,

    /// File whose contents are sent as the body (POST and ECHO)
    bodyfile: Option<PathBuf>,

    /// Largest response body to accept, in bytes
    #[arg(long)]
    max_body_size: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        std::process::exit(if e.use_stderr() { 1 } else { 0 });
    });

    logging::init(&cli.log_level);

    let method = Method::parse(&cli.method);

    let body = if method.takes_body() {
        let path = cli
            .bodyfile
            .context("POST/ECHO requires a body file argument")?;
        tokio::fs::read(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?
    } else {
        Vec::new()
    };

    let request = Request::new(method, cli.path).with_body(body);
    let mut client = Client::new(&cli.host, cli.port);
    if let Some(limit) = cli.max_body_size {
        client = client.with_max_body_size(limit);
    }
    let response = client.send(&request).await?;

    let mut stdout = std::io::stdout().lock();
    write_response(&mut stdout, &response)?;

    Ok(())
}
