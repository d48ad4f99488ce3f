//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chlp::config::ServerConfig;
use chlp::protocol::FrameError;
use chlp::server::{Connection, HandlerContext, Listener, Storage};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

/// A fresh directory under the system temp dir with `www/` and `uploads/`
/// subdirectories.
pub fn temp_root(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "chlp-test-{}-{}-{}",
        name,
        std::process::id(),
        NEXT_DIR.fetch_add(1, Ordering::Relaxed)
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(dir.join("www")).unwrap();
    std::fs::create_dir_all(dir.join("uploads")).unwrap();
    dir
}

pub fn test_config(root: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        www_dir: root.join("www"),
        uploads_dir: root.join("uploads"),
        ..ServerConfig::default()
    }
}

pub fn test_context(root: &Path, max_body_size: usize) -> Arc<HandlerContext> {
    Arc::new(HandlerContext::new(
        Storage::new(root.join("www"), root.join("uploads"), "index.html"),
        max_body_size,
    ))
}

/// Binds a server on an ephemeral port and runs it in the background.
pub async fn start_server(root: &Path) -> SocketAddr {
    let listener = Listener::bind(&test_config(root)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(listener.run());
    addr
}

/// Feeds `input` to a server-side connection over an in-memory pipe and
/// collects everything it writes back.
pub async fn serve_bytes(
    ctx: Arc<HandlerContext>,
    input: &[u8],
) -> (Result<(), FrameError>, Vec<u8>) {
    let (mut client, server) = tokio::io::duplex(1024);

    let task = tokio::spawn(async move {
        let mut conn = Connection::new(server, ctx);
        conn.run().await
    });

    client.write_all(input).await.unwrap();
    client.shutdown().await.unwrap();

    let mut output = Vec::new();
    client.read_to_end(&mut output).await.unwrap();

    (task.await.unwrap(), output)
}

pub fn uploaded_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(root.join("uploads"))
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    files.sort();
    files
}
