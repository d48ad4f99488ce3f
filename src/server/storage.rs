//! Files served by GET and written by POST.

use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use rand::Rng;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::config::ServerConfig;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("resource path rejected")]
    Rejected,

    #[error("resource not found")]
    NotFound,

    #[error("failed to read resource: {0}")]
    Io(#[source] io::Error),
}

/// Accepts only paths that start with `/` and never contain `..`.
///
/// ```
/// # use chlp::server::storage::is_safe_resource;
/// assert!(is_safe_resource("/index.html"));
/// assert!(!is_safe_resource("index.html"));
/// assert!(!is_safe_resource("/../etc/passwd"));
/// ```
pub fn is_safe_resource(resource: &str) -> bool {
    resource.starts_with('/') && !resource.contains("..")
}

/// `post_<unix seconds>_<0..100000>.txt`
pub fn upload_file_name() -> String {
    let suffix = rand::thread_rng().gen_range(0..100_000);
    format!("post_{}_{}.txt", chrono::Utc::now().timestamp(), suffix)
}

/// The served root and the uploads area.
#[derive(Debug, Clone)]
pub struct Storage {
    www_dir: PathBuf,
    uploads_dir: PathBuf,
    index_file: String,
}

impl Storage {
    pub fn new(
        www_dir: impl Into<PathBuf>,
        uploads_dir: impl Into<PathBuf>,
        index_file: impl Into<String>,
    ) -> Self {
        Self {
            www_dir: www_dir.into(),
            uploads_dir: uploads_dir.into(),
            index_file: index_file.into(),
        }
    }

    pub fn from_config(cfg: &ServerConfig) -> Self {
        Self::new(&cfg.www_dir, &cfg.uploads_dir, cfg.index_file.clone())
    }

    pub fn www_dir(&self) -> &Path {
        &self.www_dir
    }

    /// Creates both directories if they are missing.
    pub async fn prepare(&self) -> io::Result<()> {
        fs::create_dir_all(&self.www_dir).await?;
        fs::create_dir_all(&self.uploads_dir).await?;
        Ok(())
    }

    /// Maps a resource to a path under the served root.
    ///
    /// Returns `None` for rejected resources. No filesystem access happens
    /// here.
    pub fn resolve(&self, resource: &str) -> Option<PathBuf> {
        if !is_safe_resource(resource) {
            return None;
        }

        Some(self.www_dir.join(resource.trim_start_matches('/')))
    }

    /// Reads a whole file from the served root.
    ///
    /// A resource naming a directory is served from its index file. Any
    /// path the filesystem cannot resolve to a file (missing entry, a
    /// regular file used as a directory, an overlong or invalid name) is
    /// `NotFound`.
    pub async fn read(&self, resource: &str) -> Result<Vec<u8>, FetchError> {
        let mut path = self.resolve(resource).ok_or(FetchError::Rejected)?;

        if fs::metadata(&path).await.is_ok_and(|m| m.is_dir()) {
            path.push(&self.index_file);
        }

        fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound
            | ErrorKind::NotADirectory
            | ErrorKind::InvalidFilename
            | ErrorKind::InvalidInput => FetchError::NotFound,
            _ => FetchError::Io(e),
        })
    }

    /// Writes `body` to a freshly named file in the uploads area.
    ///
    /// The file is created with create-new semantics: an unlikely name
    /// collision fails the upload instead of replacing an earlier one.
    pub async fn store_upload(&self, body: &[u8]) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.uploads_dir).await?;

        let path = self.uploads_dir.join(upload_file_name());
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;

        file.write_all(body).await?;
        file.flush().await?;

        Ok(path)
    }
}
