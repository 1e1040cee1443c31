use std::{
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;
use log::{debug, trace, warn};
use tokio::fs;

use crate::create_folder;

#[derive(thiserror::Error, Debug)]
pub enum MapFileError {
    #[error("Invalid map file name: {0}")]
    InvalidName(String),
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Storage for generated map documents.
///
/// A document is written to disk and read back once before it is embedded.
#[async_trait]
pub trait MapFiles: Send + Sync {
    /// Stores `document` under `name` and returns what was stored.
    async fn publish(&self, name: &str, document: String) -> Result<String, MapFileError>;
    fn map_dir(&self) -> String;
}

pub struct LocalMapFiles {
    map_dir: String,
    writes: AtomicU64,
}

impl LocalMapFiles {
    pub fn new(map_dir: String) -> Self {
        create_folder(&map_dir);
        Self {
            map_dir,
            writes: AtomicU64::new(0),
        }
    }

    fn target(&self, name: &str) -> Result<PathBuf, MapFileError> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !name.starts_with('.');
        if !valid {
            return Err(MapFileError::InvalidName(name.to_string()));
        }
        Ok(PathBuf::from(&self.map_dir).join(name))
    }
}

fn io_error(path: &std::path::Path, source: std::io::Error) -> MapFileError {
    MapFileError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[async_trait]
impl MapFiles for LocalMapFiles {
    async fn publish(&self, name: &str, document: String) -> Result<String, MapFileError> {
        let target = self.target(name)?;
        // one temp file per write, renamed over the target
        let n = self.writes.fetch_add(1, Ordering::Relaxed);
        let tmp = target.with_extension(format!("html.{}.tmp", n));

        fs::write(&tmp, document.as_bytes())
            .await
            .map_err(|e| io_error(&tmp, e))?;
        if let Err(e) = fs::rename(&tmp, &target).await {
            if let Err(cleanup) = fs::remove_file(&tmp).await {
                warn!("error removing {}: {}", tmp.display(), cleanup);
            }
            return Err(io_error(&target, e));
        }
        trace!("wrote map document {}", target.display());

        let stored = fs::read_to_string(&target)
            .await
            .map_err(|e| io_error(&target, e))?;
        debug!("published map {} ({} bytes)", name, stored.len());
        Ok(stored)
    }

    fn map_dir(&self) -> String {
        self.map_dir.clone()
    }
}
