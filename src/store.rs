use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::models::MediaStore;

/// Whole-file JSON persistence for the media store.
///
/// Every operation reads or rewrites the entire document. There is no
/// locking and no atomic rename: two overlapping writers race and the last
/// one wins.
#[derive(Clone, Debug)]
pub struct MediaFileStore {
    path: Arc<PathBuf>,
}

impl MediaFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Prepare the backing file at startup.
    ///
    /// Creates the parent directory and, when the database file does not
    /// exist yet, writes either the parsed `seed` fixture or an empty store.
    /// Failures are logged; the server keeps running and `load` falls back to
    /// the empty store.
    pub async fn init(&self, seed: Option<&Path>) {
        if let Err(e) = self.try_init(seed).await {
            tracing::error!("Database init error for {}: {:#}", self.path.display(), e);
        }
    }

    async fn try_init(&self, seed: Option<&Path>) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
        }

        if tokio::fs::try_exists(self.path.as_path()).await.unwrap_or(false) {
            tracing::debug!("Database file already present at {}", self.path.display());
            return Ok(());
        }

        let initial = match seed {
            Some(seed_path) => read_seed(seed_path).await,
            None => MediaStore::default(),
        };

        self.write(&initial).await?;
        tracing::info!(
            "Created {} ({} images, {} videos)",
            self.path.display(),
            initial.images.len(),
            initial.videos.len()
        );
        Ok(())
    }

    /// Read the whole store. A missing or unparsable file yields the empty store.
    pub async fn load(&self) -> MediaStore {
        match self.read().await {
            Ok(store) => store,
            Err(e) => {
                tracing::error!("Read database error: {:#}", e);
                MediaStore::default()
            }
        }
    }

    /// Overwrite the whole file with `store`. Write errors are logged only.
    pub async fn save(&self, store: &MediaStore) {
        if let Err(e) = self.write(store).await {
            tracing::error!("Write database error: {:#}", e);
        }
    }

    /// Health probe: the directory holding the database must exist.
    pub async fn check(&self) -> Result<()> {
        let dir = match self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            Some(dir) => dir,
            None => Path::new("."),
        };
        let metadata = tokio::fs::metadata(dir)
            .await
            .with_context(|| format!("Data directory {} is not accessible", dir.display()))?;
        anyhow::ensure!(
            metadata.is_dir(),
            "Data directory {} is not a directory",
            dir.display()
        );
        Ok(())
    }

    async fn read(&self) -> Result<MediaStore> {
        let raw = tokio::fs::read_to_string(self.path.as_path())
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    async fn write(&self, store: &MediaStore) -> Result<()> {
        let data = serde_json::to_string_pretty(store).context("Failed to serialize media store")?;
        tokio::fs::write(self.path.as_path(), data)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        tracing::debug!(
            "Wrote {} images and {} videos to {}",
            store.images.len(),
            store.videos.len(),
            self.path.display()
        );
        Ok(())
    }
}

async fn read_seed(seed_path: &Path) -> MediaStore {
    let parsed = match tokio::fs::read_to_string(seed_path).await {
        Ok(raw) => serde_json::from_str::<MediaStore>(&raw).map_err(anyhow::Error::from),
        Err(e) => Err(anyhow::Error::from(e)),
    };

    match parsed {
        Ok(store) => {
            tracing::info!("Seeding database from {}", seed_path.display());
            store
        }
        Err(e) => {
            tracing::warn!(
                "Ignoring seed file {}: {}; starting empty",
                seed_path.display(),
                e
            );
            MediaStore::default()
        }
    }
}
