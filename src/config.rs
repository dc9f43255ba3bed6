use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// File name of the media database inside the data directory
pub const DB_FILE_NAME: &str = "db.json";

/// Data directory used when `APP_ENV=production` and `DATA_DIR` is unset
pub const PRODUCTION_DATA_DIR: &str = "/data";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub seed_file: Option<PathBuf>,
    pub secret_key: Option<String>,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let production = env::var("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                if production {
                    PathBuf::from(PRODUCTION_DATA_DIR)
                } else {
                    PathBuf::from(".")
                }
            });

        let seed_file = env::var("SEED_FILE")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let secret_key = env::var("MEDIA_SECRET_KEY").ok().filter(|v| !v.is_empty());

        let service_port = env::var("SERVICE_PORT")
            .or_else(|_| env::var("PORT"))
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = env::var("SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        Ok(Config {
            data_dir,
            seed_file,
            secret_key,
            service_port,
            service_host,
        })
    }

    /// Full path of the media database file
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Database path: {}", self.db_path().display());
        tracing::info!(
            "  Seed file: {}",
            self.seed_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "none".to_string())
        );
        tracing::info!(
            "  Write secret: {}",
            if self.secret_key.is_some() { "enabled" } else { "disabled" }
        );
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}

/// Settings for the external media host used by the gallery client
#[derive(Debug, Clone)]
pub struct MediaHostConfig {
    pub base_url: String,
    pub cloud_name: String,
    pub image_preset: String,
    pub video_preset: String,
    pub image_folder: String,
    pub video_folder: String,
}

impl Default for MediaHostConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.cloudinary.com".to_string(),
            cloud_name: "dgqvkksup".to_string(),
            image_preset: "birthday_unsigned".to_string(),
            video_preset: "birthday_video_unsigned".to_string(),
            image_folder: "birthday-memories".to_string(),
            video_folder: "birthday-memories/videos".to_string(),
        }
    }
}

impl MediaHostConfig {
    /// Defaults overridden by any `MEDIA_HOST_*` variables that are set
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let var = |name: &str, fallback: String| env::var(name).unwrap_or(fallback);

        Self {
            base_url: var("MEDIA_HOST_URL", defaults.base_url),
            cloud_name: var("MEDIA_HOST_CLOUD_NAME", defaults.cloud_name),
            image_preset: var("MEDIA_HOST_IMAGE_PRESET", defaults.image_preset),
            video_preset: var("MEDIA_HOST_VIDEO_PRESET", defaults.video_preset),
            image_folder: var("MEDIA_HOST_IMAGE_FOLDER", defaults.image_folder),
            video_folder: var("MEDIA_HOST_VIDEO_FOLDER", defaults.video_folder),
        }
    }
}
