use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::locale::Locale;

/// Application configuration loaded from environment variables.
///
/// Translation settings are read separately by `TranslateClientConfig::from_env`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the disease catalog JSON.
    pub catalog_path: String,
    /// Path to the SQLite consultation log. Created on first use.
    pub db_path: String,
    /// Locale used when a tool call does not name one.
    pub default_locale: Locale,
    /// Redis connection URL for the translation cache. `None` disables caching.
    pub redis_url: Option<String>,
}

impl Config {
    /// Optional:
    /// - `VAIDYA_CATALOG_PATH` (default: "data/medical_data.json"; the file must exist)
    /// - `VAIDYA_DB_PATH` (default: "consultations.db")
    /// - `VAIDYA_DEFAULT_LOCALE` (default: "en")
    /// - `REDIS_URL`
    pub fn from_env() -> Result<Self, AppError> {
        let catalog_path = std::env::var("VAIDYA_CATALOG_PATH")
            .unwrap_or_else(|_| "data/medical_data.json".to_string());
        if !Path::new(&catalog_path).exists() {
            return Err(AppError::Config(format!(
                "disease catalog not found at {catalog_path}"
            )));
        }

        let db_path =
            std::env::var("VAIDYA_DB_PATH").unwrap_or_else(|_| "consultations.db".to_string());

        let default_locale = match std::env::var("VAIDYA_DEFAULT_LOCALE") {
            Ok(raw) => raw
                .parse::<Locale>()
                .map_err(|e| AppError::Config(format!("VAIDYA_DEFAULT_LOCALE: {e}")))?,
            Err(_) => Locale::English,
        };

        Ok(Self {
            catalog_path,
            db_path,
            default_locale,
            redis_url: std::env::var("REDIS_URL").ok().filter(|s| !s.is_empty()),
        })
    }

    pub fn catalog_path(&self) -> PathBuf {
        Path::new(&self.catalog_path).to_path_buf()
    }

    pub fn db_path(&self) -> PathBuf {
        Path::new(&self.db_path).to_path_buf()
    }
}
