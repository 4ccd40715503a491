use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::SettingsError;
use crate::models::settings::Settings;

/// JSON file holding the user's places-API credential. Read on every
/// search so a key saved through the settings endpoint applies immediately.
pub struct SettingsRepo {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl SettingsRepo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Settings, SettingsError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Settings::default()),
            Err(e) => return Err(self.io_error(e)),
        };

        serde_json::from_slice(&raw).map_err(|e| SettingsError::Json {
            path: self.path.display().to_string(),
            source: e,
        })
    }

    pub async fn places_api_key(&self) -> Result<Option<String>, SettingsError> {
        Ok(self.load().await?.places_api_key)
    }

    /// Stores a trimmed key; blank clears it.
    pub async fn save_places_api_key(
        &self,
        api_key: Option<&str>,
    ) -> Result<Settings, SettingsError> {
        let _guard = self.write_lock.lock().await;

        let mut settings = match self.load().await {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Overwriting unreadable settings: {}", e);
                Settings::default()
            }
        };
        settings.places_api_key = api_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string);

        let body = serde_json::to_vec_pretty(&settings).map_err(|e| SettingsError::Json {
            path: self.path.display().to_string(),
            source: e,
        })?;

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, body)
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;

        info!(
            "Saved settings to {} (places API key {})",
            self.path.display(),
            if settings.places_api_key.is_some() { "set" } else { "cleared" }
        );
        Ok(settings)
    }

    fn io_error(&self, source: std::io::Error) -> SettingsError {
        SettingsError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_means_no_key() {
        let dir = tempfile::tempdir().unwrap();
        let repo = SettingsRepo::new(dir.path().join("settings.json"));

        assert_eq!(repo.places_api_key().await.unwrap(), None);
    }

    #[tokio::test]
    async fn saves_trimmed_key_and_clears_on_blank() {
        let dir = tempfile::tempdir().unwrap();
        let repo = SettingsRepo::new(dir.path().join("settings.json"));

        repo.save_places_api_key(Some("  abc123 ")).await.unwrap();
        assert_eq!(repo.places_api_key().await.unwrap().as_deref(), Some("abc123"));

        repo.save_places_api_key(Some("   ")).await.unwrap();
        assert_eq!(repo.places_api_key().await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, b"{not json").unwrap();

        let err = SettingsRepo::new(&path).load().await.unwrap_err();
        assert!(matches!(err, SettingsError::Json { .. }));
    }

    #[tokio::test]
    async fn saving_replaces_a_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, b"{not json").unwrap();
        let repo = SettingsRepo::new(&path);

        repo.save_places_api_key(Some("fresh")).await.unwrap();

        assert_eq!(repo.places_api_key().await.unwrap().as_deref(), Some("fresh"));
    }
}
