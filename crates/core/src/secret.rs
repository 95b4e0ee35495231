//! Stored pin lookup and persistence
//!
//! # SecretProvider
//!
//! The controller never reads global state: it gets the expected pin from
//! an injected [`SecretProvider`] at evaluation time.
//!
//! # PinStore
//!
//! Small persisted key/value store holding the pin under
//! [`STORED_PIN_KEY`], written as JSON in the platform data directory.
//!
//! - **macOS**: `~/Library/Application Support/pinpad/settings.json`
//! - **Linux**: `~/.local/share/pinpad/settings.json`
//! - **Windows**: `%LOCALAPPDATA%\pinpad\settings.json`

use crate::error::{CoreError, Result};
use crate::{PIN_LENGTH, STORED_PIN_KEY};
use rand::Rng;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Read-only access to the expected pin
///
/// An empty string means no pin is configured; every code then mismatches.
pub trait SecretProvider: Send + Sync {
    fn stored_pin(&self) -> String;
}

/// Fixed in-memory secret
#[derive(Debug, Clone, Default)]
pub struct StaticSecret(String);

impl StaticSecret {
    pub fn new(pin: impl Into<String>) -> Self {
        Self(pin.into())
    }
}

impl SecretProvider for StaticSecret {
    fn stored_pin(&self) -> String {
        self.0.clone()
    }
}

/// Check that `pin` is exactly [`PIN_LENGTH`] decimal digits
pub fn validate_pin(pin: &str) -> Result<()> {
    if pin.len() == PIN_LENGTH && pin.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(CoreError::InvalidPin {
            expected: PIN_LENGTH,
            got: pin.to_string(),
        })
    }
}

/// Generate a random pin of [`PIN_LENGTH`] digits
pub fn generate_pin() -> String {
    let mut rng = rand::thread_rng();
    (0..PIN_LENGTH)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Persisted local settings holding the pin
#[derive(Debug, Clone)]
pub struct PinStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl PinStore {
    /// File name inside the data directory
    pub const FILE_NAME: &'static str = "settings.json";

    /// Default store location in the platform data directory
    pub fn default_path() -> Result<PathBuf> {
        Ok(dirs::data_local_dir()
            .ok_or(CoreError::NoDataDir)?
            .join("pinpad")
            .join(Self::FILE_NAME))
    }

    /// Load store from the default location
    pub fn load_default() -> Result<Self> {
        Self::load(Self::default_path()?)
    }

    /// Load store from `path`
    ///
    /// A missing file yields an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            tracing::debug!("Pin store {} not found, starting empty", path.display());
            return Ok(Self {
                path,
                values: BTreeMap::new(),
            });
        }

        let content = fs::read_to_string(&path)?;
        let values = serde_json::from_str(&content)?;
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Stored pin, or `None` when unset
    pub fn pin(&self) -> Option<&str> {
        self.get(STORED_PIN_KEY).filter(|p| !p.is_empty())
    }

    /// Validate and store a new pin (not persisted until [`save`](Self::save))
    pub fn set_pin(&mut self, pin: &str) -> Result<()> {
        validate_pin(pin)?;
        self.set(STORED_PIN_KEY, pin);
        Ok(())
    }

    /// Write store to disk, creating the parent directory
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, content)?;

        // Pin is a credential: owner-only on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perm = fs::metadata(&self.path)?.permissions();
            perm.set_mode(0o600);
            fs::set_permissions(&self.path, perm)?;
        }

        tracing::debug!("Saved pin store to {}", self.path.display());
        Ok(())
    }
}

impl SecretProvider for PinStore {
    /// Re-reads the file so a pin set by another process is picked up.
    /// Falls back to the loaded values when the file is absent or unreadable.
    fn stored_pin(&self) -> String {
        if !self.path.exists() {
            return self.pin().unwrap_or_default().to_string();
        }
        match Self::load(self.path.clone()) {
            Ok(fresh) => fresh.pin().unwrap_or_default().to_string(),
            Err(e) => {
                tracing::warn!("Failed to reload pin store {}: {}", self.path.display(), e);
                self.pin().unwrap_or_default().to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("pinpad-test-{}-{}", name, std::process::id()))
            .join(PinStore::FILE_NAME)
    }

    #[test]
    fn test_static_secret() {
        assert_eq!(StaticSecret::new("1234").stored_pin(), "1234");
        assert_eq!(StaticSecret::default().stored_pin(), "");
    }

    #[test]
    fn test_validate_pin() {
        assert!(validate_pin("0000").is_ok());
        assert!(validate_pin("123").is_err());
        assert!(validate_pin("12345").is_err());
        assert!(validate_pin("12a4").is_err());
        assert!(validate_pin("").is_err());
    }

    #[test]
    fn test_generate_pin_is_valid() {
        for _ in 0..50 {
            let pin = generate_pin();
            assert!(validate_pin(&pin).is_ok(), "generated {:?}", pin);
        }
    }

    #[test]
    fn test_missing_store_reads_empty() {
        let store = PinStore::load(temp_store_path("missing")).unwrap();
        assert_eq!(store.pin(), None);
        assert_eq!(store.stored_pin(), "");
    }

    #[test]
    fn test_store_persists_pin() {
        let path = temp_store_path("persist");
        let mut store = PinStore::load(&path).unwrap();
        store.set_pin("4821").unwrap();
        store.save().unwrap();

        let reloaded = PinStore::load(&path).unwrap();
        assert_eq!(reloaded.stored_pin(), "4821");
        assert_eq!(reloaded.get(STORED_PIN_KEY), Some("4821"));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_set_pin_rejects_invalid() {
        let mut store = PinStore::load(temp_store_path("invalid")).unwrap();
        let result = store.set_pin("12");
        assert!(matches!(result, Err(CoreError::InvalidPin { expected: 4, .. })));
        assert_eq!(store.pin(), None);
    }

    #[test]
    fn test_stored_pin_sees_later_save() {
        let path = temp_store_path("reload");
        let mut first = PinStore::load(&path).unwrap();
        first.set_pin("1111").unwrap();
        first.save().unwrap();

        let reader = PinStore::load(&path).unwrap();
        let mut writer = PinStore::load(&path).unwrap();
        writer.set_pin("2222").unwrap();
        writer.save().unwrap();

        assert_eq!(reader.pin(), Some("1111"));
        assert_eq!(reader.stored_pin(), "2222");

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_stored_pin_unsaved_store_uses_memory() {
        let mut store = PinStore::load(temp_store_path("unsaved")).unwrap();
        store.set_pin("3690").unwrap();
        assert_eq!(store.stored_pin(), "3690");
    }

    #[tokio::test(start_paused = true)]
    async fn test_controller_reads_pin_store_at_evaluation() {
        use crate::controller::PinController;
        use crate::session::RecordingInitiator;
        use crate::types::Digit;
        use std::sync::Arc;
        use std::time::Duration;

        let path = temp_store_path("controller");
        let mut store = PinStore::load(&path).unwrap();
        store.set_pin("1234").unwrap();
        store.save().unwrap();

        let recorder = RecordingInitiator::new();
        let controller = PinController::new(
            "https://example.com/session",
            Arc::new(store),
            Arc::new(recorder.clone()),
        );

        // Pin changed on disk after the screen was opened
        let mut writer = PinStore::load(&path).unwrap();
        writer.set_pin("8642").unwrap();
        writer.save().unwrap();

        for c in "8642".chars() {
            controller.press_digit(Digit::from_char(c).unwrap());
        }
        let settle = Duration::from_millis(crate::DEFAULT_EVALUATION_DELAY_MS + 50);
        tokio::time::sleep(settle).await;

        assert!(controller.render_state().unlocked);
        assert_eq!(recorder.codes(), vec!["8642".to_string()]);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_corrupt_store_is_parse_error() {
        let path = temp_store_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        let result = PinStore::load(&path);
        assert!(matches!(result, Err(CoreError::Parse(_))));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
