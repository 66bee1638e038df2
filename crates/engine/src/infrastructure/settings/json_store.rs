//! JSON-file settings store.
//!
//! Persists per-kind print defaults and per-window rotation angles to a
//! single JSON file - the client-local key-value store of the host,
//! reduced to a file for the CLI and tests.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sheetpress_shared::{PrintOptions, RotationAngle, SheetKind};
use tokio::sync::Mutex;

use super::super::ports::{PortError, SettingsStore};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SettingsFile {
    print_defaults: BTreeMap<String, PrintOptions>,
    rotation: BTreeMap<String, RotationAngle>,
}

/// File-backed [`SettingsStore`].
pub struct JsonSettingsStore {
    path: PathBuf,
    // Serializes read-modify-write cycles against the backing file.
    write_lock: Mutex<()>,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read(&self) -> Result<SettingsFile, PortError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => serde_json::from_str(&text).map_err(|e| PortError::serialization(e)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SettingsFile::default()),
            Err(e) => Err(PortError::io("read_settings", e)),
        }
    }

    async fn write(&self, file: &SettingsFile) -> Result<(), PortError> {
        let text =
            serde_json::to_string_pretty(file).map_err(|e| PortError::serialization(e))?;
        tokio::fs::write(&self.path, text)
            .await
            .map_err(|e| PortError::io("write_settings", e))
    }
}

#[async_trait]
impl SettingsStore for JsonSettingsStore {
    async fn print_defaults(&self, kind: SheetKind) -> Result<Option<PrintOptions>, PortError> {
        let file = self.read().await?;
        Ok(file.print_defaults.get(kind.settings_key()).cloned())
    }

    async fn save_print_defaults(
        &self,
        kind: SheetKind,
        options: &PrintOptions,
    ) -> Result<(), PortError> {
        let _guard = self.write_lock.lock().await;
        let mut file = self.read().await?;
        file.print_defaults
            .insert(kind.settings_key().to_string(), options.clone());
        self.write(&file).await
    }

    async fn rotation_angle(&self, window_key: &str) -> Result<Option<RotationAngle>, PortError> {
        let file = self.read().await?;
        Ok(file.rotation.get(window_key).copied())
    }

    async fn save_rotation_angle(
        &self,
        window_key: &str,
        angle: RotationAngle,
    ) -> Result<(), PortError> {
        let _guard = self.write_lock.lock().await;
        let mut file = self.read().await?;
        file.rotation.insert(window_key.to_string(), angle);
        self.write(&file).await
    }
}
