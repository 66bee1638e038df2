//! Window rotation for touchscreen tables.
//!
//! A settings-driven finite state of four angles. The last angle of each
//! rotatable window persists in the client-local store under a derived
//! stable identity, and inbound rotate messages apply only to addressed,
//! non-GM clients.

use std::sync::Arc;

use sheetpress_shared::{ModuleMessage, RotationAngle, RotationDir, RotationMode};

use crate::infrastructure::ports::{PortError, SettingsStore};

/// Derive the stable identity a window's angle persists under:
/// document UUID, else compendium-pack identity, else the window's own id.
pub fn derive_window_key(
    document_uuid: Option<&str>,
    pack: Option<&str>,
    window_id: &str,
) -> String {
    document_uuid
        .filter(|uuid| !uuid.is_empty())
        .or_else(|| pack.filter(|pack| !pack.is_empty()))
        .unwrap_or(window_id)
        .to_string()
}

/// Rotation state machine over the settings store.
pub struct RotationService {
    settings: Arc<dyn SettingsStore>,
}

impl RotationService {
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self { settings }
    }

    /// The persisted angle for a window, defaulting to 0 degrees.
    pub async fn current_angle(&self, window_key: &str) -> RotationAngle {
        match self.settings.rotation_angle(window_key).await {
            Ok(angle) => angle.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(window = %window_key, error = %e, "could not read rotation angle");
                RotationAngle::default()
            }
        }
    }

    /// Step a window's angle and persist the result.
    pub async fn rotate(
        &self,
        window_key: &str,
        dir: RotationDir,
    ) -> Result<RotationAngle, PortError> {
        let next = self.current_angle(window_key).await.step(dir);
        self.settings.save_rotation_angle(window_key, next).await?;
        Ok(next)
    }

    /// Set a window to a fixed angle and persist it.
    pub async fn set_angle(
        &self,
        window_key: &str,
        angle: RotationAngle,
    ) -> Result<RotationAngle, PortError> {
        self.settings.save_rotation_angle(window_key, angle).await?;
        Ok(angle)
    }

    /// Apply an inbound module message for the local client.
    ///
    /// Returns the windows rotated with their new angles; empty when the
    /// message does not address this client (unlisted user id or GM role).
    pub async fn apply_message(
        &self,
        message: &ModuleMessage,
        user_id: &str,
        is_gm: bool,
        open_windows: &[String],
        focused_window: Option<&str>,
    ) -> Result<Vec<(String, RotationAngle)>, PortError> {
        if !message.addressed_to(user_id, is_gm) {
            return Ok(Vec::new());
        }
        let ModuleMessage::Rotate { mode, dir, .. } = message else {
            return Ok(Vec::new());
        };
        let targets: Vec<&String> = match mode {
            RotationMode::All => open_windows.iter().collect(),
            RotationMode::Current => open_windows
                .iter()
                .filter(|key| Some(key.as_str()) == focused_window)
                .collect(),
        };
        let mut rotated = Vec::new();
        for key in targets {
            let angle = self.rotate(key, *dir).await?;
            rotated.push((key.clone(), angle));
        }
        Ok(rotated)
    }
}
