//! Settings-store port - persisted print defaults and rotation angles.

use async_trait::async_trait;
use sheetpress_shared::{PrintOptions, RotationAngle, SheetKind};

use super::error::PortError;

/// The host's settings store plus the client-local key-value store.
///
/// Print defaults are keyed by output kind; rotation angles are keyed by
/// a derived stable window identity (document UUID, else compendium-pack
/// identity, else window identity).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn print_defaults(&self, kind: SheetKind) -> Result<Option<PrintOptions>, PortError>;

    async fn save_print_defaults(
        &self,
        kind: SheetKind,
        options: &PrintOptions,
    ) -> Result<(), PortError>;

    async fn rotation_angle(&self, window_key: &str) -> Result<Option<RotationAngle>, PortError>;

    async fn save_rotation_angle(
        &self,
        window_key: &str,
        angle: RotationAngle,
    ) -> Result<(), PortError>;
}
