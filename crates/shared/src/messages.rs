//! Cross-client message types on the module-scoped channel
//!
//! One outbound/inbound event exists: a rotate instruction addressed to a
//! set of user ids. Only clients whose user id is listed and who are not
//! in the privileged GM role act on it.
//!
//! ## Versioning Policy
//!
//! - New variants can be added at the end (forward compatible)
//! - Unknown variants deserialize to `Unknown` for forward compatibility

use serde::{Deserialize, Serialize};

/// Rotation scope carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationMode {
    /// Rotate every rotatable window
    All,
    /// Rotate only the currently focused window
    Current,
}

/// Rotation direction carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationDir {
    Cw,
    Ccw,
}

/// The four window rotation angles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationAngle {
    #[default]
    #[serde(rename = "0")]
    Deg0,
    #[serde(rename = "90")]
    Deg90,
    #[serde(rename = "180")]
    Deg180,
    #[serde(rename = "270")]
    Deg270,
}

impl RotationAngle {
    /// Angle in degrees.
    pub fn degrees(&self) -> u16 {
        match self {
            RotationAngle::Deg0 => 0,
            RotationAngle::Deg90 => 90,
            RotationAngle::Deg180 => 180,
            RotationAngle::Deg270 => 270,
        }
    }

    /// Next angle clockwise.
    pub fn clockwise(&self) -> Self {
        match self {
            RotationAngle::Deg0 => RotationAngle::Deg90,
            RotationAngle::Deg90 => RotationAngle::Deg180,
            RotationAngle::Deg180 => RotationAngle::Deg270,
            RotationAngle::Deg270 => RotationAngle::Deg0,
        }
    }

    /// Next angle counter-clockwise.
    pub fn counter_clockwise(&self) -> Self {
        match self {
            RotationAngle::Deg0 => RotationAngle::Deg270,
            RotationAngle::Deg90 => RotationAngle::Deg0,
            RotationAngle::Deg180 => RotationAngle::Deg90,
            RotationAngle::Deg270 => RotationAngle::Deg180,
        }
    }

    /// Step in the given wire direction.
    pub fn step(&self, dir: RotationDir) -> Self {
        match dir {
            RotationDir::Cw => self.clockwise(),
            RotationDir::Ccw => self.counter_clockwise(),
        }
    }
}

/// Messages exchanged on the module channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ModuleMessage {
    /// Rotate the addressed clients' windows
    #[serde(rename_all = "camelCase")]
    Rotate {
        user_ids: Vec<String>,
        mode: RotationMode,
        dir: RotationDir,
    },
    /// Unknown action for forward compatibility
    #[serde(other)]
    Unknown,
}

impl ModuleMessage {
    /// Whether the receiving client should act on this message.
    pub fn addressed_to(&self, user_id: &str, is_gm: bool) -> bool {
        match self {
            ModuleMessage::Rotate { user_ids, .. } => {
                !is_gm && user_ids.iter().any(|id| id == user_id)
            }
            ModuleMessage::Unknown => false,
        }
    }
}
