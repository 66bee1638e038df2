//! Port traits for host-integration boundaries.
//!
//! These are the only abstractions in the engine. Ports exist for the
//! pieces the host application owns:
//! - Document queries (compendium entries, group members)
//! - The settings store (print defaults, rotation angles)
//! - The output window (print/preview target)
//! - User notifications

mod error;
mod output;
mod settings;
mod store;

pub use error::PortError;
pub use output::{Notifier, OutputPort};
pub use settings::SettingsStore;
pub use store::DocumentStore;

#[cfg(test)]
pub use output::{MockNotifier, MockOutputPort};
#[cfg(test)]
pub use settings::MockSettingsStore;
#[cfg(test)]
pub use store::MockDocumentStore;
