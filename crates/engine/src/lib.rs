//! Sheetpress Engine - the print-sheet pipeline.
//!
//! Extraction reads the host's loosely-typed documents into typed sheet
//! records, the view-model layer pre-formats and escapes them, and the
//! renderer binds them to named templates producing self-contained HTML.
//! The orchestrator wires the stages together behind a registry keyed by
//! the host game-system identifier.

pub mod infrastructure;
pub mod use_cases;

#[cfg(test)]
mod e2e_tests;

pub use infrastructure::ports::{
    DocumentStore, Notifier, OutputPort, PortError, SettingsStore,
};
pub use infrastructure::render::{RenderError, TemplateId, TemplateRegistry, ViewModel};
pub use use_cases::print::{
    Dnd5eSheets, PrintError, PrintService, SheetSystem, SheetSystemRegistry,
};
pub use use_cases::rotation::{derive_window_key, RotationService};
