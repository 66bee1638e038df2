//! Print/preview orchestration.
//!
//! Resolves the extractor/renderer pair for the document's game system,
//! runs the pipeline, wraps the result in a self-contained HTML document,
//! and opens the output window. Pipeline failures surface as one
//! user-visible error notification; a blocked output window surfaces as a
//! warning. Nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;
use sheetpress_shared::{HostDocument, PrintMode, PrintOptions, SheetKind};

use super::extract::{
    extract_character, extract_encounter, extract_npc, extract_party, ExtractError,
};
use super::view_model::{
    character_view_model, encounter_vm_with_members, npc_view_model, party_view_model,
    ViewModel,
};
use crate::infrastructure::ports::{
    DocumentStore, Notifier, OutputPort, PortError, SettingsStore,
};
use crate::infrastructure::render::{
    wrap_document, RenderError, TemplateId, TemplateRegistry,
};

/// Render-settling delay before the print dialog fires.
pub const PRINT_SETTLE: Duration = Duration::from_millis(400);
/// Settling delay for preview windows (no dialog).
pub const PREVIEW_SETTLE: Duration = Duration::from_millis(100);

fn settle_delay(mode: PrintMode) -> Duration {
    match mode {
        PrintMode::Print => PRINT_SETTLE,
        PrintMode::Preview => PREVIEW_SETTLE,
    }
}

/// Errors raised by the print pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    /// No extractor/renderer pair is registered for the active system.
    #[error("No sheet system registered for '{0}'")]
    UnknownSystem(String),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Host API error: {0}")]
    Port(#[from] PortError),
}

/// An extractor/renderer pair keyed by the host game-system identifier.
///
/// The registry dispatches on the document's system id, so additional
/// game systems plug in without touching the orchestrator.
#[async_trait]
pub trait SheetSystem: Send + Sync {
    /// The host game-system identifier this pair handles (e.g. "dnd5e").
    fn system_id(&self) -> &str;

    /// Extract and transform one document into its view model.
    async fn build(
        &self,
        doc: &HostDocument,
        kind: SheetKind,
        options: &PrintOptions,
        store: &dyn DocumentStore,
    ) -> Result<ViewModel, PrintError>;
}

/// The built-in D&D 5e extractor/renderer pair.
pub struct Dnd5eSheets;

#[async_trait]
impl SheetSystem for Dnd5eSheets {
    fn system_id(&self) -> &str {
        "dnd5e"
    }

    async fn build(
        &self,
        doc: &HostDocument,
        kind: SheetKind,
        options: &PrintOptions,
        store: &dyn DocumentStore,
    ) -> Result<ViewModel, PrintError> {
        match kind {
            SheetKind::Character => {
                let sheet = extract_character(doc)?;
                Ok(ViewModel::Character(character_view_model(&sheet, options)))
            }
            SheetKind::Npc => {
                let sheet = extract_npc(doc)?;
                Ok(ViewModel::Npc(npc_view_model(&sheet, options)))
            }
            SheetKind::EncounterGroup => {
                let sheet = extract_encounter(doc, store).await?;
                // Each member renders independently; the parallel map
                // reassembles results in original member order.
                let members = join_all(
                    sheet
                        .members
                        .iter()
                        .map(|member| async move { npc_view_model(member, options) }),
                )
                .await;
                Ok(ViewModel::Encounter(encounter_vm_with_members(
                    &sheet, members,
                )))
            }
            SheetKind::PartySummary => {
                let sheet = extract_party(doc, store).await?;
                Ok(ViewModel::Party(party_view_model(&sheet, options)))
            }
        }
    }
}

/// Registry of sheet systems.
pub struct SheetSystemRegistry {
    systems: Vec<Arc<dyn SheetSystem>>,
}

impl Default for SheetSystemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetSystemRegistry {
    /// Create a registry with the built-in systems.
    pub fn new() -> Self {
        let mut registry = Self {
            systems: Vec::new(),
        };
        registry.register(Arc::new(Dnd5eSheets));
        registry
    }

    /// Create an empty registry without built-in systems.
    pub fn empty() -> Self {
        Self {
            systems: Vec::new(),
        }
    }

    /// Register a sheet system.
    pub fn register(&mut self, system: Arc<dyn SheetSystem>) {
        self.systems.push(system);
    }

    /// Get a sheet system by the host game-system id.
    pub fn get(&self, system_id: &str) -> Option<Arc<dyn SheetSystem>> {
        self.systems
            .iter()
            .find(|s| s.system_id() == system_id)
            .cloned()
    }

    /// List all registered system ids.
    pub fn list_systems(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.system_id()).collect()
    }
}

/// The print/preview orchestrator.
pub struct PrintService {
    registry: SheetSystemRegistry,
    templates: TemplateRegistry,
    store: Arc<dyn DocumentStore>,
    settings: Arc<dyn SettingsStore>,
    output: Arc<dyn OutputPort>,
    notifier: Arc<dyn Notifier>,
}

impl PrintService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        settings: Arc<dyn SettingsStore>,
        output: Arc<dyn OutputPort>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let templates = TemplateRegistry::new();
        templates.preload();
        Self {
            registry: SheetSystemRegistry::new(),
            templates,
            store,
            settings,
            output,
            notifier,
        }
    }

    /// Replace the registry (tests and host integrations with extra
    /// systems).
    pub fn with_registry(mut self, registry: SheetSystemRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Run one print/preview action.
    ///
    /// Explicit options win; otherwise the persisted per-kind defaults
    /// apply, falling back to the built-in defaults.
    pub async fn print(
        &self,
        doc: &HostDocument,
        kind: SheetKind,
        mode: PrintMode,
        options: Option<PrintOptions>,
    ) -> Result<(), PrintError> {
        match self.run(doc, kind, mode, options).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.notifier
                    .error(&format!("Could not produce {}: {}", kind.label(), e));
                Err(e)
            }
        }
    }

    /// Persist print options as the defaults for one output kind.
    pub async fn save_defaults(
        &self,
        kind: SheetKind,
        options: &PrintOptions,
    ) -> Result<(), PrintError> {
        self.settings.save_print_defaults(kind, options).await?;
        Ok(())
    }

    async fn run(
        &self,
        doc: &HostDocument,
        kind: SheetKind,
        mode: PrintMode,
        options: Option<PrintOptions>,
    ) -> Result<(), PrintError> {
        let system_id = doc.system_id();
        let system = self
            .registry
            .get(system_id)
            .ok_or_else(|| PrintError::UnknownSystem(system_id.to_string()))?;

        let options = match options {
            Some(options) => options,
            None => self.resolve_defaults(kind).await,
        };

        tracing::debug!(kind = %kind, mode = ?mode, document = %doc.name(), "building sheet");
        let vm = system.build(doc, kind, &options, self.store.as_ref()).await?;
        let body = self.templates.render(TemplateId::for_kind(kind), &vm)?;
        let html = wrap_document(doc.name(), &body, options.paper);

        // Let the rendered window settle before the print dialog fires.
        tokio::time::sleep(settle_delay(mode)).await;
        match self.output.open(&html, mode).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_blocked() => {
                self.notifier.warn(
                    "The output window was blocked. Allow pop-ups for this site and try again.",
                );
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn resolve_defaults(&self, kind: SheetKind) -> PrintOptions {
        match self.settings.print_defaults(kind).await {
            Ok(Some(options)) => options,
            Ok(None) => PrintOptions::default(),
            Err(e) => {
                tracing::warn!(error = %e, "could not load print defaults, using built-ins");
                PrintOptions::default()
            }
        }
    }
}
