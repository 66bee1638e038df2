//! Sheetpress - render printable sheets from host document exports.
//!
//! Usage:
//!   sheetpress <document.json> [--kind character|npc|encounter|party]
//!              [--mode print|preview] [--out sheet.html] [--docs <dir>]

use std::path::PathBuf;
use std::sync::Arc;

use sheetpress_engine::infrastructure::documents::FileDocumentStore;
use sheetpress_engine::infrastructure::output::{FileOutput, LogNotifier};
use sheetpress_engine::infrastructure::settings::JsonSettingsStore;
use sheetpress_engine::PrintService;
use sheetpress_shared::{DocumentKind, HostDocument, PrintMode, SheetKind};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment from the working directory, if present.
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sheetpress=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse(std::env::args().skip(1))?;

    let text = tokio::fs::read_to_string(&args.document).await?;
    let doc = HostDocument::new(serde_json::from_str(&text)?);

    let kind = args.kind.unwrap_or_else(|| default_kind(&doc));
    let docs_dir = args
        .docs
        .clone()
        .or_else(|| args.document.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    let settings_path = std::env::var("SHEETPRESS_SETTINGS")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("sheetpress-settings.json"));

    tracing::info!(document = %args.document.display(), kind = %kind, "starting sheetpress");

    let store = FileDocumentStore::load(&docs_dir).await?;
    let service = PrintService::new(
        Arc::new(store),
        Arc::new(JsonSettingsStore::new(settings_path)),
        Arc::new(FileOutput::new(&args.out)),
        Arc::new(LogNotifier),
    );

    service.print(&doc, kind, args.mode, None).await?;
    Ok(())
}

fn default_kind(doc: &HostDocument) -> SheetKind {
    match doc.kind() {
        DocumentKind::Npc => SheetKind::Npc,
        DocumentKind::Group => SheetKind::EncounterGroup,
        _ => SheetKind::Character,
    }
}

struct Args {
    document: PathBuf,
    kind: Option<SheetKind>,
    mode: PrintMode,
    out: PathBuf,
    docs: Option<PathBuf>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let mut document = None;
        let mut kind = None;
        let mut mode = PrintMode::Preview;
        let mut out = PathBuf::from("sheet.html");
        let mut docs = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--kind" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--kind needs a value"))?;
                    kind = Some(match value.as_str() {
                        "character" => SheetKind::Character,
                        "npc" => SheetKind::Npc,
                        "encounter" => SheetKind::EncounterGroup,
                        "party" => SheetKind::PartySummary,
                        other => anyhow::bail!("unknown kind '{}'", other),
                    });
                }
                "--mode" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--mode needs a value"))?;
                    mode = match value.as_str() {
                        "print" => PrintMode::Print,
                        "preview" => PrintMode::Preview,
                        other => anyhow::bail!("unknown mode '{}'", other),
                    };
                }
                "--out" => {
                    out = args
                        .next()
                        .map(PathBuf::from)
                        .ok_or_else(|| anyhow::anyhow!("--out needs a value"))?;
                }
                "--docs" => {
                    docs = Some(
                        args.next()
                            .map(PathBuf::from)
                            .ok_or_else(|| anyhow::anyhow!("--docs needs a value"))?,
                    );
                }
                other if document.is_none() && !other.starts_with("--") => {
                    document = Some(PathBuf::from(other));
                }
                other => anyhow::bail!("unexpected argument '{}'", other),
            }
        }

        Ok(Self {
            document: document
                .ok_or_else(|| anyhow::anyhow!("usage: sheetpress <document.json> [options]"))?,
            kind,
            mode,
            out,
            docs,
        })
    }
}
