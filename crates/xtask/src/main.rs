use std::path::Path;

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("check-docs") => check_docs(args.next().as_deref().unwrap_or("fixtures")),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  check-docs [dir]"),
    }
}

/// Validate that every document fixture parses and carries the fields the
/// extractors key on.
fn check_docs(dir: &str) -> anyhow::Result<()> {
    let dir = Path::new(dir);
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }
    let mut checked = 0usize;
    for entry in std::fs::read_dir(dir).context("reading fixture directory")? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let doc: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        for field in ["name", "type"] {
            if doc.get(field).is_none() {
                anyhow::bail!("{}: missing '{}' field", path.display(), field);
            }
        }
        checked += 1;
    }
    println!("checked {} document fixture(s) in {}", checked, dir.display());
    Ok(())
}
