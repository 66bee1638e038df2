//! Free-text cleanup for host descriptions.
//!
//! Host descriptions embed cross-reference placeholders, roll-data
//! lookups, inline roll expressions, and HTML markup. This step resolves
//! what it can and strips the rest, leaving plain display text. It runs
//! before any view-model escaping.

use std::sync::LazyLock;

use regex_lite::Regex;
use sheetpress_shared::HostDocument;

static UUID_LABELED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@UUID\[([^\]]*)\]\{([^}]*)\}").expect("static pattern")
});
static UUID_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@UUID\[([^\]]*)\]").expect("static pattern"));
static LOOKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[/?lookup\s+@?([A-Za-z0-9_.]+)\s*\]\]").expect("static pattern")
});
static INLINE_ROLL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[/?[a-z]*\s*([^\[\]]*)\]\]").expect("static pattern")
});
static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("static pattern"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static pattern"));

/// Resolve placeholders against the document and strip all markup.
///
/// - `@UUID[...]{Label}` becomes `Label`
/// - `@UUID[Compendium...Name]` without a label becomes its last path segment
/// - `[[lookup @path]]` resolves against the document's roll data,
///   falling back to an empty string when unresolved
/// - remaining `[[...]]` roll expressions reduce to their formula text
/// - HTML tags are removed and whitespace collapsed
pub fn clean_text(raw: &str, doc: &HostDocument) -> String {
    let text = UUID_LABELED.replace_all(raw, "$2");
    let text = UUID_BARE.replace_all(&text, |caps: &regex_lite::Captures<'_>| {
        let path = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        path.rsplit('.').next().unwrap_or("").to_string()
    });
    let text = LOOKUP.replace_all(&text, |caps: &regex_lite::Captures<'_>| {
        let path = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        doc.roll_data(path).unwrap_or_default()
    });
    let text = INLINE_ROLL.replace_all(&text, |caps: &regex_lite::Captures<'_>| {
        caps.get(1).map(|m| m.as_str().trim().to_string()).unwrap_or_default()
    });
    let text = MARKUP.replace_all(&text, " ");
    let text = text.replace("&nbsp;", " ");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}
