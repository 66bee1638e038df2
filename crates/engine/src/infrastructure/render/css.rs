//! Static style sheets injected into the rendered document head.

use sheetpress_shared::PaperSize;

/// Page-size block derived from the selected paper.
pub fn page_css(paper: PaperSize) -> String {
    format!("@page {{ size: {}; margin: 14mm; }}", paper.css_size())
}

/// The sheet stylesheet, shared by all four output kinds.
pub const SHEET_CSS: &str = r#"
* { box-sizing: border-box; }
body {
  font-family: "Bookinsanity", "Georgia", serif;
  color: #1a1a1a;
  margin: 0;
  padding: 0;
  font-size: 10.5pt;
  line-height: 1.35;
}
.sheet { padding: 0.25rem; }
.sheet-header { border-bottom: 2px solid #7a200d; margin-bottom: 0.5rem; }
.sheet-header h1 { margin: 0; font-size: 1.6rem; color: #7a200d; }
.sheet-header .subtitle { font-style: italic; color: #444; }
.portrait { float: right; max-width: 9rem; max-height: 9rem; margin: 0 0 0.5rem 0.5rem; }
section { margin-bottom: 0.6rem; page-break-inside: avoid; }
section > h2 {
  font-size: 1.05rem;
  color: #7a200d;
  border-bottom: 1px solid #c9ad6a;
  margin: 0.4rem 0 0.25rem;
}
section > h3 { font-size: 0.95rem; margin: 0.3rem 0 0.15rem; }
.abilities { display: flex; gap: 0.4rem; text-align: center; }
.ability { border: 1px solid #c9ad6a; border-radius: 4px; padding: 0.25rem 0.4rem; flex: 1; }
.ability .abbr { font-weight: bold; font-size: 0.8rem; }
.ability .mod { font-size: 1.2rem; }
.ability .save { font-size: 0.75rem; color: #555; }
.ability .save.prof { font-weight: bold; color: #1a1a1a; }
.combat-line { display: flex; flex-wrap: wrap; gap: 0.8rem; margin: 0.35rem 0; }
.combat-line .stat b { color: #7a200d; }
table { border-collapse: collapse; width: 100%; }
th { text-align: left; font-size: 0.8rem; color: #7a200d; border-bottom: 1px solid #c9ad6a; }
td { padding: 0.1rem 0.3rem 0.1rem 0; vertical-align: top; }
tr:nth-child(even) td { background: #f6f1e5; }
.skill-glyph { width: 1rem; display: inline-block; }
.entry { margin-bottom: 0.3rem; }
.entry .entry-name { font-weight: bold; font-style: italic; }
.entry .entry-meta { color: #555; font-size: 0.85rem; }
.trait-line b { color: #7a200d; }
.kw { font-size: 0.8em; }
.kw-advantage { color: #2e7d32; }
.kw-disadvantage { color: #b71c1c; }
.slot-line { color: #555; font-size: 0.85rem; }
.member { border-top: 2px solid #7a200d; margin-top: 0.8rem; padding-top: 0.4rem; page-break-inside: avoid; }
.party-member { border: 1px solid #c9ad6a; border-radius: 4px; padding: 0.4rem; margin-bottom: 0.5rem; }
footer { margin-top: 1rem; font-size: 0.7rem; color: #888; text-align: right; }
@media print {
  .sheet { padding: 0; }
}
"#;
