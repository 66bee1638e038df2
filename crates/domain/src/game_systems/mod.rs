//! Game system rules backing the extractors.
//!
//! Each supported game system contributes the fixed tables and derivation
//! formulas its documents rely on. Only D&D 5e ships today; the
//! extractor/renderer registry in the engine crate is where additional
//! systems plug in.

pub mod dnd5e;
