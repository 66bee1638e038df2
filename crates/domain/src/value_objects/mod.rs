//! Value objects for the sheet domain

mod challenge;
mod dice;
mod formula;

pub use challenge::{ChallengeParseError, ChallengeRating};
pub use dice::{dice_average, DiceFormula, DiceParseError};
pub use formula::resolve_placeholders;
