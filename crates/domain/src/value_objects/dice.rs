//! Dice formula value objects, parsing, and average estimation
//!
//! Supports dice formulas like "1d20+5", "2d6-1", "1d100", etc. Printed
//! stat blocks never roll; they show the arithmetic mean of each damage
//! formula, so this module estimates averages instead of rolling.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error when parsing a dice formula
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceParseError {
    /// The formula string is empty
    #[error("Empty dice formula")]
    Empty,
    /// Invalid format - expected XdY or XdY+Z
    #[error("Invalid dice format: {0}")]
    InvalidFormat(String),
    /// Dice count must be at least 1
    #[error("Dice count must be at least 1")]
    InvalidDiceCount,
    /// Die size must be at least 2
    #[error("Die size must be at least 2")]
    InvalidDieSize,
}

/// A parsed single-term dice formula like "2d6+3"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceFormula {
    /// Number of dice to roll (X in XdY)
    pub dice_count: u8,
    /// Size of each die (Y in XdY)
    pub die_size: u8,
    /// Modifier to add/subtract after rolling (+Z or -Z)
    pub modifier: i32,
}

impl DiceFormula {
    /// Create a new dice formula
    pub fn new(dice_count: u8, die_size: u8, modifier: i32) -> Result<Self, DiceParseError> {
        if dice_count == 0 {
            return Err(DiceParseError::InvalidDiceCount);
        }
        if die_size < 2 {
            return Err(DiceParseError::InvalidDieSize);
        }
        Ok(Self {
            dice_count,
            die_size,
            modifier,
        })
    }

    /// Parse a dice formula string like "1d20+5", "2d6-1", "1d100"
    ///
    /// Supported formats:
    /// - "XdY" - X dice of size Y
    /// - "XdY+Z" / "XdY-Z" - with a trailing modifier
    /// - "dY" - 1 die of size Y (shorthand)
    pub fn parse(input: &str) -> Result<Self, DiceParseError> {
        let input = input.trim().to_lowercase();
        if input.is_empty() {
            return Err(DiceParseError::Empty);
        }

        // Find 'd' separator
        let d_pos = input.find('d').ok_or_else(|| {
            DiceParseError::InvalidFormat(format!("Missing 'd' separator in '{}'", input))
        })?;

        // Parse dice count (before 'd')
        let dice_count_str = &input[..d_pos];
        let dice_count: u8 = if dice_count_str.is_empty() {
            1 // "d20" means "1d20"
        } else {
            dice_count_str.parse().map_err(|_| {
                DiceParseError::InvalidFormat(format!("Invalid dice count: '{}'", dice_count_str))
            })?
        };

        if dice_count == 0 {
            return Err(DiceParseError::InvalidDiceCount);
        }

        // Parse die size and modifier (after 'd')
        let after_d = &input[d_pos + 1..];

        let (die_size_str, modifier) = if let Some(plus_pos) = after_d.find('+') {
            let die_str = &after_d[..plus_pos];
            let mod_str = &after_d[plus_pos + 1..];
            let modifier: i32 = mod_str.parse().map_err(|_| {
                DiceParseError::InvalidFormat(format!("Invalid modifier: '+{}'", mod_str))
            })?;
            (die_str, modifier)
        } else if let Some(minus_pos) = after_d.rfind('-') {
            // rfind so a negative modifier value parses its own digits
            if minus_pos == 0 {
                return Err(DiceParseError::InvalidFormat(format!(
                    "Invalid die size: '{}'",
                    after_d
                )));
            }
            let die_str = &after_d[..minus_pos];
            let mod_str = &after_d[minus_pos + 1..];
            let modifier: i32 = mod_str.parse::<i32>().map_err(|_| {
                DiceParseError::InvalidFormat(format!("Invalid modifier: '-{}'", mod_str))
            })?;
            (die_str, -modifier)
        } else {
            (after_d, 0)
        };

        let die_size: u8 = die_size_str.parse().map_err(|_| {
            DiceParseError::InvalidFormat(format!("Invalid die size: '{}'", die_size_str))
        })?;

        if die_size < 2 {
            return Err(DiceParseError::InvalidDieSize);
        }

        Ok(Self {
            dice_count,
            die_size,
            modifier,
        })
    }

    /// Arithmetic mean of this formula, floored.
    pub fn average(&self) -> i32 {
        let dice = self.dice_count as f64 * (self.die_size as f64 + 1.0) / 2.0;
        (dice + self.modifier as f64).floor() as i32
    }

    /// Format as a display string ("2d6+3")
    pub fn display(&self) -> String {
        match self.modifier {
            0 => format!("{}d{}", self.dice_count, self.die_size),
            m if m > 0 => format!("{}d{}+{}", self.dice_count, self.die_size, m),
            m => format!("{}d{}{}", self.dice_count, self.die_size, m),
        }
    }
}

impl fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Estimate the average of a multi-term dice expression.
///
/// Each "NdM" term is replaced with its arithmetic mean (N x (M+1)/2) and
/// the remaining linear expression of signed integers is evaluated. Any
/// term that fails to parse yields an average of 0 for the whole
/// expression rather than an error.
///
/// Examples: "2d6+3" -> 10, "1d8+1d6+2" -> 10, "4" -> 4, "garbage" -> 0.
pub fn dice_average(formula: &str) -> i32 {
    let compact: String = formula.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return 0;
    }

    let mut total = 0.0_f64;
    let mut term = String::new();
    let mut sign = 1.0_f64;
    // Terms are split on top-level +/- signs; leading and doubled signs
    // are folded ("1d8+-1" is a valid substitution result).
    for c in compact.chars() {
        match c {
            '+' | '-' if !term.is_empty() => {
                match term_average(&term) {
                    Some(avg) => total += sign * avg,
                    None => return 0,
                }
                term.clear();
                sign = if c == '-' { -1.0 } else { 1.0 };
            }
            '-' => sign = -sign,
            '+' => {}
            _ => term.push(c),
        }
    }
    match term_average(&term) {
        Some(avg) => total += sign * avg,
        None => return 0,
    }
    total.floor() as i32
}

/// Average of a single term: "NdM", "dM", or a bare integer.
fn term_average(term: &str) -> Option<f64> {
    if term.is_empty() {
        return None;
    }
    if let Some(d_pos) = term.find(['d', 'D']) {
        let count: f64 = if d_pos == 0 {
            1.0
        } else {
            term[..d_pos].parse::<u32>().ok()? as f64
        };
        let size = term[d_pos + 1..].parse::<u32>().ok()?;
        if size < 2 {
            return None;
        }
        Some(count * (size as f64 + 1.0) / 2.0)
    } else {
        term.parse::<i64>().ok().map(|n| n as f64)
    }
}
