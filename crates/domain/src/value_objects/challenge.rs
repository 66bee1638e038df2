//! Challenge rating and its fixed experience-point mapping

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// XP award for integer challenge ratings 1-30.
/// Index is rating - 1 (so rating 1 = index 0).
const XP_BY_RATING: [u32; 30] = [
    200,    // CR 1
    450,    // CR 2
    700,    // CR 3
    1100,   // CR 4
    1800,   // CR 5
    2300,   // CR 6
    2900,   // CR 7
    3900,   // CR 8
    5000,   // CR 9
    5900,   // CR 10
    7200,   // CR 11
    8400,   // CR 12
    10000,  // CR 13
    11500,  // CR 14
    13000,  // CR 15
    15000,  // CR 16
    18000,  // CR 17
    20000,  // CR 18
    22000,  // CR 19
    25000,  // CR 20
    33000,  // CR 21
    41000,  // CR 22
    50000,  // CR 23
    62000,  // CR 24
    75000,  // CR 25
    90000,  // CR 26
    105000, // CR 27
    120000, // CR 28
    135000, // CR 29
    155000, // CR 30
];

/// Error when parsing a challenge rating string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChallengeParseError {
    /// The rating string is empty
    #[error("Empty challenge rating")]
    Empty,
    /// Not a recognized rating format
    #[error("Invalid challenge rating: {0}")]
    Invalid(String),
}

/// A creature's challenge rating: 0, one of the fractions 1/8, 1/4, 1/2,
/// or an integer 1-30.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChallengeRating(f64);

impl ChallengeRating {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Parse "5", "1/8", or "0.125".
    pub fn parse(input: &str) -> Result<Self, ChallengeParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ChallengeParseError::Empty);
        }
        if let Some((num, den)) = input.split_once('/') {
            let num: f64 = num
                .trim()
                .parse()
                .map_err(|_| ChallengeParseError::Invalid(input.to_string()))?;
            let den: f64 = den
                .trim()
                .parse()
                .map_err(|_| ChallengeParseError::Invalid(input.to_string()))?;
            if den == 0.0 {
                return Err(ChallengeParseError::Invalid(input.to_string()));
            }
            return Ok(Self(num / den));
        }
        input
            .parse::<f64>()
            .map(Self)
            .map_err(|_| ChallengeParseError::Invalid(input.to_string()))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Experience points for this rating via the fixed lookup table.
    ///
    /// Fractional ratings map to fixed small values; integer ratings 1-30
    /// map to a monotonically increasing table. An unrecognized rating
    /// yields 0 rather than an error.
    pub fn experience_points(&self) -> u32 {
        if self.0 == 0.0 {
            return 10;
        }
        if (self.0 - 0.125).abs() < f64::EPSILON {
            return 25;
        }
        if (self.0 - 0.25).abs() < f64::EPSILON {
            return 50;
        }
        if (self.0 - 0.5).abs() < f64::EPSILON {
            return 100;
        }
        if self.0.fract() == 0.0 && self.0 >= 1.0 && self.0 <= 30.0 {
            return XP_BY_RATING[(self.0 as usize) - 1];
        }
        0
    }

    /// Default proficiency bonus when the document carries none:
    /// floor(max(rating, 1) / 4) + 2.
    pub fn proficiency_bonus(&self) -> i32 {
        let rating = self.0.max(1.0);
        (rating / 4.0).floor() as i32 + 2
    }

    /// Display label, using fraction notation for the sub-1 ratings.
    pub fn label(&self) -> String {
        if (self.0 - 0.125).abs() < f64::EPSILON {
            "1/8".to_string()
        } else if (self.0 - 0.25).abs() < f64::EPSILON {
            "1/4".to_string()
        } else if (self.0 - 0.5).abs() < f64::EPSILON {
            "1/2".to_string()
        } else if self.0.fract() == 0.0 {
            format!("{}", self.0 as i64)
        } else {
            format!("{}", self.0)
        }
    }
}

impl fmt::Display for ChallengeRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractional_xp() {
        assert_eq!(ChallengeRating::new(0.0).experience_points(), 10);
        assert_eq!(ChallengeRating::new(0.125).experience_points(), 25);
        assert_eq!(ChallengeRating::new(0.25).experience_points(), 50);
        assert_eq!(ChallengeRating::new(0.5).experience_points(), 100);
    }

    #[test]
    fn test_integer_xp() {
        assert_eq!(ChallengeRating::new(1.0).experience_points(), 200);
        assert_eq!(ChallengeRating::new(5.0).experience_points(), 1800);
        assert_eq!(ChallengeRating::new(30.0).experience_points(), 155000);
    }

    #[test]
    fn test_unrecognized_rating_is_zero_xp() {
        assert_eq!(ChallengeRating::new(0.3).experience_points(), 0);
        assert_eq!(ChallengeRating::new(31.0).experience_points(), 0);
        assert_eq!(ChallengeRating::new(-1.0).experience_points(), 0);
    }

    #[test]
    fn test_xp_table_is_monotone() {
        let mut last = 0;
        for xp in XP_BY_RATING {
            assert!(xp > last);
            last = xp;
        }
    }

    #[test]
    fn test_proficiency_from_rating() {
        assert_eq!(ChallengeRating::new(0.25).proficiency_bonus(), 2);
        assert_eq!(ChallengeRating::new(1.0).proficiency_bonus(), 2);
        assert_eq!(ChallengeRating::new(4.0).proficiency_bonus(), 3);
        assert_eq!(ChallengeRating::new(8.0).proficiency_bonus(), 4);
        assert_eq!(ChallengeRating::new(17.0).proficiency_bonus(), 6);
        assert_eq!(ChallengeRating::new(30.0).proficiency_bonus(), 9);
    }

    #[test]
    fn test_parse_fraction() {
        assert_eq!(ChallengeRating::parse("1/8"), Ok(ChallengeRating::new(0.125)));
        assert_eq!(ChallengeRating::parse("0.25"), Ok(ChallengeRating::new(0.25)));
        assert_eq!(ChallengeRating::parse("5"), Ok(ChallengeRating::new(5.0)));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            ChallengeRating::parse(""),
            Err(ChallengeParseError::Empty)
        ));
        assert!(matches!(
            ChallengeRating::parse("1/0"),
            Err(ChallengeParseError::Invalid(_))
        ));
        assert!(matches!(
            ChallengeRating::parse("boss"),
            Err(ChallengeParseError::Invalid(_))
        ));
    }

    #[test]
    fn test_labels() {
        assert_eq!(ChallengeRating::new(0.125).label(), "1/8");
        assert_eq!(ChallengeRating::new(0.5).label(), "1/2");
        assert_eq!(ChallengeRating::new(12.0).label(), "12");
    }
}
