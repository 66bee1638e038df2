//! Formula placeholder resolution
//!
//! Free-text damage/effect formulas may embed an ability-modifier
//! placeholder ("@mod") or a proficiency-bonus placeholder ("@prof").
//! These are textually substituted with the actor's resolved numeric
//! values before display or averaging.

/// Substitute `@mod` and `@prof` placeholders with resolved values.
///
/// Substitution is purely textual; the result may still be a dice
/// expression ("2d6+3") handed to [`crate::dice_average`].
pub fn resolve_placeholders(formula: &str, modifier: i32, prof_bonus: i32) -> String {
    // "@prof" is replaced before "@mod" so neither substitution can see
    // the other's output.
    formula
        .replace("@prof", &prof_bonus.to_string())
        .replace("@mod", &modifier.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_modifier() {
        assert_eq!(resolve_placeholders("1d8+@mod", 3, 2), "1d8+3");
    }

    #[test]
    fn test_substitutes_proficiency() {
        assert_eq!(resolve_placeholders("@prof+@mod", -1, 4), "4+-1");
    }

    #[test]
    fn test_no_placeholders_is_identity() {
        assert_eq!(resolve_placeholders("2d6+3", 5, 2), "2d6+3");
    }

    #[test]
    fn test_repeated_placeholders() {
        assert_eq!(resolve_placeholders("@mod+@mod", 2, 0), "2+2");
    }
}
