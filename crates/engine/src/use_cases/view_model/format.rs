//! Display formatting and escaping helpers.

use sheetpress_domain::{LimitedUses, ProficiencyTier};

/// HTML-escape a free-text field. Applied exactly once per field, in the
/// transformer - the renderer never escapes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const KEYWORD_ICONS: [(&str, &str); 2] = [
    ("disadvantage", "<span class=\"kw kw-disadvantage\">&#9660;</span>"),
    ("advantage", "<span class=\"kw kw-advantage\">&#9650;</span>"),
];

/// Annotate the recognized rule keywords with inline iconography.
///
/// Input must already be escaped; the substituted markup itself must not
/// pass through [`escape_html`] afterwards or the icons would render as
/// literal text. Single-pass so "disadvantage" is never split by the
/// "advantage" substitution and substituted markup is never re-scanned.
pub fn decorate_keywords(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut rest = escaped;
    'scan: while !rest.is_empty() {
        for (word, icon) in KEYWORD_ICONS {
            if let Some(matched) = rest.get(..word.len()) {
                if matched.eq_ignore_ascii_case(word) {
                    out.push_str(matched);
                    out.push(' ');
                    out.push_str(icon);
                    rest = &rest[word.len()..];
                    continue 'scan;
                }
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }
    out
}

/// Escape then decorate - the only valid composition order.
pub fn rich_text(input: &str) -> String {
    decorate_keywords(&escape_html(input))
}

/// Format a signed modifier ("+3", "&minus;2", "+0").
pub fn signed(value: i32) -> String {
    if value < 0 {
        format!("\u{2212}{}", -value)
    } else {
        format!("+{}", value)
    }
}

/// Thousands-separated integer ("1,800").
pub fn grouped(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Glyph column for a proficiency tier.
pub fn proficiency_glyph(tier: ProficiencyTier) -> &'static str {
    match tier {
        ProficiencyTier::None => "",
        ProficiencyTier::Half => "\u{25d0}",
        ProficiencyTier::Proficient => "\u{25cf}",
        ProficiencyTier::Expert => "\u{25c6}",
    }
}

/// "2/3 /Long Rest" style annotation for a limited-use counter.
pub fn uses_annotation(uses: &LimitedUses) -> String {
    match uses.recovery {
        Some(recovery) => format!("{}/{} /{}", uses.current, uses.max, recovery.label()),
        None => format!("{}/{}", uses.current, uses.max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetpress_domain::RecoveryPeriod;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_html("\"quoted\""), "&quot;quoted&quot;");
    }

    #[test]
    fn test_escape_is_single_pass() {
        // Escaping once, never twice: the transformer owns the only call.
        let once = escape_html("Fire & Ice");
        assert_eq!(once, "Fire &amp; Ice");
        assert!(!once.contains("&amp;amp;"));
    }

    #[test]
    fn test_decorate_after_escape_keeps_markup() {
        let rich = rich_text("attacks with advantage & speed");
        assert!(rich.contains("kw-advantage"));
        assert!(rich.contains("&amp;"));
        // The substituted span must survive un-escaped
        assert!(rich.contains("<span"));
    }

    #[test]
    fn test_decoration_is_case_insensitive() {
        let rich = rich_text("Advantage on saving throws");
        assert!(rich.contains("Advantage <span"));
    }

    #[test]
    fn test_disadvantage_decoration() {
        let rich = rich_text("imposes disadvantage");
        assert!(rich.contains("kw-disadvantage"));
        // "disadvantage" is not also matched as "advantage"
        assert!(!rich.contains("kw-advantage\""));
    }

    #[test]
    fn test_signed() {
        assert_eq!(signed(3), "+3");
        assert_eq!(signed(0), "+0");
        assert_eq!(signed(-2), "\u{2212}2");
    }

    #[test]
    fn test_grouped() {
        assert_eq!(grouped(25), "25");
        assert_eq!(grouped(1800), "1,800");
        assert_eq!(grouped(155000), "155,000");
    }

    #[test]
    fn test_uses_annotation() {
        let uses = LimitedUses {
            current: 2,
            max: 3,
            recovery: Some(RecoveryPeriod::LongRest),
        };
        assert_eq!(uses_annotation(&uses), "2/3 /Long Rest");
        let bare = LimitedUses {
            current: 1,
            max: 1,
            recovery: None,
        };
        assert_eq!(uses_annotation(&bare), "1/1");
    }
}
