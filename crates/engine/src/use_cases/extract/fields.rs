//! Small field-interpretation helpers shared by the extractors.

use serde_json::Value;
use sheetpress_domain::{LimitedUses, RecoveryPeriod};
use sheetpress_shared::{coerce_bool, coerce_i64, first_entry, HostDocument};

/// Interpret a limited-uses block. The counter may carry `value` directly
/// or `spent` against `max`; the recovery period may be a `per` string or
/// a `recovery` list of `{period}` entries.
pub fn limited_uses(block: Option<&Value>) -> Option<LimitedUses> {
    let block = block?;
    let max = coerce_i64(block.get("max")?)? as i32;
    if max <= 0 {
        return None;
    }
    let current = match block.get("value").and_then(coerce_i64) {
        Some(v) => v as i32,
        None => {
            let spent = block.get("spent").and_then(coerce_i64).unwrap_or(0) as i32;
            max - spent
        }
    };
    let period = block
        .get("per")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| {
            first_entry(block.get("recovery"))
                .as_ref()
                .and_then(|entry| entry.get("period"))
                .and_then(Value::as_str)
                .map(str::to_string)
        });
    let recovery = period.and_then(|p| p.parse::<RecoveryPeriod>().ok());
    Some(LimitedUses {
        current,
        max,
        recovery,
    })
}

/// The host marks favorites either as an item flag or an actor-side list;
/// sub-item extraction only sees the flag form.
pub fn is_favorite(item: &HostDocument) -> bool {
    item.raw()
        .get("flags")
        .and_then(|flags| flags.get("favorite"))
        .and_then(coerce_bool)
        .unwrap_or(false)
}

/// First letter upper-cased, rest untouched ("walk" -> "Walk").
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Pull a damage formula out of one damage part, whatever its shape:
/// a bare string, a `[formula, type]` pair, or an object carrying either
/// a custom formula or `number`/`denomination` dice fields.
pub fn damage_part_formula(part: &Value) -> Option<String> {
    match part {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(pair) => pair.first().and_then(Value::as_str).map(str::to_string),
        Value::Object(_) => {
            if let Some(formula) = part
                .get("custom")
                .and_then(|c| c.get("formula"))
                .and_then(Value::as_str)
                .filter(|f| !f.is_empty())
            {
                return Some(formula.to_string());
            }
            if let Some(formula) = part.get("formula").and_then(Value::as_str) {
                if !formula.is_empty() {
                    return Some(formula.to_string());
                }
            }
            let number = part.get("number").and_then(coerce_i64)?;
            let denomination = part.get("denomination").and_then(coerce_i64)?;
            let bonus = part
                .get("bonus")
                .and_then(Value::as_str)
                .filter(|b| !b.is_empty());
            match bonus {
                Some(bonus) => Some(format!("{}d{}+{}", number, denomination, bonus)),
                None => Some(format!("{}d{}", number, denomination)),
            }
        }
        _ => None,
    }
}

/// The damage type of one damage part, when declared.
pub fn damage_part_type(part: &Value) -> Option<String> {
    let declared = match part {
        Value::Array(pair) => pair.get(1).and_then(Value::as_str).map(str::to_string),
        Value::Object(_) => first_entry(part.get("types"))
            .as_ref()
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    };
    declared.filter(|kind| !kind.is_empty())
}
