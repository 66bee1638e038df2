//! Shape normalizers for version-drifting host collections
//!
//! The host's schema changed its collection representations across
//! versions: the same logical field may arrive as a keyed object, an
//! array (the serialized form of its map/set collections), or a plain
//! scalar. These functions collapse every form into one canonical shape
//! at the boundary so no extractor ever branches on representation.
//!
//! No error is raised for absent input - an empty sequence is returned.

use serde_json::Value;

/// Collapse a map-shaped value into an ordered sequence of its values.
///
/// - JSON object: values in key order
/// - JSON array: items in array order
/// - any other non-null value: a single-element sequence
/// - null or absent: empty
pub fn collection_values(value: Option<&Value>) -> Vec<Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Object(map)) => map.values().cloned().collect(),
        Some(Value::Array(items)) => items.clone(),
        Some(other) => vec![other.clone()],
    }
}

/// Extract the first element from a set-or-array union, or pass a scalar
/// through unchanged.
pub fn first_entry(value: Option<&Value>) -> Option<Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => items.first().cloned(),
        Some(other) => Some(other.clone()),
    }
}

/// Flatten a set-or-array union into a plain ordered list.
pub fn entry_list(value: Option<&Value>) -> Vec<Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.clone(),
        Some(other) => vec![other.clone()],
    }
}

/// [`entry_list`] narrowed to display strings; non-string entries are
/// rendered through their JSON display form.
pub fn string_list(value: Option<&Value>) -> Vec<String> {
    entry_list(value)
        .into_iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_values_from_object() {
        let v = json!({"b": 2, "a": 1});
        // serde_json maps iterate in key order
        assert_eq!(collection_values(Some(&v)), vec![json!(1), json!(2)]);
    }

    #[test]
    fn test_collection_values_from_array() {
        let v = json!([3, 1, 2]);
        assert_eq!(collection_values(Some(&v)), vec![json!(3), json!(1), json!(2)]);
    }

    #[test]
    fn test_collection_values_from_scalar() {
        let v = json!("fire");
        assert_eq!(collection_values(Some(&v)), vec![json!("fire")]);
    }

    #[test]
    fn test_collection_values_absent_is_empty() {
        assert!(collection_values(None).is_empty());
        assert!(collection_values(Some(&Value::Null)).is_empty());
    }

    #[test]
    fn test_first_entry_from_array() {
        let v = json!(["cold", "fire"]);
        assert_eq!(first_entry(Some(&v)), Some(json!("cold")));
    }

    #[test]
    fn test_first_entry_scalar_passes_through() {
        let v = json!(42);
        assert_eq!(first_entry(Some(&v)), Some(json!(42)));
    }

    #[test]
    fn test_first_entry_empty_array() {
        let v = json!([]);
        assert_eq!(first_entry(Some(&v)), None);
        assert_eq!(first_entry(None), None);
    }

    #[test]
    fn test_string_list_filters_non_strings() {
        let v = json!(["fire", 7, {"nested": true}]);
        assert_eq!(string_list(Some(&v)), vec!["fire".to_string(), "7".to_string()]);
    }
}
