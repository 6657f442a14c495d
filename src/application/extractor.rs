// Shape-agnostic extraction over untrusted JSON documents
use crate::domain::station::{StationKey, ValuePath};
use serde_json::Value;

/// Subtrees nested deeper than this are treated as not found.
pub const MAX_DEPTH: usize = 128;

const SERIES_FIELD: &str = "series";

/// First mapping, in depth-first pre-order, whose key field equals the target.
pub fn find_record<'a>(document: &'a Value, key: &StationKey) -> Option<&'a Value> {
    find_record_at(document, key, 0)
}

fn find_record_at<'a>(node: &'a Value, key: &StationKey, depth: usize) -> Option<&'a Value> {
    if depth > MAX_DEPTH {
        return None;
    }

    match node {
        Value::Array(items) => items
            .iter()
            .find_map(|item| find_record_at(item, key, depth + 1)),
        Value::Object(map) => {
            if map.get(&key.field).is_some_and(|candidate| key.matches(candidate)) {
                return Some(node);
            }
            map.values()
                .find_map(|child| find_record_at(child, key, depth + 1))
        }
        _ => None,
    }
}

/// Follows the path from a record to its reading. Any missing segment means
/// there is nothing to show.
pub fn resolve_path<'a>(record: &'a Value, path: &ValuePath) -> Option<&'a Value> {
    path.segments()
        .iter()
        .try_fold(record, |node, segment| node.as_object()?.get(segment))
}

/// The history series of a document, or an empty slice.
pub fn find_series(document: &Value) -> &[Value] {
    find_series_at(document, 0)
}

fn find_series_at(node: &Value, depth: usize) -> &[Value] {
    if depth > MAX_DEPTH {
        return &[];
    }

    match node {
        Value::Object(map) => {
            match map.get(SERIES_FIELD) {
                Some(Value::Array(series)) => return series,
                Some(Value::Object(inner)) => {
                    if let Some(series) = inner.values().find_map(Value::as_array) {
                        return series;
                    }
                }
                _ => {}
            }
            first_non_empty(map.values(), depth)
        }
        Value::Array(items) => first_non_empty(items.iter(), depth),
        _ => &[],
    }
}

fn first_non_empty<'a>(children: impl Iterator<Item = &'a Value>, depth: usize) -> &'a [Value] {
    children
        .map(|child| find_series_at(child, depth + 1))
        .find(|series| !series.is_empty())
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hoe() -> StationKey {
        StationKey::new("id", "HOE")
    }

    #[test]
    fn test_finds_record_at_any_depth() {
        let flat = json!({"id": "HOE", "current": {"value": 12}});
        assert_eq!(find_record(&flat, &hoe()), Some(&flat));

        let nested = json!({
            "stations": [
                {"id": "BAS", "current": {"value": 3}},
                {"group": {"members": [[{"id": "HOE", "current": {"value": 44}}]]}}
            ]
        });
        let record = find_record(&nested, &hoe()).unwrap();
        assert_eq!(record["current"]["value"], json!(44));
    }

    #[test]
    fn test_missing_record_is_not_an_error() {
        let doc = json!({"stations": [{"id": "BAS"}, 7, null, "HOE", {"name": "HOE"}]});
        assert_eq!(find_record(&doc, &hoe()), None);
        assert_eq!(find_record(&Value::Null, &hoe()), None);
        assert_eq!(find_record(&json!("HOE"), &hoe()), None);
    }

    #[test]
    fn test_first_match_in_pre_order_wins() {
        let doc = json!({
            "a": {"inner": {"id": "HOE", "rank": "deep-left"}},
            "b": {"id": "HOE", "rank": "shallow-right"}
        });
        assert_eq!(find_record(&doc, &hoe()).unwrap()["rank"], json!("deep-left"));

        // A matching node shadows matches among its own children
        let doc = json!([{"id": "HOE", "rank": "outer", "child": {"id": "HOE", "rank": "inner"}}]);
        assert_eq!(find_record(&doc, &hoe()).unwrap()["rank"], json!("outer"));
    }

    #[test]
    fn test_lookup_by_name_field() {
        let doc = json!({"data": [{"name": "Hörnli", "current": {"value": "8.3"}}]});
        let key = StationKey::new("name", "Hörnli");
        assert!(find_record(&doc, &key).is_some());
    }

    #[test]
    fn test_depth_guard() {
        let mut doc = json!({"id": "HOE"});
        for _ in 0..(MAX_DEPTH + 10) {
            doc = json!([doc]);
        }
        assert_eq!(find_record(&doc, &hoe()), None);

        let mut shallow = json!({"id": "HOE"});
        for _ in 0..10 {
            shallow = json!({"wrap": shallow});
        }
        assert!(find_record(&shallow, &hoe()).is_some());
    }

    #[test]
    fn test_resolve_path() {
        let record = json!({"id": "HOE", "current": {"value": 12}, "value": 9});
        assert_eq!(resolve_path(&record, &ValuePath::default()), Some(&json!(12)));
        assert_eq!(resolve_path(&record, &ValuePath::new(["value"])), Some(&json!(9)));

        let without_current = json!({"id": "HOE"});
        assert_eq!(resolve_path(&without_current, &ValuePath::default()), None);

        let scalar_current = json!({"id": "HOE", "current": 5});
        assert_eq!(resolve_path(&scalar_current, &ValuePath::default()), None);
    }

    #[test]
    fn test_series_shapes_are_equivalent() {
        let points = json!([[1700000000, 31], [1700000600, 5]]);
        let direct = json!({"series": points.clone()});
        let nested = json!({"series": {"name": "wind", "data": points.clone()}});
        let descendant = json!({"chart": {"meta": 1, "payload": {"series": points.clone()}}});

        let expected = points.as_array().unwrap().as_slice();
        assert_eq!(find_series(&direct), expected);
        assert_eq!(find_series(&nested), expected);
        assert_eq!(find_series(&descendant), expected);
    }

    #[test]
    fn test_series_inside_sequence_and_fallthrough() {
        let doc = json!([{"other": 1}, {"series": {"unit": "km/h"}, "more": {"series": [[1, 2]]}}]);
        assert_eq!(find_series(&doc), &[json!([1, 2])]);
    }

    #[test]
    fn test_direct_empty_series_is_returned() {
        let doc = json!({"series": [], "other": {"series": [[1, 2]]}});
        assert!(find_series(&doc).is_empty());
    }

    #[test]
    fn test_missing_series() {
        assert!(find_series(&json!({})).is_empty());
        assert!(find_series(&json!({"a": "series", "b": [1, 2]})).is_empty());
        assert!(find_series(&Value::Null).is_empty());
    }
}
