use serde_json::Value;

/// Recursion bound for the deep search. Model output is untrusted; without a
/// cap a deliberately nested reply could blow the stack.
const MAX_SEARCH_DEPTH: usize = 20;

/// Locate the array of per-day entries inside an arbitrarily shaped parsed
/// value.
///
/// Precedence: the value itself, a `days` property, an `itinerary` property,
/// the first array-valued property in document order, then a bounded
/// depth-first search for the first array whose first element looks like a
/// day. Returns None when nothing qualifies or the found array is empty.
pub fn find_days_array(value: &Value) -> Option<Vec<Value>> {
    let found = locate(value)?;
    if found.is_empty() {
        return None;
    }
    Some(found.to_vec())
}

fn locate(value: &Value) -> Option<&Vec<Value>> {
    if let Value::Array(items) = value {
        return Some(items);
    }
    if let Some(Value::Array(items)) = value.get("days") {
        return Some(items);
    }
    if let Some(Value::Array(items)) = value.get("itinerary") {
        return Some(items);
    }
    if let Value::Object(map) = value {
        for nested in map.values() {
            if let Value::Array(items) = nested {
                return Some(items);
            }
        }
    }
    deep_find(value, 0)
}

fn deep_find(value: &Value, depth: usize) -> Option<&Vec<Value>> {
    if depth >= MAX_SEARCH_DEPTH {
        return None;
    }
    match value {
        Value::Array(items) => {
            if looks_like_days(items) {
                return Some(items);
            }
            items.iter().find_map(|item| deep_find(item, depth + 1))
        }
        Value::Object(map) => map.values().find_map(|nested| deep_find(nested, depth + 1)),
        _ => None,
    }
}

/// A candidate array qualifies as soon as its first element exposes a `day`
/// or `activities` key. Only the first element is checked; malformed model
/// output is already best-effort.
fn looks_like_days(items: &[Value]) -> bool {
    match items.first() {
        Some(Value::Object(first)) => first.contains_key("day") || first.contains_key("activities"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn uses_a_top_level_array_directly() {
        let value = json!([{"day": 1}, {"day": 2}]);
        assert_eq!(find_days_array(&value).unwrap().len(), 2);
    }

    #[test]
    fn prefers_days_over_itinerary() {
        let value = json!({"itinerary": [{"day": 9}], "days": [{"day": 1}]});
        let days = find_days_array(&value).unwrap();
        assert_eq!(days[0]["day"], 1);
    }

    #[test]
    fn falls_back_to_itinerary_property() {
        let value = json!({"days": "not an array", "itinerary": [{"day": 1}]});
        let days = find_days_array(&value).unwrap();
        assert_eq!(days[0]["day"], 1);
    }

    #[test]
    fn takes_first_array_property_in_document_order() {
        let value = json!({"meta": {"k": 1}, "schedule": [{"day": 1}], "other": [{"day": 9}]});
        let days = find_days_array(&value).unwrap();
        assert_eq!(days[0]["day"], 1);
    }

    #[test]
    fn deep_search_finds_nested_day_like_array() {
        let value = json!({"result": {"payload": {"plan": [{"activities": []}]}}});
        let days = find_days_array(&value).unwrap();
        assert_eq!(days.len(), 1);
    }

    #[test]
    fn deep_search_skips_arrays_that_are_not_day_like() {
        let value = json!({"result": {"tags": "x", "inner": {"days": [{"day": 3}]}}});
        // `inner.days` is not reachable by the shallow rules; the deep search
        // must find it while ignoring the scalar sibling.
        let days = find_days_array(&value).unwrap();
        assert_eq!(days[0]["day"], 3);
    }

    #[test]
    fn empty_array_is_rejected() {
        assert!(find_days_array(&json!({"days": []})).is_none());
        assert!(find_days_array(&json!([])).is_none());
    }

    #[test]
    fn scalars_and_flat_objects_are_rejected() {
        assert!(find_days_array(&json!(42)).is_none());
        assert!(find_days_array(&json!({"message": "no structure"})).is_none());
    }

    #[test]
    fn search_depth_is_bounded() {
        let mut value = json!([{"day": 1}]);
        for _ in 0..(MAX_SEARCH_DEPTH + 5) {
            value = json!({"wrap": value});
        }
        assert!(find_days_array(&value).is_none());
    }
}
