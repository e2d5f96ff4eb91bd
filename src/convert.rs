use crate::error::FormatError;
use crate::model::JsonValue;

/// Converts a `serde_json::Value` into the formatter's own value tree.
///
/// This is the bridge that lets any `T: serde::Serialize` be formatted
/// directly. Object member order follows the source value's iteration
/// order. The depth limit guards against pathological nesting.
pub(crate) fn from_serde_value(
    element: &serde_json::Value,
    recursion_limit: usize,
) -> Result<JsonValue, FormatError> {
    if recursion_limit == 0 {
        return Err(FormatError::parse(
            "depth limit exceeded - possible circular reference",
            None,
        ));
    }

    let converted = match element {
        serde_json::Value::Null => JsonValue::Null,
        serde_json::Value::Bool(val) => JsonValue::Bool(*val),
        serde_json::Value::Number(num) => JsonValue::Number(num.to_string()),
        serde_json::Value::String(val) => JsonValue::String(val.clone()),
        serde_json::Value::Array(items) => {
            let mut children = Vec::with_capacity(items.len());
            for item in items {
                children.push(from_serde_value(item, recursion_limit - 1)?);
            }
            JsonValue::Array(children)
        }
        serde_json::Value::Object(map) => {
            let mut members = Vec::with_capacity(map.len());
            for (key, value) in map {
                members.push((key.clone(), from_serde_value(value, recursion_limit - 1)?));
            }
            JsonValue::Object(members)
        }
    };
    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_scalars_and_containers() {
        let source = serde_json::json!({"a": [1, "x", null], "b": true});
        let value = from_serde_value(&source, 64).unwrap();
        assert!(value.get("a").is_some_and(JsonValue::is_array));
        assert_eq!(value.get("b"), Some(&JsonValue::Bool(true)));
    }

    #[test]
    fn depth_limit_stops_runaway_nesting() {
        let mut source = serde_json::json!(1);
        for _ in 0..10 {
            source = serde_json::json!([source]);
        }
        assert!(from_serde_value(&source, 5).is_err());
    }
}
