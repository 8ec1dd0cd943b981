//! Predicate-driven value replacement over JSON object trees.

use std::convert::Infallible;

use serde_json::{Map, Value};

/// Options for [`deep_resolve`].
///
/// `resolve` computes the replacement for every value the predicate selects.
/// With `deep` set, nested plain objects are recursed into instead of being
/// handed to the predicate themselves.
pub struct ResolveOptions<R> {
    pub deep: bool,
    pub resolve: R,
}

impl<R> ResolveOptions<R> {
    pub fn new(resolve: R) -> Self {
        Self {
            deep: false,
            resolve,
        }
    }

    pub fn deep(mut self, deep: bool) -> Self {
        self.deep = deep;
        self
    }
}

/// Returns a transformed copy of `input`.
///
/// For every key, `predicate(value, key)` decides whether the value is
/// replaced by `resolve(value)`. The key set and shape of the result always
/// match the input. The input is never modified.
///
/// Only JSON objects count as plain objects; arrays and scalars are leaves.
pub fn deep_resolve<R, P>(
    input: &Map<String, Value>,
    options: ResolveOptions<R>,
    mut predicate: P,
) -> Map<String, Value>
where
    R: FnMut(&Value) -> Value,
    P: FnMut(&Value, &str) -> bool,
{
    let mut resolve = options.resolve;
    let result = walk::<Infallible, _, _>(
        input,
        options.deep,
        &mut |value: &Value| Ok(resolve(value)),
        &mut |value: &Value, key: &str| Ok(predicate(value, key)),
    );
    match result {
        Ok(map) => map,
        Err(never) => match never {},
    }
}

/// Fallible form of [`deep_resolve`]. The first error raised by the
/// predicate or the resolver is returned as is.
pub fn try_deep_resolve<E, R, P>(
    input: &Map<String, Value>,
    options: ResolveOptions<R>,
    mut predicate: P,
) -> Result<Map<String, Value>, E>
where
    R: FnMut(&Value) -> Result<Value, E>,
    P: FnMut(&Value, &str) -> Result<bool, E>,
{
    let mut resolve = options.resolve;
    walk(input, options.deep, &mut resolve, &mut predicate)
}

fn walk<E, R, P>(
    input: &Map<String, Value>,
    deep: bool,
    resolve: &mut R,
    predicate: &mut P,
) -> Result<Map<String, Value>, E>
where
    R: FnMut(&Value) -> Result<Value, E>,
    P: FnMut(&Value, &str) -> Result<bool, E>,
{
    let mut output = Map::new();
    for (key, value) in input {
        let resolved = match value {
            Value::Object(nested) if deep => {
                Value::Object(walk(nested, deep, resolve, predicate)?)
            }
            _ => {
                if predicate(value, key)? {
                    resolve(value)?
                } else {
                    value.clone()
                }
            }
        };
        output.insert(key.clone(), resolved);
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {}", other),
        }
    }

    fn payload() -> Map<String, Value> {
        as_map(json!({
            "name": "  Ada ",
            "age": 36,
            "tags": ["a", " b "],
            "address": {
                "city": " London ",
                "zip": "",
                "geo": { "lat": 51.5, "note": " " }
            },
            "nickname": ""
        }))
    }

    fn leaves(value: &Value, out: &mut Vec<Value>) {
        match value {
            Value::Object(map) => map.values().for_each(|v| leaves(v, out)),
            other => out.push(other.clone()),
        }
    }

    #[test]
    fn no_match_yields_equal_copy() {
        let input = payload();
        let output = deep_resolve(
            &input,
            ResolveOptions::new(|_: &Value| Value::Null).deep(true),
            |_, _| false,
        );
        assert_eq!(output, input);
    }

    #[test]
    fn always_match_deep_replaces_every_leaf() {
        let input = payload();
        let mark = |v: &Value| json!({ "was": v.clone() });
        let output = deep_resolve(&input, ResolveOptions::new(mark).deep(true), |_, _| true);

        let mut before = Vec::new();
        leaves(&Value::Object(input), &mut before);
        let mut after = Vec::new();
        for (key, value) in &output {
            match key.as_str() {
                "address" => {
                    let address = value.as_object().unwrap();
                    assert_eq!(address["city"], json!({ "was": " London " }));
                    assert_eq!(address["geo"]["lat"], json!({ "was": 51.5 }));
                }
                _ => assert!(value.get("was").is_some()),
            }
        }
        collect_marked(&Value::Object(output), &mut after);
        assert_eq!(before, after);
    }

    /// Collects the original values out of `{"was": v}` wrappers.
    fn collect_marked(value: &Value, out: &mut Vec<Value>) {
        match value {
            Value::Object(map) if map.len() == 1 && map.contains_key("was") => {
                out.push(map["was"].clone())
            }
            Value::Object(map) => map.values().for_each(|v| collect_marked(v, out)),
            other => panic!("unresolved leaf {}", other),
        }
    }

    #[test]
    fn shallow_only_touches_top_level() {
        let input = payload();
        let output = deep_resolve(
            &input,
            ResolveOptions::new(|v: &Value| json!(v.as_str().unwrap_or("").trim())),
            |v, _| v.is_string(),
        );
        assert_eq!(output["name"], "Ada");
        assert_eq!(output["address"]["city"], " London ");
        assert_eq!(output["tags"], json!(["a", " b "]));
    }

    #[test]
    fn shallow_hands_objects_to_predicate() {
        let input = payload();
        let mut seen = Vec::new();
        let output = deep_resolve(
            &input,
            ResolveOptions::new(|_: &Value| json!("redacted")),
            |v, key| {
                seen.push(key.to_string());
                v.is_object()
            },
        );
        assert_eq!(output["address"], "redacted");
        assert!(seen.contains(&"address".to_string()));
        assert!(!seen.contains(&"city".to_string()));
    }

    #[test]
    fn deep_resolves_nested_keys_independently() {
        let input = payload();
        let mut seen = Vec::new();
        let output = deep_resolve(
            &input,
            ResolveOptions::new(|_: &Value| Value::Null).deep(true),
            |v, key| {
                seen.push(key.to_string());
                v.as_str().is_some_and(|s| s.trim().is_empty())
            },
        );
        assert_eq!(output["nickname"], Value::Null);
        assert_eq!(output["address"]["zip"], Value::Null);
        assert_eq!(output["address"]["geo"]["note"], Value::Null);
        assert_eq!(output["address"]["geo"]["lat"], 51.5);
        assert_eq!(output["name"], "  Ada ");
        // Nested objects are recursed into, not tested.
        assert!(!seen.contains(&"address".to_string()));
        assert!(!seen.contains(&"geo".to_string()));
        assert!(seen.contains(&"lat".to_string()));
    }

    #[test]
    fn arrays_are_leaves() {
        let input = as_map(json!({ "list": [{ "a": "" }] }));
        let output = deep_resolve(
            &input,
            ResolveOptions::new(|_: &Value| json!("hit")).deep(true),
            |v, _| v.is_array(),
        );
        assert_eq!(output["list"], "hit");
    }

    #[test]
    fn key_set_is_preserved() {
        let input = payload();
        let output = deep_resolve(
            &input,
            ResolveOptions::new(|_: &Value| Value::Null).deep(true),
            |_, _| true,
        );
        let keys: Vec<_> = output.keys().collect();
        let expected: Vec<_> = input.keys().collect();
        assert_eq!(keys, expected);
        assert_eq!(
            output["address"].as_object().unwrap().len(),
            input["address"].as_object().unwrap().len()
        );
    }

    #[test]
    fn input_is_left_untouched() {
        let input = payload();
        let snapshot = input.clone();
        let _ = deep_resolve(
            &input,
            ResolveOptions::new(|_: &Value| Value::Null).deep(true),
            |_, _| true,
        );
        assert_eq!(input, snapshot);
    }

    #[test]
    fn resolver_errors_propagate() {
        let input = payload();
        let result: Result<_, String> = try_deep_resolve(
            &input,
            ResolveOptions::new(|v: &Value| Err(format!("cannot resolve {}", v))).deep(true),
            |_, key| Ok(key == "zip"),
        );
        assert_eq!(result, Err("cannot resolve \"\"".to_string()));
    }

    #[test]
    fn predicate_errors_propagate() {
        let input = payload();
        let result: Result<Map<String, Value>, &str> = try_deep_resolve(
            &input,
            ResolveOptions::new(|v: &Value| Ok(v.clone())),
            |_, _| Err("bad predicate"),
        );
        assert_eq!(result, Err("bad predicate"));
    }
}
