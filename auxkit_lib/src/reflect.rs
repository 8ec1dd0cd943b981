//! Display and serialization tables derived from enum descriptors.
//!
//! An [`EnumDescriptor`] mirrors the object shape of a numeric enum: every
//! numeric member appears once under its name and once more as a reverse
//! entry keyed by its stringified value. The derivations here keep only the
//! numeric-keyed entries so each member is counted exactly once.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AuxkitError;

/// A member value: an integer for numeric enums, a string for string enums.
///
/// Integers sort before strings, and integers sort numerically.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(untagged)]
pub enum EnumValue {
    Int(i64),
    Str(String),
}

impl EnumValue {
    /// Interprets an object key: integer-looking keys become `Int`.
    pub fn from_key(key: &str) -> Self {
        match parse_numeric_key(key) {
            Some(n) => Self::Int(n),
            None => Self::Str(key.to_string()),
        }
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for EnumValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for EnumValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for EnumValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

/// Labels keyed by member value.
pub type CommentMap = BTreeMap<EnumValue, String>;

/// Name → value entries of an enum.
///
/// Entries keep the order they were inserted in. Descriptors read with
/// [`EnumDescriptor::from_json`] come out sorted by key, since the JSON
/// object is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumDescriptor {
    entries: Vec<(String, EnumValue)>,
}

impl EnumDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// A numeric enum, including the reverse `"value" → name` entries.
    pub fn numeric(members: &[(&str, i64)]) -> Self {
        members
            .iter()
            .fold(Self::new(), |desc, (name, value)| desc.with_numeric(name, *value))
    }

    /// A string enum. String members get no reverse entries.
    pub fn string(members: &[(&str, &str)]) -> Self {
        members
            .iter()
            .fold(Self::new(), |desc, (name, value)| desc.with_string(name, value))
    }

    pub fn with_numeric(mut self, name: &str, value: i64) -> Self {
        self.insert(name, EnumValue::Int(value));
        self.insert(&value.to_string(), EnumValue::Str(name.to_string()));
        self
    }

    pub fn with_string(mut self, name: &str, value: &str) -> Self {
        self.insert(name, EnumValue::Str(value.to_string()));
        self
    }

    /// Sets `key`, replacing an existing entry in place.
    pub fn insert(&mut self, key: &str, value: EnumValue) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    /// Builds a descriptor from a JSON object whose values are integers or
    /// strings, taken as-is (reverse entries must already be present).
    pub fn from_json(value: &Value) -> Result<Self, AuxkitError> {
        let object = value.as_object().ok_or_else(|| {
            AuxkitError::InvalidInput("enum descriptor must be a JSON object".to_string())
        })?;
        let mut desc = Self::new();
        for (key, member) in object {
            let member = match member {
                Value::String(s) => EnumValue::Str(s.clone()),
                Value::Number(n) => EnumValue::Int(n.as_i64().ok_or_else(|| {
                    AuxkitError::InvalidInput(format!(
                        "enum member '{}' is not an integer: {}",
                        key, n
                    ))
                })?),
                other => {
                    return Err(AuxkitError::InvalidInput(format!(
                        "enum member '{}' must be an integer or string, got {}",
                        key, other
                    )))
                }
            };
            desc.insert(key, member);
        }
        Ok(desc)
    }

    pub fn get(&self, key: &str) -> Option<&EnumValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &EnumValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries, reverse entries included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A numeric member as seen through its reverse entry.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    pub name: String,
    pub value: i64,
}

/// Tables derived by [`enum_to_output`].
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnumOutput {
    pub comment: CommentMap,
    /// Stringified member value → member value.
    pub map: BTreeMap<String, i64>,
    /// Member value → member.
    pub reverse_map: BTreeMap<i64, EnumMember>,
}

/// A label/value pair. `k` carries the label and `v` the member value.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LabelPair {
    pub k: String,
    pub v: EnumValue,
}

/// Derives the comment, value and reverse tables of an enum.
///
/// Only entries whose key parses as an integer contribute, so symbolic
/// member names never appear as keys. `comments` is passed through.
pub fn enum_to_output(desc: &EnumDescriptor, comments: &CommentMap) -> EnumOutput {
    let mut map = BTreeMap::new();
    let mut reverse_map = BTreeMap::new();
    for (key, member) in desc.entries() {
        let Some(value) = parse_numeric_key(key) else {
            continue;
        };
        map.insert(key.to_string(), value);
        reverse_map.insert(
            value,
            EnumMember {
                name: member.to_string(),
                value,
            },
        );
    }
    EnumOutput {
        comment: comments.clone(),
        map,
        reverse_map,
    }
}

pub fn find_enum_value<'a>(desc: &'a EnumDescriptor, key: &str) -> Option<&'a EnumValue> {
    desc.get(key)
}

pub fn find_enum_comment<'a>(key: &EnumValue, comments: &'a CommentMap) -> Option<&'a str> {
    comments.get(key).map(String::as_str)
}

/// Converts `{value: label}` into `[{k: label, v: value}]`, in key order.
pub fn enum_comment_to_pair_array(comments: &CommentMap) -> Vec<LabelPair> {
    comments
        .iter()
        .map(|(value, label)| LabelPair {
            k: label.clone(),
            v: value.clone(),
        })
        .collect()
}

/// Reads a `{value: label}` JSON object. Integer-looking keys become
/// integer member values.
pub fn comments_from_json(value: &Value) -> Result<CommentMap, AuxkitError> {
    let object = value.as_object().ok_or_else(|| {
        AuxkitError::InvalidInput("comment map must be a JSON object".to_string())
    })?;
    object
        .iter()
        .map(|(key, label)| match label {
            Value::String(s) => Ok((EnumValue::from_key(key), s.clone())),
            other => Err(AuxkitError::InvalidInput(format!(
                "comment for '{}' must be a string, got {}",
                key, other
            ))),
        })
        .collect()
}

/// Rust enums with integer discriminants exposed as descriptors.
///
/// ```
/// use auxkit_lib::reflect::ReflectEnum;
///
/// enum Status {
///     Draft = 0,
///     Published = 1,
/// }
///
/// impl ReflectEnum for Status {
///     const MEMBERS: &'static [(&'static str, i64)] = &[
///         ("Draft", Status::Draft as i64),
///         ("Published", Status::Published as i64),
///     ];
/// }
///
/// assert_eq!(Status::output().map.len(), 2);
/// ```
pub trait ReflectEnum {
    const MEMBERS: &'static [(&'static str, i64)];

    fn descriptor() -> EnumDescriptor {
        EnumDescriptor::numeric(Self::MEMBERS)
    }

    fn comments() -> CommentMap {
        CommentMap::new()
    }

    fn output() -> EnumOutput {
        enum_to_output(&Self::descriptor(), &Self::comments())
    }
}

/// Canonical integer keys only: `"3"` and `"-1"`, not `"03"`, `"+3"` or `""`.
fn parse_numeric_key(key: &str) -> Option<i64> {
    let n = key.parse::<i64>().ok()?;
    (n.to_string() == key).then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Clone, Copy)]
    enum Level {
        Low = 1,
        Mid = 5,
        High = 10,
    }

    impl ReflectEnum for Level {
        const MEMBERS: &'static [(&'static str, i64)] = &[
            ("Low", Level::Low as i64),
            ("Mid", Level::Mid as i64),
            ("High", Level::High as i64),
        ];

        fn comments() -> CommentMap {
            CommentMap::from([
                (EnumValue::Int(1), "low".to_string()),
                (EnumValue::Int(5), "medium".to_string()),
                (EnumValue::Int(10), "high".to_string()),
            ])
        }
    }

    #[test]
    fn numeric_descriptor_has_reverse_entries() {
        let desc = Level::descriptor();
        assert_eq!(desc.len(), 6);
        assert_eq!(desc.get("Mid"), Some(&EnumValue::Int(5)));
        assert_eq!(desc.get("5"), Some(&EnumValue::Str("Mid".to_string())));
    }

    #[test]
    fn output_round_trips_every_member() {
        let output = Level::output();
        for (_, value) in Level::MEMBERS {
            let mapped = output.map[&value.to_string()];
            assert_eq!(output.reverse_map[&mapped].value, *value);
        }
        assert_eq!(output.map.len(), Level::MEMBERS.len());
        assert_eq!(output.reverse_map[&10].name, "High");
    }

    #[test]
    fn output_excludes_symbolic_keys() {
        let output = Level::output();
        for key in output.map.keys() {
            assert!(key.parse::<i64>().is_ok(), "symbolic key {} leaked", key);
        }
        assert!(!output.map.contains_key("Low"));
        assert_eq!(output.reverse_map.keys().copied().collect::<Vec<_>>(), vec![1, 5, 10]);
    }

    #[test]
    fn output_passes_comments_through() {
        let output = Level::output();
        assert_eq!(output.comment, Level::comments());
    }

    #[test]
    fn string_enum_yields_empty_maps() {
        let desc = EnumDescriptor::string(&[("Red", "red"), ("Blue", "blue")]);
        let output = enum_to_output(&desc, &CommentMap::new());
        assert!(output.map.is_empty());
        assert!(output.reverse_map.is_empty());
        assert_eq!(
            find_enum_value(&desc, "Blue"),
            Some(&EnumValue::Str("blue".to_string()))
        );
    }

    #[test]
    fn mixed_enum_keeps_numeric_members_only() {
        let desc = EnumDescriptor::new()
            .with_numeric("Zero", 0)
            .with_string("Name", "name")
            .with_numeric("Neg", -1);
        let output = enum_to_output(&desc, &CommentMap::new());
        assert_eq!(output.map.keys().collect::<Vec<_>>(), vec!["-1", "0"]);
        assert_eq!(output.reverse_map[&-1].name, "Neg");
    }

    #[test]
    fn find_helpers_are_plain_lookups() {
        let desc = Level::descriptor();
        let comments = Level::comments();
        assert_eq!(find_enum_value(&desc, "High"), Some(&EnumValue::Int(10)));
        assert_eq!(find_enum_value(&desc, "Missing"), None);
        assert_eq!(find_enum_comment(&EnumValue::Int(5), &comments), Some("medium"));
        assert_eq!(find_enum_comment(&EnumValue::Int(7), &comments), None);
    }

    #[test]
    fn pair_array_swaps_roles_in_key_order() {
        let pairs = enum_comment_to_pair_array(&Level::comments());
        assert_eq!(
            pairs,
            vec![
                LabelPair {
                    k: "low".to_string(),
                    v: EnumValue::Int(1)
                },
                LabelPair {
                    k: "medium".to_string(),
                    v: EnumValue::Int(5)
                },
                LabelPair {
                    k: "high".to_string(),
                    v: EnumValue::Int(10)
                },
            ]
        );
        assert_eq!(
            serde_json::to_value(&pairs[0]).unwrap(),
            json!({ "k": "low", "v": 1 })
        );
    }

    #[test]
    fn descriptor_from_json_object() {
        let desc = EnumDescriptor::from_json(&json!({
            "0": "Off", "1": "On", "Off": 0, "On": 1
        }))
        .unwrap();
        let output = enum_to_output(&desc, &CommentMap::new());
        assert_eq!(output.map.len(), 2);
        assert_eq!(output.reverse_map[&1].name, "On");
    }

    #[test]
    fn builder_keeps_insertion_order_json_sorts_by_key() {
        let built = EnumDescriptor::new()
            .with_string("Zeta", "z")
            .with_string("Alpha", "a");
        let keys: Vec<&str> = built.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Zeta", "Alpha"]);

        let parsed = EnumDescriptor::from_json(&json!({ "Zeta": "z", "Alpha": "a" })).unwrap();
        let keys: Vec<&str> = parsed.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn descriptor_from_json_rejects_bad_members() {
        assert!(EnumDescriptor::from_json(&json!([1, 2])).is_err());
        assert!(EnumDescriptor::from_json(&json!({ "A": 1.5 })).is_err());
        assert!(EnumDescriptor::from_json(&json!({ "A": null })).is_err());
    }

    #[test]
    fn comments_from_json_types_keys() {
        let comments = comments_from_json(&json!({ "1": "one", "x": "ex" })).unwrap();
        assert_eq!(comments.get(&EnumValue::Int(1)).map(String::as_str), Some("one"));
        assert_eq!(comments.get(&EnumValue::from("x")).map(String::as_str), Some("ex"));
        assert!(comments_from_json(&json!({ "1": 2 })).is_err());
    }

    #[test]
    fn output_serializes_camel_case() {
        let value = serde_json::to_value(Level::output()).unwrap();
        assert_eq!(value["map"]["5"], 5);
        assert_eq!(value["reverseMap"]["5"]["name"], "Mid");
        assert_eq!(value["comment"]["10"], "high");
    }

    #[test]
    fn numeric_key_must_be_canonical() {
        assert_eq!(parse_numeric_key("42"), Some(42));
        assert_eq!(parse_numeric_key("-3"), Some(-3));
        assert_eq!(parse_numeric_key("042"), None);
        assert_eq!(parse_numeric_key("+1"), None);
        assert_eq!(parse_numeric_key(""), None);
        assert_eq!(parse_numeric_key("Low"), None);
    }
}
