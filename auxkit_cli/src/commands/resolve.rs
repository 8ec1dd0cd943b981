use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use auxkit_lib::{deep_resolve, validation, ResolveOptions};
use clap::Args;
use regex::Regex;
use serde_json::{Map, Value};

use crate::commands::read_json;
use crate::output::{print_object, OutputFormat};

#[derive(Args)]
pub struct ResolveArgs {
    /// JSON file holding an object, or - for stdin
    pub input: PathBuf,

    /// Recurse into nested objects instead of replacing them whole
    #[arg(long)]
    pub deep: bool,

    /// Only consider keys matching this regex
    #[arg(long)]
    pub key: Option<String>,

    /// Which values to replace: any, empty, blank, null, string, number
    #[arg(long, default_value = "any")]
    pub when: String,

    /// Replacement: null (alias remove-blank), trim, stringify, or set=<json>
    #[arg(long, default_value = "null")]
    pub action: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueMatcher {
    Any,
    /// Empty strings, arrays, and objects, plus null.
    Empty,
    /// Strings that are empty after trimming.
    Blank,
    Null,
    String,
    Number,
}

impl ValueMatcher {
    pub fn parse(input: &str) -> Result<Self> {
        Ok(match input.trim().to_lowercase().as_str() {
            "any" => ValueMatcher::Any,
            "empty" => ValueMatcher::Empty,
            "blank" => ValueMatcher::Blank,
            "null" => ValueMatcher::Null,
            "string" => ValueMatcher::String,
            "number" => ValueMatcher::Number,
            other => bail!(
                "unknown matcher '{}'. Valid values: any, empty, blank, null, string, number",
                other
            ),
        })
    }

    pub fn matches(self, value: &Value) -> bool {
        match self {
            ValueMatcher::Any => true,
            ValueMatcher::Empty => match value {
                Value::Null => true,
                Value::String(s) => s.is_empty(),
                Value::Array(a) => a.is_empty(),
                Value::Object(o) => o.is_empty(),
                _ => false,
            },
            ValueMatcher::Blank => value.as_str().is_some_and(|s| s.trim().is_empty()),
            ValueMatcher::Null => value.is_null(),
            ValueMatcher::String => value.is_string(),
            ValueMatcher::Number => value.is_number(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Null,
    /// Trims strings; other values pass through.
    Trim,
    /// Encodes non-string values as their JSON text.
    Stringify,
    Set(Value),
}

impl Action {
    pub fn parse(input: &str) -> Result<Self> {
        if let Some(raw) = input.strip_prefix("set=") {
            let value = serde_json::from_str(raw)
                .with_context(|| format!("set= expects a JSON value, got '{}'", raw))?;
            return Ok(Action::Set(value));
        }
        Ok(match input.trim().to_lowercase().as_str() {
            "null" | "remove-blank" => Action::Null,
            "trim" => Action::Trim,
            "stringify" => Action::Stringify,
            other => bail!(
                "unknown action '{}'. Valid values: null, trim, stringify, set=<json>",
                other
            ),
        })
    }

    pub fn apply(&self, value: &Value) -> Value {
        match self {
            Action::Null => Value::Null,
            Action::Trim => match value {
                Value::String(s) => Value::String(s.trim().to_string()),
                other => other.clone(),
            },
            Action::Stringify => match value {
                Value::String(_) => value.clone(),
                other => Value::String(other.to_string()),
            },
            Action::Set(replacement) => replacement.clone(),
        }
    }
}

/// Applies `action` to every value selected by `matcher` and `key`.
pub fn transform(
    input: &Map<String, Value>,
    deep: bool,
    key: Option<&Regex>,
    matcher: ValueMatcher,
    action: &Action,
) -> Map<String, Value> {
    deep_resolve(
        input,
        ResolveOptions::new(|value: &Value| action.apply(value)).deep(deep),
        |value: &Value, name: &str| {
            key.map_or(true, |re| re.is_match(name)) && matcher.matches(value)
        },
    )
}

pub fn run(args: &ResolveArgs, format: &OutputFormat) -> Result<()> {
    let key = args
        .key
        .as_deref()
        .map(validation::validate_key_pattern)
        .transpose()?;
    let matcher = ValueMatcher::parse(&args.when)?;
    let action = Action::parse(&args.action)?;

    let input = match read_json(&args.input)? {
        Value::Object(object) => object,
        other => bail!("expected a JSON object, got {}", kind(&other)),
    };

    tracing::debug!("resolving {} top-level keys", input.len());
    let output = transform(&input, args.deep, key.as_ref(), matcher, &action);
    print_object(&output, format)?;
    Ok(())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
