use auxkit_api::types::ParamStyle;
use regex::Regex;

use crate::error::AuxkitError;

pub const MAX_PAGE_SIZE: u64 = 1000;
pub const MAX_PATH_LENGTH: usize = 512;
pub const MAX_PATTERN_LENGTH: usize = 200;
pub const MAX_FILTER_LENGTH: usize = 200;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, AuxkitError> {
    if input.len() > max_len {
        return Err(AuxkitError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(AuxkitError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate page size (must be 1..=1000).
pub fn validate_page_size(page_size: u64) -> Result<u64, AuxkitError> {
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(AuxkitError::InvalidInput(format!(
            "page_size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }
    Ok(page_size)
}

/// Validate a page bound (must be >= 1).
pub fn validate_max_pages(max_pages: u64) -> Result<u64, AuxkitError> {
    if max_pages < 1 {
        return Err(AuxkitError::InvalidInput(
            "max_pages must be >= 1".to_string(),
        ));
    }
    Ok(max_pages)
}

/// Validate a parameter style: case-insensitive, accepts the key names as aliases.
pub fn validate_param_style(input: &str) -> Result<ParamStyle, AuxkitError> {
    match input.trim().to_lowercase().as_str() {
        "long" | "offset" => Ok(ParamStyle::Long),
        "short" | "o" => Ok(ParamStyle::Short),
        _ => Err(AuxkitError::InvalidInput(format!(
            "unknown param style '{}'. Valid values: long (offset/pageSize), short (o/s)",
            input
        ))),
    }
}

/// Validate a request path: must start with `/` and contain no whitespace.
pub fn validate_path(input: &str) -> Result<String, AuxkitError> {
    let path = sanitize_text(input, MAX_PATH_LENGTH)?;
    if !path.starts_with('/') {
        return Err(AuxkitError::InvalidInput(format!(
            "path '{}' must start with '/'",
            path
        )));
    }
    if path.chars().any(char::is_whitespace) {
        return Err(AuxkitError::InvalidInput(format!(
            "path '{}' must not contain whitespace",
            path
        )));
    }
    Ok(path)
}

/// Validate a `key=value` filter pair. The value may be empty; the key may not.
pub fn validate_filter(input: &str) -> Result<(String, String), AuxkitError> {
    let pair = sanitize_text(input, MAX_FILTER_LENGTH)?;
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(AuxkitError::InvalidInput(format!(
            "filter '{}' must have the form key=value",
            pair
        ))),
    }
}

/// Compile a key-matching pattern used by the resolve command.
pub fn validate_key_pattern(input: &str) -> Result<Regex, AuxkitError> {
    let pattern = sanitize_text(input, MAX_PATTERN_LENGTH)?;
    Regex::new(&pattern).map_err(|e| {
        AuxkitError::InvalidInput(format!("invalid key pattern '{}': {}", pattern, e))
    })
}
