pub mod enums;
pub mod pages;
pub mod resolve;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Reads a JSON document from `path`, or from stdin when `path` is `-`.
pub fn read_json(path: &Path) -> Result<Value> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    serde_json::from_str(&content).with_context(|| format!("{} is not valid JSON", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn read_json_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"a": [1, 2]}}"#).unwrap();
        let value = read_json(file.path()).unwrap();
        assert_eq!(value["a"][1], 2);
    }

    #[test]
    fn read_json_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = read_json(file.path()).unwrap_err();
        assert!(err.to_string().contains("is not valid JSON"));
    }

    #[test]
    fn read_json_missing_file() {
        assert!(read_json(Path::new("/nonexistent/input.json")).is_err());
    }
}
