//! Merge values given on the command line or in a JSON file.
//!
//! The file holds an object with optional `fields` and `blocks`:
//!
//! ```json
//! {
//!   "fields": { "customer": "Acme", "total": 12.5 },
//!   "blocks": { "items": [ { "sku": "A1", "qty": 2 } ] }
//! }
//! ```

use std::path::Path;

use livedocx_core::{Block, Row, Scalar};
use serde_json::{Map, Value as JsonValue};

use crate::error::{CliError, Result};

#[derive(Debug, Default, PartialEq)]
pub struct MergeValues {
    pub fields: Vec<(String, Scalar)>,
    pub blocks: Vec<(String, Vec<Row>)>,
}

impl MergeValues {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let input_error = |message: String| CliError::Input {
            path: path.to_path_buf(),
            message,
        };
        let contents = std::fs::read_to_string(path).map_err(|e| input_error(e.to_string()))?;
        let json: JsonValue =
            serde_json::from_str(&contents).map_err(|e| input_error(e.to_string()))?;
        Self::from_json(&json).map_err(|e| input_error(e.to_string()))
    }

    pub fn from_json(json: &JsonValue) -> Result<Self> {
        if !json.is_object() {
            return Err(CliError::InvalidValues {
                message: "expected an object with \"fields\" and \"blocks\"".to_string(),
            });
        }
        let mut values = Self::default();

        if let Some(fields) = section(json, "fields")? {
            for (key, value) in fields {
                let scalar = Scalar::from_json(value)
                    .ok_or_else(|| livedocx_core::Error::InvalidFieldValue { key: key.clone() })?;
                values.fields.push((key.clone(), scalar));
            }
        }

        if let Some(blocks) = section(json, "blocks")? {
            for (name, rows) in blocks {
                let mut block = Block::named(name.as_str())?;
                block.bind_json(rows)?;
                values
                    .blocks
                    .push((name.clone(), block.retrieve_values().to_vec()));
            }
        }

        Ok(values)
    }
}

/// The object under `key`, if present. Any other value is an error.
fn section<'a>(json: &'a JsonValue, key: &str) -> Result<Option<&'a Map<String, JsonValue>>> {
    match json.get(key) {
        None => Ok(None),
        Some(JsonValue::Object(map)) => Ok(Some(map)),
        Some(_) => Err(CliError::InvalidValues {
            message: format!("\"{}\" must be an object", key),
        }),
    }
}

/// Split a `KEY=VALUE` argument.
pub fn parse_pair(flag: &'static str, arg: &str) -> Result<(String, String)> {
    match arg.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(CliError::InvalidPair {
            flag,
            value: arg.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pairs() {
        assert_eq!(
            parse_pair("field", "customer=Acme Corp").unwrap(),
            ("customer".to_string(), "Acme Corp".to_string())
        );
        assert_eq!(
            parse_pair("field", "formula=a=b").unwrap().1,
            "a=b".to_string()
        );
        assert!(parse_pair("field", "novalue").is_err());
        assert!(parse_pair("image", "=logo.png").is_err());
    }

    #[test]
    fn values_from_json() {
        let values = MergeValues::from_json(&json!({
            "fields": {"customer": "Acme", "total": 12},
            "blocks": {"items": [{"sku": "A1"}, {"sku": "B2"}]}
        }))
        .unwrap();

        assert_eq!(values.fields.len(), 2);
        assert_eq!(values.blocks[0].0, "items");
        assert_eq!(values.blocks[0].1.len(), 2);
    }

    #[test]
    fn nested_field_values_are_rejected() {
        assert!(MergeValues::from_json(&json!({"fields": {"customer": {"name": "Acme"}}})).is_err());
    }

    #[test]
    fn sections_must_be_objects() {
        let err = MergeValues::from_json(&json!({"fields": ["customer", "Acme"]})).unwrap_err();
        assert!(matches!(err, CliError::InvalidValues { .. }));
        assert!(err.to_string().contains("\"fields\""));

        let err = MergeValues::from_json(&json!({"blocks": "items"})).unwrap_err();
        assert!(matches!(err, CliError::InvalidValues { .. }));

        let err = MergeValues::from_json(&json!([{"customer": "Acme"}])).unwrap_err();
        assert!(matches!(err, CliError::InvalidValues { .. }));
    }

    #[test]
    fn section_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.json");
        std::fs::write(&path, r#"{"blocks": [1, 2]}"#).unwrap();

        let err = MergeValues::from_json_file(&path).unwrap_err();
        assert!(matches!(err, CliError::Input { .. }));
    }

    #[test]
    fn unreadable_file() {
        let err = MergeValues::from_json_file(Path::new("/nonexistent/values.json")).unwrap_err();
        assert!(matches!(err, CliError::Input { .. }));
    }
}
