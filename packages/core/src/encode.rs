//! Wire encoding of bound values.
//!
//! The service takes every binding as an "array of array of string":
//!
//! - flat fields become two rows, the keys then the values:
//!   `[["customer", "total"], ["Acme", "12"]]`
//! - block rows become a header row taken from the first row, followed by
//!   one row of values per bound row, in header order:
//!   `[["sku", "qty"], ["A1", "2"], ["B2", "1"]]`

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{Error, Result};
use crate::value::{FieldMap, Row, Scalar};

/// A string table: the first row holds the keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table(Vec<Vec<String>>);

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self(rows)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.0
    }

    /// The key row.
    pub fn header(&self) -> Option<&[String]> {
        self.0.first().map(Vec::as_slice)
    }

    /// The value rows, without the header.
    pub fn body(&self) -> &[Vec<String>] {
        self.0.get(1..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<Vec<String>> {
        self.0
    }

    /// Zip the header back onto every value row.
    ///
    /// For a flat encoding this yields exactly one record, the original
    /// mapping with its values rendered as strings.
    pub fn decode(&self) -> Vec<IndexMap<String, String>> {
        let Some(header) = self.header() else {
            return Vec::new();
        };
        self.body()
            .iter()
            .map(|values| {
                header
                    .iter()
                    .cloned()
                    .zip(values.iter().cloned())
                    .collect()
            })
            .collect()
    }
}

impl From<Vec<Vec<String>>> for Table {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self(rows)
    }
}

/// Encode scalar fields as a key row followed by a value row.
pub fn encode_flat(fields: &FieldMap) -> Table {
    let keys = fields.keys().cloned().collect();
    let values = fields.values().map(Scalar::to_wire).collect();
    Table(vec![keys, values])
}

/// Encode block rows as a header row followed by one value row per row.
///
/// The first row fixes the column order. Every other row must bind the
/// same set of keys; its values are re-ordered to match the header.
pub fn encode_tabular(rows: &[Row]) -> Result<Table> {
    let first = rows.first().ok_or(Error::EmptyTable)?;
    let header: Vec<String> = first.keys().cloned().collect();

    let mut table = Vec::with_capacity(rows.len() + 1);
    table.push(header.clone());

    for (index, row) in rows.iter().enumerate() {
        if !row.has_same_keys(first) {
            return Err(Error::InconsistentRow {
                row: index,
                expected: header,
                found: row.keys().cloned().collect(),
            });
        }
        table.push(
            header
                .iter()
                .filter_map(|key| row.get(key))
                .map(Scalar::to_wire)
                .collect(),
        );
    }

    Ok(Table(table))
}

/// Encode loosely-typed values, picking the shape from the data.
///
/// An object whose values are all scalars is flat. An array of objects,
/// or an object with at least one object value, is tabular.
pub fn encode_json(value: &JsonValue) -> Result<Table> {
    match value {
        JsonValue::Object(map) if map.values().any(JsonValue::is_object) => {
            encode_tabular(&rows_from_json(map.values())?)
        }
        JsonValue::Object(map) => {
            let mut fields = FieldMap::new();
            for (key, value) in map {
                if key.is_empty() {
                    return Err(Error::InvalidFieldKey);
                }
                let scalar = Scalar::from_json(value)
                    .ok_or_else(|| Error::InvalidFieldValue { key: key.clone() })?;
                fields.insert(key.clone(), scalar);
            }
            Ok(encode_flat(&fields))
        }
        JsonValue::Array(items) => encode_tabular(&rows_from_json(items.iter())?),
        _ => Err(Error::InvalidBlockValue {
            message: "only mappings and sequences of mappings can be encoded".to_string(),
        }),
    }
}

fn rows_from_json<'a>(items: impl Iterator<Item = &'a JsonValue>) -> Result<Vec<Row>> {
    items
        .map(|item| {
            let JsonValue::Object(map) = item else {
                return Err(Error::InvalidBlockValue {
                    message: "every row of a table must be a mapping".to_string(),
                });
            };
            map.iter()
                .map(|(key, value)| {
                    Scalar::from_json(value)
                        .map(|scalar| (key.clone(), scalar))
                        .ok_or_else(|| Error::InvalidFieldValue { key: key.clone() })
                })
                .collect::<Result<Row>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flat_mapping_becomes_keys_then_values() {
        let mut fields = FieldMap::new();
        fields.insert("a".into(), "x".into());
        fields.insert("b".into(), "y".into());

        let table = encode_flat(&fields);
        assert_eq!(
            table.rows(),
            &[strings(&["a", "b"]), strings(&["x", "y"])]
        );
    }

    #[test]
    fn flat_encoding_decodes_back_to_the_mapping() {
        let mut fields = FieldMap::new();
        fields.insert("customer".into(), "Acme".into());
        fields.insert("total".into(), 12.into());

        let decoded = encode_flat(&fields).decode();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0]["customer"], "Acme");
        assert_eq!(decoded[0]["total"], "12");
    }

    #[test]
    fn tabular_rows_share_the_first_rows_header() {
        let rows = vec![
            Row::new().with("a", 1).with("b", 2),
            Row::new().with("a", 3).with("b", 4),
        ];
        let table = encode_tabular(&rows).unwrap();
        assert_eq!(
            table.rows(),
            &[
                strings(&["a", "b"]),
                strings(&["1", "2"]),
                strings(&["3", "4"]),
            ]
        );
        assert_eq!(table.header().unwrap(), strings(&["a", "b"]).as_slice());
        assert_eq!(table.body().len(), 2);
    }

    #[test]
    fn tabular_values_follow_header_order_not_row_order() {
        let rows = vec![
            Row::new().with("sku", "A1").with("qty", "2"),
            Row::new().with("qty", "1").with("sku", "B2"),
        ];
        let table = encode_tabular(&rows).unwrap();
        assert_eq!(table.rows()[2], strings(&["B2", "1"]));
    }

    #[test]
    fn tabular_rejects_rows_with_other_keys() {
        let rows = vec![
            Row::new().with("sku", "A1").with("qty", "2"),
            Row::new().with("sku", "B2").with("price", "9"),
        ];
        let err = encode_tabular(&rows).unwrap_err();
        assert_eq!(
            err,
            Error::InconsistentRow {
                row: 1,
                expected: strings(&["sku", "qty"]),
                found: strings(&["sku", "price"]),
            }
        );
    }

    #[test]
    fn tabular_rejects_missing_keys() {
        let rows = vec![
            Row::new().with("sku", "A1").with("qty", "2"),
            Row::new().with("sku", "B2"),
        ];
        assert!(matches!(
            encode_tabular(&rows),
            Err(Error::InconsistentRow { row: 1, .. })
        ));
    }

    #[test]
    fn tabular_needs_at_least_one_row() {
        assert_eq!(encode_tabular(&[]), Err(Error::EmptyTable));
    }

    #[test]
    fn json_shape_detection() {
        let flat = encode_json(&json!({"a": "x", "b": 2})).unwrap();
        assert_eq!(flat.rows(), &[strings(&["a", "b"]), strings(&["x", "2"])]);

        let tabular = encode_json(&json!([{"a": 1, "b": 2}, {"a": 3, "b": 4}])).unwrap();
        assert_eq!(tabular.len(), 3);

        let keyed = encode_json(&json!({"r1": {"a": 1}, "r2": {"a": 2}})).unwrap();
        assert_eq!(keyed.rows(), &[strings(&["a"]), strings(&["1"]), strings(&["2"])]);
    }

    #[test]
    fn json_rejects_non_scalar_fields() {
        assert_eq!(
            encode_json(&json!({"flag": true})),
            Err(Error::InvalidFieldValue {
                key: "flag".to_string()
            })
        );
        assert!(encode_json(&json!("plain")).is_err());
        assert!(encode_json(&json!([1, 2])).is_err());
    }
}
