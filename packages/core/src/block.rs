//! Named tables of rows for repeating template regions.

use serde_json::Value as JsonValue;

use crate::error::{Error, Result};
use crate::value::{Row, Scalar};

/// A repeating region of a template.
///
/// A block starts unnamed; it must be named before it can be assigned to a
/// [`ValueContainer`](crate::ValueContainer). Rows accumulate across `bind`
/// calls and are never replaced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    name: Option<String>,
    rows: Vec<Row>,
}

impl Block {
    /// Create an unnamed, empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty block with the given name.
    pub fn named(name: impl Into<String>) -> Result<Self> {
        let mut block = Self::new();
        block.set_name(name)?;
        Ok(block)
    }

    /// Set the block name.
    ///
    /// Renaming is allowed; rows do not depend on the name.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<&mut Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidBlockName);
        }
        self.name = Some(name);
        Ok(self)
    }

    /// The block name, or [`Error::BlockNameNotSet`] before `set_name`.
    pub fn name(&self) -> Result<&str> {
        self.name.as_deref().ok_or(Error::BlockNameNotSet)
    }

    pub fn has_name(&self) -> bool {
        self.name.is_some()
    }

    /// Append one row.
    pub fn bind(&mut self, row: Row) -> Result<&mut Self> {
        validate_row(&row)?;
        self.rows.push(row);
        Ok(self)
    }

    /// Append one row per item, in order.
    ///
    /// Every row is validated before any is appended, so a failure leaves
    /// the block untouched.
    pub fn bind_rows<I>(&mut self, rows: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Row>,
    {
        let rows: Vec<Row> = rows.into_iter().collect();
        for row in &rows {
            validate_row(row)?;
        }
        self.rows.extend(rows);
        Ok(self)
    }

    /// Bind loosely-typed values.
    ///
    /// An object of scalars appends one row. An array of objects, or an
    /// object whose values are objects, appends one row per element. Rows
    /// may not nest further.
    pub fn bind_json(&mut self, values: &JsonValue) -> Result<&mut Self> {
        let rows = match values {
            JsonValue::Object(map) if map.values().any(is_row_like) => map
                .values()
                .map(row_from_json)
                .collect::<Result<Vec<_>>>()?,
            JsonValue::Object(_) => vec![row_from_json(values)?],
            JsonValue::Array(items) => items
                .iter()
                .map(row_from_json)
                .collect::<Result<Vec<_>>>()?,
            other => {
                return Err(Error::InvalidBlockValue {
                    message: format!(
                        "expected a mapping or a sequence of mappings, got {}",
                        json_kind(other)
                    ),
                })
            }
        };
        self.bind_rows(rows)
    }

    /// All rows bound so far, in bind order.
    pub fn retrieve_values(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

fn validate_row(row: &Row) -> Result<()> {
    if row.is_empty() {
        return Err(Error::InvalidBlockValue {
            message: "a row must bind at least one field".to_string(),
        });
    }
    for (key, value) in row {
        if key.is_empty() {
            return Err(Error::InvalidBlockValue {
                message: "binding key must be a non empty string".to_string(),
            });
        }
        if !value.is_bindable() {
            return Err(Error::InvalidBlockValue {
                message: format!(
                    "value bound to '{}' must be a non empty string or number",
                    key
                ),
            });
        }
    }
    Ok(())
}

fn is_row_like(value: &JsonValue) -> bool {
    matches!(value, JsonValue::Object(_) | JsonValue::Array(_))
}

fn row_from_json(value: &JsonValue) -> Result<Row> {
    let JsonValue::Object(map) = value else {
        return Err(Error::InvalidBlockValue {
            message: format!("a row must be a mapping, got {}", json_kind(value)),
        });
    };

    let mut row = Row::new();
    for (key, value) in map {
        if is_row_like(value) {
            return Err(Error::InvalidBlockValue {
                message: format!("'{}' holds nested rows, which are not supported", key),
            });
        }
        let scalar = Scalar::from_json(value).ok_or_else(|| Error::InvalidBlockValue {
            message: format!("'{}' must be a string or a number", key),
        })?;
        row.insert(key.clone(), scalar);
    }
    Ok(row)
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
