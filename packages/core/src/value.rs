//! Scalar values and rows bound into a template.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field bindings in insertion order.
pub type FieldMap = IndexMap<String, Scalar>;

/// A single value bound to a template placeholder.
///
/// The service only understands strings; numbers keep their type until
/// they are encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Signed integer.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// UTF-8 text.
    Text(String),
}

impl Scalar {
    /// The string sent over the wire for this value.
    pub fn to_wire(&self) -> String {
        self.to_string()
    }

    /// Whether the value can be sent: text must be non-empty and numbers
    /// must be finite.
    pub fn is_bindable(&self) -> bool {
        match self {
            Scalar::Integer(_) => true,
            Scalar::Float(f) => f.is_finite(),
            Scalar::Text(s) => !s.is_empty(),
        }
    }

    /// Convert a JSON leaf into a scalar.
    ///
    /// Only strings and numbers are scalars; everything else yields `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(Scalar::Text(s.clone())),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Some(Scalar::Integer(i)),
                None => n.as_f64().map(Scalar::Float),
            },
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<&String> for Scalar {
    fn from(value: &String) -> Self {
        Scalar::Text(value.clone())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Integer(value as i64)
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::Integer(value as i64)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Scalar::Float(value as f64)
    }
}

/// One row of a block: field name to value, in insertion order.
///
/// Rows are plain data. They are validated when bound to a [`Block`](crate::Block).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(IndexMap<String, Scalar>);

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding, replacing any previous value for the key.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a binding in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Scalar>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Scalar)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if both rows bind exactly the same keys, in any order.
    pub fn has_same_keys(&self, other: &Row) -> bool {
        self.0.len() == other.0.len() && self.0.keys().all(|k| other.0.contains_key(k))
    }
}

impl<K: Into<String>, V: Into<Scalar>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row(iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect())
    }
}

impl From<FieldMap> for Row {
    fn from(map: FieldMap) -> Self {
        Row(map)
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = (&'a String, &'a Scalar);
    type IntoIter = indexmap::map::Iter<'a, String, Scalar>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_are_sent_as_strings() {
        assert_eq!(Scalar::from(42).to_wire(), "42");
        assert_eq!(Scalar::from(2.5).to_wire(), "2.5");
        assert_eq!(Scalar::from(3.0).to_wire(), "3");
        assert_eq!(Scalar::from("Acme").to_wire(), "Acme");
    }

    #[test]
    fn bindable_rejects_empty_text_and_nan() {
        assert!(Scalar::from("x").is_bindable());
        assert!(Scalar::from(0).is_bindable());
        assert!(!Scalar::from("").is_bindable());
        assert!(!Scalar::from(f64::NAN).is_bindable());
        assert!(!Scalar::from(f64::INFINITY).is_bindable());
    }

    #[test]
    fn from_json_accepts_only_strings_and_numbers() {
        assert_eq!(Scalar::from_json(&json!("a")), Some(Scalar::from("a")));
        assert_eq!(Scalar::from_json(&json!(7)), Some(Scalar::Integer(7)));
        assert_eq!(Scalar::from_json(&json!(1.25)), Some(Scalar::Float(1.25)));
        assert_eq!(Scalar::from_json(&json!(true)), None);
        assert_eq!(Scalar::from_json(&json!(null)), None);
        assert_eq!(Scalar::from_json(&json!({"a": 1})), None);
    }

    #[test]
    fn row_keeps_insertion_order() {
        let row = Row::new().with("sku", "A1").with("qty", 2);
        let keys: Vec<_> = row.keys().cloned().collect();
        assert_eq!(keys, vec!["sku", "qty"]);
    }

    #[test]
    fn row_same_keys_ignores_order() {
        let a: Row = [("a", "1"), ("b", "2")].into_iter().collect();
        let b: Row = [("b", "3"), ("a", "4")].into_iter().collect();
        let c: Row = [("a", "1")].into_iter().collect();
        assert!(a.has_same_keys(&b));
        assert!(!a.has_same_keys(&c));
    }

    #[test]
    fn row_deserializes_from_json_object() {
        let row: Row = serde_json::from_value(json!({"name": "Ann", "age": 31})).unwrap();
        assert_eq!(row.get("name"), Some(&Scalar::from("Ann")));
        assert_eq!(row.get("age"), Some(&Scalar::Integer(31)));
    }
}
