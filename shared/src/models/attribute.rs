//! Attribute Model

use serde::{Deserialize, Serialize};

/// Attribute type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    String,
    Number,
    Boolean,
    /// Enumerated values; multiple selections generate variants
    Options,
}

impl AttributeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::String => "string",
            AttributeKind::Number => "number",
            AttributeKind::Boolean => "boolean",
            AttributeKind::Options => "options",
        }
    }
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Attribute entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: AttributeKind,
    /// Allowed values in display order (options type only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Attribute {
    /// Whether selections on this attribute participate in the variant matrix
    pub fn is_options(&self) -> bool {
        self.kind == AttributeKind::Options
    }

    /// Whether `value` is one of the declared options
    pub fn allows(&self, value: &str) -> bool {
        self.options.iter().any(|o| o == value)
    }
}

/// Scalar attribute value
///
/// Untagged on the wire: `true`, `42`, `"Cotton"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl AttributeValue {
    /// Whether the value kind fits a (non-options) attribute type.
    ///
    /// Numbers must be finite; NaN and infinities have no JSON form.
    pub fn fits(&self, kind: AttributeKind) -> bool {
        match (self, kind) {
            (AttributeValue::Number(n), AttributeKind::Number) => n.is_finite(),
            (AttributeValue::Text(_), AttributeKind::String)
            | (AttributeValue::Bool(_), AttributeKind::Boolean) => true,
            _ => false,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

/// Create attribute payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeCreate {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: AttributeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_mongo_id() {
        let json = r#"{"_id":"a1","label":"Color","type":"options","options":["Red","Blue"]}"#;
        let attr: Attribute = serde_json::from_str(json).unwrap();
        assert_eq!(attr.id, "a1");
        assert_eq!(attr.kind, AttributeKind::Options);
        assert!(attr.is_options());
        assert!(attr.allows("Blue"));
        assert!(!attr.allows("Green"));
    }

    #[test]
    fn test_deserialize_plain_id_without_options() {
        let json = r#"{"id":"m1","label":"Material","type":"string"}"#;
        let attr: Attribute = serde_json::from_str(json).unwrap();
        assert_eq!(attr.id, "m1");
        assert!(attr.options.is_empty());
        assert!(!attr.is_options());

        let back = serde_json::to_string(&attr).unwrap();
        assert!(back.contains("\"_id\":\"m1\""));
        assert!(!back.contains("options"));
    }

    #[test]
    fn test_value_untagged() {
        let v: AttributeValue = serde_json::from_str("true").unwrap();
        assert_eq!(v, AttributeValue::Bool(true));
        let v: AttributeValue = serde_json::from_str("2.5").unwrap();
        assert_eq!(v, AttributeValue::Number(2.5));
        let v: AttributeValue = serde_json::from_str("\"Cotton\"").unwrap();
        assert_eq!(v, AttributeValue::from("Cotton"));
    }

    #[test]
    fn test_value_fits_kind() {
        assert!(AttributeValue::from("x").fits(AttributeKind::String));
        assert!(AttributeValue::from(1.0).fits(AttributeKind::Number));
        assert!(AttributeValue::from(false).fits(AttributeKind::Boolean));
        assert!(!AttributeValue::from("x").fits(AttributeKind::Number));
        assert!(!AttributeValue::from("x").fits(AttributeKind::Options));
        assert!(!AttributeValue::from(f64::NAN).fits(AttributeKind::Number));
        assert!(!AttributeValue::from(f64::INFINITY).fits(AttributeKind::Number));
    }
}
