//! Attribute Set Model

use serde::{Deserialize, Serialize};

use super::attribute::Attribute;

/// Attribute set entity with its attributes expanded, in set order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSet {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl AttributeSet {
    /// Options-type attributes, in set order
    pub fn option_attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().filter(|a| a.is_options())
    }

    /// Scalar (non-options) attributes, in set order
    pub fn scalar_attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().filter(|a| !a.is_options())
    }
}

/// Create attribute set payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSetCreate {
    pub name: String,
    pub attribute_ids: Vec<String>,
}

/// Acknowledgment returned when an attribute set is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSetCreated {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    pub name: String,
}
