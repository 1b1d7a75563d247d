//! Product Model

use serde::{Deserialize, Serialize};

use super::attribute::AttributeValue;
use super::image::ImageRef;

/// One `{label, value}` entry of a submitted variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantAttribute {
    pub label: String,
    /// `None` when a scalar attribute was left unset (serialized as `null`)
    pub value: Option<AttributeValue>,
}

impl VariantAttribute {
    pub fn new(label: impl Into<String>, value: Option<AttributeValue>) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Final persistable variant record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantPayload {
    pub sku: String,
    /// Price in currency unit, always finite and >= 0
    pub price: f64,
    #[serde(default)]
    pub images: Vec<ImageRef>,
    pub attributes: Vec<VariantAttribute>,
}

/// Create product payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub sku: String,
    pub attribute_set_id: String,
    pub variants: Vec<VariantPayload>,
}

/// Acknowledgment returned by the product endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreated {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    /// Display name of the created product
    pub name: String,
    #[serde(default)]
    pub variants: Vec<VariantPayload>,
}
