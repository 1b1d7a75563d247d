//! Product draft files
//!
//! A draft is a JSON document the CLI replays onto a [`ProductEditor`]:
//!
//! ```json
//! {
//!   "attributeSetId": "apparel",
//!   "name": "Shirt",
//!   "sku": "SHIRT",
//!   "selections": { "color": ["Red", "Blue"], "material": "Cotton" },
//!   "prices": [{ "variant": { "color": "Red" }, "price": "12.50" }],
//!   "images": [{ "variant": { "color": "Red" }, "files": ["red.png"] }]
//! }
//! ```
//!
//! Variants are addressed by their attribute id to value map, so the
//! order of keys in the file does not matter.

use mime_guess::MimeGuess;
use serde::{Deserialize, Serialize};
use shared::models::{AttributeKind, AttributeValue, ImageBlob};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use variant_editor::{EditorError, EditorResult, ProductEditor, Selection, VariantKey};

use crate::ClientResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftFile {
    pub attribute_set_id: String,
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub selections: BTreeMap<String, Selection>,
    #[serde(default)]
    pub prices: Vec<PriceEntry>,
    #[serde(default)]
    pub images: Vec<ImageEntry>,
}

/// Price typed as a number or as free text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub variant: BTreeMap<String, String>,
    pub price: PriceInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub variant: BTreeMap<String, String>,
    /// Paths relative to the draft file
    pub files: Vec<PathBuf>,
}

impl DraftFile {
    pub fn from_json(json: &str) -> ClientResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Choose the attribute set, then replay name, SKU, selections and prices.
    ///
    /// Images are not touched here since they need an upload sink.
    pub fn apply(&self, editor: &mut ProductEditor) -> EditorResult<()> {
        if editor.choose_attribute_set(&self.attribute_set_id).is_none() {
            return Err(EditorError::NoAttributeSet);
        }
        editor.set_name(self.name.clone());
        editor.set_sku(self.sku.clone());

        for (attribute_id, selection) in &self.selections {
            match selection {
                Selection::Options(values) => {
                    editor.select_options(attribute_id, values.iter().cloned())?
                }
                Selection::Scalar(AttributeValue::Text(raw)) => {
                    // Text may stand for a number or boolean typed in a form
                    let is_text = editor
                        .attributes()
                        .iter()
                        .find(|a| a.id == *attribute_id)
                        .is_some_and(|a| a.kind == AttributeKind::String);
                    if is_text {
                        editor.set_scalar(attribute_id, raw.as_str())?
                    } else {
                        editor.set_scalar_input(attribute_id, raw)?
                    }
                }
                Selection::Scalar(value) => editor.set_scalar(attribute_id, value.clone())?,
            }
        }
        debug!(variants = editor.variants().len(), "Draft selections applied");

        for entry in &self.prices {
            let key = resolve_variant(editor, &entry.variant)?;
            match &entry.price {
                PriceInput::Number(price) => editor.set_price(&key, *price)?,
                PriceInput::Text(raw) => editor.set_price_input(&key, raw)?,
            };
        }
        Ok(())
    }
}

/// Find the current variant matching an attribute id to value map
pub fn resolve_variant(
    editor: &ProductEditor,
    wanted: &BTreeMap<String, String>,
) -> EditorResult<VariantKey> {
    editor
        .variants()
        .iter()
        .map(|v| v.key())
        .find(|key| {
            key.pairs().len() == wanted.len()
                && key
                    .pairs()
                    .iter()
                    .all(|(id, value)| wanted.get(id) == Some(value))
        })
        .ok_or_else(|| EditorError::UnknownVariant(VariantKey::new(wanted.clone())))
}

/// Read an image from disk, guessing its MIME type from the extension
pub fn load_image(path: &Path) -> std::io::Result<ImageBlob> {
    let bytes = fs::read(path)?;
    let content_type = MimeGuess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    Ok(ImageBlob::new(file_name, content_type, bytes))
}
