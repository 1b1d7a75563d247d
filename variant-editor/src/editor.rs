//! Product editing session
//!
//! [`ProductEditor`] owns the whole draft: chosen attribute set, selection
//! state and the reconciled variant list. Every action takes `&mut self`, so
//! there is exactly one writer and each transition is computed from the
//! previous snapshot. Actions that call a collaborator only mutate state
//! after the call succeeded.

use shared::error::{AppError, ErrorCode};
use shared::models::{
    Attribute, AttributeKind, AttributeSet, AttributeValue, ImageBlob, ImageRef,
    MAX_IMAGES_PER_VARIANT, ProductCreate, ProductCreated,
};
use shared::util::{normalize_price, parse_price};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::assemble::assemble;
use crate::combination::{VariantKey, generate};
use crate::error::{EditorError, EditorResult};
use crate::ports::{AttributeSource, ImageUploadSink, SubmissionSink};
use crate::reconcile::{Variant, reconcile};
use crate::selection::SelectionState;

/// Reject a batch that would push a variant past the image cap
pub fn check_image_limit(existing: usize, incoming: usize) -> EditorResult<()> {
    if incoming > MAX_IMAGES_PER_VARIANT || existing + incoming > MAX_IMAGES_PER_VARIANT {
        return Err(EditorError::TooManyImages {
            limit: MAX_IMAGES_PER_VARIANT,
            existing,
            incoming,
        });
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct ProductEditor {
    attribute_sets: Vec<AttributeSet>,
    attribute_set: Option<AttributeSet>,
    name: String,
    sku: String,
    selections: SelectionState,
    variants: Vec<Variant>,
    idempotency_key: String,
    /// Payload of the last failed submission, sent under `idempotency_key`
    last_attempt: Option<ProductCreate>,
}

impl Default for ProductEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductEditor {
    pub fn new() -> Self {
        Self {
            attribute_sets: Vec::new(),
            attribute_set: None,
            name: String::new(),
            sku: String::new(),
            selections: SelectionState::new(),
            variants: Vec::new(),
            idempotency_key: Uuid::new_v4().to_string(),
            last_attempt: None,
        }
    }

    /// Editor with an already fetched list of attribute sets
    pub fn with_attribute_sets(attribute_sets: Vec<AttributeSet>) -> Self {
        Self {
            attribute_sets,
            ..Self::new()
        }
    }

    // ========== Attribute sets ==========

    /// Fetch the attribute sets; on failure the current list is kept.
    pub async fn load_attribute_sets(
        &mut self,
        source: &dyn AttributeSource,
    ) -> EditorResult<&[AttributeSet]> {
        let sets = source.attribute_sets().await.map_err(|e| {
            warn!(error = %e, "Failed to fetch attribute sets");
            EditorError::Transport(e)
        })?;
        debug!(count = sets.len(), "Attribute sets loaded");
        self.attribute_sets = sets;
        Ok(&self.attribute_sets)
    }

    pub fn attribute_sets(&self) -> &[AttributeSet] {
        &self.attribute_sets
    }

    /// Switch to another attribute set.
    ///
    /// Selections and variants always start over; an unknown id leaves the
    /// editor without attributes.
    pub fn choose_attribute_set(&mut self, set_id: &str) -> Option<&AttributeSet> {
        self.attribute_set = self
            .attribute_sets
            .iter()
            .find(|s| s.id == set_id)
            .cloned();
        self.selections.clear_all();
        self.variants.clear();

        match &self.attribute_set {
            Some(set) => debug!(set_id, attributes = set.attributes.len(), "Attribute set chosen"),
            None => warn!(set_id, "Unknown attribute set"),
        }
        self.attribute_set.as_ref()
    }

    pub fn attribute_set(&self) -> Option<&AttributeSet> {
        self.attribute_set.as_ref()
    }

    /// Attributes of the chosen set, in set order
    pub fn attributes(&self) -> &[Attribute] {
        self.attribute_set
            .as_ref()
            .map(|s| s.attributes.as_slice())
            .unwrap_or(&[])
    }

    fn attribute(&self, attribute_id: &str) -> EditorResult<&Attribute> {
        self.attributes()
            .iter()
            .find(|a| a.id == attribute_id)
            .ok_or_else(|| EditorError::UnknownAttribute(attribute_id.to_string()))
    }

    // ========== Product fields ==========

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn set_sku(&mut self, sku: impl Into<String>) {
        self.sku = sku.into();
    }

    /// Key the next submission is sent under.
    ///
    /// A retry of an unchanged draft reuses it; a draft edited after a
    /// failed attempt is sent under a fresh key.
    pub fn idempotency_key(&self) -> &str {
        &self.idempotency_key
    }

    // ========== Selection ==========

    pub fn selections(&self) -> &SelectionState {
        &self.selections
    }

    /// Set a scalar attribute value; the value kind must match the attribute type.
    pub fn set_scalar(
        &mut self,
        attribute_id: &str,
        value: impl Into<AttributeValue>,
    ) -> EditorResult<()> {
        let value = value.into();
        let attribute = self.attribute(attribute_id)?;
        if !value.fits(attribute.kind) {
            return Err(EditorError::KindMismatch {
                label: attribute.label.clone(),
                expected: attribute.kind,
            });
        }
        self.selections.set_scalar(attribute_id, value);
        Ok(())
    }

    /// Set a scalar attribute from raw form input.
    ///
    /// Blank input clears the value. Numbers must parse, booleans accept
    /// `true/false`, `1/0`, `yes/no`, `on/off`.
    pub fn set_scalar_input(&mut self, attribute_id: &str, raw: &str) -> EditorResult<()> {
        let attribute = self.attribute(attribute_id)?;
        let trimmed = raw.trim();
        let mismatch = || EditorError::KindMismatch {
            label: attribute.label.clone(),
            expected: attribute.kind,
        };

        let value = match attribute.kind {
            AttributeKind::Options => return Err(mismatch()),
            _ if trimmed.is_empty() => None,
            AttributeKind::String => Some(AttributeValue::Text(raw.to_string())),
            AttributeKind::Number => match trimmed.parse::<f64>() {
                Ok(n) if n.is_finite() => Some(AttributeValue::Number(n)),
                _ => return Err(mismatch()),
            },
            AttributeKind::Boolean => match trimmed.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Some(AttributeValue::Bool(true)),
                "false" | "0" | "no" | "off" => Some(AttributeValue::Bool(false)),
                _ => return Err(mismatch()),
            },
        };

        match value {
            Some(value) => self.selections.set_scalar(attribute_id, value),
            None => {
                self.selections.clear(attribute_id);
            }
        }
        Ok(())
    }

    fn option_attribute(&self, attribute_id: &str) -> EditorResult<&Attribute> {
        let attribute = self.attribute(attribute_id)?;
        if !attribute.is_options() {
            return Err(EditorError::KindMismatch {
                label: attribute.label.clone(),
                expected: attribute.kind,
            });
        }
        Ok(attribute)
    }

    /// Select or deselect one option value and regenerate the variants.
    ///
    /// Returns `true` when the value is selected afterwards.
    pub fn toggle_option(&mut self, attribute_id: &str, value: &str) -> EditorResult<bool> {
        let attribute = self.option_attribute(attribute_id)?;
        if !attribute.allows(value) {
            return Err(EditorError::OptionNotAllowed {
                label: attribute.label.clone(),
                value: value.to_string(),
            });
        }
        let selected = self.selections.toggle_option(attribute_id, value);
        self.regenerate();
        Ok(selected)
    }

    /// Replace the selected values of an options attribute and regenerate.
    pub fn select_options<I, S>(&mut self, attribute_id: &str, values: I) -> EditorResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        let attribute = self.option_attribute(attribute_id)?;
        if let Some(bad) = values.iter().find(|v| !attribute.allows(v)) {
            return Err(EditorError::OptionNotAllowed {
                label: attribute.label.clone(),
                value: bad.clone(),
            });
        }
        self.selections.set_options(attribute_id, values);
        self.regenerate();
        Ok(())
    }

    /// Forget the value of one attribute
    pub fn clear_value(&mut self, attribute_id: &str) -> EditorResult<()> {
        let is_options = self.attribute(attribute_id)?.is_options();
        self.selections.clear(attribute_id);
        if is_options {
            self.regenerate();
        }
        Ok(())
    }

    fn regenerate(&mut self) {
        let combinations = generate(
            self.attributes().iter().filter(|a| a.is_options()),
            &self.selections,
        );
        let previous = std::mem::take(&mut self.variants);
        self.variants = reconcile(combinations, previous);
    }

    // ========== Variants ==========

    /// Current variants, in generation order
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn variant(&self, key: &VariantKey) -> Option<&Variant> {
        self.variants.iter().find(|v| &v.key() == key)
    }

    fn variant_mut(&mut self, key: &VariantKey) -> EditorResult<&mut Variant> {
        self.variants
            .iter_mut()
            .find(|v| &v.key() == key)
            .ok_or_else(|| EditorError::UnknownVariant(key.clone()))
    }

    /// Set a variant price; invalid or negative numbers become 0.
    pub fn set_price(&mut self, key: &VariantKey, price: f64) -> EditorResult<f64> {
        let variant = self.variant_mut(key)?;
        variant.price = normalize_price(price);
        Ok(variant.price)
    }

    /// Set a variant price from raw form input (see [`parse_price`]).
    pub fn set_price_input(&mut self, key: &VariantKey, raw: &str) -> EditorResult<f64> {
        self.set_price(key, parse_price(raw))
    }

    /// Upload images for one variant and append the returned references.
    ///
    /// The cap is checked before the sink is called. A failed upload leaves
    /// the image list untouched.
    pub async fn upload_images(
        &mut self,
        key: &VariantKey,
        images: Vec<ImageBlob>,
        sink: &dyn ImageUploadSink,
    ) -> EditorResult<&[ImageRef]> {
        let existing = self
            .variant(key)
            .ok_or_else(|| EditorError::UnknownVariant(key.clone()))?
            .images
            .len();
        if let Err(e) = check_image_limit(existing, images.len()) {
            warn!(variant = %key, existing, incoming = images.len(), "Image limit exceeded");
            return Err(e);
        }

        if !images.is_empty() {
            let refs = sink.upload_images(&images).await.map_err(|e| {
                warn!(variant = %key, error = %e, "Image upload failed");
                EditorError::Transport(e)
            })?;
            debug!(variant = %key, uploaded = refs.len(), "Images uploaded");
            if refs.len() != images.len() {
                warn!(
                    variant = %key,
                    sent = images.len(),
                    returned = refs.len(),
                    "Image upload reply mismatch"
                );
                return Err(EditorError::Transport(AppError::with_message(
                    ErrorCode::UploadFailed,
                    format!(
                        "Upload returned {} references for {} images",
                        refs.len(),
                        images.len()
                    ),
                )));
            }
            self.variant_mut(key)?.images.extend(refs);
        }

        self.variant(key)
            .map(|v| v.images.as_slice())
            .ok_or_else(|| EditorError::UnknownVariant(key.clone()))
    }

    // ========== Submission ==========

    /// Validate the draft and build the submission payload without sending it.
    pub fn preview(&self) -> EditorResult<ProductCreate> {
        if self.name.trim().is_empty() {
            return Err(EditorError::Required("Product name"));
        }
        if self.sku.trim().is_empty() {
            return Err(EditorError::Required("SKU"));
        }
        let attribute_set = self
            .attribute_set
            .as_ref()
            .ok_or(EditorError::NoAttributeSet)?;

        Ok(ProductCreate {
            name: self.name.clone(),
            sku: self.sku.clone(),
            attribute_set_id: attribute_set.id.clone(),
            variants: assemble(
                &self.variants,
                &attribute_set.attributes,
                &self.selections,
                &self.sku,
            ),
        })
    }

    /// Submit the draft.
    ///
    /// On success the form is reset and a new idempotency key is drawn. On
    /// failure the draft stays as it was and the payload is remembered: an
    /// unchanged retry goes out under the same key, an edited one under a
    /// new key.
    pub async fn submit(&mut self, sink: &dyn SubmissionSink) -> EditorResult<ProductCreated> {
        let product = self.preview().inspect_err(|e| {
            warn!(error = %e, "Product submission rejected");
        })?;

        if self.last_attempt.as_ref().is_some_and(|last| *last != product) {
            self.idempotency_key = Uuid::new_v4().to_string();
            debug!("Draft changed since the failed attempt, new idempotency key");
        }

        info!(
            sku = %product.sku,
            variants = product.variants.len(),
            "Submitting product"
        );
        let ack = sink
            .submit_product(&product, &self.idempotency_key)
            .await
            .map_err(|e| {
                warn!(sku = %product.sku, error = %e, "Product submission failed");
                EditorError::Transport(e)
            });
        let ack = match ack {
            Ok(ack) => ack,
            Err(e) => {
                self.last_attempt = Some(product);
                return Err(e);
            }
        };

        info!(name = %ack.name, variants = product.variants.len(), "Product created");
        self.reset();
        Ok(ack)
    }

    /// Clear the draft, keeping the loaded attribute sets
    pub fn reset(&mut self) {
        self.name.clear();
        self.sku.clear();
        self.attribute_set = None;
        self.selections.clear_all();
        self.variants.clear();
        self.idempotency_key = Uuid::new_v4().to_string();
        self.last_attempt = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_image_limit() {
        assert!(check_image_limit(0, 5).is_ok());
        assert!(check_image_limit(3, 2).is_ok());
        assert!(check_image_limit(0, 0).is_ok());
        assert!(matches!(
            check_image_limit(0, 6),
            Err(EditorError::TooManyImages { incoming: 6, .. })
        ));
        assert!(matches!(
            check_image_limit(4, 2),
            Err(EditorError::TooManyImages { existing: 4, .. })
        ));
    }

    #[test]
    fn test_new_editor_is_empty() {
        let editor = ProductEditor::new();
        assert!(editor.attributes().is_empty());
        assert!(editor.variants().is_empty());
        assert!(matches!(editor.preview(), Err(EditorError::Required(_))));
        assert_eq!(editor.idempotency_key().len(), 36);
    }
}
