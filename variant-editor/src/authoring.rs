//! Attribute and attribute set authoring
//!
//! Small drafts backing the "create attribute" and "create attribute set"
//! forms. Both validate locally before the writer is called and clear
//! themselves only after the writer accepted the payload.

use shared::models::{
    Attribute, AttributeCreate, AttributeKind, AttributeSetCreate, AttributeSetCreated,
};
use tracing::{info, warn};

use crate::error::{EditorError, EditorResult};
use crate::ports::{AttributeSource, CatalogWriter};

/// Draft of a new attribute
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDraft {
    pub label: String,
    pub kind: AttributeKind,
    /// Option inputs as typed, blanks included
    pub options: Vec<String>,
}

impl Default for AttributeDraft {
    fn default() -> Self {
        Self {
            label: String::new(),
            kind: AttributeKind::String,
            options: vec![String::new()],
        }
    }
}

impl AttributeDraft {
    pub fn new(label: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            label: label.into(),
            kind,
            ..Self::default()
        }
    }

    /// Append an empty option input
    pub fn add_option(&mut self) {
        self.options.push(String::new());
    }

    pub fn set_option(&mut self, index: usize, value: impl Into<String>) {
        if let Some(slot) = self.options.get_mut(index) {
            *slot = value.into();
        }
    }

    pub fn remove_option(&mut self, index: usize) {
        if index < self.options.len() {
            self.options.remove(index);
        }
    }

    /// Build the create payload.
    ///
    /// Blank options are dropped; an options attribute needs at least one
    /// remaining value. Other types never carry options.
    pub fn to_payload(&self) -> EditorResult<AttributeCreate> {
        if self.label.trim().is_empty() {
            return Err(EditorError::Required("Label"));
        }

        let options = match self.kind {
            AttributeKind::Options => {
                let options: Vec<String> = self
                    .options
                    .iter()
                    .filter(|o| !o.trim().is_empty())
                    .cloned()
                    .collect();
                if options.is_empty() {
                    return Err(EditorError::Required("Option"));
                }
                Some(options)
            }
            _ => None,
        };

        Ok(AttributeCreate {
            label: self.label.clone(),
            kind: self.kind,
            options,
        })
    }

    pub async fn submit(&mut self, writer: &dyn CatalogWriter) -> EditorResult<Attribute> {
        let payload = self.to_payload()?;
        let created = writer.create_attribute(&payload).await.map_err(|e| {
            warn!(label = %payload.label, error = %e, "Failed to create attribute");
            EditorError::Transport(e)
        })?;
        info!(label = %created.label, kind = %created.kind, "Attribute created");
        *self = Self::default();
        Ok(created)
    }
}

/// Draft of a new attribute set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSetDraft {
    pub name: String,
    attribute_ids: Vec<String>,
    /// Attributes offered for picking, once loaded
    available: Option<Vec<Attribute>>,
}

impl AttributeSetDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Fetch the attributes that can be picked; on failure the current list is kept.
    ///
    /// Once loaded, picked ids must name one of them.
    pub async fn load_attributes(
        &mut self,
        source: &dyn AttributeSource,
    ) -> EditorResult<&[Attribute]> {
        let attributes = source.attributes().await.map_err(|e| {
            warn!(error = %e, "Failed to fetch attributes");
            EditorError::Transport(e)
        })?;
        Ok(self.available.insert(attributes).as_slice())
    }

    /// Loaded attributes, empty until [`load_attributes`](Self::load_attributes) succeeded
    pub fn available(&self) -> &[Attribute] {
        self.available.as_deref().unwrap_or(&[])
    }

    /// Chosen attribute ids, in the order they were picked
    pub fn attribute_ids(&self) -> &[String] {
        &self.attribute_ids
    }

    /// Add or remove an attribute; returns `true` if it is chosen afterwards
    pub fn toggle(&mut self, attribute_id: &str) -> bool {
        match self.attribute_ids.iter().position(|id| id == attribute_id) {
            Some(idx) => {
                self.attribute_ids.remove(idx);
                false
            }
            None => {
                self.attribute_ids.push(attribute_id.to_string());
                true
            }
        }
    }

    pub fn to_payload(&self) -> EditorResult<AttributeSetCreate> {
        if self.name.trim().is_empty() {
            return Err(EditorError::Required("Set name"));
        }
        if self.attribute_ids.is_empty() {
            return Err(EditorError::Required("Attribute"));
        }
        if let Some(available) = &self.available {
            let unknown = self
                .attribute_ids
                .iter()
                .find(|id| !available.iter().any(|a| &a.id == *id));
            if let Some(id) = unknown {
                return Err(EditorError::UnknownAttribute(id.clone()));
            }
        }
        Ok(AttributeSetCreate {
            name: self.name.clone(),
            attribute_ids: self.attribute_ids.clone(),
        })
    }

    pub async fn submit(&mut self, writer: &dyn CatalogWriter) -> EditorResult<AttributeSetCreated> {
        let payload = self.to_payload()?;
        let created = writer.create_attribute_set(&payload).await.map_err(|e| {
            warn!(name = %payload.name, error = %e, "Failed to create attribute set");
            EditorError::Transport(e)
        })?;
        info!(
            name = %created.name,
            attributes = payload.attribute_ids.len(),
            "Attribute set created"
        );
        *self = Self {
            available: self.available.take(),
            ..Self::default()
        };
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_options_are_dropped() {
        let mut draft = AttributeDraft::new("Color", AttributeKind::Options);
        draft.set_option(0, "Red");
        draft.add_option();
        draft.add_option();
        draft.set_option(2, "Blue");

        let payload = draft.to_payload().unwrap();
        assert_eq!(payload.options, Some(vec!["Red".to_string(), "Blue".to_string()]));
    }

    #[test]
    fn test_options_attribute_needs_an_option() {
        let mut draft = AttributeDraft::new("Color", AttributeKind::Options);
        draft.set_option(0, "   ");
        assert!(matches!(draft.to_payload(), Err(EditorError::Required("Option"))));
    }

    #[test]
    fn test_scalar_attribute_has_no_options() {
        let mut draft = AttributeDraft::new("Material", AttributeKind::String);
        draft.set_option(0, "ignored");
        assert_eq!(draft.to_payload().unwrap().options, None);
    }

    #[test]
    fn test_label_required() {
        let draft = AttributeDraft::new("  ", AttributeKind::Number);
        assert!(matches!(draft.to_payload(), Err(EditorError::Required("Label"))));
    }

    #[test]
    fn test_remove_option_out_of_range_is_noop() {
        let mut draft = AttributeDraft::default();
        draft.remove_option(3);
        assert_eq!(draft.options.len(), 1);
        draft.remove_option(0);
        assert!(draft.options.is_empty());
    }

    #[test]
    fn test_set_draft_toggle_and_validation() {
        let mut draft = AttributeSetDraft::new("Gold");
        assert!(matches!(draft.to_payload(), Err(EditorError::Required("Attribute"))));

        assert!(draft.toggle("a"));
        assert!(draft.toggle("b"));
        assert!(!draft.toggle("a"));
        assert_eq!(draft.attribute_ids(), ["b"]);

        let payload = draft.to_payload().unwrap();
        assert_eq!(payload.attribute_ids, vec!["b".to_string()]);

        draft.name = " ".into();
        assert!(matches!(draft.to_payload(), Err(EditorError::Required("Set name"))));
    }
}
