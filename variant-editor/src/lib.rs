//! Variant editor - product composition core
//!
//! Builds the variant matrix of a product from an attribute set:
//! - [`selection`]: operator choices per attribute
//! - [`combination`]: cartesian product of selected option values
//! - [`reconcile`]: identity-preserving merge of regenerated variants
//! - [`assemble`]: final variant payloads with SKUs and scalar values
//! - [`editor`]: the editing session tying them together
//!
//! # Example
//!
//! ```
//! use shared::models::{Attribute, AttributeKind, AttributeSet};
//! use variant_editor::ProductEditor;
//!
//! let set = AttributeSet {
//!     id: "apparel".into(),
//!     name: "Apparel".into(),
//!     attributes: vec![Attribute {
//!         id: "color".into(),
//!         label: "Color".into(),
//!         kind: AttributeKind::Options,
//!         options: vec!["Red".into(), "Blue".into()],
//!     }],
//! };
//!
//! let mut editor = ProductEditor::with_attribute_sets(vec![set]);
//! editor.choose_attribute_set("apparel");
//! editor.toggle_option("color", "Red").unwrap();
//! editor.toggle_option("color", "Blue").unwrap();
//! assert_eq!(editor.variants().len(), 2);
//! ```

pub mod assemble;
pub mod authoring;
pub mod combination;
pub mod editor;
pub mod error;
pub mod ports;
pub mod reconcile;
pub mod selection;

pub use assemble::assemble;
pub use authoring::{AttributeDraft, AttributeSetDraft};
pub use combination::{Combination, CombinationEntry, Combinations, VariantKey, generate};
pub use editor::ProductEditor;
pub use error::{EditorError, EditorResult};
pub use ports::{AttributeSource, CatalogWriter, ImageUploadSink, SubmissionSink};
pub use reconcile::{Variant, reconcile};
pub use selection::{Selection, SelectionState};
