//! Catalog client - HTTP collaborators for the variant editor
//!
//! [`HttpClient`] implements every collaborator trait of
//! `variant_editor` against the catalog REST API:
//!
//! | Trait | Endpoint |
//! |-------|----------|
//! | `AttributeSource` | `GET api/attribute-sets`, `GET api/attributes` |
//! | `SubmissionSink` | `POST api/products` (with `Idempotency-Key`) |
//! | `ImageUploadSink` | `POST api/uploads` (multipart) |
//! | `CatalogWriter` | `POST api/attributes`, `POST api/attribute-sets` |
//!
//! # Example
//!
//! ```no_run
//! use catalog_client::ClientConfig;
//! use variant_editor::ProductEditor;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ClientConfig::new("http://localhost:5000").build_http_client()?;
//! let mut editor = ProductEditor::new();
//! editor.load_attribute_sets(&client).await?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod draft;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use draft::{DraftFile, ImageEntry, PriceEntry};
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
