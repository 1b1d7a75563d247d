//! Data models
//!
//! Wire types exchanged with the catalog API. Ids are opaque strings
//! (`_id` on the wire).

pub mod attribute;
pub mod attribute_set;
pub mod image;
pub mod product;

// Re-exports
pub use attribute::*;
pub use attribute_set::*;
pub use image::*;
pub use product::*;
