//! Collaborator seams
//!
//! The editor never talks to the network itself; it is handed
//! implementations of these traits (HTTP in `catalog-client`, in-memory
//! fakes in tests). Every failure comes back as an [`AppError`] so the
//! editor can report it and leave its state untouched.

use async_trait::async_trait;
use shared::error::AppResult;
use shared::models::{
    Attribute, AttributeCreate, AttributeSet, AttributeSetCreate, AttributeSetCreated, ImageBlob,
    ImageRef, ProductCreate, ProductCreated,
};

/// Read-only catalog of attributes and attribute sets
#[async_trait]
pub trait AttributeSource: Send + Sync {
    /// Attribute sets with their attributes expanded, in set order
    async fn attribute_sets(&self) -> AppResult<Vec<AttributeSet>>;

    /// Every attribute known to the catalog
    async fn attributes(&self) -> AppResult<Vec<Attribute>>;
}

/// Receives finished products
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Submit a product. The same `idempotency_key` is sent again when the
    /// operator retries the same draft.
    async fn submit_product(
        &self,
        product: &ProductCreate,
        idempotency_key: &str,
    ) -> AppResult<ProductCreated>;
}

/// Stores variant images
#[async_trait]
pub trait ImageUploadSink: Send + Sync {
    /// Upload one batch (at most [`shared::models::MAX_IMAGES_PER_VARIANT`]
    /// blobs); returns one reference per stored image, in order.
    async fn upload_images(&self, images: &[ImageBlob]) -> AppResult<Vec<ImageRef>>;
}

/// Creates attributes and attribute sets
#[async_trait]
pub trait CatalogWriter: Send + Sync {
    async fn create_attribute(&self, attribute: &AttributeCreate) -> AppResult<Attribute>;

    async fn create_attribute_set(
        &self,
        attribute_set: &AttributeSetCreate,
    ) -> AppResult<AttributeSetCreated>;
}
