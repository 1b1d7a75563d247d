//! Catalog API endpoints
//!
//! Wires [`HttpClient`] into the editor's collaborator traits.

use async_trait::async_trait;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Attribute, AttributeCreate, AttributeSet, AttributeSetCreate, AttributeSetCreated, ImageBlob,
    ImageRef, ProductCreate, ProductCreated, UploadedImages,
};
use variant_editor::{AttributeSource, CatalogWriter, ImageUploadSink, SubmissionSink};

use crate::HttpClient;

pub const ATTRIBUTE_SETS_PATH: &str = "api/attribute-sets";
pub const ATTRIBUTES_PATH: &str = "api/attributes";
pub const PRODUCTS_PATH: &str = "api/products";
pub const UPLOADS_PATH: &str = "api/uploads";

#[async_trait]
impl AttributeSource for HttpClient {
    async fn attribute_sets(&self) -> AppResult<Vec<AttributeSet>> {
        Ok(self.get(ATTRIBUTE_SETS_PATH).await?)
    }

    async fn attributes(&self) -> AppResult<Vec<Attribute>> {
        Ok(self.get(ATTRIBUTES_PATH).await?)
    }
}

#[async_trait]
impl SubmissionSink for HttpClient {
    async fn submit_product(
        &self,
        product: &ProductCreate,
        idempotency_key: &str,
    ) -> AppResult<ProductCreated> {
        Ok(self
            .post_idempotent(PRODUCTS_PATH, product, idempotency_key)
            .await?)
    }
}

#[async_trait]
impl ImageUploadSink for HttpClient {
    async fn upload_images(&self, images: &[ImageBlob]) -> AppResult<Vec<ImageRef>> {
        let uploaded: UploadedImages = self.post_images(UPLOADS_PATH, images).await.map_err(
            |e| {
                let err = AppError::from(e);
                if err.code == ErrorCode::NetworkError {
                    err
                } else {
                    AppError::with_message(ErrorCode::UploadFailed, err.message)
                }
            },
        )?;
        // One reference per blob, or the variant's image list would drift
        if uploaded.images.len() != images.len() {
            return Err(AppError::with_message(
                ErrorCode::UploadFailed,
                format!(
                    "Upload returned {} references for {} images",
                    uploaded.images.len(),
                    images.len()
                ),
            ));
        }
        Ok(uploaded.images)
    }
}

#[async_trait]
impl CatalogWriter for HttpClient {
    async fn create_attribute(&self, attribute: &AttributeCreate) -> AppResult<Attribute> {
        Ok(self.post(ATTRIBUTES_PATH, attribute).await?)
    }

    async fn create_attribute_set(
        &self,
        attribute_set: &AttributeSetCreate,
    ) -> AppResult<AttributeSetCreated> {
        Ok(self.post(ATTRIBUTE_SETS_PATH, attribute_set).await?)
    }
}
