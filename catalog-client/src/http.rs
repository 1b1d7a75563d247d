// catalog-client/src/http.rs
// HTTP client for the catalog API

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::ApiResponse;
use shared::models::ImageBlob;
use std::time::Duration;

/// Header carrying the per-draft submission key
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Multipart field name used for image uploads
pub const IMAGE_FIELD: &str = "images";

/// HTTP client bound to one catalog API
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            // Structured error body first
            if let Ok(api_err) = serde_json::from_str::<ApiResponse<serde_json::Value>>(&text) {
                return Err(ClientError::Api {
                    code: api_err.code,
                    message: api_err.message,
                });
            }
            return match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ClientError::Unauthorized),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    Err(ClientError::Validation(text))
                }
                _ => Err(ClientError::Internal(format!("{status}: {text}"))),
            };
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(ClientError::InvalidResponse("empty body".into()));
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.authorize(self.client.get(self.url(path)));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.authorize(self.client.post(self.url(path)).json(body));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    /// POST with an `Idempotency-Key` header; retries of the same draft reuse the key
    pub async fn post_idempotent<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        idempotency_key: &str,
    ) -> ClientResult<T> {
        let req = self
            .client
            .post(self.url(path))
            .header(IDEMPOTENCY_KEY_HEADER, idempotency_key)
            .json(body);
        let response = self.authorize(req).send().await?;
        self.handle_response(response).await
    }

    /// POST image blobs as `multipart/form-data`, one `images` part per blob
    pub async fn post_images<T: DeserializeOwned>(
        &self,
        path: &str,
        images: &[ImageBlob],
    ) -> ClientResult<T> {
        let mut form = Form::new();
        for image in images {
            let part = Part::bytes(image.bytes.clone())
                .file_name(image.file_name.clone())
                .mime_str(&image.content_type)?;
            form = form.part(IMAGE_FIELD, part);
        }
        let req = self.authorize(self.client.post(self.url(path)).multipart(form));
        let response = req.send().await?;
        self.handle_response(response).await
    }
}
