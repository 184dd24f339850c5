use std::path::PathBuf;

use log::{debug, info};
use reqwest::Method;
use reqwest::multipart::{Form, Part};

use super::client::ApiClient;
use super::error::ApiError;
use super::types::{Tour, TourDraft};

/// `/tours[/:id]`
///
/// Create and update accept local media files. With no files the draft is
/// sent as JSON; with files it goes out as multipart form data, nested
/// objects JSON-encoded into text parts and each file under `media`.
pub struct ToursApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ToursApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Tour>, ApiError> {
        self.client.get("/tours").await
    }

    pub async fn get(&self, id: &str) -> Result<Tour, ApiError> {
        self.client.get(&format!("/tours/{id}")).await
    }

    pub async fn create(&self, draft: &TourDraft, uploads: &[PathBuf]) -> Result<Tour, ApiError> {
        self.write(Method::POST, "/tours".to_string(), draft, uploads)
            .await
    }

    pub async fn update(
        &self,
        id: &str,
        draft: &TourDraft,
        uploads: &[PathBuf],
    ) -> Result<Tour, ApiError> {
        self.write(Method::PUT, format!("/tours/{id}"), draft, uploads)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/tours/{id}")).await
    }

    async fn write(
        &self,
        method: Method,
        path: String,
        draft: &TourDraft,
        uploads: &[PathBuf],
    ) -> Result<Tour, ApiError> {
        let req = self.client.authed(method, &path)?;
        let req = if uploads.is_empty() {
            req.json(draft)
        } else {
            info!("Uploading {} media file(s) with tour", uploads.len());
            req.multipart(multipart_form(draft, uploads).await?)
        };
        self.client.send_json(req).await
    }
}

/// Flattens a draft into form parts: strings as-is, everything else as JSON text.
async fn multipart_form(draft: &TourDraft, uploads: &[PathBuf]) -> Result<Form, ApiError> {
    let value = serde_json::to_value(draft).map_err(|e| ApiError::Decode(e.to_string()))?;
    let mut form = Form::new();
    if let serde_json::Value::Object(fields) = value {
        for (key, field) in fields {
            let text = match field {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            form = form.text(key, text);
        }
    }

    for path in uploads {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        debug!("Attaching {} ({} bytes)", file_name, bytes.len());
        form = form.part("media", Part::bytes(bytes).file_name(file_name));
    }
    Ok(form)
}
