// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP content publisher
//!
//! Two-step pipeline: render the payload through a completion service, then
//! upload the rendered text as a JSON artifact document and return the
//! store's reference for it. Either step failing fails the publish; the
//! scheduler cancels the run and retries the item on a later invocation.

use async_trait::async_trait;
use drip_core::{ContentPublisher, PublishError};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    text: String,
}

/// Artifact document uploaded to the artifact store
#[derive(Serialize)]
struct ArtifactDocument {
    id: String,
    content: String,
}

#[derive(Deserialize)]
struct ArtifactReceipt {
    uri: String,
}

/// Publishes payloads through a completion service and an artifact store
pub struct HttpPublisher {
    completion_url: String,
    artifact_url: String,
}

impl HttpPublisher {
    pub fn new(completion_url: impl Into<String>, artifact_url: impl Into<String>) -> Self {
        Self {
            completion_url: completion_url.into(),
            artifact_url: artifact_url.into(),
        }
    }
}

#[async_trait]
impl ContentPublisher for HttpPublisher {
    async fn publish(&self, payload: &str) -> Result<String, PublishError> {
        let completion_url = self.completion_url.clone();
        let artifact_url = self.artifact_url.clone();
        let prompt = payload.to_string();

        // The HTTP client is blocking; keep it off the async executor
        tokio::task::spawn_blocking(move || {
            let text = render(&completion_url, &prompt)?;
            upload(&artifact_url, &text)
        })
        .await
        .map_err(|e| PublishError::Generation(e.to_string()))?
    }
}

fn render(url: &str, prompt: &str) -> Result<String, PublishError> {
    let body = serde_json::to_string(&CompletionRequest { prompt })
        .map_err(|e| PublishError::Generation(e.to_string()))?;
    let raw = post_json(url, &body).map_err(PublishError::Generation)?;
    let response: CompletionResponse =
        serde_json::from_str(&raw).map_err(|e| PublishError::Generation(e.to_string()))?;
    if response.text.trim().is_empty() {
        return Err(PublishError::Generation("no text produced".to_string()));
    }
    tracing::debug!(chars = response.text.len(), "content rendered");
    Ok(response.text)
}

fn upload(url: &str, content: &str) -> Result<String, PublishError> {
    let document = ArtifactDocument {
        id: uuid::Uuid::new_v4().to_string(),
        content: content.to_string(),
    };
    let body = serde_json::to_string(&document)
        .map_err(|e| PublishError::InvalidMetadata(e.to_string()))?;
    let raw = post_json(url, &body).map_err(PublishError::Upload)?;
    let receipt: ArtifactReceipt =
        serde_json::from_str(&raw).map_err(|e| PublishError::Upload(e.to_string()))?;
    tracing::debug!(uri = %receipt.uri, "artifact uploaded");
    Ok(receipt.uri)
}

fn post_json(url: &str, body: &str) -> Result<String, String> {
    let mut response = ureq::post(url)
        .header("content-type", "application/json")
        .send(body)
        .map_err(|e| e.to_string())?;
    response
        .body_mut()
        .read_to_string()
        .map_err(|e| e.to_string())
}
