//! Client for qualitative figure feedback from a hosted model.
//!
//! The rendered figure is sent as an inline PNG together with a text prompt
//! to the Gemini `generateContent` endpoint. The reply's text parts are
//! joined and returned as-is.

use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use log::{debug, info};
use reqwest::{StatusCode, blocking::Client};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::FeedbackConfig;

/// Errors raised by the feedback client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API key not set: export {0} with your key")]
    MissingKey(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API key rejected (HTTP {status}): {body}")]
    Auth { status: u16, body: String },

    #[error("quota exceeded (HTTP {status}): {body}")]
    Quota { status: u16, body: String },

    #[error("API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("model returned no text")]
    EmptyResponse,
}

impl ApiError {
    fn from_status(status: StatusCode, body: String) -> Self {
        let code = status.as_u16();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Auth { status: code, body },
            StatusCode::TOO_MANY_REQUESTS => Self::Quota { status: code, body },
            _ => Self::Status { status: code, body },
        }
    }
}

/// Reads the API key from the environment variable named in the config.
///
/// # Errors
///
/// Returns [`ApiError::MissingKey`] when the variable is unset or empty.
pub fn api_key_from_env(config: &FeedbackConfig) -> Result<String, ApiError> {
    std::env::var(config.api_key_env())
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| ApiError::MissingKey(config.api_key_env().to_string()))
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 2],
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    #[serde(rename_all = "camelCase")]
    Image { inline_data: InlineData },
    Text { text: &'a str },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: &'static str,
    data: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResponsePart {
    text: Option<String>,
}

fn build_request<'a>(prompt: &'a str, png: &[u8]) -> GenerateRequest<'a> {
    GenerateRequest {
        contents: [Content {
            parts: [
                Part::Image {
                    inline_data: InlineData {
                        mime_type: "image/png",
                        data: STANDARD.encode(png),
                    },
                },
                Part::Text { text: prompt },
            ],
        }],
    }
}

/// Joins the text parts of the first candidate.
fn extract_text(body: &str) -> Result<String, ApiError> {
    let response: GenerateResponse = serde_json::from_str(body)?;
    let text = response
        .candidates
        .into_iter()
        .next()
        .map(|candidate| {
            candidate
                .content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ApiError::EmptyResponse);
    }
    Ok(text)
}

/// Blocking client for the model API.
#[derive(Debug, Clone)]
pub struct FeedbackClient {
    http: Client,
    endpoint: String,
    api_key: String,
    prompt: String,
}

impl FeedbackClient {
    /// Creates a client from the `[feedback]` section and an API key.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &FeedbackConfig, api_key: String) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs()))
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint().trim_end_matches('/').to_string(),
            api_key,
            prompt: config.prompt().to_string(),
        })
    }

    /// Returns the `generateContent` URL for `model`.
    pub fn request_url(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.endpoint)
    }

    /// Sends the PNG and the prompt to `model` and returns its reply.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for network failures, rejected keys,
    /// exhausted quota, other non-success statuses, undecodable bodies and
    /// replies without text.
    pub fn feedback(&self, model: &str, png: &[u8]) -> Result<String, ApiError> {
        let url = self.request_url(model);
        info!(model, bytes = png.len(); "Requesting figure feedback");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&build_request(&self.prompt, png))
            .send()?;

        let status = response.status();
        let body = response.text()?;
        debug!(status = status.as_u16(), bytes = body.len(); "Received feedback response");

        if !status.is_success() {
            return Err(ApiError::from_status(status, body));
        }
        extract_text(&body)
    }
}
