//! HTTP client for the cookbook API.
//!
//! Every call is bounded by a timeout. Failures come back as a
//! [`ClientError`] whose message is ready to show to the user.

use cookbook_core::{CreateRecipeContract, Recipe};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const UNREACHABLE_MESSAGE: &str = "Unable to reach the server. Check your connection.";
const TIMEOUT_MESSAGE: &str = "The request timed out. Please try again.";

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        /// Every message when the server reported several.
        details: Option<Vec<String>>,
    },

    /// No usable answer: connection refused, DNS failure, timeout.
    #[error("{0}")]
    Network(String),

    #[error("Unexpected response from server: {0}")]
    Decode(String),

    #[error("Invalid server URL: {0}")]
    InvalidServerUrl(#[from] url::ParseError),

    #[error("Recipe ID must not be empty")]
    EmptyId,
}

/// Message shown when an error response carries none of its own.
pub fn default_error_message(status: u16) -> &'static str {
    match status {
        400 => "Invalid data. Please check the form.",
        404 => "Resource not found.",
        409 => "Conflict: this resource already exists.",
        500 => "Internal server error. Please try again later.",
        _ => "Something went wrong.",
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<ErrorMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

/// Turns an error response into a [`ClientError::Api`]. A list of messages
/// is headlined by its first element; a missing or unreadable body falls back
/// to the status default.
pub fn translate_error(status: u16, body: &str) -> ClientError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let (message, details) = match parsed.message {
        Some(ErrorMessage::Many(messages)) if !messages.is_empty() => {
            (messages[0].clone(), Some(messages))
        }
        Some(ErrorMessage::One(message)) if !message.trim().is_empty() => (message, None),
        _ => (default_error_message(status).to_string(), None),
    };
    ClientError::Api {
        status,
        message,
        details,
    }
}

fn network_error(e: reqwest::Error) -> ClientError {
    tracing::debug!(error = %e, "Request did not complete");
    if e.is_timeout() {
        ClientError::Network(TIMEOUT_MESSAGE.to_string())
    } else {
        ClientError::Network(UNREACHABLE_MESSAGE.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    client: Client,
}

impl ApiClient {
    pub fn new(server: &str) -> Result<Self, ClientError> {
        Self::with_timeout(server, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(server: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = Url::parse(server)?;
        if base_url.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase.into());
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { base_url, client })
    }

    /// `/recipes` under the server URL, or `/recipes/{id}` with `id` sent as
    /// one escaped path segment.
    fn recipes_url(&self, id: Option<&str>) -> Result<Url, ClientError> {
        if id.is_some_and(|id| id.trim().is_empty()) {
            return Err(ClientError::EmptyId);
        }
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?;
            segments.pop_if_empty().push("recipes");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    pub async fn list_recipes(&self, category: Option<&str>) -> Result<Vec<Recipe>, ClientError> {
        let mut request = self.client.get(self.recipes_url(None)?);
        if let Some(category) = category {
            request = request.query(&[("category", category)]);
        }
        self.send(request).await
    }

    pub async fn get_recipe(&self, id: &str) -> Result<Recipe, ClientError> {
        self.send(self.client.get(self.recipes_url(Some(id))?))
            .await
    }

    pub async fn create_recipe(
        &self,
        contract: &CreateRecipeContract,
    ) -> Result<Recipe, ClientError> {
        self.send(self.client.post(self.recipes_url(None)?).json(contract))
            .await
    }

    /// Sends a partial document; fields left out keep their stored values.
    pub async fn update_recipe(&self, id: &str, changes: &Value) -> Result<Recipe, ClientError> {
        self.send(self.client.patch(self.recipes_url(Some(id))?).json(changes))
            .await
    }

    pub async fn delete_recipe(&self, id: &str) -> Result<Recipe, ClientError> {
        self.send(self.client.delete(self.recipes_url(Some(id))?))
            .await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await.map_err(network_error)?;
        let status = response.status();
        let body = response.text().await.map_err(network_error)?;

        if !status.is_success() {
            return Err(translate_error(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}
