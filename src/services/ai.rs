//! HTTP client for the AI gateway
//!
//! Speaks a small JSON protocol:
//!
//! - `POST {endpoint}/insight` with `{"model", "prompt"}`, answered by `{"text"}`
//! - `POST {endpoint}/receipt` with `{"model", "mimeType", "data"}` (base64
//!   image), answered by `{"amount", "category", "note"}`
//!
//! The key is sent in the `x-api-key` header.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::insight::{InsightGenerator, InsightRequest};
use super::receipt::{ReceiptData, ReceiptScanner};
use crate::config::settings::AiSettings;
use crate::error::{BudgetError, BudgetResult};
use crate::models::Money;

#[derive(Debug, Serialize)]
struct InsightBody<'a> {
    model: &'a str,
    prompt: String,
}

#[derive(Debug, Deserialize)]
struct InsightReply {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReceiptBody<'a> {
    model: &'a str,
    mime_type: &'a str,
    data: String,
}

/// Amounts come back in major units
#[derive(Debug, Deserialize)]
struct ReceiptReply {
    amount: f64,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    note: Option<String>,
}

impl ReceiptReply {
    fn into_receipt(self) -> BudgetResult<ReceiptData> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(BudgetError::Ai(format!(
                "Receipt scan returned an invalid amount: {}",
                self.amount
            )));
        }

        Ok(ReceiptData {
            amount: Money::from_major(self.amount),
            category: self.category.unwrap_or_default().trim().to_string(),
            note: self.note.unwrap_or_default().trim().to_string(),
        })
    }
}

/// Blocking client implementing both AI collaborators
#[derive(Debug, Clone)]
pub struct HttpAiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl HttpAiClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> BudgetResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Build a client from settings, or `None` when no endpoint or key is set
    pub fn from_settings(settings: &AiSettings) -> BudgetResult<Option<Self>> {
        let (Some(endpoint), Some(api_key)) = (settings.endpoint.as_deref(), settings.api_key())
        else {
            return Ok(None);
        };

        Self::new(
            endpoint,
            api_key,
            settings.model.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
        .map(Some)
    }

    fn post<B: Serialize, R: for<'de> Deserialize<'de>>(&self, path: &str, body: &B) -> BudgetResult<R> {
        let url = format!("{}/{}", self.endpoint, path);
        tracing::debug!(url = %url, "calling AI gateway");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(BudgetError::Ai(format!("{} returned {}", url, status)));
        }

        Ok(response.json()?)
    }
}

impl InsightGenerator for HttpAiClient {
    fn generate(&self, request: &InsightRequest) -> BudgetResult<String> {
        let body = InsightBody {
            model: &self.model,
            prompt: request.prompt(),
        };
        let reply: InsightReply = self.post("insight", &body)?;
        Ok(reply.text)
    }
}

impl ReceiptScanner for HttpAiClient {
    fn scan(&self, image: &[u8], mime_type: &str) -> BudgetResult<ReceiptData> {
        if image.is_empty() {
            return Err(BudgetError::Validation("Receipt image is empty".into()));
        }

        let body = ReceiptBody {
            model: &self.model,
            mime_type,
            data: BASE64.encode(image),
        };
        let reply: ReceiptReply = self.post("receipt", &body)?;
        reply.into_receipt()
    }
}
