use crate::domain::ports::NameTranslator;
use crate::utils::error::{ReportError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_TRANSLATOR_ENDPOINT: &str =
    "https://api.funtranslations.com/translate/pokemon.json";

const SERVICE: &str = "funtranslations";
const API_SECRET_HEADER: &str = "X-Funtranslations-Api-Secret";

#[derive(Debug, Deserialize)]
struct TranslationResponse {
    contents: TranslationContents,
}

#[derive(Debug, Deserialize)]
struct TranslationContents {
    translated: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct FunTranslationsClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

impl FunTranslationsClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: None,
            timeout: None,
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl NameTranslator for FunTranslationsClient {
    async fn translate(&self, subject: &str) -> Result<String> {
        tracing::debug!("🌐 Translating '{}' via {}", subject, self.endpoint);

        let mut request = self.client.get(&self.endpoint).query(&[("text", subject)]);
        if let Some(api_key) = &self.api_key {
            request = request.header(API_SECRET_HEADER, api_key);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("🌐 {} response status: {}", SERVICE, status);

        let body = response.text().await?;

        if !status.is_success() {
            // 服務會在 body 中附上錯誤說明（例如速率限制）
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_string()
                });
            return Err(ReportError::ServiceError {
                service: SERVICE.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let translation: TranslationResponse =
            serde_json::from_str(&body).map_err(|e| ReportError::UnexpectedResponse {
                service: SERVICE.to_string(),
                message: e.to_string(),
            })?;

        tracing::info!(
            "🌐 '{}' translated to '{}'",
            subject,
            translation.contents.translated
        );
        Ok(translation.contents.translated)
    }
}
