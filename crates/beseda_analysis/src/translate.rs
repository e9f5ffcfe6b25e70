//! Pivot-language translation used before polarity scoring.

use anyhow::Result;
use async_trait::async_trait;
use beseda_core::config::{TranslationConfig, TranslationProvider};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service answered {status}: {details}")]
    Service { status: String, details: String },
    #[error("daily quota exhausted: {0}")]
    Quota(String),
    #[error("response has no translated text")]
    Empty,
}

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into the pivot language.
    async fn translate(&self, text: &str) -> Result<String, TranslateError>;
}

/// Returns the input untouched. Used when translation is switched off.
#[derive(Debug, Clone, Default)]
pub struct PassthroughTranslator;

#[async_trait]
impl Translator for PassthroughTranslator {
    async fn translate(&self, text: &str) -> Result<String, TranslateError> {
        Ok(text.to_string())
    }
}

/// Client for the MyMemory `GET /get?q=..&langpair=ru|en` endpoint.
#[derive(Debug, Clone)]
pub struct MyMemoryTranslator {
    client: Client,
    base_url: String,
    langpair: String,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MyMemoryResponse {
    #[serde(rename = "responseData")]
    response_data: Option<ResponseData>,
    #[serde(rename = "responseStatus", default)]
    response_status: Value,
    #[serde(rename = "responseDetails", default)]
    response_details: Value,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

impl MyMemoryTranslator {
    pub fn new(config: &TranslationConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            langpair: format!("{}|{}", config.from_lang, config.to_lang),
            email: config.email.clone(),
        })
    }
}

/// `responseStatus` comes back as a number on success and as a string on some errors.
fn status_code(status: &Value) -> Option<u64> {
    match status {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn details_text(details: &Value) -> String {
    match details {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl Translator for MyMemoryTranslator {
    async fn translate(&self, text: &str) -> Result<String, TranslateError> {
        let mut query = vec![("q", text), ("langpair", self.langpair.as_str())];
        if let Some(email) = &self.email {
            query.push(("de", email.as_str()));
        }

        let body: MyMemoryResponse = self
            .client
            .get(format!("{}/get", self.base_url))
            .query(&query)
            .send()
            .await?
            .json()
            .await?;

        let status = status_code(&body.response_status);
        if status != Some(200) {
            return Err(TranslateError::Service {
                status: body.response_status.to_string(),
                details: details_text(&body.response_details),
            });
        }

        let translated = body
            .response_data
            .and_then(|d| d.translated_text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(TranslateError::Empty)?;

        if translated.starts_with("MYMEMORY WARNING") {
            return Err(TranslateError::Quota(translated));
        }

        tracing::debug!("Translated {:?} -> {:?}", text, translated);
        Ok(translated)
    }
}

/// Pick the translator named in config.
pub fn build_translator(config: &TranslationConfig) -> Result<Arc<dyn Translator>> {
    match config.provider {
        TranslationProvider::Mymemory => Ok(Arc::new(MyMemoryTranslator::new(config)?)),
        TranslationProvider::None => Ok(Arc::new(PassthroughTranslator)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> TranslationConfig {
        TranslationConfig {
            base_url: server.uri(),
            ..TranslationConfig::default()
        }
    }

    #[tokio::test]
    async fn test_mymemory_translate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get"))
            .and(query_param("q", "я счастлив"))
            .and(query_param("langpair", "ru|en"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "responseData": { "translatedText": "I am happy", "match": 1 },
                "responseStatus": 200,
                "responseDetails": ""
            })))
            .mount(&server)
            .await;

        let translator = MyMemoryTranslator::new(&config_for(&server)).unwrap();
        let out = translator.translate("я счастлив").await.unwrap();
        assert_eq!(out, "I am happy");
    }

    #[tokio::test]
    async fn test_mymemory_sends_email_when_configured() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get"))
            .and(query_param("de", "bot@example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "responseData": { "translatedText": "hello" },
                "responseStatus": 200
            })))
            .mount(&server)
            .await;

        let config = TranslationConfig {
            email: Some("bot@example.com".into()),
            ..config_for(&server)
        };
        let translator = MyMemoryTranslator::new(&config).unwrap();
        assert_eq!(translator.translate("привет").await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_mymemory_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "responseData": { "translatedText": "INVALID LANGUAGE PAIR SPECIFIED" },
                "responseStatus": "403",
                "responseDetails": "INVALID LANGUAGE PAIR SPECIFIED"
            })))
            .mount(&server)
            .await;

        let translator = MyMemoryTranslator::new(&config_for(&server)).unwrap();
        let err = translator.translate("текст").await.unwrap_err();
        match err {
            TranslateError::Service { details, .. } => {
                assert!(details.contains("INVALID LANGUAGE PAIR"));
            }
            other => panic!("Expected Service error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_mymemory_quota_warning() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "responseData": {
                    "translatedText": "MYMEMORY WARNING: YOU USED ALL AVAILABLE FREE TRANSLATIONS FOR TODAY"
                },
                "responseStatus": 200
            })))
            .mount(&server)
            .await;

        let translator = MyMemoryTranslator::new(&config_for(&server)).unwrap();
        let err = translator.translate("текст").await.unwrap_err();
        assert!(matches!(err, TranslateError::Quota(_)));
    }

    #[tokio::test]
    async fn test_mymemory_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let translator = MyMemoryTranslator::new(&config_for(&server)).unwrap();
        let err = translator.translate("текст").await.unwrap_err();
        assert!(matches!(err, TranslateError::Http(_)));
    }

    #[tokio::test]
    async fn test_passthrough() {
        let out = PassthroughTranslator.translate("как есть").await.unwrap();
        assert_eq!(out, "как есть");
    }

    #[test]
    fn test_status_code_variants() {
        assert_eq!(status_code(&serde_json::json!(200)), Some(200));
        assert_eq!(status_code(&serde_json::json!("403")), Some(403));
        assert_eq!(status_code(&Value::Null), None);
    }
}
