//! Current weather from the OpenWeatherMap `data/2.5/weather` endpoint.

use anyhow::Result;
use async_trait::async_trait;
use beseda_core::config::WeatherConfig;
use reqwest::Client;
use serde_json::{Number, Value};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("некорректный ответ сервиса: {0}")]
    Json(#[from] serde_json::Error),
    #[error("сервис ответил {code}: {message}")]
    Api { code: String, message: String },
    #[error("в ответе нет поля '{0}'")]
    MissingField(&'static str),
}

/// The two fields the bot reports.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditions {
    /// Kept as the JSON number so `12` and `12.5` print as the service sent them.
    pub temp: Number,
    pub description: String,
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, city: &str) -> Result<Conditions, WeatherError>;
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
    units: String,
    lang: String,
}

impl OpenWeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let api_key = match &config.api_key {
            Some(key) => key.clone(),
            None => {
                tracing::warn!("No weather API key configured; set OPENWEATHER_API_KEY");
                String::new()
            }
        };

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            units: config.units.clone(),
            lang: config.lang.clone(),
        })
    }
}

/// Pull `main.temp` and `weather[0].description` out of a response body.
/// Error bodies (`{"cod": "404", "message": "city not found"}`) become
/// [`WeatherError::Api`].
pub fn parse_conditions(body: &Value) -> Result<Conditions, WeatherError> {
    let temp = match body.pointer("/main/temp") {
        Some(Value::Number(n)) => Some(n.clone()),
        _ => None,
    };
    let description = body
        .pointer("/weather/0/description")
        .and_then(Value::as_str)
        .map(str::to_string);

    match (temp, description) {
        (Some(temp), Some(description)) => Ok(Conditions { temp, description }),
        (temp, _) => {
            if let Some(message) = body.get("message").and_then(Value::as_str) {
                let code = match body.get("cod") {
                    Some(Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                    None => "?".to_string(),
                };
                return Err(WeatherError::Api {
                    code,
                    message: message.to_string(),
                });
            }
            if temp.is_none() {
                Err(WeatherError::MissingField("main.temp"))
            } else {
                Err(WeatherError::MissingField("weather[0].description"))
            }
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, city: &str) -> Result<Conditions, WeatherError> {
        let text = self
            .client
            .get(format!("{}/data/2.5/weather", self.base_url))
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_str()),
                ("lang", self.lang.as_str()),
            ])
            .send()
            .await?
            .text()
            .await?;

        let body: Value = serde_json::from_str(&text)?;
        parse_conditions(&body)
    }
}

/// Look up `city` and phrase the answer. Never fails: any error is folded
/// into the reply text.
pub async fn describe_weather(provider: &dyn WeatherProvider, city: &str) -> String {
    match provider.current(city).await {
        Ok(c) => format!(
            "В городе {} сейчас {}, температура {}°C.",
            city, c.description, c.temp
        ),
        Err(e) => {
            tracing::warn!("Weather lookup for {:?} failed: {}", city, e);
            format!("Не удалось получить погоду: {}", e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_ok() {
        let body = json!({
            "main": { "temp": 12.5, "humidity": 80 },
            "weather": [{ "description": "облачно", "main": "Clouds" }]
        });
        let c = parse_conditions(&body).unwrap();
        assert_eq!(c.temp.to_string(), "12.5");
        assert_eq!(c.description, "облачно");
    }

    #[test]
    fn test_parse_integer_temp() {
        let body = json!({ "main": { "temp": -3 }, "weather": [{ "description": "снег" }] });
        assert_eq!(parse_conditions(&body).unwrap().temp.to_string(), "-3");
    }

    #[test]
    fn test_parse_api_error() {
        let body = json!({ "cod": "404", "message": "city not found" });
        match parse_conditions(&body).unwrap_err() {
            WeatherError::Api { code, message } => {
                assert_eq!(code, "404");
                assert_eq!(message, "city not found");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_missing_fields() {
        let no_main = json!({ "weather": [{ "description": "ясно" }] });
        assert!(matches!(
            parse_conditions(&no_main),
            Err(WeatherError::MissingField("main.temp"))
        ));

        let empty_weather = json!({ "main": { "temp": 1 }, "weather": [] });
        assert!(matches!(
            parse_conditions(&empty_weather),
            Err(WeatherError::MissingField("weather[0].description"))
        ));
    }
}
