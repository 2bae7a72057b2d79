use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::{json, Value};

use crate::{
    config::Config,
    errors::{GenerationError, GenerationResult},
};

/// One request/response exchange with the text-generation service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn invoke(&self, prompt: &str) -> GenerationResult<String>;
}

/// Talks to any OpenAI-compatible chat completions endpoint. The default
/// base URL points at Gemini's compatibility layer.
pub struct OpenAiGenerationClient {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAiGenerationClient {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_base(config.generation_api_base.clone())
            .with_api_key(config.generation_api_key.expose_secret().to_string());

        Self {
            client: Client::with_config(openai_config),
            model: config.generation_model.clone(),
            temperature: config.generation_temperature,
        }
    }

    fn request_body(&self, prompt: &str) -> Value {
        json!({
            "model": self.model,
            "temperature": self.temperature,
            "messages": [
                { "role": "user", "content": prompt }
            ]
        })
    }
}

#[async_trait]
impl GenerationClient for OpenAiGenerationClient {
    async fn invoke(&self, prompt: &str) -> GenerationResult<String> {
        log::info!(
            "Invoking model {} (temperature {}) with a {} character prompt",
            self.model,
            self.temperature,
            prompt.len()
        );

        let response: Value = self
            .client
            .chat()
            .create_byot(self.request_body(prompt))
            .await?;

        let content = extract_content(&response)?;
        log::debug!("Model response raw content: {}", content);
        Ok(content)
    }
}

fn extract_content(response: &Value) -> GenerationResult<String> {
    response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .map(str::to_string)
        .ok_or(GenerationError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_carries_model_temperature_and_prompt() {
        let client = OpenAiGenerationClient::new(&Config::test_config());
        let body = client.request_body("Generate a quiz");

        assert_eq!(body["model"], "gemini-1.5-flash");
        assert!((body["temperature"].as_f64().unwrap() - 0.9).abs() < 1e-6);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Generate a quiz");
        assert!(body.get("stream").is_none());
    }

    #[test]
    fn extract_content_reads_first_choice() {
        let response = json!({
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": " {\"ok\": true} " } }
            ]
        });

        assert_eq!(extract_content(&response).unwrap(), "{\"ok\": true}");
    }

    #[test]
    fn extract_content_rejects_empty_or_missing_content() {
        let empty = json!({ "choices": [ { "message": { "content": "   " } } ] });
        let missing = json!({ "choices": [] });

        assert_eq!(extract_content(&empty), Err(GenerationError::EmptyResponse));
        assert_eq!(extract_content(&missing), Err(GenerationError::EmptyResponse));
    }
}
