//! Command interpreter backed by an OpenAI-compatible chat-completions API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use numo_core::numochat::{
    CommandContext, CommandInterpreter, InterpretedCommand, NumoChatError, parse_reply,
    system_prompt,
};
use numo_shared::NumoChatConfig;

/// Chat-completions request body.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Interpreter that asks a language model to extract the entry.
#[derive(Clone)]
pub struct OpenAiInterpreter {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl std::fmt::Debug for OpenAiInterpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiInterpreter")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("configured", &self.api_key.is_some())
            .finish_non_exhaustive()
    }
}

impl OpenAiInterpreter {
    /// Creates an interpreter from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &NumoChatConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// Returns true when an API key is configured.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl CommandInterpreter for OpenAiInterpreter {
    async fn interpret(
        &self,
        command: &str,
        context: &CommandContext,
    ) -> Result<InterpretedCommand, NumoChatError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(NumoChatError::NotConfigured);
        };

        let prompt = system_prompt(context);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt,
                },
                ChatMessage {
                    role: "user",
                    content: command,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| NumoChatError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "Interpreter request failed");
            return Err(NumoChatError::Upstream(format!(
                "chat completion request failed: {}",
                response.status()
            )));
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| NumoChatError::Upstream(e.to_string()))?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| NumoChatError::Unparseable("empty reply".into()))?;

        debug!(model = %self.model, "Interpreter replied");
        parse_reply(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn context() -> CommandContext {
        CommandContext {
            categories: vec![],
            payment_options: vec![],
            today: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_missing_api_key_is_not_configured() {
        let interpreter = OpenAiInterpreter::new(&NumoChatConfig::default()).unwrap();
        assert!(!interpreter.is_configured());

        let result = interpreter.interpret("lunch 25", &context()).await;
        assert!(matches!(result, Err(NumoChatError::NotConfigured)));
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let config = NumoChatConfig {
            api_key: Some("  ".into()),
            ..NumoChatConfig::default()
        };
        assert!(!OpenAiInterpreter::new(&config).unwrap().is_configured());
    }

    #[test]
    fn test_request_uses_json_response_format() {
        let body = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![ChatMessage {
                role: "user",
                content: "lunch 25",
            }],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["messages"][0]["role"], "user");
    }
}
