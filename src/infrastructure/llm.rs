//! # Model Providers
//!
//! An OpenAI-compatible chat-completions client behind the `ModelProvider`
//! trait, plus a scripted provider for offline runs and tests.

use std::collections::VecDeque;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::domain::config::ModelConfig;
use crate::domain::traits::ModelProvider;

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// HTTP client reused across requests
fn http_client() -> &'static Client {
    use std::sync::OnceLock;
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client")
    })
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// OpenAI-compatible provider (OpenAI, Groq, LM Studio, and friends).
pub struct OpenAiProvider {
    api_key: String,
    base_url: String,
    model: String,
    timeout: Option<u64>,
}

impl OpenAiProvider {
    /// Build from config; the key comes from the file or from the environment
    /// variable the config names.
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        let api_key = if let Some(key) = &config.api_key {
            key.clone()
        } else if let Some(env_var) = &config.api_key_env {
            std::env::var(env_var)
                .with_context(|| format!("API key env var {} not set", env_var))?
        } else {
            bail!("No API key configured - set model.api_key or model.api_key_env");
        };

        Ok(Self {
            api_key,
            base_url: config
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            model: config.name.clone(),
            timeout: config.timeout_secs,
        })
    }
}

#[async_trait]
impl ModelProvider for OpenAiProvider {
    async fn completion(&self, system: &str, user: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user.to_string(),
                },
            ],
        };

        let mut builder = http_client()
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request);
        if let Some(timeout_secs) = self.timeout {
            builder = builder.timeout(std::time::Duration::from_secs(timeout_secs));
        }

        let response = builder.send().await.context("HTTP request failed")?;
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            // Pull the API's own message out of the error body when present.
            if let Ok(error_json) = serde_json::from_str::<serde_json::Value>(&error_text) {
                if let Some(message) = error_json
                    .get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                {
                    bail!("Model API error: {}", message);
                }
            }
            bail!("Model API returned HTTP {}: {}", status, error_text);
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .context("Failed to parse completion response")?;
        let Some(choice) = parsed.choices.into_iter().next() else {
            bail!("No choices in completion response");
        };
        Ok(choice.message.content)
    }
}

/// Replays canned replies in order, repeating the last one when the script
/// runs out. Used for `--reply-file` runs and in tests.
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<String>>,
    last: Mutex<Option<String>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<String>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            last: Mutex::new(None),
        }
    }

    pub fn single(reply: impl Into<String>) -> Self {
        Self::new(vec![reply.into()])
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    async fn completion(&self, _system: &str, _user: &str) -> Result<String> {
        let mut replies = self.replies.lock().await;
        let mut last = self.last.lock().await;
        match replies.pop_front() {
            Some(reply) => {
                *last = Some(reply.clone());
                Ok(reply)
            }
            None => match last.clone() {
                Some(reply) => Ok(reply),
                None => bail!("scripted provider has no replies"),
            },
        }
    }
}
