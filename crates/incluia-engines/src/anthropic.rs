//! Minimal HTTP client for the Anthropic Messages API (the Claude slot).
//!
//! Anthropic has no in-band system role, so the conversation is partitioned
//! before it goes on the wire: every system message is concatenated into the
//! dedicated `system` field, everything else is concatenated — role labels
//! dropped — into a single user turn. A fixed output-token ceiling is always
//! applied because the API requires one.

use reqwest::{
    Client as HttpClient,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};

use incluia_core::{
    credentials::CredentialStore,
    message::{ChatMessage, ChatRole},
};

use crate::{
    api::anthropic::{MessagesRequest, MessagesResponse, TurnMessage},
    error::EngineHttpError,
};

const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";

/// Output ceiling for every Claude call issued by this gateway.
const MAX_OUTPUT_TOKENS: u32 = 4096;

#[derive(Clone)]
pub struct AnthropicClient {
    api_key: String,
    http: HttpClient,
    base: String,
    model: String,
}

impl AnthropicClient {
    pub fn new(api_key: impl Into<String>, http: HttpClient, store: &dyn CredentialStore) -> Self {
        Self::with_base_url(api_key, http, store, None)
    }

    /// Build against a custom base URL (mock servers in tests).
    pub fn with_base_url(
        api_key: impl Into<String>,
        http: HttpClient,
        store: &dyn CredentialStore,
        base_url: Option<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            http,
            base: base_url.unwrap_or_else(|| ANTHROPIC_BASE_URL.to_owned()),
            model: store
                .get_non_empty("ANTHROPIC_MODEL")
                .unwrap_or_else(|| ANTHROPIC_MODEL.to_owned()),
        }
    }

    /// Perform a non-streaming messages call and return the concatenated
    /// text blocks of the reply (empty when Claude sent none).
    pub async fn messages(
        &self,
        messages: &[ChatMessage],
        temperature: f64,
    ) -> Result<String, EngineHttpError> {
        let (system, user_turn) = partition_conversation(messages);

        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: MAX_OUTPUT_TOKENS,
            system,
            messages: vec![TurnMessage {
                role: "user".to_owned(),
                content: user_turn,
            }],
            temperature: Some(temperature),
        };

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&self.api_key)
                .map_err(|e| EngineHttpError::Format(format!("invalid API key: {e}")))?,
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let url = format!("{}/v1/messages", self.base);
        let resp = self
            .http
            .post(url)
            .headers(headers)
            .json(&request)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(EngineHttpError::Api { status, body });
        }

        let bytes = resp.bytes().await?;
        let parsed: MessagesResponse = serde_json::from_slice(&bytes)?;
        Ok(parsed.text())
    }
}

/// Split the ordered conversation into Anthropic's two channels: the system
/// text and one flattened user turn.
fn partition_conversation(messages: &[ChatMessage]) -> (Option<String>, String) {
    let mut system_parts = Vec::new();
    let mut turn_parts = Vec::new();

    for message in messages {
        match message.role {
            ChatRole::System => system_parts.push(message.content.as_str()),
            ChatRole::User | ChatRole::Assistant => turn_parts.push(message.content.as_str()),
        }
    }

    let system = if system_parts.is_empty() {
        None
    } else {
        Some(system_parts.join("\n\n"))
    };

    (system, turn_parts.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use incluia_core::message::ChatMessage;

    #[test]
    fn system_messages_are_hoisted() {
        let messages = vec![
            ChatMessage::system("Você é um professor de AEE."),
            ChatMessage::user("Elabore o PEI."),
            ChatMessage::system("Responda em português."),
        ];
        let (system, turn) = partition_conversation(&messages);
        assert_eq!(
            system.as_deref(),
            Some("Você é um professor de AEE.\n\nResponda em português.")
        );
        assert_eq!(turn, "Elabore o PEI.");
    }

    #[test]
    fn role_labels_are_dropped_from_the_user_turn() {
        let messages = vec![
            ChatMessage::user("Pergunta."),
            ChatMessage::assistant("Resposta anterior."),
            ChatMessage::user("Continue."),
        ];
        let (system, turn) = partition_conversation(&messages);
        assert!(system.is_none());
        assert_eq!(turn, "Pergunta.\n\nResposta anterior.\n\nContinue.");
    }
}
