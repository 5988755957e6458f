//! Minimal HTTP client for the Gemini `generateContent` API (the Gemini
//! slot, also the preferred vision backend).
//!
//! Gemini takes a single prompt rather than a role-tagged message list, so
//! the whole conversation is serialized into one string with explicit
//! `[role]` prefixes per message. The reply is the text of the first
//! candidate.

use reqwest::{
    Client as HttpClient,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};

use incluia_core::message::ChatMessage;

use crate::{
    api::gemini::{
        Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, InlineData,
        Part,
    },
    error::EngineHttpError,
};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const GEMINI_MODEL: &str = "gemini-2.0-flash";

#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    http: HttpClient,
    base: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, http: HttpClient) -> Self {
        Self::with_base_url(api_key, http, None)
    }

    /// Build against a custom base URL (mock servers in tests).
    pub fn with_base_url(
        api_key: impl Into<String>,
        http: HttpClient,
        base_url: Option<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            http,
            base: base_url.unwrap_or_else(|| GEMINI_BASE_URL.to_owned()),
        }
    }

    /// Chat completion: the conversation is flattened into one prompt
    /// string and issued as a single generate call.
    pub async fn generate_text(
        &self,
        messages: &[ChatMessage],
        temperature: f64,
    ) -> Result<String, EngineHttpError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::Text(flatten_conversation(messages))],
            }],
            generation_config: Some(GenerationConfig {
                temperature: Some(temperature),
            }),
        };
        self.send(request).await
    }

    /// Vision call: prompt text plus an inline base64 image.
    pub async fn generate_vision(
        &self,
        prompt: &str,
        image_base64: &str,
        mime_type: &str,
    ) -> Result<String, EngineHttpError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text(prompt.to_owned()),
                    Part::InlineData(InlineData {
                        mime_type: mime_type.to_owned(),
                        data: image_base64.to_owned(),
                    }),
                ],
            }],
            generation_config: None,
        };
        self.send(request).await
    }

    async fn send(&self, request: GenerateContentRequest) -> Result<String, EngineHttpError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(&self.api_key)
                .map_err(|e| EngineHttpError::Format(format!("invalid API key: {e}")))?,
        );

        let url = format!("{}/models/{}:generateContent", self.base, GEMINI_MODEL);
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
        let parsed: GenerateContentResponse = serde_json::from_slice(&bytes)?;
        Ok(parsed.first_candidate_text())
    }
}

/// Serialize the ordered message list into one prompt string with `[role]`
/// prefixes, preserving conversation order.
fn flatten_conversation(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|message| format!("[{}] {}", message.role, message.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use incluia_core::message::ChatMessage;

    #[test]
    fn conversation_flattens_with_role_prefixes() {
        let messages = vec![
            ChatMessage::system("Você redige documentos escolares."),
            ChatMessage::user("Resuma o caso."),
        ];
        assert_eq!(
            flatten_conversation(&messages),
            "[system] Você redige documentos escolares.\n\n[user] Resuma o caso."
        );
    }
}
