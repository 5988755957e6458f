//! Minimal HTTP client for the OpenAI-compatible *chat/completions* shape.
//!
//! Three of the five engines (DeepSeek, Kimi via OpenRouter, GPT) speak this
//! exact protocol and differ only in endpoint, model name and credential, so
//! they share this one implementation behind a per-engine [`CompatEndpoint`].
//!
//! * Non-streaming only (one request ▶ one response).
//! * Shares a single `reqwest::Client`, so cloning the client is cheap.

use reqwest::{
    Client as HttpClient,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};

use incluia_core::{credentials::CredentialStore, message::ChatMessage};

use crate::{
    api::openai::{ApiMessage, ChatCompletionRequest, ChatCompletionResponse},
    error::EngineHttpError,
};

const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com/v1";
const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

const DEEPSEEK_MODEL: &str = "deepseek-chat";
const KIMI_MODEL: &str = "moonshotai/kimi-k2";
const OPENAI_MODEL: &str = "gpt-4o-mini";

/// Where an OpenAI-compatible engine lives and which model it serves.
#[derive(Debug, Clone)]
pub struct CompatEndpoint {
    pub base_url: String,
    pub model: String,
}

impl CompatEndpoint {
    /// DeepSeek endpoint, overridable per deployment.
    pub fn deepseek(store: &dyn CredentialStore) -> Self {
        Self {
            base_url: store
                .get_non_empty("DEEPSEEK_BASE_URL")
                .unwrap_or_else(|| DEEPSEEK_BASE_URL.to_owned()),
            model: store
                .get_non_empty("DEEPSEEK_MODEL")
                .unwrap_or_else(|| DEEPSEEK_MODEL.to_owned()),
        }
    }

    /// Kimi via OpenRouter, overridable per deployment.
    pub fn openrouter(store: &dyn CredentialStore) -> Self {
        Self {
            base_url: store
                .get_non_empty("OPENROUTER_BASE_URL")
                .unwrap_or_else(|| OPENROUTER_BASE_URL.to_owned()),
            model: store
                .get_non_empty("KIMI_MODEL")
                .unwrap_or_else(|| KIMI_MODEL.to_owned()),
        }
    }

    /// Official OpenAI endpoint, fixed model.
    pub fn openai() -> Self {
        Self {
            base_url: OPENAI_BASE_URL.to_owned(),
            model: OPENAI_MODEL.to_owned(),
        }
    }
}

/// HTTP client bound to one OpenAI-compatible endpoint.
#[derive(Clone)]
pub struct OpenAiCompatClient {
    api_key: String,
    http: HttpClient,
    endpoint: CompatEndpoint,
}

impl OpenAiCompatClient {
    pub fn new(api_key: impl Into<String>, http: HttpClient, endpoint: CompatEndpoint) -> Self {
        Self {
            api_key: api_key.into(),
            http,
            endpoint,
        }
    }

    fn headers(&self) -> Result<HeaderMap, EngineHttpError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|e| EngineHttpError::Format(format!("invalid API key: {e}")))?,
        );
        Ok(headers)
    }

    /// Perform a **non-streaming** chat completion and return the raw text of
    /// the first choice (empty when the provider sent none).
    pub async fn chat_completion(
        &self,
        messages: &[ChatMessage],
        temperature: f64,
    ) -> Result<String, EngineHttpError> {
        let request = ChatCompletionRequest::new(
            self.endpoint.model.clone(),
            messages.iter().map(ApiMessage::from).collect(),
        )
        .with_temperature(temperature);

        self.send(request).await
    }

    /// Vision variant: one user turn carrying prompt text plus an inline
    /// base64 image. Only used by the GPT slot.
    pub async fn vision_completion(
        &self,
        prompt: &str,
        image_base64: &str,
        mime_type: &str,
    ) -> Result<String, EngineHttpError> {
        let request = ChatCompletionRequest::new(
            self.endpoint.model.clone(),
            vec![ApiMessage::vision_user_turn(prompt, image_base64, mime_type)],
        );

        self.send(request).await
    }

    async fn send(&self, request: ChatCompletionRequest) -> Result<String, EngineHttpError> {
        let url = format!("{}/chat/completions", self.endpoint.base_url);
        let resp = self
            .http
            .post(url)
            .headers(self.headers()?)
            .json(&request)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(EngineHttpError::Api { status, body });
        }

        let bytes = resp.bytes().await?;
        let parsed: ChatCompletionResponse = serde_json::from_slice(&bytes)?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}
