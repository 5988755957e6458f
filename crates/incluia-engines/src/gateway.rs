//! One call shape over five structurally different completion backends.
//!
//! The gateway owns a pooled HTTP client and an injected credential store,
//! checks configuration **before** any network I/O (a missing key never
//! costs a round trip), and dispatches each call through an exhaustive match
//! over [`Engine`] — a sixth engine cannot be silently mis-dispatched.
//!
//! One attempt per call: transport and provider failures come back tagged
//! with the engine identifier and are never retried here. Retry/fallback is
//! the router's job (`incluia-router`), which keeps this layer a pure
//! adapter.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client as HttpClient;
use tracing::debug;

use incluia_core::{
    credentials::{missing_credential_message, resolve_credential},
    engine::Engine,
    error::{IncluiaError, Result},
    message::ChatMessage,
    CredentialStore, EnvCredentials,
};

use crate::{
    anthropic::AnthropicClient,
    gemini::GeminiClient,
    openai_compat::{CompatEndpoint, OpenAiCompatClient},
};

/// Temperature applied when the caller doesn't pick one.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Per-call knobs. All optional; `Default` gives the standard behaviour.
#[derive(Debug, Clone, Default)]
pub struct CompletionOptions {
    /// Sampling temperature, clamped to 0.0–1.0.
    pub temperature: Option<f64>,
    /// Explicit API key taking precedence over the environment-sourced one
    /// (e.g. an institution-scoped key stored outside the process env).
    pub credential_override: Option<String>,
}

impl CompletionOptions {
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_credential(mut self, key: impl Into<String>) -> Self {
        self.credential_override = Some(key.into());
        self
    }
}

/// Uniform completion interface over the five engines.
///
/// Cloning is cheap: the HTTP connection pool and the credential store are
/// shared.
#[derive(Clone)]
pub struct EngineGateway {
    http: HttpClient,
    creds: Arc<dyn CredentialStore>,
}

impl EngineGateway {
    /// Gateway reading credentials from the process environment.
    pub fn from_env() -> Self {
        EngineGatewayBuilder::new().build()
    }

    pub fn builder() -> EngineGatewayBuilder {
        EngineGatewayBuilder::new()
    }

    /// Pre-flight check: `None` when `engine` has a usable credential,
    /// otherwise the user-presentable configuration message.
    pub fn configuration_error(&self, engine: Engine) -> Option<String> {
        incluia_core::configuration_error(engine, self.creds.as_ref())
    }

    /// The credential store this gateway resolves against.
    pub fn credentials(&self) -> &dyn CredentialStore {
        self.creds.as_ref()
    }

    /// Execute one chat completion against `engine` and return its trimmed
    /// reply text (empty string when the provider produced none).
    pub async fn chat_completion_text(
        &self,
        engine: Engine,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<String> {
        let api_key = resolve_credential(
            engine,
            self.creds.as_ref(),
            options.credential_override.as_deref(),
        )
        .ok_or_else(|| IncluiaError::configuration(engine, missing_credential_message(engine)))?;

        let temperature = options
            .temperature
            .unwrap_or(DEFAULT_TEMPERATURE)
            .clamp(0.0, 1.0);

        debug!(engine = %engine, messages = messages.len(), "dispatching chat completion");

        let raw = match engine {
            Engine::Red => {
                self.compat_call(engine, api_key, CompatEndpoint::deepseek(self.creds.as_ref()), messages, temperature)
                    .await?
            }
            Engine::Orange => {
                self.compat_call(engine, api_key, CompatEndpoint::openrouter(self.creds.as_ref()), messages, temperature)
                    .await?
            }
            Engine::Green => {
                self.compat_call(engine, api_key, CompatEndpoint::openai(), messages, temperature)
                    .await?
            }
            Engine::Purple => {
                AnthropicClient::new(api_key, self.http.clone(), self.creds.as_ref())
                    .messages(messages, temperature)
                    .await
                    .map_err(|e| IncluiaError::provider(engine, e))?
            }
            Engine::Blue => GeminiClient::new(api_key, self.http.clone())
                .generate_text(messages, temperature)
                .await
                .map_err(|e| IncluiaError::provider(engine, e))?,
        };

        Ok(raw.trim().to_owned())
    }

    /// Describe or transcribe an image.
    ///
    /// Engine choice here is independent of the text path: Gemini when its
    /// credential is present, GPT otherwise. With neither configured the
    /// call fails before any I/O with a message naming both providers.
    pub async fn vision_adapt(
        &self,
        prompt: &str,
        image_base64: &str,
        mime_type: &str,
        options: &CompletionOptions,
    ) -> Result<String> {
        let store = self.creds.as_ref();
        let override_key = options.credential_override.as_deref();

        let raw = if let Some(api_key) = resolve_credential(Engine::Blue, store, override_key) {
            debug!(engine = %Engine::Blue, "dispatching vision call");
            GeminiClient::new(api_key, self.http.clone())
                .generate_vision(prompt, image_base64, mime_type)
                .await
                .map_err(|e| IncluiaError::provider(Engine::Blue, e))?
        } else if let Some(api_key) = resolve_credential(Engine::Green, store, None) {
            debug!(engine = %Engine::Green, "dispatching vision call");
            OpenAiCompatClient::new(api_key, self.http.clone(), CompatEndpoint::openai())
                .vision_completion(prompt, image_base64, mime_type)
                .await
                .map_err(|e| IncluiaError::provider(Engine::Green, e))?
        } else {
            return Err(IncluiaError::configuration(
                Engine::Blue,
                format!(
                    "Nenhum assistente com suporte a imagens está configurado ({} ou {}). \
                     Informe uma chave de API nas configurações da instituição.",
                    Engine::Blue.display_name(),
                    Engine::Green.display_name()
                ),
            ));
        };

        Ok(raw.trim().to_owned())
    }

    async fn compat_call(
        &self,
        engine: Engine,
        api_key: String,
        endpoint: CompatEndpoint,
        messages: &[ChatMessage],
        temperature: f64,
    ) -> Result<String> {
        OpenAiCompatClient::new(api_key, self.http.clone(), endpoint)
            .chat_completion(messages, temperature)
            .await
            .map_err(|e| IncluiaError::provider(engine, e))
    }
}

/// Builder for [`EngineGateway`].
///
/// Defaults: environment-backed credentials and a pooled `reqwest` client
/// with a 30 s timeout. Substituting a [`StaticCredentials`] store is how
/// tests run without touching the process environment.
///
/// [`StaticCredentials`]: incluia_core::StaticCredentials
#[derive(Default)]
pub struct EngineGatewayBuilder {
    creds: Option<Arc<dyn CredentialStore>>,
    http: Option<HttpClient>,
}

impl EngineGatewayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(mut self, store: impl CredentialStore + 'static) -> Self {
        self.creds = Some(Arc::new(store));
        self
    }

    /// Supply a custom `reqwest::Client` (proxy settings, custom TLS, …).
    pub fn with_http(mut self, http: HttpClient) -> Self {
        self.http = Some(http);
        self
    }

    pub fn build(self) -> EngineGateway {
        let http = self.http.unwrap_or_else(|| {
            HttpClient::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("building reqwest client")
        });
        EngineGateway {
            http,
            creds: self.creds.unwrap_or_else(|| Arc::new(EnvCredentials)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use incluia_core::StaticCredentials;

    fn gateway(store: StaticCredentials) -> EngineGateway {
        EngineGateway::builder().with_credentials(store).build()
    }

    #[tokio::test]
    async fn missing_credential_fails_before_any_io() {
        let gw = gateway(StaticCredentials::new());
        let err = gw
            .chat_completion_text(
                Engine::Purple,
                &[ChatMessage::user("olá")],
                &CompletionOptions::default(),
            )
            .await
            .unwrap_err();
        match err {
            IncluiaError::Configuration { engine, message } => {
                assert_eq!(engine, Engine::Purple);
                assert!(message.contains("Claude"));
            }
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn vision_without_any_credential_names_both_providers() {
        let gw = gateway(StaticCredentials::new().with("DEEPSEEK_API_KEY", "sk-x"));
        let err = gw
            .vision_adapt("transcreva", "QUJD", "image/png", &CompletionOptions::default())
            .await
            .unwrap_err();
        match err {
            IncluiaError::Configuration { message, .. } => {
                assert!(message.contains("Gemini"));
                assert!(message.contains("GPT"));
            }
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn configuration_error_mirrors_core_resolution() {
        let gw = gateway(StaticCredentials::new().with("OPENAI_API_KEY", "sk-x"));
        assert!(gw.configuration_error(Engine::Green).is_none());
        assert!(gw.configuration_error(Engine::Red).is_some());
    }
}
