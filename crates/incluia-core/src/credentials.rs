//! Credential resolution for the five engines.
//!
//! Keys live in the deployment environment, but the gateway never reads
//! `std::env` directly: it goes through the [`CredentialStore`] capability,
//! so tests and tools can substitute a map-backed store without mutating
//! process state. [`EnvCredentials`] reads the environment **fresh on every
//! call** — there is no cache, so a rotated key takes effect on the next
//! request with no invalidation logic.
//!
//! A missing key is not fatal at startup. It surfaces lazily, per call, as a
//! [`configuration_error`] value naming only the affected engine.

use std::collections::BTreeMap;
use std::env;

use crate::engine::Engine;

/// Read-only source of environment-shaped configuration values.
///
/// Empty and whitespace-only values count as absent, matching how operators
/// commonly "disable" a key by blanking it in a dotenv file.
pub trait CredentialStore: Send + Sync {
    fn get(&self, name: &str) -> Option<String>;

    /// `get` with the absent-when-blank rule applied.
    fn get_non_empty(&self, name: &str) -> Option<String> {
        self.get(name)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    }
}

/// Production store backed by process environment variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialStore for EnvCredentials {
    fn get(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

/// Fixed, map-backed store for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    values: BTreeMap<String, String>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

impl CredentialStore for StaticCredentials {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

/// Environment variables holding the API key of each engine, tried in order.
///
/// Orange is the only slot with two sources: a dedicated OpenRouter key wins
/// over the legacy Kimi key when both are set.
pub fn credential_sources(engine: Engine) -> &'static [&'static str] {
    match engine {
        Engine::Red => &["DEEPSEEK_API_KEY"],
        Engine::Orange => &["OPENROUTER_API_KEY", "KIMI_API_KEY"],
        Engine::Purple => &["ANTHROPIC_API_KEY"],
        Engine::Blue => &["GEMINI_API_KEY"],
        Engine::Green => &["OPENAI_API_KEY"],
    }
}

/// Resolve the API key for `engine`.
///
/// Precedence: a non-blank explicit `override_key` wins over the engine's
/// environment source(s); among sources, first non-empty wins.
pub fn resolve_credential(
    engine: Engine,
    store: &dyn CredentialStore,
    override_key: Option<&str>,
) -> Option<String> {
    if let Some(key) = override_key.map(str::trim).filter(|k| !k.is_empty()) {
        return Some(key.to_owned());
    }
    credential_sources(engine)
        .iter()
        .find_map(|name| store.get_non_empty(name))
}

/// Pre-flight configuration check for `engine`.
///
/// Returns `None` when a usable credential exists, otherwise an
/// operator-actionable message. The message names the provider's public
/// display name, never the raw environment variable.
pub fn configuration_error(engine: Engine, store: &dyn CredentialStore) -> Option<String> {
    if resolve_credential(engine, store, None).is_some() {
        return None;
    }
    Some(missing_credential_message(engine))
}

/// The user-presentable message for an engine without a usable credential.
pub fn missing_credential_message(engine: Engine) -> String {
    format!(
        "O assistente {} não está configurado: chave de API ausente. \
         Informe a chave nas configurações da instituição.",
        engine.display_name()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_over_store() {
        let store = StaticCredentials::new().with("DEEPSEEK_API_KEY", "sk-env");
        let key = resolve_credential(Engine::Red, &store, Some("sk-override"));
        assert_eq!(key.as_deref(), Some("sk-override"));
    }

    #[test]
    fn blank_override_is_ignored() {
        let store = StaticCredentials::new().with("DEEPSEEK_API_KEY", "sk-env");
        let key = resolve_credential(Engine::Red, &store, Some("   "));
        assert_eq!(key.as_deref(), Some("sk-env"));
    }

    #[test]
    fn orange_tries_openrouter_then_kimi() {
        let store = StaticCredentials::new().with("KIMI_API_KEY", "sk-kimi");
        assert_eq!(
            resolve_credential(Engine::Orange, &store, None).as_deref(),
            Some("sk-kimi")
        );

        let store = store.with("OPENROUTER_API_KEY", "sk-router");
        assert_eq!(
            resolve_credential(Engine::Orange, &store, None).as_deref(),
            Some("sk-router")
        );
    }

    #[test]
    fn whitespace_key_counts_as_absent() {
        let store = StaticCredentials::new().with("GEMINI_API_KEY", "  ");
        assert!(resolve_credential(Engine::Blue, &store, None).is_none());
        assert!(configuration_error(Engine::Blue, &store).is_some());
    }

    #[test]
    fn error_message_names_display_name_not_env_var() {
        let store = StaticCredentials::new();
        let msg = configuration_error(Engine::Purple, &store).unwrap();
        assert!(msg.contains("Claude"));
        assert!(!msg.contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn configured_engine_has_no_error() {
        let store = StaticCredentials::new().with("OPENAI_API_KEY", "sk-abc");
        assert!(configuration_error(Engine::Green, &store).is_none());
    }
}
