//! Engine selection for one module invocation.
//!
//! Selection is recomputed on every call — nothing is cached, so a key
//! configured a second ago is picked up immediately. The outcome of the
//! little state machine (requested → validated → selected / fallback /
//! failed) is returned as a plain value; callers decide how to present a
//! failure.

use tracing::{debug, warn};

use incluia_core::{
    credentials::{configuration_error, CredentialStore},
    engine::Engine,
};

use crate::module::Module;

/// Outcome of engine selection.
///
/// `error == None` means `engine` is ready to use. A populated `error`
/// carries the configuration message of the engine the caller *intended* to
/// use — not the fallback's — so the user is told what to configure for
/// their own choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub engine: Engine,
    pub error: Option<String>,
}

impl Selection {
    pub fn is_usable(&self) -> bool {
        self.error.is_none()
    }
}

/// Pick the engine a `module` invocation should use.
///
/// * No `requested` engine → the module default.
/// * A `requested` engine outside the module's allow-list is silently
///   replaced by the default (permissive degrade, not an error).
/// * When the chosen engine has no usable credential and `fallback_enabled`
///   holds, the designated fallback slot is tried instead; if the fallback
///   is also unconfigured — or fallback is off, or the chosen engine *is*
///   the fallback — the selection fails with the original engine's message.
pub fn select_engine(
    module: Module,
    requested: Option<Engine>,
    fallback_enabled: bool,
    store: &dyn CredentialStore,
) -> Selection {
    let descriptor = module.descriptor();

    let validated = match requested {
        Some(engine) if descriptor.allows(engine) => engine,
        Some(engine) => {
            debug!(
                module = %module,
                requested = %engine,
                default = %descriptor.default_engine,
                "requested engine not allowed for module, using default"
            );
            descriptor.default_engine
        }
        None => descriptor.default_engine,
    };

    let Some(message) = configuration_error(validated, store) else {
        return Selection {
            engine: validated,
            error: None,
        };
    };

    if fallback_enabled
        && validated != Engine::FALLBACK
        && configuration_error(Engine::FALLBACK, store).is_none()
    {
        warn!(
            module = %module,
            engine = %validated,
            fallback = %Engine::FALLBACK,
            "engine not configured, selecting fallback"
        );
        return Selection {
            engine: Engine::FALLBACK,
            error: None,
        };
    }

    Selection {
        engine: validated,
        error: Some(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use incluia_core::StaticCredentials;

    #[test]
    fn default_engine_is_used_when_nothing_is_requested() {
        let store = StaticCredentials::new().with("DEEPSEEK_API_KEY", "sk-x");
        let selection = select_engine(Module::Pei, None, true, &store);
        assert_eq!(selection.engine, Engine::Red);
        assert!(selection.is_usable());
    }

    #[test]
    fn allowed_request_is_honored() {
        let store = StaticCredentials::new().with("ANTHROPIC_API_KEY", "sk-x");
        let selection = select_engine(Module::Pei, Some(Engine::Purple), true, &store);
        assert_eq!(selection.engine, Engine::Purple);
        assert!(selection.is_usable());
    }

    #[test]
    fn out_of_allow_list_request_degrades_to_default() {
        // PAEE only allows red; asking for orange is not an error.
        let store = StaticCredentials::new().with("DEEPSEEK_API_KEY", "sk-x");
        let selection = select_engine(Module::Paee, Some(Engine::Orange), true, &store);
        assert_eq!(selection.engine, Engine::Red);
        assert!(selection.is_usable());
    }

    #[test]
    fn missing_credential_falls_back_when_enabled() {
        // Purple requested but only the fallback slot has a key.
        let store = StaticCredentials::new().with("DEEPSEEK_API_KEY", "sk-x");
        let selection = select_engine(Module::Pei, Some(Engine::Purple), true, &store);
        assert_eq!(selection.engine, Engine::FALLBACK);
        assert!(selection.is_usable());
    }

    #[test]
    fn fallback_suppressed_keeps_engine_and_surfaces_its_error() {
        let store = StaticCredentials::new().with("DEEPSEEK_API_KEY", "sk-x");
        let selection = select_engine(Module::Pei, Some(Engine::Purple), false, &store);
        assert_eq!(selection.engine, Engine::Purple);
        let message = selection.error.expect("configuration error expected");
        assert!(message.contains("Claude"));
    }

    #[test]
    fn failure_reports_the_original_engine_not_the_fallback() {
        // Neither the requested engine nor the fallback is configured.
        let store = StaticCredentials::new();
        let selection = select_engine(Module::Pei, Some(Engine::Purple), true, &store);
        assert_eq!(selection.engine, Engine::Purple);
        let message = selection.error.expect("configuration error expected");
        assert!(message.contains("Claude"));
        assert!(!message.contains("DeepSeek"));
    }

    #[test]
    fn unconfigured_fallback_engine_itself_fails_without_retry_loop() {
        let store = StaticCredentials::new().with("ANTHROPIC_API_KEY", "sk-x");
        let selection = select_engine(Module::Hub, Some(Engine::Red), true, &store);
        assert_eq!(selection.engine, Engine::Red);
        assert!(selection.error.is_some());
    }
}
