//! Execution wrapper: one attempt on the selected engine, at most one retry
//! on the fallback slot.
//!
//! Configuration problems and runtime provider failures are distinct
//! classes — the first is caught before any I/O by [`select_engine`], the
//! second only shows up when the call itself fails. Both degrade to the same
//! designated fallback engine, and in both cases a final failure surfaces
//! the error of the engine the caller originally intended to use.
//!
//! The retry budget is exactly one. This wrapper never walks the engine
//! list looking for something that works.

use std::future::Future;

use tracing::{error, warn};

use incluia_core::{
    credentials::{configuration_error, CredentialStore},
    engine::Engine,
    error::{IncluiaError, Result},
};

use crate::{module::Module, select::select_engine};

/// Run `op` for `module`, honoring the caller's engine preference and the
/// module's fallback policy.
///
/// `op` receives the engine to call and is invoked at most twice: once with
/// the selected engine, and — only when that attempt fails at runtime, the
/// engine wasn't already the fallback slot and the fallback has a usable
/// credential — once more with [`Engine::FALLBACK`]. If the retry fails too,
/// the **original** attempt's error is returned unchanged.
pub async fn with_fallback<T, F, Fut>(
    module: Module,
    requested: Option<Engine>,
    store: &dyn CredentialStore,
    mut op: F,
) -> Result<T>
where
    F: FnMut(Engine) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let fallback_enabled = module.descriptor().fallback_enabled;
    let selection = select_engine(module, requested, fallback_enabled, store);

    if let Some(message) = selection.error {
        return Err(IncluiaError::configuration(selection.engine, message));
    }

    let engine = selection.engine;
    let original_error = match op(engine).await {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };

    let retry_viable = fallback_enabled
        && engine != Engine::FALLBACK
        && configuration_error(Engine::FALLBACK, store).is_none();

    if !retry_viable {
        return Err(original_error);
    }

    warn!(
        module = %module,
        engine = %engine,
        fallback = %Engine::FALLBACK,
        "engine call failed, retrying once on fallback"
    );

    match op(Engine::FALLBACK).await {
        Ok(value) => Ok(value),
        Err(retry_error) => {
            error!(
                module = %module,
                engine = %engine,
                fallback = %Engine::FALLBACK,
                retry_error = %retry_error,
                "fallback attempt also failed, surfacing the original error"
            );
            Err(original_error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use incluia_core::StaticCredentials;

    fn provider_failure(engine: Engine, detail: &str) -> IncluiaError {
        IncluiaError::provider(engine, std::io::Error::other(detail.to_owned()))
    }

    #[tokio::test]
    async fn success_on_first_attempt_calls_op_once() {
        let store = StaticCredentials::new().with("DEEPSEEK_API_KEY", "sk-x");
        let attempts = Mutex::new(Vec::new());

        let result = with_fallback(Module::Pei, None, &store, |engine| {
            attempts.lock().unwrap().push(engine);
            async move { Ok::<_, IncluiaError>("texto gerado") }
        })
        .await
        .unwrap();

        assert_eq!(result, "texto gerado");
        assert_eq!(*attempts.lock().unwrap(), vec![Engine::Red]);
    }

    #[tokio::test]
    async fn runtime_failure_retries_once_on_fallback() {
        let store = StaticCredentials::new()
            .with("ANTHROPIC_API_KEY", "sk-claude")
            .with("DEEPSEEK_API_KEY", "sk-red");
        let attempts = Mutex::new(Vec::new());

        let result = with_fallback(Module::Pei, Some(Engine::Purple), &store, |engine| {
            attempts.lock().unwrap().push(engine);
            async move {
                if engine == Engine::Purple {
                    Err(provider_failure(engine, "timeout"))
                } else {
                    Ok("resgatado pelo fallback")
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(result, "resgatado pelo fallback");
        assert_eq!(
            *attempts.lock().unwrap(),
            vec![Engine::Purple, Engine::Red]
        );
    }

    #[tokio::test]
    async fn at_most_two_attempts_and_original_error_is_rethrown() {
        let store = StaticCredentials::new()
            .with("ANTHROPIC_API_KEY", "sk-claude")
            .with("DEEPSEEK_API_KEY", "sk-red");
        let attempts = Mutex::new(Vec::new());

        let err = with_fallback(Module::Pei, Some(Engine::Purple), &store, |engine| {
            attempts.lock().unwrap().push(engine);
            async move { Err::<(), _>(provider_failure(engine, "sempre falha")) }
        })
        .await
        .unwrap_err();

        assert_eq!(attempts.lock().unwrap().len(), 2);
        // Provenance: the error belongs to the caller's intended engine.
        assert_eq!(err.engine(), Some(Engine::Purple));
    }

    #[tokio::test]
    async fn failure_on_the_fallback_engine_itself_is_not_retried() {
        let store = StaticCredentials::new().with("DEEPSEEK_API_KEY", "sk-red");
        let attempts = Mutex::new(Vec::new());

        let err = with_fallback(Module::Pei, None, &store, |engine| {
            attempts.lock().unwrap().push(engine);
            async move { Err::<(), _>(provider_failure(engine, "indisponível")) }
        })
        .await
        .unwrap_err();

        assert_eq!(*attempts.lock().unwrap(), vec![Engine::Red]);
        assert_eq!(err.engine(), Some(Engine::Red));
    }

    #[tokio::test]
    async fn unconfigured_fallback_suppresses_the_retry() {
        let store = StaticCredentials::new().with("ANTHROPIC_API_KEY", "sk-claude");
        let attempts = Mutex::new(Vec::new());

        let err = with_fallback(Module::Pei, Some(Engine::Purple), &store, |engine| {
            attempts.lock().unwrap().push(engine);
            async move { Err::<(), _>(provider_failure(engine, "timeout")) }
        })
        .await
        .unwrap_err();

        assert_eq!(*attempts.lock().unwrap(), vec![Engine::Purple]);
        assert_eq!(err.engine(), Some(Engine::Purple));
    }

    #[tokio::test]
    async fn configuration_failure_never_invokes_the_operation() {
        let store = StaticCredentials::new();
        let attempts = Mutex::new(Vec::new());

        let err = with_fallback(Module::Pei, Some(Engine::Purple), &store, |engine| {
            attempts.lock().unwrap().push(engine);
            async move { Ok::<_, IncluiaError>("inalcançável") }
        })
        .await
        .unwrap_err();

        assert!(attempts.lock().unwrap().is_empty());
        assert!(matches!(err, IncluiaError::Configuration { .. }));
    }
}
