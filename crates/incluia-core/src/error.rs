//! Unified error type exposed by **`incluia-core`**.
//!
//! Adapter crates convert their internal HTTP errors into one of these
//! variants before bubbling them up, always attaching the engine tag so a
//! caller knows which provider failed. This keeps the public API small while
//! still conveying enough to drive the router's fallback decision.

use thiserror::Error;

use crate::engine::Engine;

/// Convenient alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, IncluiaError>;

#[derive(Debug, Error)]
pub enum IncluiaError {
    /// The engine has no usable credential. Detected before any network I/O;
    /// the message names the provider's display name and is safe to present
    /// to operators and end users.
    #[error("{message}")]
    Configuration { engine: Engine, message: String },

    /// The provider call itself failed after credentials were present
    /// (transport error, non-success status, malformed response). Carries
    /// the engine tag; the router may retry such a failure once on the
    /// fallback engine, this layer never does.
    #[error("engine `{engine}` call failed: {source}")]
    Provider {
        engine: Engine,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// An engine tag outside the known set of five was requested directly.
    /// Always fatal, never retried.
    #[error("unsupported engine `{0}`")]
    UnsupportedEngine(String),
}

impl IncluiaError {
    /// Build a [`IncluiaError::Configuration`] for `engine`.
    pub fn configuration(engine: Engine, message: impl Into<String>) -> Self {
        IncluiaError::Configuration {
            engine,
            message: message.into(),
        }
    }

    /// Wrap a backend-specific failure with its engine tag.
    pub fn provider(
        engine: Engine,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        IncluiaError::Provider {
            engine,
            source: Box::new(source),
        }
    }

    /// The engine this error is attributed to, when there is one.
    pub fn engine(&self) -> Option<Engine> {
        match self {
            IncluiaError::Configuration { engine, .. } => Some(*engine),
            IncluiaError::Provider { engine, .. } => Some(*engine),
            IncluiaError::UnsupportedEngine(_) => None,
        }
    }
}
