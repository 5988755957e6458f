//! Provider-agnostic building blocks of the **incluia** AI gateway:
//! engine identifiers, the chat message model, credential resolution and the
//! unified error type.
//!
//! Everything here is transport-free. The HTTP adapters live in
//! `incluia-engines`; module-to-engine routing lives in `incluia-router`.

pub mod credentials;
pub mod engine;
pub mod error;
pub mod message;

pub use credentials::{
    configuration_error, missing_credential_message, resolve_credential, CredentialStore,
    EnvCredentials, StaticCredentials,
};
pub use engine::Engine;
pub use error::{IncluiaError, Result};
pub use message::{ChatMessage, ChatRole};
