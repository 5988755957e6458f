//! # `incluia` – The umbrella crate
//!
//! One-stop import gluing together the building-block crates of the
//! workspace:
//!
//! | Crate                  | What it provides                                                              |
//! |------------------------|-------------------------------------------------------------------------------|
//! | **`incluia-core`**     | Engine identifiers, chat message model, credential resolution, error types    |
//! | **`incluia-privacy`**  | Reversible pseudonymization of student names (LGPD boundary)                  |
//! | **`incluia-router`**   | Module → engine selection, allow-list validation, single-retry fallback       |
//! | **`incluia-engines`**  | HTTP adapters for the five backends and the dispatch gateway *(optional)*     |
//!
//! By default the crate re-exports **core**, **privacy** and **router** plus
//! the adapters. Disabling the `engines` feature keeps `reqwest`/TLS out of
//! the build for consumers that only need routing and pseudonymization.
//!
//! ## Design philosophy
//!
//! * **Closed engine set** – dispatch is an exhaustive `match` over five
//!   enum variants; a sixth backend is a compile-time event.
//! * **Injected configuration** – credentials come through the
//!   [`CredentialStore`] capability, read fresh on every call; tests swap in
//!   a map-backed store instead of mutating the process environment.
//! * **Names never leave the house** – callers pseudonymize before the
//!   gateway call and restore names afterwards; the name map lives for one
//!   request.
//!
//! ## Quick example
//!
//! ```rust,no_run
//! use incluia::{
//!     anonymize, deanonymize, with_fallback, ChatMessage, EnvCredentials, Module, NameMap,
//! };
//! use incluia::engines::{CompletionOptions, EngineGateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = EngineGateway::from_env();
//!     let store = EnvCredentials;
//!
//!     let student = Some("Pedro Henrique");
//!     let prompt = anonymize("Elabore metas para Pedro Henrique.", student, &NameMap::new());
//!
//!     let reply = with_fallback(Module::Pei, None, &store, |engine| {
//!         let gateway = gateway.clone();
//!         let messages = vec![ChatMessage::user(prompt.clone())];
//!         async move {
//!             gateway
//!                 .chat_completion_text(engine, &messages, &CompletionOptions::default())
//!                 .await
//!         }
//!     })
//!     .await?;
//!
//!     println!("{}", deanonymize(&reply, student, &NameMap::new()));
//!     Ok(())
//! }
//! ```

pub use incluia_core::*;
pub use incluia_privacy::{anonymize, deanonymize, NameMap, STUDENT_TOKEN};
pub use incluia_router::{select_engine, with_fallback, Module, ModuleDescriptor, Selection};

pub use incluia_privacy as privacy;
pub use incluia_router as router;

#[cfg(feature = "engines")]
pub use incluia_engines as engines;
