//! Module-to-engine routing for the **incluia** AI gateway.
//!
//! Translates "which feature is calling" into "which provider to use":
//! compiled-in module descriptors, allow-list validation with permissive
//! degrade, and automatic single-retry fallback to the designated backup
//! engine. Selection state lives for one call only — nothing is persisted.

pub mod fallback;
pub mod module;
pub mod select;

pub use fallback::with_fallback;
pub use module::{Module, ModuleDescriptor};
pub use select::{select_engine, Selection};
