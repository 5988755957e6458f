//! LGPD-motivated pseudonymization for the **incluia** AI gateway.
//!
//! Pure synchronous string processing, no dependencies, never errors. See
//! [`pseudonym`] for the matching rules and their rationale.

pub mod pseudonym;

pub use pseudonym::{anonymize, deanonymize, NameMap, STUDENT_TOKEN};
