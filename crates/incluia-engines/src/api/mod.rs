//! Serde wire types for the three backend API families.
//!
//! Only the fields this gateway actually sends and reads are modelled;
//! everything else the providers return is ignored on deserialization.

pub mod anthropic;
pub mod gemini;
pub mod openai;
