//! HTTP adapters for the five completion backends and the dispatch gateway
//! that presents them behind one call shape.
//!
//! | Module | What it provides |
//! |---|---|
//! | [`gateway`] | [`EngineGateway`]: uniform `chat_completion_text` / `vision_adapt` over all engines |
//! | [`openai_compat`] | Shared client for the three OpenAI-compatible endpoints (DeepSeek, OpenRouter, OpenAI) |
//! | [`anthropic`] | Claude client: system-field split, fixed output ceiling |
//! | [`gemini`] | Gemini client: flattened `[role]` prompt, first-candidate text, vision |
//! | [`api`] | Serde wire types per backend family |

pub mod anthropic;
pub mod api;
pub mod error;
pub mod gateway;
pub mod gemini;
pub mod openai_compat;

pub use error::EngineHttpError;
pub use gateway::{CompletionOptions, EngineGateway, EngineGatewayBuilder, DEFAULT_TEMPERATURE};
