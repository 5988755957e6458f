//! Engine identifiers used throughout the **incluia** workspace.
//!
//! Every AI feature of the application talks to exactly one of five backend
//! providers. Providers are referenced by a short color tag instead of a
//! vendor name so that configuration files, logs and user-facing settings
//! stay decoupled from the commercial backend behind each slot.
//!
//! The enum is deliberately **closed**: dispatch happens through exhaustive
//! `match` statements, so adding a sixth engine is a compile-time event — the
//! compiler points at every site that must learn about it.
//!
//! # Example
//!
//! ```rust
//! use incluia_core::engine::Engine;
//!
//! let engine: Engine = "red".parse().unwrap();
//! assert_eq!(engine, Engine::Red);
//! assert_eq!(engine.display_name(), "DeepSeek");
//! ```

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IncluiaError;

/// One of the five backend completion providers.
///
/// The color tag (`as_str`) is the stable identifier used in configuration
/// and logs; [`Self::display_name`] is the public name shown to operators
/// and end users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// DeepSeek — OpenAI-compatible chat API, the designated fallback slot.
    Red,
    /// Kimi, reached through OpenRouter — OpenAI-compatible chat API.
    Orange,
    /// Claude — Anthropic Messages API.
    Purple,
    /// Gemini — Google `generateContent` API, primary vision slot.
    Blue,
    /// GPT — OpenAI chat API, secondary vision slot.
    Green,
}

impl Engine {
    /// Every known engine, in tag order.
    pub const ALL: [Engine; 5] = [
        Engine::Red,
        Engine::Orange,
        Engine::Purple,
        Engine::Blue,
        Engine::Green,
    ];

    /// The designated fallback provider. When a module's preferred engine is
    /// unavailable (missing key or runtime failure) the router degrades to
    /// this slot instead of hard-failing the feature.
    pub const FALLBACK: Engine = Engine::Red;

    /// Stable tag used in configuration and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Red => "red",
            Engine::Orange => "orange",
            Engine::Purple => "purple",
            Engine::Blue => "blue",
            Engine::Green => "green",
        }
    }

    /// Public provider name, safe to show to operators and end users.
    ///
    /// Configuration error messages embed this name and never the raw
    /// environment variable, so the operator-facing wording can evolve
    /// independently of deployment details.
    pub fn display_name(&self) -> &'static str {
        match self {
            Engine::Red => "DeepSeek",
            Engine::Orange => "Kimi (OpenRouter)",
            Engine::Purple => "Claude",
            Engine::Blue => "Gemini",
            Engine::Green => "GPT",
        }
    }
}

impl Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Engine {
    type Err = IncluiaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(Engine::Red),
            "orange" => Ok(Engine::Orange),
            "purple" => Ok(Engine::Purple),
            "blue" => Ok(Engine::Blue),
            "green" => Ok(Engine::Green),
            other => Err(IncluiaError::UnsupportedEngine(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for engine in Engine::ALL {
            assert_eq!(engine.as_str().parse::<Engine>().unwrap(), engine);
        }
    }

    #[test]
    fn parse_is_case_insensitive_and_trimmed() {
        assert_eq!(" Blue ".parse::<Engine>().unwrap(), Engine::Blue);
    }

    #[test]
    fn unknown_tag_is_unsupported() {
        let err = "magenta".parse::<Engine>().unwrap_err();
        assert!(matches!(err, IncluiaError::UnsupportedEngine(ref tag) if tag == "magenta"));
    }
}
