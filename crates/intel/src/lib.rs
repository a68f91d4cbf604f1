//! shadowops-intel: the intelligence gateway.
//!
//! [`Intelligence`] turns fixture records into prompts, calls a generative
//! model through the [`LlmClient`] trait and always hands back a value:
//! the model's answer, a fixed default when the answer is empty, or a fixed
//! fallback when the call fails or the answer cannot be parsed.
//!
//! [`GeminiClient`] is the production transport; tests substitute their own
//! `LlmClient`.

pub mod client;
pub mod config;
pub mod gateway;
pub mod gemini;
pub mod parse;
pub mod prompt;

pub use client::{GenerateRequest, LlmClient, LlmError};
pub use config::IntelConfig;
pub use gateway::Intelligence;
pub use gemini::GeminiClient;
pub use parse::SimulationResult;
