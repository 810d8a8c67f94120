//! medline-advice
//!
//! Prompt composition and the chat-completion client that turns an intake
//! into advice text.

pub mod client;
pub mod error;
pub mod prompt;
pub mod provider;

pub use client::{AdviceSource, CompletionClient, CompletionEndpoint};

/// Outcome of one advice request: the trimmed advice text or the reason it
/// could not be obtained.
pub type AdviceResult = Result<String, error::AdviceError>;
