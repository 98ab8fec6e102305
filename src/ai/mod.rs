//! AI integration module
//!
//! This module turns diffs into text artifacts through any OpenAI-compatible
//! chat-completion endpoint:
//! - Commit messages and branch names
//! - PR titles and descriptions
//! - Code reviews and diff explanations

pub mod client;
pub mod generator;
pub mod interpret;
pub mod prompts;
pub mod provider;

pub use client::{GenerationClient, TextGenerator};
pub use generator::ArtifactGenerator;
pub use interpret::PrContent;
pub use prompts::{DiffContext, PromptRequest, TemplateKind};
pub use provider::ProviderSettings;
