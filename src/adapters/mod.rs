// Adapters layer: concrete implementations of the domain ports.

#[cfg(feature = "lambda")]
pub mod bedrock;
pub mod github;

#[cfg(feature = "lambda")]
pub use bedrock::{BedrockKnowledgeBase, BedrockModel};
pub use github::GitHubRepository;
