pub mod handler;
pub mod invoker;
pub mod layout;
pub mod prompt;
pub mod request;
pub mod retriever;

pub use crate::domain::model::{CustomizationRequest, HandlerOutput, ModuleDefinitions};
pub use crate::domain::ports::{FoundationModel, KnowledgeBase, Repository};
pub use crate::utils::error::Result;
