pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::GitHubRepository;
pub use config::AppConfig;
pub use crate::core::{
    handler::CustomizationHandler, invoker::ModelInvoker, retriever::ModuleRetriever,
};
pub use domain::model::HandlerOutput;
pub use utils::error::{AppError, Result};
