pub mod lambda;
pub mod toml_config;

use crate::core::invoker::DEFAULT_MODEL_ID;
use crate::core::retriever::{DEFAULT_KNOWLEDGE_BASE_ID, DEFAULT_KNOWLEDGE_BASE_MODEL_ARN};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_repository_segment, validate_url,
    Validate,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_REPOSITORY_OWNER: &str = "ebbsleo";
pub const DEFAULT_REPOSITORY_NAME: &str = "learn-terraform-aft-account-customizations";
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_WEB_BASE: &str = "https://github.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 20;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub repository: RepositoryConfig,
    #[serde(default)]
    pub knowledge_base: KnowledgeBaseConfig,
    #[serde(default)]
    pub model: ModelConfig,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    #[serde(default = "default_owner")]
    pub owner: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_web_base")]
    pub web_base: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub token: String,
}

impl std::fmt::Debug for RepositoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryConfig")
            .field("owner", &self.owner)
            .field("name", &self.name)
            .field("branch", &self.branch)
            .field("api_base", &self.api_base)
            .field("web_base", &self.web_base)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            name: default_name(),
            branch: default_branch(),
            api_base: default_api_base(),
            web_base: default_web_base(),
            timeout_seconds: default_timeout_seconds(),
            token: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBaseConfig {
    #[serde(default = "default_knowledge_base_id")]
    pub id: String,
    #[serde(default = "default_knowledge_base_model_arn")]
    pub model_arn: String,
}

impl Default for KnowledgeBaseConfig {
    fn default() -> Self {
        Self {
            id: default_knowledge_base_id(),
            model_arn: default_knowledge_base_model_arn(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_id")]
    pub id: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            id: default_model_id(),
        }
    }
}

fn default_owner() -> String {
    DEFAULT_REPOSITORY_OWNER.to_string()
}

fn default_name() -> String {
    DEFAULT_REPOSITORY_NAME.to_string()
}

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_web_base() -> String {
    DEFAULT_WEB_BASE.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_knowledge_base_id() -> String {
    DEFAULT_KNOWLEDGE_BASE_ID.to_string()
}

fn default_knowledge_base_model_arn() -> String {
    DEFAULT_KNOWLEDGE_BASE_MODEL_ARN.to_string()
}

fn default_model_id() -> String {
    DEFAULT_MODEL_ID.to_string()
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        let repository = &self.repository;
        validate_repository_segment("repository.owner", &repository.owner)?;
        validate_repository_segment("repository.name", &repository.name)?;
        validate_non_empty_string("repository.branch", &repository.branch)?;
        validate_url("repository.api_base", &repository.api_base)?;
        validate_url("repository.web_base", &repository.web_base)?;
        validate_range("repository.timeout_seconds", repository.timeout_seconds, 1, 900)?;
        validate_non_empty_string("repository.token", &repository.token)?;

        validate_non_empty_string("knowledge_base.id", &self.knowledge_base.id)?;
        validate_non_empty_string("knowledge_base.model_arn", &self.knowledge_base.model_arn)?;
        validate_non_empty_string("model.id", &self.model.id)?;

        tracing::info!("✅ Configuration validation passed");
        Ok(())
    }
}
