use crate::config::{AppConfig, KnowledgeBaseConfig, ModelConfig, RepositoryConfig};
use crate::utils::error::{AppError, Result};
use std::env;

pub const CONFIG_FILE_VAR: &str = "AFT_CONFIG_FILE";

impl AppConfig {
    /// Loads the file named by `AFT_CONFIG_FILE` when set, the environment otherwise.
    pub fn load() -> Result<Self> {
        match env::var(CONFIG_FILE_VAR) {
            Ok(path) => {
                tracing::info!("Loading configuration from {}", path);
                Self::from_file(path)
            }
            Err(_) => Self::from_env(),
        }
    }

    pub fn from_env() -> Result<Self> {
        let defaults = RepositoryConfig::default();

        let token = env::var("REPOSITORY_TOKEN")
            .or_else(|_| env::var("GITHUB_TOKEN"))
            .map_err(|_| AppError::MissingConfig {
                field: "REPOSITORY_TOKEN (or GITHUB_TOKEN)".to_string(),
            })?;

        let timeout_seconds = match env::var("REPOSITORY_TIMEOUT_SECONDS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| AppError::InvalidConfigValue {
                field: "REPOSITORY_TIMEOUT_SECONDS".to_string(),
                value: raw.clone(),
                reason: "must be a whole number of seconds".to_string(),
            })?,
            Err(_) => defaults.timeout_seconds,
        };

        Ok(Self {
            repository: RepositoryConfig {
                owner: env::var("REPOSITORY_OWNER").unwrap_or(defaults.owner),
                name: env::var("REPOSITORY_NAME").unwrap_or(defaults.name),
                branch: env::var("REPOSITORY_BRANCH").unwrap_or(defaults.branch),
                api_base: env::var("REPOSITORY_API_BASE").unwrap_or(defaults.api_base),
                web_base: env::var("REPOSITORY_WEB_BASE").unwrap_or(defaults.web_base),
                timeout_seconds,
                token,
            },
            knowledge_base: KnowledgeBaseConfig {
                id: env::var("KNOWLEDGE_BASE_ID")
                    .unwrap_or_else(|_| KnowledgeBaseConfig::default().id),
                model_arn: env::var("KNOWLEDGE_BASE_MODEL_ARN")
                    .unwrap_or_else(|_| KnowledgeBaseConfig::default().model_arn),
            },
            model: ModelConfig {
                id: env::var("MODEL_ID").unwrap_or_else(|_| ModelConfig::default().id),
            },
        })
    }
}
