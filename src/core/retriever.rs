use crate::core::prompt::retrieval_query;
use crate::domain::model::{ModuleDefinitions, RetrieveAndGenerateRequest};
use crate::domain::ports::KnowledgeBase;

pub const DEFAULT_KNOWLEDGE_BASE_ID: &str = "UNSXEU9TCO";
pub const DEFAULT_KNOWLEDGE_BASE_MODEL_ARN: &str =
    "arn:aws:bedrock:us-east-1::foundation-model/anthropic.claude-v2";

/// Looks up Terraform module sources. Never fails: any retrieval error
/// yields [`ModuleDefinitions::Unavailable`].
pub struct ModuleRetriever<K: KnowledgeBase> {
    knowledge_base: K,
    knowledge_base_id: String,
    model_arn: String,
}

impl<K: KnowledgeBase> ModuleRetriever<K> {
    pub fn new(
        knowledge_base: K,
        knowledge_base_id: impl Into<String>,
        model_arn: impl Into<String>,
    ) -> Self {
        Self {
            knowledge_base,
            knowledge_base_id: knowledge_base_id.into(),
            model_arn: model_arn.into(),
        }
    }

    pub async fn retrieve(&self, services: &[String]) -> ModuleDefinitions {
        let request = RetrieveAndGenerateRequest {
            query: retrieval_query(services),
            knowledge_base_id: self.knowledge_base_id.clone(),
            model_arn: self.model_arn.clone(),
        };
        tracing::debug!("📚 Knowledge base query: {}", request.query);

        match self.knowledge_base.retrieve_and_generate(request).await {
            Ok(text) => {
                tracing::info!(
                    "📚 Retrieved {} characters of module definitions from {}",
                    text.len(),
                    self.knowledge_base_id
                );
                ModuleDefinitions::Retrieved(text)
            }
            Err(e) => {
                tracing::warn!(
                    "⚠️ Knowledge base {} unavailable, continuing without module definitions: {}",
                    self.knowledge_base_id,
                    e
                );
                ModuleDefinitions::Unavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{AppError, Result};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct MockKnowledgeBase {
        reply: std::result::Result<String, String>,
        seen: Arc<Mutex<Vec<RetrieveAndGenerateRequest>>>,
    }

    #[async_trait]
    impl KnowledgeBase for MockKnowledgeBase {
        async fn retrieve_and_generate(
            &self,
            request: RetrieveAndGenerateRequest,
        ) -> Result<String> {
            self.seen.lock().unwrap().push(request);
            self.reply
                .clone()
                .map_err(|message| AppError::Retrieval { message })
        }
    }

    fn services() -> Vec<String> {
        vec!["S3".to_string(), "Lambda".to_string()]
    }

    #[test]
    fn test_retrieve_returns_text_verbatim() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let retriever = ModuleRetriever::new(
            MockKnowledgeBase {
                reply: Ok("{\"not\": \"parsed\"}".to_string()),
                seen: seen.clone(),
            },
            "KB123",
            "arn:model",
        );

        let modules = tokio_test::block_on(retriever.retrieve(&services()));

        assert_eq!(
            modules,
            ModuleDefinitions::Retrieved("{\"not\": \"parsed\"}".to_string())
        );
        let seen = seen.lock().unwrap();
        assert_eq!(
            seen[0].query,
            "Retrieve Terraform module sources for AWS services: S3, Lambda"
        );
        assert_eq!(seen[0].knowledge_base_id, "KB123");
        assert_eq!(seen[0].model_arn, "arn:model");
    }

    #[test]
    fn test_retrieve_fails_open() {
        let retriever = ModuleRetriever::new(
            MockKnowledgeBase {
                reply: Err("AccessDeniedException".to_string()),
                seen: Arc::new(Mutex::new(Vec::new())),
            },
            DEFAULT_KNOWLEDGE_BASE_ID,
            DEFAULT_KNOWLEDGE_BASE_MODEL_ARN,
        );

        let modules = tokio_test::block_on(retriever.retrieve(&services()));
        assert_eq!(modules, ModuleDefinitions::Unavailable);
    }
}
