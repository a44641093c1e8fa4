use crate::domain::model::{InvokeModelRequest, RetrieveAndGenerateRequest};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Foundation-model invocation; returns the raw response body.
#[async_trait]
pub trait FoundationModel: Send + Sync {
    async fn invoke_model(&self, request: InvokeModelRequest) -> Result<Vec<u8>>;
}

/// Knowledge-base backed retrieval-and-generation; returns the output text.
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    async fn retrieve_and_generate(&self, request: RetrieveAndGenerateRequest) -> Result<String>;
}

/// Hosted repository receiving generated files.
pub trait Repository: Send + Sync {
    fn put_file(
        &self,
        path: &str,
        message: &str,
        content: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    fn blob_url(&self, path: &str) -> String;
}
