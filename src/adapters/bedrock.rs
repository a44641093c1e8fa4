use crate::domain::model::{InvokeModelRequest, RetrieveAndGenerateRequest};
use crate::domain::ports::{FoundationModel, KnowledgeBase};
use crate::utils::error::{AppError, Result};
use async_trait::async_trait;
use aws_sdk_bedrockagentruntime::types::{
    KnowledgeBaseRetrieveAndGenerateConfiguration, RetrieveAndGenerateConfiguration,
    RetrieveAndGenerateInput, RetrieveAndGenerateType,
};
use aws_sdk_bedrockagentruntime::Client as AgentRuntimeClient;
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::Client as RuntimeClient;

/// `bedrock-runtime` InvokeModel.
#[derive(Debug, Clone)]
pub struct BedrockModel {
    client: RuntimeClient,
}

impl BedrockModel {
    pub fn new(client: RuntimeClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FoundationModel for BedrockModel {
    async fn invoke_model(&self, request: InvokeModelRequest) -> Result<Vec<u8>> {
        let output = self
            .client
            .invoke_model()
            .model_id(request.model_id)
            .content_type(request.content_type)
            .accept(request.accept)
            .body(Blob::new(request.body))
            .send()
            .await
            .map_err(|e| AppError::ModelInvocation {
                message: DisplayErrorContext(&e).to_string(),
            })?;

        Ok(output.body().as_ref().to_vec())
    }
}

/// `bedrock-agent-runtime` RetrieveAndGenerate against a knowledge base.
#[derive(Debug, Clone)]
pub struct BedrockKnowledgeBase {
    client: AgentRuntimeClient,
}

impl BedrockKnowledgeBase {
    pub fn new(client: AgentRuntimeClient) -> Self {
        Self { client }
    }
}

fn retrieval_error(e: impl std::fmt::Display) -> AppError {
    AppError::Retrieval {
        message: e.to_string(),
    }
}

#[async_trait]
impl KnowledgeBase for BedrockKnowledgeBase {
    async fn retrieve_and_generate(&self, request: RetrieveAndGenerateRequest) -> Result<String> {
        let input = RetrieveAndGenerateInput::builder()
            .text(request.query)
            .build()
            .map_err(retrieval_error)?;

        let configuration = RetrieveAndGenerateConfiguration::builder()
            .r#type(RetrieveAndGenerateType::KnowledgeBase)
            .knowledge_base_configuration(
                KnowledgeBaseRetrieveAndGenerateConfiguration::builder()
                    .knowledge_base_id(request.knowledge_base_id)
                    .model_arn(request.model_arn)
                    .build()
                    .map_err(retrieval_error)?,
            )
            .build()
            .map_err(retrieval_error)?;

        let response = self
            .client
            .retrieve_and_generate()
            .input(input)
            .retrieve_and_generate_configuration(configuration)
            .send()
            .await
            .map_err(|e| retrieval_error(DisplayErrorContext(&e)))?;
        tracing::debug!("Knowledge base response: {:?}", response);

        response
            .output()
            .map(|output| output.text().to_string())
            .ok_or_else(|| AppError::Retrieval {
                message: "response carried no output text".to_string(),
            })
    }
}
