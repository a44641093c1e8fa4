use crate::core::invoker::ModelInvoker;
use crate::core::layout::ArtifactLayout;
use crate::core::prompt::{configuration_prompt, documentation_prompt};
use crate::core::request::parse_event;
use crate::core::retriever::ModuleRetriever;
use crate::domain::model::{
    ActionResponse, AgentEvent, AgentResponse, CommitSummary, CustomizationRequest, ErrorBody,
    ErrorResponse, HandlerOutput, ResponseContent, JSON_MEDIA_TYPE,
};
use crate::domain::ports::{FoundationModel, KnowledgeBase, Repository};
use crate::utils::error::{AppError, Result};
use serde_json::Value;
use std::collections::HashMap;

pub const MESSAGE_VERSION: &str = "1.0";
pub const GENERIC_ERROR: &str = "An error occurred during the process.";

/// Generates and commits the Terraform customization for one agent request.
///
/// Retrieval is best effort. A failed model call or commit aborts the request;
/// a `main.tf` committed before a failing `README.md` commit stays in place.
pub struct CustomizationHandler<M: FoundationModel, K: KnowledgeBase, R: Repository> {
    retriever: ModuleRetriever<K>,
    invoker: ModelInvoker<M>,
    repository: R,
}

impl<M, K, R> CustomizationHandler<M, K, R>
where
    M: FoundationModel,
    K: KnowledgeBase,
    R: Repository,
{
    pub fn new(retriever: ModuleRetriever<K>, invoker: ModelInvoker<M>, repository: R) -> Self {
        Self {
            retriever,
            invoker,
            repository,
        }
    }

    pub async fn handle(&self, event: Value) -> HandlerOutput {
        tracing::debug!("Received event: {}", event);

        match self.process(event).await {
            Ok(response) => HandlerOutput::Success(response),
            Err(e) => {
                tracing::error!("❌ An error occurred: {}", e);
                HandlerOutput::Failure(error_response(&e))
            }
        }
    }

    pub async fn process(&self, event: Value) -> Result<AgentResponse> {
        let event = parse_event(event)?;
        let request = CustomizationRequest::from_event(&event)?;
        let layout = ArtifactLayout::for_request(&request);
        tracing::info!(
            "🚀 Generating customization {} for account {}: {}",
            layout.directory,
            request.account_name,
            request.services.join(", ")
        );
        tracing::debug!("Account email: {}", request.account_email);

        let modules = self.retriever.retrieve(&request.services).await;
        if !modules.is_available() {
            tracing::info!("Building {} without module definitions", layout.configuration_path);
        }

        let configuration_prompt = configuration_prompt(&request.services, &modules);
        tracing::debug!("Configuration prompt: {}", configuration_prompt);
        let configuration = self.invoker.invoke(&configuration_prompt).await?;
        tracing::info!("🧠 Generated {} ({} bytes)", layout.configuration_path, configuration.len());

        let documentation = self
            .invoker
            .invoke(&documentation_prompt(&request.services))
            .await?;
        tracing::info!("🧠 Generated {} ({} bytes)", layout.documentation_path, documentation.len());

        self.repository
            .put_file(
                &layout.configuration_path,
                &format!("Add main.tf for {}", request.account_name),
                &configuration,
            )
            .await?;
        self.repository
            .put_file(
                &layout.documentation_path,
                &format!("Add README.md for {}", request.account_name),
                &documentation,
            )
            .await?;

        let summary = CommitSummary {
            message: format!(
                "main.tf and README.md successfully created in {}",
                layout.directory
            ),
            main_tf_path: self.repository.blob_url(&layout.configuration_path),
            readme_path: self.repository.blob_url(&layout.documentation_path),
        };
        tracing::info!("✅ {}", summary.message);

        success_response(event, &summary)
    }
}

pub fn success_response(event: AgentEvent, summary: &CommitSummary) -> Result<AgentResponse> {
    let body = serde_json::to_string(summary)?;

    Ok(AgentResponse {
        message_version: MESSAGE_VERSION.to_string(),
        response: ActionResponse {
            action_group: event.action_group,
            api_path: event.api_path,
            http_method: event.http_method,
            http_status_code: 200,
            response_body: HashMap::from([(
                JSON_MEDIA_TYPE.to_string(),
                ResponseContent { body },
            )]),
            session_attributes: event.session_attributes.unwrap_or_default(),
            prompt_session_attributes: event.prompt_session_attributes.unwrap_or_default(),
        },
    })
}

pub fn error_response(error: &AppError) -> ErrorResponse {
    let body = ErrorBody {
        error: GENERIC_ERROR.to_string(),
        details: error.to_string(),
    };

    ErrorResponse {
        status_code: 500,
        headers: HashMap::from([("Content-Type".to_string(), JSON_MEDIA_TYPE.to_string())]),
        // Two string fields always serialize.
        body: serde_json::to_string(&body).unwrap_or_default(),
    }
}
