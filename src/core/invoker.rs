use crate::domain::model::InvokeModelRequest;
use crate::domain::ports::FoundationModel;
use crate::utils::error::{AppError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL_ID: &str = "anthropic.claude-v2:1";

const HUMAN_TURN: &str = "\n\nHuman: ";
const ASSISTANT_TURN: &str = "\n\nAssistant:";
const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextCompletionRequest {
    pub prompt: String,
    pub max_tokens_to_sample: u32,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub stop_sequences: Vec<String>,
    pub anthropic_version: String,
}

impl TextCompletionRequest {
    pub fn new(prompt: &str) -> Self {
        Self {
            prompt: format!("{}{}{}", HUMAN_TURN, prompt, ASSISTANT_TURN),
            max_tokens_to_sample: 10_000,
            temperature: 0.0,
            top_k: 250,
            top_p: 1.0,
            stop_sequences: vec![ASSISTANT_TURN.to_string()],
            anthropic_version: ANTHROPIC_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TextCompletionResponse {
    #[serde(default)]
    completion: Option<String>,
}

pub struct ModelInvoker<M: FoundationModel> {
    model: M,
    model_id: String,
}

impl<M: FoundationModel> ModelInvoker<M> {
    pub fn new(model: M, model_id: impl Into<String>) -> Self {
        Self {
            model,
            model_id: model_id.into(),
        }
    }

    pub async fn invoke(&self, prompt: &str) -> Result<String> {
        let body = serde_json::to_vec(&TextCompletionRequest::new(prompt))?;
        let request = InvokeModelRequest {
            model_id: self.model_id.clone(),
            content_type: "application/json".to_string(),
            accept: "*/*".to_string(),
            body,
        };

        let raw = self.model.invoke_model(request).await.map_err(|e| {
            tracing::error!("An error occurred while invoking model {}: {}", self.model_id, e);
            e
        })?;

        let response: TextCompletionResponse =
            serde_json::from_slice(&raw).map_err(|e| AppError::ModelInvocation {
                message: format!("Unreadable response from {}: {}", self.model_id, e),
            })?;
        tracing::debug!("Model {} returned {} bytes", self.model_id, raw.len());

        Ok(response
            .completion
            .map(|text| text.trim().to_string())
            .unwrap_or_default())
    }
}
