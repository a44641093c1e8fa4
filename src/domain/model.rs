use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Action group invocation as delivered by a Bedrock agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentEvent {
    pub action_group: String,
    pub api_path: String,
    pub http_method: String,
    pub request_body: RequestBody,
    #[serde(default)]
    pub session_attributes: Option<Map<String, Value>>,
    #[serde(default)]
    pub prompt_session_attributes: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestBody {
    pub content: HashMap<String, MediaContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaContent {
    #[serde(default)]
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub value: String,
}

/// Validated request properties of one customization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomizationRequest {
    pub account_email: String,
    pub account_name: String,
    pub customization_name: String,
    pub services: Vec<String>,
}

/// Text returned by the knowledge base, or nothing when retrieval failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleDefinitions {
    Retrieved(String),
    Unavailable,
}

impl ModuleDefinitions {
    /// JSON rendering embedded into the configuration prompt: a string literal
    /// for retrieved text, an empty object otherwise.
    pub fn to_prompt_json(&self) -> String {
        match self {
            ModuleDefinitions::Retrieved(text) => {
                Value::String(text.clone()).to_string()
            }
            ModuleDefinitions::Unavailable => "{}".to_string(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ModuleDefinitions::Retrieved(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeModelRequest {
    pub model_id: String,
    pub content_type: String,
    pub accept: String,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrieveAndGenerateRequest {
    pub query: String,
    pub knowledge_base_id: String,
    pub model_arn: String,
}

/// JSON document carried inside the success envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    pub message: String,
    pub main_tf_path: String,
    pub readme_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentResponse {
    pub message_version: String,
    pub response: ActionResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub action_group: String,
    pub api_path: String,
    pub http_method: String,
    pub http_status_code: u16,
    pub response_body: HashMap<String, ResponseContent>,
    pub session_attributes: Map<String, Value>,
    pub prompt_session_attributes: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseContent {
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HandlerOutput {
    Success(AgentResponse),
    Failure(ErrorResponse),
}

impl HandlerOutput {
    pub fn is_success(&self) -> bool {
        matches!(self, HandlerOutput::Success(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_agent_event_deserializes_bedrock_payload() {
        let event: AgentEvent = serde_json::from_value(json!({
            "messageVersion": "1.0",
            "agent": {"name": "aft", "id": "A1", "alias": "TSTALIASID", "version": "DRAFT"},
            "inputText": "create an account",
            "sessionId": "123",
            "actionGroup": "aft-actions",
            "apiPath": "/customizations",
            "httpMethod": "POST",
            "requestBody": {
                "content": {
                    "application/json": {
                        "properties": [
                            {"name": "AccountName", "type": "string", "value": "dev1"}
                        ]
                    }
                }
            },
            "sessionAttributes": {},
            "promptSessionAttributes": {"k": "v"}
        }))
        .unwrap();

        assert_eq!(event.action_group, "aft-actions");
        assert_eq!(event.api_path, "/customizations");
        let properties = &event.request_body.content[JSON_MEDIA_TYPE].properties;
        assert_eq!(properties[0].name, "AccountName");
        assert_eq!(properties[0].kind.as_deref(), Some("string"));
        assert_eq!(
            event.prompt_session_attributes.unwrap().get("k"),
            Some(&json!("v"))
        );
    }

    #[test]
    fn test_session_attributes_are_optional() {
        let event: AgentEvent = serde_json::from_value(json!({
            "actionGroup": "g",
            "apiPath": "/p",
            "httpMethod": "POST",
            "requestBody": {"content": {}}
        }))
        .unwrap();

        assert!(event.session_attributes.is_none());
        assert!(event.prompt_session_attributes.is_none());
    }

    #[test]
    fn test_module_definitions_prompt_json() {
        let retrieved = ModuleDefinitions::Retrieved("use \"terraform-aws-modules/s3\"".to_string());
        assert_eq!(
            retrieved.to_prompt_json(),
            r#""use \"terraform-aws-modules/s3\"""#
        );
        assert_eq!(ModuleDefinitions::Unavailable.to_prompt_json(), "{}");
        assert!(retrieved.is_available());
        assert!(!ModuleDefinitions::Unavailable.is_available());
    }

    #[test]
    fn test_error_response_field_names() {
        let response = ErrorResponse {
            status_code: 500,
            headers: HashMap::from([(
                "Content-Type".to_string(),
                JSON_MEDIA_TYPE.to_string(),
            )]),
            body: "{}".to_string(),
        };
        let value = serde_json::to_value(HandlerOutput::Failure(response)).unwrap();
        assert_eq!(value["statusCode"], 500);
        assert_eq!(value["headers"]["Content-Type"], "application/json");
    }
}
