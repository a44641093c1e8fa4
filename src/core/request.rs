use crate::domain::model::{AgentEvent, CustomizationRequest, JSON_MEDIA_TYPE};
use crate::utils::error::{AppError, Result};
use serde_json::Value;
use std::collections::HashMap;

pub const ACCOUNT_EMAIL: &str = "AccountEmail";
pub const ACCOUNT_NAME: &str = "AccountName";
pub const CUSTOMIZATION_NAME: &str = "CustomizationName";
pub const AWS_SERVICES: &str = "AwsServices";

pub fn parse_event(event: Value) -> Result<AgentEvent> {
    serde_json::from_value(event).map_err(|e| AppError::MalformedEvent {
        message: e.to_string(),
    })
}

/// Name → value mapping of the JSON request body. Later duplicates win.
pub fn extract_properties(event: &AgentEvent) -> Result<HashMap<String, String>> {
    let content = event
        .request_body
        .content
        .get(JSON_MEDIA_TYPE)
        .ok_or_else(|| AppError::MalformedEvent {
            message: format!("requestBody has no '{}' content", JSON_MEDIA_TYPE),
        })?;

    Ok(content
        .properties
        .iter()
        .map(|p| (p.name.clone(), p.value.clone()))
        .collect())
}

pub fn split_services(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl CustomizationRequest {
    pub fn from_properties(properties: &HashMap<String, String>) -> Result<Self> {
        let required = |name: &str| {
            properties
                .get(name)
                .cloned()
                .ok_or_else(|| AppError::MissingProperty {
                    name: name.to_string(),
                })
        };

        let account_email = required(ACCOUNT_EMAIL)?;
        let account_name = required(ACCOUNT_NAME)?;
        let customization_name = required(CUSTOMIZATION_NAME)?;
        let services = split_services(&required(AWS_SERVICES)?);

        if services.is_empty() {
            return Err(AppError::InvalidProperty {
                name: AWS_SERVICES.to_string(),
                reason: "no service names given".to_string(),
            });
        }

        Ok(Self {
            account_email,
            account_name,
            customization_name,
            services,
        })
    }

    pub fn from_event(event: &AgentEvent) -> Result<Self> {
        Self::from_properties(&extract_properties(event)?)
    }
}
