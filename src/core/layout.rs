use crate::domain::model::CustomizationRequest;

pub const CONFIGURATION_FILE: &str = "main.tf";
pub const DOCUMENTATION_FILE: &str = "README.md";

/// Repository paths of the two generated files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    pub directory: String,
    pub configuration_path: String,
    pub documentation_path: String,
}

impl ArtifactLayout {
    pub fn new(customization_name: &str, account_name: &str) -> Self {
        let directory = format!("{}-{}/", customization_name, account_name);
        Self {
            configuration_path: format!("{}{}", directory, CONFIGURATION_FILE),
            documentation_path: format!("{}{}", directory, DOCUMENTATION_FILE),
            directory,
        }
    }

    pub fn for_request(request: &CustomizationRequest) -> Self {
        Self::new(&request.customization_name, &request.account_name)
    }
}
