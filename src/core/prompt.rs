use crate::domain::model::ModuleDefinitions;

const CONFIGURATION_INSTRUCTIONS: &str = "Generate Terraform configurations for AWS services. \
Follow security best practices by using IAM roles and least privilege permissions. \
Include all necessary parameters, with default values.\
Add comments explaining the overall architecture and the purpose of each resource. ";

const DOCUMENTATION_SECTIONS: &str = "Include sections on security improvements, \
cost optimization tips following the AWS Well-Architected Framework. \
Also, include detailed Cost Breakdown for each AWS service used with hourly rates \
and total daily and monthly costs";

pub fn retrieval_query(services: &[String]) -> String {
    format!(
        "Retrieve Terraform module sources for AWS services: {}",
        services.join(", ")
    )
}

pub fn configuration_prompt(services: &[String], modules: &ModuleDefinitions) -> String {
    let mut prompt = String::from(CONFIGURATION_INSTRUCTIONS);
    prompt.push_str(&services.join(", "));
    prompt.push_str(". Use the following module definitions: ");
    prompt.push_str(&modules.to_prompt_json());
    prompt.push_str(" For any service not listed, create a Terraform resource configuration.");
    prompt
}

pub fn documentation_prompt(services: &[String]) -> String {
    let quoted: Vec<String> = services.iter().map(|s| format!("'{}'", s)).collect();
    format!(
        "Generate a detailed README for the Terraform configuration based on AWS services: [{}]. {}",
        quoted.join(", "),
        DOCUMENTATION_SECTIONS
    )
}
