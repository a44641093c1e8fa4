#[cfg(feature = "lambda")]
use aft_customizer::adapters::{BedrockKnowledgeBase, BedrockModel, GitHubRepository};
#[cfg(feature = "lambda")]
use aft_customizer::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use aft_customizer::{AppConfig, CustomizationHandler, HandlerOutput, ModelInvoker, ModuleRetriever};
#[cfg(feature = "lambda")]
use anyhow::Context;
#[cfg(feature = "lambda")]
use aws_config::BehaviorVersion;
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde_json::Value;

#[cfg(feature = "lambda")]
type Handler = CustomizationHandler<BedrockModel, BedrockKnowledgeBase, GitHubRepository>;

#[cfg(feature = "lambda")]
async fn build_handler() -> anyhow::Result<Handler> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;
    tracing::debug!("Configuration: {:?}", config);

    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let model = BedrockModel::new(aws_sdk_bedrockruntime::Client::new(&sdk_config));
    let knowledge_base =
        BedrockKnowledgeBase::new(aws_sdk_bedrockagentruntime::Client::new(&sdk_config));
    let repository = GitHubRepository::new(&config.repository)
        .context("Failed to create repository client")?;

    Ok(CustomizationHandler::new(
        ModuleRetriever::new(
            knowledge_base,
            config.knowledge_base.id,
            config.knowledge_base.model_arn,
        ),
        ModelInvoker::new(model, config.model.id),
        repository,
    ))
}

#[cfg(feature = "lambda")]
async fn function_handler(
    handler: &Handler,
    event: LambdaEvent<Value>,
) -> Result<HandlerOutput, Error> {
    tracing::info!("Invocation {}", event.context.request_id);
    Ok(handler.handle(event.payload).await)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let handler = build_handler().await?;
    let handler = &handler;

    run(service_fn(move |event: LambdaEvent<Value>| async move {
        function_handler(handler, event).await
    }))
    .await
}

