use lambda_runtime::{Error, LambdaEvent, service_fn};
use runner_lambda::{LambdaHandlers, bootstrap};
use serde_json::Value;
use students_core::ApiGatewayResponse;
use tracing::info;

async fn lambda_handler(
    handlers: &LambdaHandlers,
    event: LambdaEvent<Value>,
) -> Result<ApiGatewayResponse, Error> {
    let (payload, context) = event.into_parts();
    info!("Inserting student (request {})", context.request_id);

    Ok(handlers.insert_student(payload).await?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let handlers = bootstrap().await?;
    lambda_runtime::run(service_fn(|event| lambda_handler(&handlers, event))).await
}
