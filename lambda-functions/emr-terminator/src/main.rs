use emr_terminator::{HandlerConfig, Request, Response, SdkEmrApi, TerminationService};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::info;

async fn function_handler(
    service: &TerminationService<SdkEmrApi>,
    event: LambdaEvent<Request>,
) -> Result<Response, Error> {
    info!(
        "Received termination request {} for {:?}",
        event.context.request_id, event.payload.cluster_id
    );

    let response = service.handle(&event.payload).await;
    info!("Result: {} - {}", response.status, response.message);

    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .init();

    let config = HandlerConfig::from_env();
    info!("Searching regions {:?}", config.regions());

    let service = TerminationService::new(SdkEmrApi::new().await, config);
    let service = &service;

    run(service_fn(move |event: LambdaEvent<Request>| async move {
        function_handler(service, event).await
    }))
    .await
}
