use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryApplicationRepository};
use crate::routes::with_application_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use creditx::config::AppConfig;
use creditx::error::AppError;
use creditx::telemetry;
use creditx::workflows::assistant::{AssistantService, OpenAiClient};
use creditx::workflows::mortgage::MortgageApplicationService;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryApplicationRepository::default());
    let mortgage_service = Arc::new(MortgageApplicationService::new(repository));

    let completion_client = OpenAiClient::new(&config.ai)?;
    if !completion_client.is_configured() {
        warn!("OPENAI_API_KEY not set; assistant endpoints will answer 503");
    }
    let assistant_service = Arc::new(AssistantService::new(Arc::new(completion_client)));

    let app = with_application_routes(mortgage_service, assistant_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        model = %config.ai.model,
        "mortgage backend ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
