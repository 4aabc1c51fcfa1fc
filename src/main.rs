use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use voicetasks::application::services::{TaskExtractionService, TranscriptionService};
use voicetasks::infrastructure::extraction::{ExtractorFactory, ExtractorKind};
use voicetasks::infrastructure::jobs::JobPoller;
use voicetasks::infrastructure::observability::{TracingConfig, init_tracing};
use voicetasks::infrastructure::transcription::{TranscriberFactory, TranscriberKind};
use voicetasks::presentation::{
    AppState, ExtractionProviderSetting, Settings, TranscriptionProviderSetting, create_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env().map_err(anyhow::Error::msg)?;

    init_tracing(
        TracingConfig {
            environment: settings.environment.to_string(),
            json_format: settings.logging.json_format,
        },
        settings.server.port,
    );

    let shutdown = CancellationToken::new();
    let poller = JobPoller::new(settings.polling.interval(), settings.polling.max_wait());

    let transcriber_kind = match settings.transcription.provider {
        TranscriptionProviderSetting::OpenAi => TranscriberKind::OpenAi,
        TranscriptionProviderSetting::AssemblyAi => TranscriberKind::AssemblyAi,
    };
    let transcriber = TranscriberFactory::create(
        transcriber_kind,
        &settings.transcription.api_key,
        settings.transcription.base_url.clone(),
        settings.transcription.model.clone(),
        settings.transcription.language.clone(),
        poller,
        shutdown.clone(),
    )
    .map_err(|e| anyhow::anyhow!("transcription provider: {}", e))?;

    let extractor_kind = match settings.extraction.provider {
        ExtractionProviderSetting::OpenAi => ExtractorKind::OpenAi,
        ExtractionProviderSetting::AssemblyAi => ExtractorKind::AssemblyAi,
    };
    let extractor = ExtractorFactory::create(
        extractor_kind,
        &settings.extraction.api_key,
        settings.extraction.base_url.clone(),
        settings.extraction.model.clone(),
        poller,
        shutdown.clone(),
    )
    .map_err(|e| anyhow::anyhow!("extraction provider: {}", e))?;

    let state = AppState {
        transcription_service: Arc::new(TranscriptionService::new(transcriber)),
        task_extraction_service: Arc::new(TaskExtractionService::new(extractor)),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    Ok(())
}

/// Ctrl-C cancels any in-flight polling before the server drains.
async fn shutdown_signal(shutdown: CancellationToken) {
    tokio::signal::ctrl_c().await.ok();
    tracing::info!("Shutdown signal received");
    shutdown.cancel();
}
