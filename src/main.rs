use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use lectern::application::ports::UploadStore;
use lectern::application::services::{NotesService, UploadRegistry};
use lectern::infrastructure::audio::LazyWhisperEngine;
use lectern::infrastructure::llm::OpenAiChatClient;
use lectern::infrastructure::media::FfmpegConverter;
use lectern::infrastructure::observability::{init_tracing, TracingConfig};
use lectern::infrastructure::storage::LocalUploadStore;
use lectern::presentation::{create_router, AppState, Environment, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .parse()
        .map_err(anyhow::Error::msg)?;

    let mut settings = Settings::load(environment)?;
    if settings.llm.api_key.is_empty() {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            settings.llm.api_key = key;
        }
    }

    init_tracing(
        TracingConfig::for_environment(environment.as_str()),
        &settings.logging.directive,
    );
    tracing::info!(environment = %environment, "Starting lectern");

    if settings.llm.api_key.is_empty() {
        tracing::warn!("No generation API key configured; generation calls will fail");
    }

    let upload_store: Arc<dyn UploadStore> =
        Arc::new(LocalUploadStore::new(settings.uploads.directory.clone())?);
    let media_converter = Arc::new(FfmpegConverter::new(settings.media.ffmpeg_binary.clone()));
    let transcription_engine = Arc::new(LazyWhisperEngine::new(settings.whisper.model.clone()));
    let llm_client = Arc::new(OpenAiChatClient::new(&settings.llm));

    let notes_service = Arc::new(NotesService::new(
        Arc::clone(&upload_store),
        Arc::clone(&transcription_engine),
        Arc::clone(&llm_client),
    ));

    let addr = SocketAddr::new(settings.server.host.parse()?, settings.server.port);

    let state = AppState {
        notes_service,
        media_converter,
        upload_store,
        upload_registry: Arc::new(UploadRegistry::new()),
        settings,
    };

    let router = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
