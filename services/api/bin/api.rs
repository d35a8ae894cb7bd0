//! Main Entrypoint for the Interview API Service
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Loading the phase prompt templates from disk.
//! 3. Initializing the generation and transcription clients.
//! 4. Constructing the Axum router and applying middleware.
//! 5. Starting the web server and handling graceful shutdown.

use anyhow::Context;
use async_openai::config::OpenAIConfig;
use interview_api::{
    config::{Config, Provider},
    router::create_router,
    state::{AppState, SessionRegistry},
};
use interview_core::{
    difficulty::RandomDifficultyPicker,
    generator::OpenAICompatibleGenerator,
    interviewer::Interviewer,
    prompts::PromptLibrary,
    transcribe::{HttpTranscriber, Transcriber},
};
use std::{collections::HashMap, fs, net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Listens for the `Ctrl+C` signal to gracefully shut down the server.
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("Received shutdown signal. Shutting down gracefully...");
}

/// A helper function to load prompt templates from a directory.
fn load_prompts(prompts_path: &std::path::Path) -> anyhow::Result<HashMap<String, String>> {
    let mut prompts = HashMap::new();
    for entry in std::fs::read_dir(prompts_path)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("md") {
            let prompt_key = path
                .file_stem()
                .and_then(|s| s.to_str())
                .context("Could not get file stem")?
                .to_string();
            let content = fs::read_to_string(&path)?;
            prompts.insert(prompt_key, content);
        }
    }
    Ok(prompts)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!("Configuration loaded. Initializing application state...");

    // --- 3. Load Prompt Templates ---
    let prompts = load_prompts(&config.prompts_path)
        .with_context(|| format!("Failed to read prompts from {:?}", config.prompts_path))?;
    let prompt_library = PromptLibrary::new(prompts)?;

    // --- 4. Initialize Shared Services ---
    let openai_config = match &config.provider {
        Provider::OpenAI => {
            info!("Using OpenAI provider.");
            let api_key = config
                .openai_api_key
                .as_ref()
                .context("OPENAI_API_KEY is required for the 'openai' provider")?;
            OpenAIConfig::new()
                .with_api_key(api_key)
                .with_api_base("https://api.openai.com/v1/")
        }
        Provider::Gemini => {
            info!("Using Gemini provider.");
            let api_key = config
                .gemini_api_key
                .as_ref()
                .context("GEMINI_API_KEY is required for the 'gemini' provider")?;
            OpenAIConfig::new()
                .with_api_key(api_key)
                .with_api_base("https://generativelanguage.googleapis.com/v1beta/openai")
        }
    };

    let generator = Arc::new(OpenAICompatibleGenerator::new(
        openai_config,
        config.chat_model.clone(),
    ));
    let interviewer = Arc::new(Interviewer::new(
        prompt_library,
        generator,
        Box::new(RandomDifficultyPicker),
    ));

    let transcriber: Option<Arc<dyn Transcriber>> = config
        .transcriber_url
        .as_ref()
        .map(|url| Arc::new(HttpTranscriber::new(url.clone())) as Arc<dyn Transcriber>);
    if transcriber.is_none() {
        info!("No TRANSCRIBER_URL set; the transcription route will report an error.");
    }

    let app_state = Arc::new(AppState {
        sessions: SessionRegistry::default(),
        interviewer,
        transcriber,
        config: Arc::new(config.clone()),
    });

    // --- 5. Create Router and Apply Middleware ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(app_state).layer(cors);

    // --- 6. Start Server ---
    info!(
        provider = ?config.provider,
        model = %config.chat_model,
        bind_address = %config.bind_address,
        "Service configured. Starting server..."
    );
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server has shut down.");
    Ok(())
}
