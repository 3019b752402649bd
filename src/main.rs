//! Quillboard server binary.
//!
//! Wires the adapters together: loads configuration, connects to
//! PostgreSQL, builds the AI provider chain, and serves the HTTP and
//! WebSocket routes until shutdown.

use std::sync::Arc;

use axum::{http::HeaderValue, middleware, routing::get, Json, Router};
use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quillboard::adapters::ai::{
    FailoverProvider, GeminiConfig, GeminiProvider, OpenAiConfig, OpenAiProvider,
};
use quillboard::adapters::auth::{SupabaseAuthProvider, SupabaseConfig};
use quillboard::adapters::http::middleware::{auth_middleware, AuthState};
use quillboard::adapters::http::{
    auth_routes, board_routes, processor_routes, AuthHandlers, BoardHandlers, ProcessorHandlers,
};
use quillboard::adapters::postgres::PostgresMessageRepository;
use quillboard::adapters::storage::InMemorySessionStore;
use quillboard::adapters::websocket::{ws_handler, RoomManager, WebSocketState};
use quillboard::application::handlers::board::{
    DeleteMessageHandler, GetMessageHandler, ListMessagesHandler, PostMessageHandler,
};
use quillboard::application::handlers::processing::{
    ClearSessionHandler, GetSessionStateHandler, ProcessTextHandler,
};
use quillboard::config::{AiConfig, AiProviderKind, AppConfig, ServerConfig};
use quillboard::domain::processing::ProcessingService;
use quillboard::ports::{AiProvider, AuthProvider, MessageRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    info!("Starting Quillboard server");

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await?;
    info!("Connected to PostgreSQL");

    let auth_provider: Arc<dyn AuthProvider> = Arc::new(SupabaseAuthProvider::new(
        SupabaseConfig::new(
            &config.auth.supabase_url,
            &config.auth.supabase_anon_key,
            &config.auth.jwt_secret,
        )
        .with_jwt_audience(&config.auth.jwt_audience),
    ));

    let ai_provider = build_ai_provider(&config.ai);
    info!(provider = ?config.ai.primary_provider, "AI provider ready");

    let session_store = Arc::new(InMemorySessionStore::new());
    let service = Arc::new(
        ProcessingService::new(ai_provider, session_store)
            .with_max_tokens(config.ai.max_tokens)
            .with_temperature(config.ai.temperature),
    );
    let repository: Arc<dyn MessageRepository> = Arc::new(PostgresMessageRepository::new(pool));

    let app = build_router(service, repository, auth_provider, &config.server);

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Builds the primary provider and, when configured, wraps it with the
/// failover chain.
fn build_ai_provider(config: &AiConfig) -> Arc<dyn AiProvider> {
    let primary = provider_for(config.primary_provider, config);

    match config.fallback_provider {
        Some(kind) if kind != config.primary_provider => {
            Arc::new(FailoverProvider::new(primary).with_fallback(provider_for(kind, config)))
        }
        _ => primary,
    }
}

fn provider_for(kind: AiProviderKind, config: &AiConfig) -> Arc<dyn AiProvider> {
    match kind {
        AiProviderKind::OpenAi => {
            let cfg = OpenAiConfig::new(config.openai_api_key.clone().unwrap_or_default())
                .with_model(config.openai_model.clone())
                .with_timeout(config.timeout())
                .with_max_retries(config.max_retries);
            Arc::new(OpenAiProvider::new(cfg))
        }
        AiProviderKind::Gemini => {
            let cfg = GeminiConfig::new(config.gemini_api_key.clone().unwrap_or_default())
                .with_model(config.gemini_model.clone())
                .with_timeout(config.timeout());
            Arc::new(GeminiProvider::new(cfg))
        }
    }
}

/// Assembles the full application router.
fn build_router(
    service: Arc<ProcessingService>,
    repository: Arc<dyn MessageRepository>,
    auth_provider: Arc<dyn AuthProvider>,
    server: &ServerConfig,
) -> Router {
    let processor_handlers = ProcessorHandlers::new(
        Arc::new(ProcessTextHandler::new(service.clone())),
        Arc::new(GetSessionStateHandler::new(service.clone())),
        Arc::new(ClearSessionHandler::new(service.clone())),
    );

    let board_handlers = BoardHandlers::new(
        Arc::new(PostMessageHandler::new(repository.clone())),
        Arc::new(ListMessagesHandler::new(repository.clone())),
        Arc::new(GetMessageHandler::new(repository.clone())),
        Arc::new(DeleteMessageHandler::new(repository)),
    );

    let auth_handlers = AuthHandlers::new(auth_provider.clone());

    let ws_state = WebSocketState::new(service, Arc::new(RoomManager::default()));
    let auth_state: AuthState = auth_provider;

    Router::new()
        .route("/health", get(health))
        .nest("/auth", auth_routes(auth_handlers))
        .nest("/api", board_routes(board_handlers))
        .nest(
            "/experiments/text-processor/api",
            processor_routes(processor_handlers),
        )
        .route(
            "/experiments/text-processor/ws/:session_id",
            get(ws_handler).with_state(ws_state),
        )
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins = server.cors_origins_list();
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
