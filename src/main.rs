use std::sync::Arc;

use framework_prompt_studio::api;
use framework_prompt_studio::config::AppConfig;
use framework_prompt_studio::engine::Studio;
use framework_prompt_studio::infrastructure::completion_client::OpenRouterClient;
use framework_prompt_studio::infrastructure::storage::FileStore;
use framework_prompt_studio::infrastructure::templates::TemplateStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();
    let config = AppConfig::from_env();

    // Load the template catalogue
    tracing::info!(dir = %config.templates_dir.display(), "Loading templates...");
    let templates = TemplateStore::load_dir(&config.templates_dir)
        .await
        .expect("Failed to load templates");

    // Open persisted storage
    let store = FileStore::open(&config.storage_path).expect("Failed to open storage");
    tracing::info!(path = %store.path().display(), "Storage opened");

    let mut client = OpenRouterClient::with_endpoint(&config.completion_endpoint);
    if let Some(origin) = &config.app_origin {
        client = client.with_referer(origin);
    }

    let studio = Studio::open(Arc::new(templates), Arc::new(client), Arc::new(store))
        .expect("Failed to open studio session");

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = api::router(Arc::new(studio))
        // Static template documents
        .nest_service("/templates", ServeDir::new(&config.templates_dir))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Server listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}
