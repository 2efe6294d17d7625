use anyhow::Result;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use traductor_backend::config::Config;
use traductor_backend::routes;
use traductor_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "traductor_backend=debug,tower_http=debug".into()),
        )
        .init();

    // Load configuration - try multiple paths
    let config_paths: Vec<String> = vec![
        std::env::var("CONFIG_PATH").ok(),
        Some("conf.yaml".to_string()),
        Some("conf.json".to_string()),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut config = None;
    let mut loaded_path = String::new();

    for path in &config_paths {
        match Config::load(path) {
            Ok(cfg) => {
                config = Some(cfg);
                loaded_path = path.clone();
                break;
            }
            Err(e) => {
                tracing::debug!("Failed to load config from {}: {}", path, e);
                continue;
            }
        }
    }

    let config = match config {
        Some(cfg) => {
            info!("Loaded configuration from: {}", loaded_path);
            cfg
        }
        None => {
            info!("No config file found, using defaults. Tried: {:?}", config_paths);
            Config {
                system_config: Default::default(),
                model_config: Default::default(),
            }
        }
    };

    // Initialize app state; loads model and tokenizers before serving
    let app_state = AppState::new(config.clone())?;

    // Build application
    let app = Router::new()
        .merge(routes::create_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // Start server on a background task
    let addr = config.system_config.bind_addr()?;
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let server = tokio::spawn(async move { axum::serve(listener, app).await });

    server.await??;

    Ok(())
}
