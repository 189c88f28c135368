use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{header, HeaderName, HeaderValue, Method};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use site::auth::ADMIN_TOKEN_HEADER;
use site::config::{Config, StoreBackend};
use site::llm_client::LlmClient;
use site::routes::build_router;
use site::state::AppState;
use site::store::{dynamo, DynamoPostStore, MemoryPostStore, PostStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    site::logging::init(env!("CARGO_CRATE_NAME"), &config.rust_log);

    info!("Starting site API v{}", env!("CARGO_PKG_VERSION"));

    if config.admin_token.is_none() {
        warn!("ADMIN_TOKEN is not set; admin routes are open to every caller");
    }

    let store: Arc<dyn PostStore> = match config.store_backend {
        StoreBackend::DynamoDb => {
            let client =
                dynamo::create_client(&config.aws_region, config.dynamodb_endpoint.as_deref())
                    .await;
            info!("DynamoDB store initialized (table: {})", config.blog_table_name);
            Arc::new(DynamoPostStore::new(client, config.blog_table_name.clone()))
        }
        StoreBackend::Memory => {
            info!("In-memory store initialized; posts are lost on restart");
            Arc::new(MemoryPostStore::new())
        }
    };

    let llm = match &config.openai_api_key {
        Some(key) => {
            info!("LLM client initialized (model: {})", config.openai_model);
            Some(LlmClient::new(key.clone(), config.openai_base_url.clone())?)
        }
        None => {
            warn!("OPENAI_API_KEY is not set; post metadata generation is disabled");
            None
        }
    };

    let origin: HeaderValue = config
        .site_url
        .parse()
        .context("NEXT_PUBLIC_SITE_URL is not a valid origin")?;

    let state = AppState {
        store,
        llm,
        config: config.clone(),
    };

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(ADMIN_TOKEN_HEADER),
        ]);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
