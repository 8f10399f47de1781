use axum::http::{header, HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use overlay_api::{router, AppState};
use overlay_core::services::{Collaborators, FrontendEditService};
use overlay_infrastructure::{
    create_pool, LabelCatalog, LayeredConfigSource, MountPermissionPolicy, PgActorRepository,
    PgPageTree, PgRecordSource, RouteTable, SpanIconProvider, TypeRegistry,
};
use overlay_security::JwtService;
use overlay_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize telemetry; the guard flushes file logs on shutdown
    let _log_guard = overlay_shared::telemetry::init_telemetry(&config.telemetry);

    info!("Overlay server starting ({})...", config.app.env);

    // Connect to Database
    info!("Connecting to database...");
    let pool = match create_pool(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };
    info!("Database connection established.");

    // Wire collaborators
    let content_table = config.frontend_edit.content_table.clone();
    let collaborators = Collaborators {
        records: Arc::new(PgRecordSource::new(pool.clone(), content_table.clone())),
        ancestry: Arc::new(PgPageTree::new(pool.clone())),
        types: Arc::new(TypeRegistry::from_config(&config)),
        actors: Arc::new(PgActorRepository::new(pool, content_table)),
        policy: Arc::new(MountPermissionPolicy::new()),
        routes: Arc::new(RouteTable::from_settings(&config.routes)),
        config: Arc::new(LayeredConfigSource::from_settings(&config.frontend_edit)),
        translator: Arc::new(LabelCatalog::new(&config.labels)),
        icons: Arc::new(SpanIconProvider::new(config.icons.base_path.clone())),
    };

    // Create App State
    let state = AppState {
        service: Arc::new(FrontendEditService::new(collaborators)),
        jwt: Arc::new(JwtService::from_settings(&config.jwt)),
        session_cookie: config.jwt.cookie_name.clone(),
        service_name: config.app.name.clone(),
    };

    // Build router
    let app = router(state).layer(cors_layer(&config.app.allowed_origins));

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
