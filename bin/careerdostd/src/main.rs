//! `careerdostd` — the Career Dost server binary.
//!
//! Usage:
//!   careerdostd -c <context-name-or-path> [--listen <addr>]
//!
//! The context name resolves to `/etc/careerdost/<name>.toml`.
//! If a path with `/` or `.` is given, it's used directly.

mod auth_middleware;
mod config;
mod routes;

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use careerdost_core::Module;

use config::ServerConfig;

/// Career Dost server.
#[derive(Parser, Debug)]
#[command(name = "careerdostd", about = "Career Dost server")]
struct Cli {
    /// Context name or path to config file.
    #[arg(short = 'c', long = "config", required = true)]
    config: String,

    /// Listen address (overrides default 0.0.0.0:8080).
    #[arg(long = "listen", default_value = "0.0.0.0:8080")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load server configuration.
    let config_path = ServerConfig::resolve_path(&cli.config);
    info!("Loading configuration from {}", config_path.display());
    let server_config = ServerConfig::load(&config_path)?;
    server_config.verify()?;

    // Initialize storage.
    let data_dir = std::path::PathBuf::from(&server_config.storage.data_dir);
    std::fs::create_dir_all(&data_dir)?;

    let kv: Arc<dyn careerdost_kv::KVStore> = Arc::new(
        careerdost_kv::RedbStore::open(&data_dir.join("data.redb"))
            .map_err(|e| anyhow::anyhow!("failed to open document store: {}", e))?,
    );
    let search: Arc<dyn careerdost_search::SearchIndex> = Arc::new(
        careerdost_search::TantivyIndex::open(&data_dir.join("search"))
            .map_err(|e| anyhow::anyhow!("failed to open search index: {}", e))?,
    );

    // ── Modules ──

    let auth_config = auth::service::AuthConfig {
        jwt_secret: server_config.jwt.secret.clone(),
        token_ttl: server_config.jwt.expire_secs,
    };
    let auth_module = auth::AuthModule::new(Arc::clone(&kv), auth_config);
    info!("Auth module initialized");

    let planner_module = planner::PlannerModule::new(Arc::clone(&kv));
    let roadmap_module = roadmap::RoadmapModule::new(Arc::clone(&kv));
    let forum_module = forum::ForumModule::new(Arc::clone(&kv));
    let library_module = library::LibraryModule::new(Arc::clone(&kv), search);

    let platform_module = platform::PlatformModule::new();
    let contest_module =
        contest::ContestModule::new(Arc::clone(&kv), platform_module.codeforces());

    let assistant_module = assistant::AssistantModule::new(assistant::GeminiConfig {
        api_key: server_config.assistant.gemini_api_key.clone(),
        model: server_config.assistant.model.clone(),
        ..Default::default()
    });

    let analytics_module = analytics::AnalyticsModule::new(
        Arc::clone(auth_module.service()),
        Arc::clone(planner_module.service()),
        Arc::clone(roadmap_module.service()),
        Arc::clone(contest_module.service()),
        Arc::clone(library_module.service()),
    );
    info!("All modules initialized");

    let module_routes = vec![
        (auth_module.name(), auth_module.routes()),
        (planner_module.name(), planner_module.routes()),
        (roadmap_module.name(), roadmap_module.routes()),
        (contest_module.name(), contest_module.routes()),
        (library_module.name(), library_module.routes()),
        (forum_module.name(), forum_module.routes()),
        (platform_module.name(), platform_module.routes()),
        (assistant_module.name(), assistant_module.routes()),
        (analytics_module.name(), analytics_module.routes()),
    ];

    // Build router.
    let app = routes::build_router(Arc::clone(auth_module.service()), module_routes);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&cli.listen).await?;
    info!("Career Dost server listening on {}", cli.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
