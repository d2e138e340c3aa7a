use aidstack_backend::session::spawn_expiry_sweeper;
use aidstack_backend::{
    create_router, AppState, AuditLogger, Config, DispatchGateway, ProviderCredentials,
    ProviderRegistry, SessionStore,
};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "aidstack-backend", version, about = "Medical transcription AI backend")]
struct Cli {
    /// Config file (extension optional)
    #[arg(long, env = "AIDSTACK_CONFIG", default_value = "config/aidstack-backend")]
    config: String,

    /// Override the bind address
    #[arg(long)]
    bind: Option<String>,

    /// Override the HTTP port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Provider API keys may live in .env
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut cfg = Config::load(&cli.config)?;
    if let Some(bind) = cli.bind {
        cfg.service.http.bind = bind;
    }
    if let Some(port) = cli.port {
        cfg.service.http.port = port;
    }

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!("Audit log: {}", cfg.audit.log_path.display());
    info!(
        "Session TTL: {}s ({})",
        cfg.session.ttl_secs,
        if cfg.session.enforce_expiry { "enforced" } else { "advisory" }
    );

    let audit = AuditLogger::to_file(&cfg.audit.log_path)?;
    let sessions = SessionStore::new(cfg.session.clone(), audit.clone());

    let credentials = ProviderCredentials::from_env();
    let registry = ProviderRegistry::from_config(&cfg.providers, &credentials);
    info!("Providers: {}", registry.keys().join(", "));
    let gateway = DispatchGateway::new(registry, cfg.providers.timeout());

    let sweeper = spawn_expiry_sweeper(sessions.clone());

    let state = AppState::new(sessions, audit, gateway, cfg.service.name.clone());
    let app = create_router(state);

    let addr = cfg.http_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    if let Some(sweeper) = sweeper {
        sweeper.abort();
    }

    info!("Shut down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
