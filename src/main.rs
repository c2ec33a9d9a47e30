//! Facematch HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use facematch::comparator::HttpComparator;
use facematch::config::Config;
use facematch::corpus::S3CorpusStore;
use facematch::gateway::{HandlerState, create_router_with_state};
use facematch::identity::MySqlMetadataStore;
use facematch::matcher::ScanOptions;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Outbound timeout for a single comparator call. Model inference can take
/// seconds per pair on CPU.
const COMPARATOR_TIMEOUT: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        bucket = %config.store_bucket,
        prefix = %config.corpus_prefix,
        "facematch starting"
    );

    let corpus = Arc::new(S3CorpusStore::connect(
        &config.store_endpoint,
        &config.store_access_key,
        &config.store_secret_key,
        &config.store_bucket,
    ));

    let metadata = Arc::new(MySqlMetadataStore::connect(&config.database_url).await?);

    let http = reqwest::Client::builder()
        .timeout(COMPARATOR_TIMEOUT)
        .build()?;
    let comparator = Arc::new(HttpComparator::new(
        http,
        &config.comparator_url,
        &config.comparator_model,
    ));

    let state = HandlerState::new(
        corpus,
        comparator,
        metadata,
        &config.corpus_prefix,
        config.default_threshold,
        config.max_upload_bytes,
        ScanOptions {
            concurrency: config.scan_concurrency,
            fetch_retries: config.fetch_retries,
        },
    );

    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("facematch shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
