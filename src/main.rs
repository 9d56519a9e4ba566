//! supportbot HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use supportbot::config::Config;
use supportbot::corpus::load_index;
use supportbot::embedding::{MiniLmConfig, MiniLmEncoder};
use supportbot::gateway::{HandlerState, create_router_with_state};
use supportbot::matcher::{MatcherConfig, SemanticMatcher};
use supportbot::provider::{CompletionProvider, EchoProvider, GenaiProvider, TimeoutProvider};
use supportbot::router::ResponseRouter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        "supportbot starting"
    );

    let index = Arc::new(load_index(&config.faq_path, &config.embeddings_path)?);

    let encoder = MiniLmEncoder::load(MiniLmConfig::from_optional_dir(
        config.encoder_path.clone(),
    ))?;

    let matcher = SemanticMatcher::new(
        Arc::clone(&index),
        encoder,
        MatcherConfig::default().with_threshold(config.confidence_threshold),
    )?;

    let provider: Arc<dyn CompletionProvider> = if config.mock_provider {
        tracing::warn!("SUPPORTBOT_MOCK_PROVIDER set, fallback answers are echoed locally");
        Arc::new(EchoProvider)
    } else {
        Arc::new(TimeoutProvider::new(
            GenaiProvider::new(config.chat_model.clone()),
            config.provider_timeout,
        ))
    };

    tracing::info!(
        rows = index.len(),
        threshold = config.confidence_threshold,
        provider = provider.name(),
        chat_model = %config.chat_model,
        "Router ready"
    );

    let router = Arc::new(ResponseRouter::new(Arc::new(matcher), provider));
    let app = create_router_with_state(HandlerState::new(router));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("supportbot shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var(Config::ENV_PORT)
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(Config::default().port);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(rt) = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    else {
        return 1;
    };

    rt.block_on(async {
        let Ok(client) = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
        else {
            return 1;
        };

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
