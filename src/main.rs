//! Vigil HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use vigil::config::Config;
use vigil::corpus::Corpus;
use vigil::elaborate::Elaborator;
use vigil::embedding::{EncoderConfig, TextEncoder};
use vigil::gateway::{HandlerState, create_router_with_state};
use vigil::matcher::RandomSelector;
use vigil::pipeline::{CrimeAssistant, PipelineSettings};
use vigil::sentiment::{SentimentConfig, SentimentScorer};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!(
        r#"
██╗   ██╗██╗ ██████╗ ██╗██╗
██║   ██║██║██╔════╝ ██║██║
██║   ██║██║██║  ███╗██║██║
╚██╗ ██╔╝██║██║   ██║██║██║
 ╚████╔╝ ██║╚██████╔╝██║███████╗
  ╚═══╝  ╚═╝ ╚═════╝ ╚═╝╚══════╝

        ASK. REPORT. PREVENT.
"#
    );

    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        "Vigil starting"
    );

    // All-or-nothing: a malformed corpus must keep the server from starting.
    let corpus = Arc::new(Corpus::load(
        &config.intents_path,
        &config.recommendations_path,
    )?);
    tracing::info!(
        intents = corpus.intents().len(),
        crimes = corpus.crimes().len(),
        recommendations = corpus.recommendation_count(),
        "Corpus loaded"
    );

    let encoder_config = if let Some(path) = &config.encoder_path {
        EncoderConfig::new(path.clone())
    } else {
        EncoderConfig::stub()
    };
    let encoder = Arc::new(TextEncoder::load(encoder_config)?);

    let sentiment_config = if let Some(path) = &config.sentiment_path {
        SentimentConfig::new(path.clone())
    } else {
        SentimentConfig::stub()
    };
    let sentiment = Arc::new(SentimentScorer::load(sentiment_config)?);

    let elaborator = match &config.elaborator_model {
        Some(model) => {
            tracing::info!(model = %model, "Elaboration enabled");
            Some(Elaborator::new(model.clone()))
        }
        None => {
            tracing::info!("No elaborator model configured, elaboration disabled");
            None
        }
    };

    let assistant = CrimeAssistant::new(
        corpus,
        encoder,
        sentiment,
        elaborator,
        Box::new(RandomSelector::new()),
        PipelineSettings::from_config(&config),
    )?;

    let state = HandlerState::new(Arc::new(assistant));
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Vigil shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("VIGIL_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime");

    rt.block_on(async {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
            .expect("failed to build client");

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
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
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
