use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;
use clap::Parser;
use clap_serde_derive::ClapSerde;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::api::{router, AppState};
use crate::config::Config;
use crate::telemetry::{init_telemetry, shutdown_telemetry};
use crate::upstream::openai::OpenAiClient;
use crate::upstream::CompletionProvider;

mod api;
mod config;
mod error;
mod extractors;
mod telemetry;
mod upstream;

#[cfg(unix)]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

const DEFAULT_CONFIG_FILE: &str = "EvaluationProxy.toml";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, env, default_value = DEFAULT_CONFIG_FILE)]
    config_file: String,

    /// Configuration options
    #[command(flatten)]
    pub opt_config: <Config as ClapSerde>::Opt,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = match Config::from_toml(&args.config_file) {
        Ok(conf) => conf.merge(args.opt_config),
        Err(err) => {
            if args.config_file != DEFAULT_CONFIG_FILE {
                return Err(err).with_context(|| {
                    format!("Failed to read configuration file {}", args.config_file)
                });
            }
            Config::default().merge(args.opt_config)
        }
    };

    init_telemetry(config.otlp_endpoint(), config.console)?;
    let result = serve(config).await;
    if let Err(err) = &result {
        error!("{:#}", err);
    }
    shutdown_telemetry();
    result
}

async fn serve(config: Config) -> Result<()> {
    let provider = match config.openai_api_key() {
        Some(key) => {
            let client = OpenAiClient::new(
                reqwest::Client::new(),
                key.to_string(),
                config
                    .openai_endpoint()
                    .context("Invalid OpenAI endpoint")?,
            );
            Some(Arc::new(client) as Arc<dyn CompletionProvider>)
        }
        None => {
            warn!("OPENAI_API_KEY is not set, evaluations will fail until it is configured");
            None
        }
    };
    let router = router(AppState { provider });

    let addr: SocketAddr = format!("{}:{}", config.address, config.port)
        .parse()
        .context("Invalid listen address")?;

    match config.tls_files()? {
        Some((cert, key)) => {
            let tls = RustlsConfig::from_pem_file(cert, key)
                .await
                .context("Failed to load TLS certificate")?;
            let handle = Handle::new();
            tokio::spawn(graceful_shutdown(handle.clone()));

            info!("Listening on https://{}", addr);
            axum_server::bind_rustls(addr, tls)
                .handle(handle)
                .serve(router.into_make_service())
                .await?;
        }
        None => {
            let listener = TcpListener::bind(addr).await?;
            info!("Listening on http://{}", listener.local_addr()?);
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
    }
    Ok(())
}

async fn graceful_shutdown(handle: Handle) {
    shutdown_signal().await;
    handle.graceful_shutdown(Some(Duration::from_secs(10)));
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down..."),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}
