mod cache;
mod catalog;
mod config;
mod consultation_log;
mod error;
mod locale;
mod matcher;
mod model;
mod server;
mod severity;
mod translator;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cache::TranslationCache;
use config::Config;
use consultation_log::ConsultationLog;
use server::VaidyaServer;
use translator::TranslationAdapter;
use vaidya_common::redis::RedisCache;
use vaidya_common::translate::{TranslateClient, TranslateClientConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for MCP JSON-RPC
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting vaidya MCP server");

    let config = Config::from_env()?;
    info!(
        catalog_path = %config.catalog_path,
        db_path = %config.db_path,
        default_locale = %config.default_locale,
        redis = config.redis_url.is_some(),
        "configuration loaded"
    );

    // An invalid catalog aborts startup.
    let catalog = Arc::new(catalog::load_catalog(&config.catalog_path())?);
    info!(diseases = catalog.len(), "disease catalog loaded");

    let log = Arc::new(ConsultationLog::open(&config.db_path())?);
    info!("consultation log opened");

    let translator = Arc::new(build_translator(&config).await?);

    let server = VaidyaServer::new(catalog, translator, log, config.default_locale);

    if let Ok(addr) = std::env::var("MCP_TCP_LISTEN_ADDR") {
        let listener = TcpListener::bind(&addr).await?;
        info!(listen_addr = %addr, "MCP server ready, serving on TCP");
        loop {
            let (stream, peer) = listener.accept().await?;
            let server = server.clone();
            tokio::spawn(async move {
                tracing::info!(peer = %peer, "MCP client connected");
                let service = server.serve(stream).await.inspect_err(|e| {
                    tracing::error!(error = %e, "MCP server error");
                })?;
                service.waiting().await?;
                tracing::info!(peer = %peer, "MCP client disconnected");
                Ok::<(), anyhow::Error>(())
            });
        }
    } else {
        info!("MCP server ready, serving on stdio");
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;
        service.waiting().await?;
        info!("MCP server shut down");
    }
    Ok(())
}

async fn build_translator(config: &Config) -> Result<TranslationAdapter, error::AppError> {
    let Some(translate_config) = TranslateClientConfig::from_env() else {
        info!("TRANSLATE_BASE_URL unset, translation disabled");
        return Ok(TranslationAdapter::disabled());
    };

    let client = TranslateClient::new(translate_config)?;
    info!(
        base_url = %client.config().base_url,
        timeout_ms = client.config().timeout.as_millis(),
        max_retries = client.config().max_retries,
        "translation client configured"
    );

    let redis_cache = RedisCache::new(config.redis_url.as_deref());
    if redis_cache.is_available().await {
        info!("redis connected");
    } else {
        info!("redis unavailable, running without translation cache");
    }
    let cache = Arc::new(TranslationCache::new(redis_cache));

    let translator = TranslationAdapter::new(Some(client), cache);
    info!(enabled = translator.is_enabled(), "translation adapter ready");
    Ok(translator)
}
