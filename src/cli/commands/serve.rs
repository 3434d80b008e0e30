//! Implementation of the `gh-issues-local serve` command.

use anyhow::{anyhow, Context, Result};
use clap::Args;
use std::path::Path;
use tracing::{info, warn};

use crate::adapters::http::{AppState, AuthSettings, HttpServer, RouterOptions};
use crate::adapters::storage::create_storage;
use crate::domain::models::Config;
use crate::infrastructure::auth::{auth_required, ensure_token};
use crate::infrastructure::config::{ConfigLoader, ConfigSource};
use crate::infrastructure::logging::LoggerImpl;
use crate::services::IssueStore;

/// `serve` flags.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind (default 127.0.0.1)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (default 8000)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Disable the bearer-token gate on non-loopback binds
    #[arg(long)]
    pub no_auth: bool,
}

impl ServeArgs {
    /// Apply CLI flags on top of the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

/// Decide whether the gate is on and with which token.
pub fn auth_settings(config: &Config, no_auth: bool) -> Result<AuthSettings> {
    if !auth_required(&config.server.host, no_auth, config.auth.required) {
        return Ok(AuthSettings::open());
    }
    let token = match &config.auth.token {
        Some(token) => token.clone(),
        None => ensure_token(&config.token_file())?,
    };
    Ok(AuthSettings::with_token(token))
}

/// Load config, start logging, then serve until Ctrl-C.
pub async fn execute(args: ServeArgs, config_path: Option<&Path>) -> Result<()> {
    let loaded = ConfigLoader::load(config_path)?;
    let mut config = loaded.config;
    args.apply(&mut config);
    ConfigLoader::validate(&config)?;

    let _logger = LoggerImpl::init(&config.logging).context("Failed to initialize logging")?;
    match &loaded.source {
        ConfigSource::File(path) => info!(path = %path.display(), "loaded config file"),
        ConfigSource::MissingFile(path) => {
            warn!(path = %path.display(), "config file not found; using defaults");
        }
        ConfigSource::Defaults => {}
    }

    let auth = auth_settings(&config, args.no_auth)?;
    if auth.required {
        info!(token_file = %config.token_file().display(), "bearer token required");
    }

    let storage = create_storage(&config);
    info!(
        provider = ?config.storage.provider,
        root = %config.storage_root().display(),
        "storage ready"
    );

    let state = AppState::new(IssueStore::new(storage), auth)
        .with_base_url(config.server.base_url.clone());
    let options = RouterOptions {
        enable_cors: config.server.enable_cors,
        frontend_dir: config.frontend_dir.clone(),
    };

    HttpServer::new(config.server.clone(), options, state)
        .serve_with_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow!(e))
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
