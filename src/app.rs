/*
 * Responsibility
 * - Load Config → build dependencies (verifier, ticket store) → assemble the Router
 * - Apply HTTP-level middleware
 * - Serve with axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware::{self, http::HttpPolicy};
use crate::repos::{Lister, MemoryTicketRepo};
use crate::services::auth::build_token_verifier;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,ticket_server=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash the whole process so it gets noticed.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config)?;
    let app = build_router(state, &HttpPolicy::from_config(&config));

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("binding {} failed", config.addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_state(config: &Config) -> Result<AppState> {
    // Missing or unusable key material is fatal here, never a per-request error.
    let auth = build_token_verifier(config).context("loading JWT public key failed")?;

    let repo = match &config.tickets_seed_path {
        Some(path) => MemoryTicketRepo::from_json_file(path)
            .with_context(|| format!("loading tickets from {} failed", path.display()))?,
        None => MemoryTicketRepo::default(),
    };
    if repo.is_empty() {
        tracing::warn!("ticket store is empty; GET / will answer []");
    } else {
        tracing::info!(tickets = repo.len(), "ticket store ready");
    }

    let lister: Arc<dyn Lister> = Arc::new(repo);

    Ok(AppState::new(auth, lister))
}

/// Route table, built once.
pub(crate) fn build_router(state: AppState, policy: &HttpPolicy) -> Router {
    let router = api::routes(state.clone()).with_state(state);

    middleware::http::apply(router, policy)
}
