mod config;
mod db;
mod entities;
mod error;
mod forms;
mod models;
mod panel;
mod registry;
mod repositories;
mod routes;
mod schema;
mod seed;
mod table;
mod templates;
#[cfg(test)]
mod testing;
mod viewmodel;
mod window;

use std::sync::Arc;

use anyhow::Context as _;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::{
    config::Config,
    db::{ConnectionProvider, DatabaseProvider},
    registry::Context,
    routes::AppState,
    window::MainWindow,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,festival=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;
    info!(settings = %config.settings_path.display(), "settings loaded");

    let connections: Arc<dyn ConnectionProvider> =
        Arc::new(DatabaseProvider::new(config.settings.database.url()));
    let schema =
        db::prepare(connections.as_ref(), &config.settings).await.context("preparing database")?;

    let context = Context { connections, schema };
    if config.settings.database.seed {
        seed::run(&context).await.context("seeding database")?;
    }

    let window = MainWindow::new(context);
    let state = Arc::new(AppState::new(window));

    let app = Router::new()
        .route("/", get(routes::index))
        .route("/open/{slug}", post(routes::open))
        .route("/back", post(routes::back))
        .route("/reload", post(routes::reload))
        .route("/new", get(routes::new_form).post(routes::create))
        .route("/edit/{row}", get(routes::edit_form))
        .route("/edit", post(routes::update))
        .route("/toggle/{row}", post(routes::toggle))
        .route("/delete", post(routes::delete))
        .route("/delete/confirm", post(routes::confirm_delete))
        .route("/delete/cancel", post(routes::cancel_delete))
        .route("/detail/{row}", get(routes::detail))
        .route("/quit", post(routes::quit))
        .with_state(state.clone())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal(state)).await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal(state: Arc<AppState>) {
    tokio::select! {
        _ = state.shutdown.notified() => {},
        result = tokio::signal::ctrl_c() => {
            if let Err(err) = result {
                warn!(error = %err, "could not listen for ctrl-c");
                std::future::pending::<()>().await;
            }
        },
    }
}
