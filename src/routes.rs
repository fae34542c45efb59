use std::sync::Arc;

use axum::{
    extract::{Form, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tokio::sync::{Mutex, Notify};
use tracing::info;

use crate::{
    error::AppResult,
    forms::FormValues,
    registry::EntityKind,
    templates::{self, Banner, FormMode},
    window::{MainWindow, View},
};

pub struct AppState {
    pub window: Mutex<MainWindow>,
    /// Signalled by `/quit`; the server drains and exits.
    pub shutdown: Notify,
}

impl AppState {
    pub fn new(window: MainWindow) -> Self {
        Self { window: Mutex::new(window), shutdown: Notify::new() }
    }
}

type Shared = State<Arc<AppState>>;

fn home() -> Redirect {
    Redirect::to("/")
}

pub async fn index(State(state): Shared) -> Html<String> {
    let mut window = state.window.lock().await;
    let error = window.take_error();
    let banner =
        Banner { status: window.status(), error, pending_delete: window.pending_delete() };

    let body = match window.view() {
        View::Menu => templates::menu_page(&banner),
        View::Table(panel) => templates::table_page(panel.as_ref(), &banner),
    };
    Html(body)
}

pub async fn open(State(state): Shared, Path(slug): Path<String>) -> AppResult<Redirect> {
    let kind = EntityKind::from_slug(&slug)
        .ok_or_else(|| anyhow::anyhow!("there is no table called {slug:?}"))?;
    state.window.lock().await.open(kind).await;
    Ok(home())
}

pub async fn back(State(state): Shared) -> Redirect {
    state.window.lock().await.back();
    home()
}

pub async fn reload(State(state): Shared) -> Redirect {
    state.window.lock().await.reload().await;
    home()
}

pub async fn new_form(State(state): Shared) -> Response {
    let window = state.window.lock().await;
    let View::Table(panel) = window.view() else {
        return home().into_response();
    };
    let fields = panel.form_fields();
    let values = FormValues::default();
    Html(templates::form_page(FormMode::New, panel.kind().label(), &fields, &values, None))
        .into_response()
}

/// Invalid input re-renders the form with what was typed; anything else goes
/// back to the table, where a database failure shows up as the error banner.
pub async fn create(State(state): Shared, Form(values): Form<FormValues>) -> Response {
    let mut window = state.window.lock().await;
    let Err(err) = window.create(&values).await else {
        return home().into_response();
    };
    let View::Table(panel) = window.view() else {
        return home().into_response();
    };
    let fields = panel.form_fields();
    let message = err.to_string();
    let label = panel.kind().label();
    Html(templates::form_page(FormMode::New, label, &fields, &values, Some(&message)))
        .into_response()
}

/// A row that cannot be read any more sends the user back to the table with
/// the error banner.
pub async fn edit_form(State(state): Shared, Path(row): Path<usize>) -> Response {
    let mut window = state.window.lock().await;
    let Some(values) = window.edit(row).await else {
        return home().into_response();
    };
    let View::Table(panel) = window.view() else {
        return home().into_response();
    };
    let fields = panel.form_fields();
    let mode = FormMode::Edit(panel.locked_fields());
    Html(templates::form_page(mode, panel.kind().label(), &fields, &values, None)).into_response()
}

pub async fn update(State(state): Shared, Form(values): Form<FormValues>) -> Response {
    let mut window = state.window.lock().await;
    let Err(err) = window.save(&values).await else {
        return home().into_response();
    };
    let View::Table(panel) = window.view() else {
        return home().into_response();
    };
    let fields = panel.form_fields();
    let message = err.to_string();
    let mode = FormMode::Edit(panel.locked_fields());
    Html(templates::form_page(mode, panel.kind().label(), &fields, &values, Some(&message)))
        .into_response()
}

pub async fn toggle(State(state): Shared, Path(row): Path<usize>) -> Redirect {
    state.window.lock().await.toggle(row);
    home()
}

pub async fn delete(State(state): Shared) -> Redirect {
    state.window.lock().await.request_delete();
    home()
}

pub async fn confirm_delete(State(state): Shared) -> Redirect {
    state.window.lock().await.confirm_delete(true).await;
    home()
}

pub async fn cancel_delete(State(state): Shared) -> Redirect {
    state.window.lock().await.confirm_delete(false).await;
    home()
}

pub async fn detail(State(state): Shared, Path(row): Path<usize>) -> Response {
    match state.window.lock().await.detail(row) {
        Some(detail) => Html(templates::detail_page(&detail)).into_response(),
        None => home().into_response(),
    }
}

pub async fn quit(State(state): Shared) -> Html<String> {
    info!("quit requested");
    state.shutdown.notify_one();
    Html(templates::goodbye_page())
}
