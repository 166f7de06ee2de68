//! Landing page and demo widget handlers.
//!
//! The HTML flow posts forms and is redirected back to the widget section;
//! the `/api/demo` mirror returns the widget snapshot as JSON.

use axum::{
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::landing::render_page;
use crate::state::AppState;
use crate::widget::session::Session;
use crate::widget::{DemoWidget, WidgetSnapshot};

const WIDGET_ANCHOR: &str = "/#get-started";

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub job_id: String,
}

#[derive(Debug)]
pub enum DemoAction {
    Submit { content: String },
    Select { job_id: String },
    CheckScore,
}

async fn apply(widget: &mut DemoWidget, action: DemoAction) {
    // Workflow errors are stored on the widget and rendered from there.
    match action {
        DemoAction::Submit { content } => {
            widget.set_content(content);
            let _ = widget.submit_resume().await;
        }
        DemoAction::Select { job_id } => {
            widget.select_job(&job_id);
        }
        DemoAction::CheckScore => {
            let _ = widget.check_ats_score().await;
        }
    }
}

/// What readers see while `action` holds the widget.
fn in_flight_view(mut snapshot: WidgetSnapshot, action: &DemoAction) -> WidgetSnapshot {
    match action {
        DemoAction::Submit { content } => {
            snapshot.content = content.clone();
            snapshot.loading = true;
            snapshot.error = None;
        }
        DemoAction::CheckScore
            if snapshot.resume_id.is_some() && snapshot.selected_job_id.is_some() =>
        {
            snapshot.loading = true;
            snapshot.error = None;
        }
        _ => {}
    }
    snapshot
}

/// Runs `action` against the session's widget.
///
/// A widget already held by another request is left alone (`AppError::Busy`).
/// The action runs on its own task so it completes, and clears the loading
/// flag, even if the client goes away.
async fn perform(session: &Session, action: DemoAction) -> Result<WidgetSnapshot, AppError> {
    let mut widget = session
        .widget
        .clone()
        .try_lock_owned()
        .map_err(|_| AppError::Busy)?;

    debug!("Session {}: {:?}", session.id, action);

    session.publish(in_flight_view(widget.snapshot(), &action));
    let published = session.publisher();

    let task = tokio::spawn(async move {
        apply(&mut widget, action).await;
        let snapshot = widget.snapshot();
        published.send_replace(snapshot.clone());
        snapshot
    });

    task.await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Demo workflow task failed: {e}")))
}

/// Applies a form action and redirects back to the widget.
/// A busy session ignores the action, as the disabled submit button does.
async fn perform_and_redirect(
    state: &AppState,
    headers: &HeaderMap,
    action: DemoAction,
) -> Result<Response, AppError> {
    let session = state.sessions.resolve(headers).await;
    match perform(&session, action).await {
        Ok(_) => {}
        Err(AppError::Busy) => info!("Session {} busy, ignoring action", session.id),
        Err(e) => return Err(e),
    }
    Ok((
        AppendHeaders(session.set_cookie_header()),
        Redirect::to(WIDGET_ANCHOR),
    )
        .into_response())
}

async fn perform_json(
    state: &AppState,
    headers: &HeaderMap,
    action: DemoAction,
) -> Result<Response, AppError> {
    let session = state.sessions.resolve(headers).await;
    let snapshot = perform(&session, action).await?;
    Ok((AppendHeaders(session.set_cookie_header()), Json(snapshot)).into_response())
}

/// GET /
pub async fn handle_landing(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.sessions.resolve(&headers).await;
    let snapshot = session.snapshot();
    (
        AppendHeaders(session.set_cookie_header()),
        Html(render_page(&snapshot)),
    )
        .into_response()
}

/// POST /demo/upload
pub async fn handle_upload_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(req): Form<UploadRequest>,
) -> Result<Response, AppError> {
    perform_and_redirect(&state, &headers, DemoAction::Submit { content: req.content }).await
}

/// POST /demo/select
pub async fn handle_select_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(req): Form<SelectRequest>,
) -> Result<Response, AppError> {
    perform_and_redirect(&state, &headers, DemoAction::Select { job_id: req.job_id }).await
}

/// POST /demo/ats
pub async fn handle_ats_form(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    perform_and_redirect(&state, &headers, DemoAction::CheckScore).await
}

/// GET /api/demo
pub async fn handle_get_snapshot(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.sessions.resolve(&headers).await;
    let snapshot = session.snapshot();
    (AppendHeaders(session.set_cookie_header()), Json(snapshot)).into_response()
}

/// POST /api/demo/upload
pub async fn handle_upload_json(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<UploadRequest>,
) -> Result<Response, AppError> {
    perform_json(&state, &headers, DemoAction::Submit { content: req.content }).await
}

/// POST /api/demo/select
pub async fn handle_select_json(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SelectRequest>,
) -> Result<Response, AppError> {
    perform_json(&state, &headers, DemoAction::Select { job_id: req.job_id }).await
}

/// POST /api/demo/ats
pub async fn handle_ats_json(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    perform_json(&state, &headers, DemoAction::CheckScore).await
}
