// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pvbflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of pvbflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Local web UI: one page plus a small JSON API. Every browser tab gets its own session.

mod sessions;
mod types;

use std::future::Future;
use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use crate::chat::{share_link, ChatEngine};
use crate::model::Session;

pub use sessions::{ClientId, SessionStore, CLIENT_HEADER, DEFAULT_MAX_SESSIONS};
pub use types::{ApiError, ErrorBody, MessageRequest, SessionView, ShareResponse};

const INDEX_HTML: &str = include_str!("index.html");

#[derive(Debug, Clone)]
pub struct AppState {
    sessions: Arc<SessionStore>,
    engine: Arc<ChatEngine>,
}

impl AppState {
    pub fn new(engine: ChatEngine, sessions: SessionStore) -> Self {
        Self { sessions: Arc::new(sessions), engine: Arc::new(engine) }
    }

    pub fn session(&self, client: &ClientId) -> Arc<Mutex<Session>> {
        self.sessions.session(client)
    }

    fn view(&self, session: &Session) -> SessionView {
        SessionView::new(session, self.engine.model_name())
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/session", get(session_view))
        .route("/api/message", post(send_message))
        .route("/api/clear", post(clear_session))
        .route("/api/share", post(share))
        .with_state(state)
}

/// Serves the UI on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "web ui listening");
    }
    axum::serve(listener, router(state)).with_graceful_shutdown(shutdown).await
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn session_view(State(state): State<AppState>, client: ClientId) -> Json<SessionView> {
    let session = state.session(&client);
    let session = session.lock().await;
    Json(state.view(&session))
}

async fn send_message(
    State(state): State<AppState>,
    client: ClientId,
    Json(request): Json<MessageRequest>,
) -> Json<SessionView> {
    let session = state.session(&client);
    // Held across the model call: a client's turns apply one at a time.
    let mut session = session.lock().await;
    let outcome = state.engine.handle_message(&mut session, &request.message).await;
    tracing::debug!(client = client.as_str(), ?outcome, rev = session.rev(), "message handled");
    Json(state.view(&session))
}

async fn clear_session(State(state): State<AppState>, client: ClientId) -> Json<SessionView> {
    let session = state.session(&client);
    let mut session = session.lock().await;
    state.engine.clear(&mut session);
    Json(state.view(&session))
}

async fn share(
    State(state): State<AppState>,
    client: ClientId,
) -> Result<Json<ShareResponse>, ApiError> {
    let session = state.session(&client);
    let session = session.lock().await;
    let link = share_link(&session)?;
    if let Some(link) = &link {
        tracing::info!(url_len = link.url.len(), chars = link.char_count, "share link generated");
    }
    Ok(Json(ShareResponse::new(link)))
}
