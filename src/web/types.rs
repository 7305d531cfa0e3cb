// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pvbflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of pvbflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::model::{ChatTurn, DiagramKind, Session};
use crate::share::{ShareError, ShareLink};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

/// Everything the page needs to redraw itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub conversation: Vec<ChatTurn>,
    pub diagram: String,
    pub diagram_kind: Option<DiagramKind>,
    pub preview: String,
    pub board_summary: Option<String>,
    pub model: String,
    pub rev: u64,
}

impl SessionView {
    pub fn new(session: &Session, model: &str) -> Self {
        Self {
            conversation: session.conversation().to_vec(),
            diagram: session.diagram_source().to_owned(),
            diagram_kind: session.diagram().map(|diagram| diagram.kind()),
            preview: session.diagram_preview(),
            board_summary: session.board().map(|board| board.summary()),
            model: model.to_owned(),
            rev: session.rev(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareResponse {
    pub link: Option<ShareLink>,
    pub message: String,
}

impl ShareResponse {
    pub fn new(link: Option<ShareLink>) -> Self {
        let message = match &link {
            Some(link) => format!(
                "Mermaid Live Editor link ready ({}, {} characters).",
                link.first_line, link.char_count
            ),
            None => "No diagram to share yet. Send a Product Vision Board first.".to_owned(),
        };
        Self { link, message }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("missing x-pvbflow-client header")]
    MissingClientId,
    #[error("x-pvbflow-client must be 1 to 64 characters of A-Z, a-z, 0-9, '-' or '_'")]
    InvalidClientId,
    #[error("could not build the share link, please try again: {0}")]
    Share(#[from] ShareError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingClientId | Self::InvalidClientId => StatusCode::BAD_REQUEST,
            Self::Share(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(err = %self, "request failed");
        } else {
            tracing::debug!(err = %self, "request rejected");
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
