// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pvbflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of pvbflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Conversation engine.
//!
//! One user message becomes one model call. The transcript keeps what the user typed (or a short
//! stand-in for a pasted board) while the model receives the full prompt built from the board and
//! the current diagram.

use std::sync::Arc;

use crate::format::mermaid::{
    extract_all_mermaid_blocks, extract_mermaid_block, strip_mermaid_blocks,
};
use crate::llm::ChatModel;
use crate::model::{is_vision_board_like, ChatTurn, Session, VisionBoard};
use crate::prompt::{initial_prompt, refinement_prompt};
use crate::share::{ShareError, ShareLink};

pub const BOARD_RECEIVED_MESSAGE: &str =
    "Here's my Product Vision Board. Please generate a Mermaid diagram.";
pub const DIAGRAM_ONLY_REPLY: &str = "Diagram generated. See the preview pane.";

/// What a call to [`ChatEngine::handle_message`] did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Blank input; the session was not touched.
    Ignored,
    Replied { diagram_updated: bool },
    /// The model call failed; the error is in the transcript and the diagram is unchanged.
    Failed { error: String },
}

pub struct ChatEngine {
    model: Arc<dyn ChatModel>,
}

impl std::fmt::Debug for ChatEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatEngine").field("model", &self.model.name()).finish()
    }
}

impl ChatEngine {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub async fn handle_message(&self, session: &mut Session, input: &str) -> TurnOutcome {
        if input.trim().is_empty() {
            return TurnOutcome::Ignored;
        }

        let (prompt, display) = match session.board() {
            Some(board) => {
                (refinement_prompt(board, session.diagram_source(), input), input.to_owned())
            }
            None => match VisionBoard::parse(input) {
                Ok(board) => {
                    tracing::info!(
                        summary = %board.summary(),
                        sections = board.sections().len(),
                        "received product vision board"
                    );
                    let prompt = initial_prompt(&board);
                    session.set_board(board);
                    (prompt, BOARD_RECEIVED_MESSAGE.to_owned())
                }
                Err(err) => {
                    if is_vision_board_like(input) {
                        tracing::warn!(%err, "message looks like a vision board but is invalid");
                    }
                    (input.to_owned(), input.to_owned())
                }
            },
        };

        let mut request = session.conversation().to_vec();
        request.push(ChatTurn::user(prompt));
        session.push_turn(ChatTurn::user(display));

        match self.model.respond(&request).await {
            Ok(reply) => {
                let fences = extract_all_mermaid_blocks(&reply).len();
                if fences > 1 {
                    tracing::warn!(fences, "reply holds several diagrams, using the first");
                }
                let diagram_updated = match extract_mermaid_block(&reply) {
                    Some(block) => match block.kind() {
                        Some(kind) => {
                            session.set_diagram(block.into_code(), kind);
                            true
                        }
                        None => {
                            if let Some(issue) = block.issue() {
                                tracing::warn!(%issue, "invalid diagram in reply, keeping current");
                            }
                            false
                        }
                    },
                    None => false,
                };

                let prose = strip_mermaid_blocks(&reply);
                let shown = if prose.is_empty() { DIAGRAM_ONLY_REPLY.to_owned() } else { prose };
                session.push_turn(ChatTurn::assistant(shown));

                tracing::debug!(
                    model = self.model.name(),
                    diagram_updated,
                    reply_len = reply.len(),
                    "chat turn complete"
                );
                TurnOutcome::Replied { diagram_updated }
            }
            Err(err) => {
                tracing::error!(model = self.model.name(), %err, "model call failed");
                let error = err.to_string();
                session.push_turn(ChatTurn::assistant(format!("Error generating response: {error}")));
                TurnOutcome::Failed { error }
            }
        }
    }

    pub fn clear(&self, session: &mut Session) {
        session.clear();
        tracing::debug!(rev = session.rev(), "session cleared");
    }
}

/// Live Editor link for the session's current diagram, `None` before the first diagram.
pub fn share_link(session: &Session) -> Result<Option<ShareLink>, ShareError> {
    ShareLink::for_diagram(session.diagram_source())
}
