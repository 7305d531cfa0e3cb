// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pvbflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of pvbflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::chat::ChatTurn;
use super::diagram::{Diagram, DiagramKind};
use super::vision_board::VisionBoard;
use crate::format::mermaid::fence_mermaid;

pub const EMPTY_PREVIEW: &str = "Diagram will appear here...";

/// Everything one user works on: the visible transcript, the board, and the current diagram.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    conversation: Vec<ChatTurn>,
    board: Option<VisionBoard>,
    diagram: Option<Diagram>,
    rev: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversation(&self) -> &[ChatTurn] {
        &self.conversation
    }

    pub fn push_turn(&mut self, turn: ChatTurn) {
        self.conversation.push(turn);
        self.bump_rev();
    }

    pub fn board(&self) -> Option<&VisionBoard> {
        self.board.as_ref()
    }

    pub fn set_board(&mut self, board: VisionBoard) {
        self.board = Some(board);
        self.bump_rev();
    }

    pub fn diagram(&self) -> Option<&Diagram> {
        self.diagram.as_ref()
    }

    /// Current diagram source, empty when nothing has been generated yet.
    pub fn diagram_source(&self) -> &str {
        self.diagram.as_ref().map(Diagram::source).unwrap_or_default()
    }

    pub fn set_diagram(&mut self, source: impl Into<String>, kind: DiagramKind) {
        match self.diagram.as_mut() {
            Some(diagram) => {
                diagram.replace_source(source, kind);
            }
            None => self.diagram = Some(Diagram::new(source, kind)),
        }
        self.bump_rev();
    }

    /// Markdown shown in the preview pane.
    pub fn diagram_preview(&self) -> String {
        match self.diagram.as_ref() {
            Some(diagram) => fence_mermaid(diagram.source()),
            None => EMPTY_PREVIEW.to_owned(),
        }
    }

    pub fn clear(&mut self) {
        self.conversation.clear();
        self.board = None;
        self.diagram = None;
        self.bump_rev();
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    fn bump_rev(&mut self) {
        self.rev = self.rev.wrapping_add(1);
    }
}
