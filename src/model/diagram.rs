// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pvbflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of pvbflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The Mermaid diagram type announced by a diagram's keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagramKind {
    Flowchart,
    Graph,
    Sequence,
    Class,
    State,
    EntityRelationship,
    Gantt,
    Pie,
}

impl DiagramKind {
    pub const ALL: [Self; 8] = [
        Self::Flowchart,
        Self::Graph,
        Self::Sequence,
        Self::Class,
        Self::State,
        Self::EntityRelationship,
        Self::Gantt,
        Self::Pie,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Flowchart => "flowchart",
            Self::Graph => "graph",
            Self::Sequence => "sequenceDiagram",
            Self::Class => "classDiagram",
            Self::State => "stateDiagram",
            Self::EntityRelationship => "erDiagram",
            Self::Gantt => "gantt",
            Self::Pie => "pie",
        }
    }

    /// Maps a keyword token back to its kind (`stateDiagram-v2` included).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        if keyword == "stateDiagram-v2" {
            return Some(Self::State);
        }
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// The diagram currently shown in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    source: String,
    kind: DiagramKind,
    rev: u64,
}

impl Diagram {
    pub fn new(source: impl Into<String>, kind: DiagramKind) -> Self {
        Self { source: source.into(), kind, rev: 0 }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn kind(&self) -> DiagramKind {
        self.kind
    }

    /// Swaps in a refined source, returning the previous one.
    pub fn replace_source(&mut self, source: impl Into<String>, kind: DiagramKind) -> String {
        self.kind = kind;
        self.bump_rev();
        std::mem::replace(&mut self.source, source.into())
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    fn bump_rev(&mut self) {
        self.rev = self.rev.saturating_add(1);
    }
}
