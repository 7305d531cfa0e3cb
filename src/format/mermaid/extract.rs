// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pvbflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of pvbflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pulling Mermaid code out of free-form model replies.
//!
//! Models answer in Markdown; the diagram is the first ```` ```mermaid ```` fence. Validation
//! here is a cheap heuristic (keyword, connector, node token), not a parser: it only decides
//! whether a reply is worth replacing the current diagram with.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::DiagramKind;

const CONNECTORS: [&str; 5] = ["-->", "->", "---", "-.->", "==>"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MermaidSyntaxIssue {
    #[error("empty Mermaid code")]
    Empty,
    #[error("missing diagram type declaration (flowchart, graph, etc.)")]
    MissingDiagramType,
    #[error("no connections found in diagram")]
    NoConnections,
    #[error("no nodes defined in diagram")]
    NoNodes,
}

/// The first Mermaid fence found in a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MermaidBlock {
    code: String,
    validity: Result<DiagramKind, MermaidSyntaxIssue>,
}

impl MermaidBlock {
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn into_code(self) -> String {
        self.code
    }

    pub fn is_valid(&self) -> bool {
        self.validity.is_ok()
    }

    pub fn kind(&self) -> Option<DiagramKind> {
        self.validity.ok()
    }

    pub fn issue(&self) -> Option<MermaidSyntaxIssue> {
        self.validity.err()
    }
}

fn mermaid_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)```mermaid\r?\n(.*?)\r?\n```").expect("valid mermaid fence regex")
    })
}

fn diagram_keyword() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"\b(flowchart|graph|sequenceDiagram|classDiagram|stateDiagram(?:-v2)?|erDiagram|gantt|pie)\b",
        )
        .expect("valid diagram keyword regex")
    })
}

// `A[label]`, `A(label)`, `A{label}`, or a bare id glued to a connector (`A-->B`).
fn node_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[A-Za-z_]\w*[ \t]*(?:[\[\(\{]|--|==|-\.|->)").expect("valid node token regex")
    })
}

/// Extracts the first Mermaid fence from `text`, trimmed, with its heuristic validity.
pub fn extract_mermaid_block(text: &str) -> Option<MermaidBlock> {
    let captures = mermaid_fence().captures(text)?;
    let code = captures.get(1)?.as_str().trim().to_owned();
    let validity = validate_mermaid_syntax(&code);

    match &validity {
        Ok(kind) => tracing::debug!(%kind, code_len = code.len(), "extracted mermaid block"),
        Err(issue) => {
            tracing::debug!(%issue, code_len = code.len(), "extracted invalid mermaid block")
        }
    }

    Some(MermaidBlock { code, validity })
}

/// Returns every Mermaid fence body in order of appearance, trimmed.
pub fn extract_all_mermaid_blocks(text: &str) -> Vec<String> {
    mermaid_fence()
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .map(|body| body.as_str().trim().to_owned())
        .collect()
}

/// Removes all Mermaid fences, leaving the surrounding prose trimmed.
pub fn strip_mermaid_blocks(text: &str) -> String {
    mermaid_fence().replace_all(text, "").trim().to_owned()
}

pub fn validate_mermaid_syntax(code: &str) -> Result<DiagramKind, MermaidSyntaxIssue> {
    if code.trim().is_empty() {
        return Err(MermaidSyntaxIssue::Empty);
    }

    let kind = diagram_keyword()
        .find(code)
        .and_then(|keyword| DiagramKind::from_keyword(keyword.as_str()))
        .ok_or(MermaidSyntaxIssue::MissingDiagramType)?;

    if !CONNECTORS.iter().any(|connector| code.contains(connector)) {
        return Err(MermaidSyntaxIssue::NoConnections);
    }

    if !node_token().is_match(code) {
        return Err(MermaidSyntaxIssue::NoNodes);
    }

    Ok(kind)
}

/// Wraps code in a Mermaid fence.
pub fn fence_mermaid(code: &str) -> String {
    format!("```mermaid\n{code}\n```")
}

/// Formats a diagram for display, optionally preceded by explanatory prose.
pub fn format_for_display(code: &str, prose: Option<&str>) -> String {
    match prose {
        Some(prose) if !prose.is_empty() => format!("{prose}\n\n{}", fence_mermaid(code)),
        _ => fence_mermaid(code),
    }
}
