// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pvbflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of pvbflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mermaid Live Editor share links.
//!
//! The editor restores its session from a `#pako:<fragment>` URL where the fragment is the
//! editor state serialized as JSON, zlib-compressed (header + Adler-32 trailer, not raw
//! deflate) and base64url-encoded without padding.

use std::io::Write;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};

use crate::format::mermaid::format_for_display;

pub const LIVE_EDITOR_BASE_URL: &str = "https://mermaid.live/edit";
pub const PAKO_MARKER: &str = "#pako:";

const DEFAULT_THEME: &str = "default";

#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error("failed to serialize editor state: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to compress editor state: {0}")]
    Compress(#[from] std::io::Error),
}

/// The state object the Live Editor rebuilds its session from.
///
/// Field order is the serialization order; keep it `code`, `mermaid`, `autoSync`,
/// `updateDiagram`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    pub code: String,
    pub mermaid: EditorMermaidConfig,
    pub auto_sync: bool,
    pub update_diagram: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorMermaidConfig {
    pub theme: String,
}

impl EditorState {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            mermaid: EditorMermaidConfig { theme: DEFAULT_THEME.to_owned() },
            auto_sync: true,
            update_diagram: true,
        }
    }
}

/// Encodes diagram text as a `pako` fragment.
///
/// Blank input returns an empty string: there is nothing to share.
pub fn encode_pako_fragment(diagram: &str) -> Result<String, ShareError> {
    if diagram.trim().is_empty() {
        return Ok(String::new());
    }

    let json = serde_json::to_vec(&EditorState::new(diagram))?;

    let mut encoder = ZlibEncoder::new(Vec::with_capacity(json.len()), Compression::best());
    encoder.write_all(&json)?;
    let compressed = encoder.finish()?;

    Ok(URL_SAFE_NO_PAD.encode(compressed))
}

/// Builds the full Live Editor URL, or `None` when the diagram is blank.
pub fn live_editor_url(diagram: &str) -> Result<Option<String>, ShareError> {
    let fragment = encode_pako_fragment(diagram)?;
    if fragment.is_empty() {
        return Ok(None);
    }

    let mut url =
        String::with_capacity(LIVE_EDITOR_BASE_URL.len() + PAKO_MARKER.len() + fragment.len());
    url.push_str(LIVE_EDITOR_BASE_URL);
    url.push_str(PAKO_MARKER);
    url.push_str(&fragment);
    tracing::debug!(
        diagram_chars = diagram.chars().count(),
        url_len = url.len(),
        "built live editor url"
    );
    Ok(Some(url))
}

/// Markdown for pasting into docs or tickets: an editor link above the fenced diagram.
pub fn share_markdown(diagram: &str) -> Result<Option<String>, ShareError> {
    let Some(url) = live_editor_url(diagram)? else {
        return Ok(None);
    };
    let link = format!("[Open in Mermaid Live Editor]({url})");
    Ok(Some(format_for_display(diagram.trim(), Some(&link))))
}

/// A share link plus the bits of the diagram shown next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLink {
    pub url: String,
    pub first_line: String,
    pub char_count: usize,
}

impl ShareLink {
    pub fn for_diagram(diagram: &str) -> Result<Option<Self>, ShareError> {
        let Some(url) = live_editor_url(diagram)? else {
            return Ok(None);
        };

        Ok(Some(Self {
            url,
            first_line: diagram.lines().next().unwrap_or_default().to_owned(),
            char_count: diagram.chars().count(),
        }))
    }
}
