// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pvbflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of pvbflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mermaid extraction, heuristic validation, and display formatting.

pub mod extract;

pub use extract::{
    extract_all_mermaid_blocks, extract_mermaid_block, fence_mermaid, format_for_display,
    strip_mermaid_blocks, validate_mermaid_syntax, MermaidBlock, MermaidSyntaxIssue,
};
