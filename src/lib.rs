// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pvbflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of pvbflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! pvbflow: turn a Product Vision Board into a Mermaid process diagram, refine it by chat, and
//! share it as a Mermaid Live Editor link.

pub mod chat;
pub mod config;
pub mod format;
pub mod llm;
pub mod model;
pub mod prompt;
pub mod share;
pub mod web;
