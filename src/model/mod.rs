// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pvbflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of pvbflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A session holds the visible conversation, the Product Vision Board it started from, and the
//! diagram being refined.

pub mod chat;
pub mod diagram;
pub mod session;
pub mod vision_board;

pub use chat::{ChatTurn, Role};
pub use diagram::{Diagram, DiagramKind};
pub use session::{Session, EMPTY_PREVIEW};
pub use vision_board::{is_vision_board_like, BoardSection, VisionBoard, VisionBoardError};
