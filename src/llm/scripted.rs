// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pvbflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of pvbflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::{ChatModel, ModelError};
use crate::model::ChatTurn;

const DEMO_INITIAL_REPLY: &str = r#"Here is the operational process inferred from your board.

```mermaid
flowchart TD
    subgraph Legend
        L1[🖥️ System]
        L2[🤖 AI]
        L3[👤 Human]
    end

    A[/"📊 Board input"/] --> B["🤖 Analyse needs"]
    B --> C{{"Enough detail?"}}
    C -->|"No"| D["👤 Product owner<br/>completes the board"]
    D --> B
    C -->|"Yes"| E["🖥️ Build backlog"]
    E --> F[/"🎯 Objectives tracked"/]

    style A fill:#4A90D9,stroke:#2E5F8A,color:#fff
    style B fill:#50C878,stroke:#2E8B57,color:#fff
    style D fill:#FF9F43,stroke:#E67E22,color:#fff
    style E fill:#4A90D9,stroke:#2E5F8A,color:#fff
    style F fill:#E74C3C,color:#fff
```"#;

const DEMO_REFINED_REPLY: &str = r#"```mermaid
flowchart LR
    A[/"📊 Board input"/] --> B["🤖 Analyse needs"]
    B --> C{{"Enough detail?"}}
    C -->|"No"| D["👤 Product owner"]
    D --> B
    C -->|"Yes"| E["🖥️ Build backlog"]
    E --> F[/"🎯 Objectives tracked"/]

    style B fill:#50C878,stroke:#2E8B57,color:#fff
    style D fill:#FF9F43,stroke:#E67E22,color:#fff
```"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedReply {
    Text(String),
    Fail(String),
}

/// Replays canned replies in order, wrapping around at the end.
///
/// Used for `--demo` and in tests; every conversation it receives is kept for inspection.
#[derive(Debug)]
pub struct ScriptedModel {
    label: String,
    replies: Vec<ScriptedReply>,
    next: AtomicUsize,
    received: Mutex<Vec<Vec<ChatTurn>>>,
}

impl ScriptedModel {
    pub fn new(replies: impl IntoIterator<Item = ScriptedReply>) -> Self {
        Self {
            label: "scripted".to_owned(),
            replies: replies.into_iter().collect(),
            next: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn with_texts<S: Into<String>>(texts: impl IntoIterator<Item = S>) -> Self {
        Self::new(texts.into_iter().map(|text| ScriptedReply::Text(text.into())))
    }

    /// Offline model: a first diagram, then a left-to-right refinement.
    pub fn demo() -> Self {
        let mut model = Self::with_texts([DEMO_INITIAL_REPLY, DEMO_REFINED_REPLY]);
        model.label = "demo".to_owned();
        model
    }

    pub fn received(&self) -> Vec<Vec<ChatTurn>> {
        self.received.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    fn name(&self) -> &str {
        &self.label
    }

    async fn respond(&self, conversation: &[ChatTurn]) -> Result<String, ModelError> {
        self.received.lock().unwrap_or_else(PoisonError::into_inner).push(conversation.to_vec());

        if self.replies.is_empty() {
            return Err(ModelError::EmptyResponse);
        }

        let index = self.next.fetch_add(1, Ordering::Relaxed) % self.replies.len();
        match &self.replies[index] {
            ScriptedReply::Text(text) => Ok(text.clone()),
            ScriptedReply::Fail(message) => Err(ModelError::Request(message.clone())),
        }
    }
}
