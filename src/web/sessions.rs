// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pvbflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of pvbflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Per-browser sessions.
//!
//! The page generates a random client id once per tab and sends it with every API call. Each id
//! owns its own [`Session`]; a request only locks the session of its own client.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError};

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tokio::sync::Mutex;

use super::types::ApiError;
use crate::model::Session;

pub const CLIENT_HEADER: &str = "x-pvbflow-client";
pub const DEFAULT_MAX_SESSIONS: usize = 256;

const MAX_CLIENT_ID_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(String);

impl ClientId {
    /// Accepts 1 to 64 characters of `[A-Za-z0-9_-]`.
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        let valid = !raw.is_empty()
            && raw.len() <= MAX_CLIENT_ID_LEN
            && raw.bytes().all(|byte| byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_'));
        if valid {
            Ok(Self(raw.to_owned()))
        } else {
            Err(ApiError::InvalidClientId)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ClientId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts.headers.get(CLIENT_HEADER).ok_or(ApiError::MissingClientId)?;
        let raw = value.to_str().map_err(|_| ApiError::InvalidClientId)?;
        Self::parse(raw)
    }
}

#[derive(Debug)]
struct Entry {
    session: Arc<Mutex<Session>>,
    last_seen: u64,
}

#[derive(Debug, Default)]
struct Entries {
    by_client: HashMap<ClientId, Entry>,
    clock: u64,
}

/// Sessions keyed by client id, capped at `capacity` by evicting the least recently used one.
#[derive(Debug)]
pub struct SessionStore {
    entries: std::sync::Mutex<Entries>,
    capacity: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn new(capacity: usize) -> Self {
        Self { entries: std::sync::Mutex::new(Entries::default()), capacity: capacity.max(1) }
    }

    /// The session for `client`, created empty on first use.
    pub fn session(&self, client: &ClientId) -> Arc<Mutex<Session>> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.clock = entries.clock.wrapping_add(1);
        let now = entries.clock;

        if let Some(entry) = entries.by_client.get_mut(client) {
            entry.last_seen = now;
            return entry.session.clone();
        }

        if entries.by_client.len() >= self.capacity {
            let oldest = entries
                .by_client
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(id, _)| id.clone());
            if let Some(oldest) = oldest {
                entries.by_client.remove(&oldest);
                tracing::info!(client = oldest.as_str(), "evicted least recently used session");
            }
        }

        let session = Arc::new(Mutex::new(Session::new()));
        entries.by_client.insert(client.clone(), Entry { session: session.clone(), last_seen: now });
        tracing::debug!(
            client = client.as_str(),
            sessions = entries.by_client.len(),
            "new session"
        );
        session
    }
}
