// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pvbflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of pvbflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Language-model back ends.
//!
//! The conversation engine only sees [`ChatModel`]; [`select_model`] picks the implementation
//! from configuration (a hosted or local provider, or the offline scripted model).

mod provider;
mod scripted;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;

use crate::model::ChatTurn;

pub use provider::ProviderModel;
pub use scripted::{ScriptedModel, ScriptedReply};

pub const DEFAULT_MAX_TOKENS: u32 = 4000;
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("provider '{provider}' needs an API key (--api-key or PVBFLOW_API_KEY)")]
    MissingApiKey { provider: Provider },
    #[error("failed to build {provider} client: {message}")]
    Build { provider: Provider, message: String },
    #[error("chat request failed: {0}")]
    Request(String),
    #[error("model returned no text")]
    EmptyResponse,
}

/// Something that answers a conversation with one assistant message.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Human-readable back end label for logs.
    fn name(&self) -> &str;

    async fn respond(&self, conversation: &[ChatTurn]) -> Result<String, ModelError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Ollama,
    OpenAi,
    Anthropic,
    Google,
    Groq,
    Mistral,
    DeepSeek,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
            Self::Groq => "groq",
            Self::Mistral => "mistral",
            Self::DeepSeek => "deepseek",
        }
    }

    /// Local providers run without credentials.
    pub fn needs_api_key(self) -> bool {
        !matches!(self, Self::Ollama)
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Self::Ollama => "mistral-small",
            Self::OpenAi => "gpt-4o-mini",
            Self::Anthropic => "claude-3-5-haiku-latest",
            Self::Google => "gemini-1.5-flash",
            Self::Groq => "llama-3.1-8b-instant",
            Self::Mistral => "mistral-small-latest",
            Self::DeepSeek => "deepseek-chat",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "openai" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            "google" => Ok(Self::Google),
            "groq" => Ok(Self::Groq),
            "mistral" => Ok(Self::Mistral),
            "deepseek" => Ok(Self::DeepSeek),
            other => Err(ModelError::UnknownProvider(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub provider: String,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub demo: bool,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            provider: Provider::Ollama.as_str().to_owned(),
            model: None,
            api_key: None,
            base_url: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            demo: false,
        }
    }
}

impl ModelSettings {
    /// Configured model name, or the provider default.
    pub fn model_for(&self, provider: Provider) -> String {
        non_blank(self.model.as_deref()).unwrap_or(provider.default_model()).to_owned()
    }

    pub fn api_key(&self) -> Option<&str> {
        non_blank(self.api_key.as_deref())
    }

    pub fn base_url(&self) -> Option<&str> {
        non_blank(self.base_url.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Picks the back end for `settings`.
///
/// Demo mode wins over any provider. Hosted providers fail fast without an API key instead of
/// failing on the first chat request.
pub fn select_model(settings: &ModelSettings) -> Result<Arc<dyn ChatModel>, ModelError> {
    if settings.demo {
        tracing::info!("using offline demo model");
        return Ok(Arc::new(ScriptedModel::demo()));
    }

    let provider: Provider = settings.provider.parse()?;
    if provider.needs_api_key() && settings.api_key().is_none() {
        return Err(ModelError::MissingApiKey { provider });
    }

    let model = ProviderModel::build(provider, settings)?;
    tracing::info!(backend = model.name(), "model back end ready");
    Ok(Arc::new(model))
}
