// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pvbflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of pvbflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use async_trait::async_trait;
use ::llm::builder::{LLMBackend, LLMBuilder};
use ::llm::chat::ChatMessage;
use ::llm::LLMProvider;

use super::{ChatModel, ModelError, ModelSettings, Provider};
use crate::model::{ChatTurn, Role};
use crate::prompt::SYSTEM_PROMPT;

fn backend(provider: Provider) -> LLMBackend {
    match provider {
        Provider::Ollama => LLMBackend::Ollama,
        Provider::OpenAi => LLMBackend::OpenAI,
        Provider::Anthropic => LLMBackend::Anthropic,
        Provider::Google => LLMBackend::Google,
        Provider::Groq => LLMBackend::Groq,
        Provider::Mistral => LLMBackend::Mistral,
        Provider::DeepSeek => LLMBackend::DeepSeek,
    }
}

fn to_chat_message(turn: &ChatTurn) -> ChatMessage {
    match turn.role {
        Role::User => ChatMessage::user().content(&turn.content).build(),
        Role::Assistant => ChatMessage::assistant().content(&turn.content).build(),
    }
}

/// A model reached through one of the `llm` crate providers.
pub struct ProviderModel {
    label: String,
    client: Box<dyn LLMProvider>,
}

impl ProviderModel {
    pub fn build(provider: Provider, settings: &ModelSettings) -> Result<Self, ModelError> {
        let model = settings.model_for(provider);

        let mut builder = LLMBuilder::new()
            .backend(backend(provider))
            .model(&model)
            .system(SYSTEM_PROMPT)
            .max_tokens(settings.max_tokens)
            .temperature(settings.temperature);

        if let Some(api_key) = settings.api_key() {
            builder = builder.api_key(api_key);
        }
        if let Some(base_url) = settings.base_url() {
            builder = builder.base_url(base_url);
        }

        let client = builder
            .build()
            .map_err(|err| ModelError::Build { provider, message: err.to_string() })?;

        Ok(Self { label: format!("{provider}/{model}"), client })
    }
}

#[async_trait]
impl ChatModel for ProviderModel {
    fn name(&self) -> &str {
        &self.label
    }

    async fn respond(&self, conversation: &[ChatTurn]) -> Result<String, ModelError> {
        let messages = conversation.iter().map(to_chat_message).collect::<Vec<_>>();
        tracing::info!(backend = %self.label, turns = messages.len(), "sending conversation");

        let response = self
            .client
            .chat(&messages)
            .await
            .map_err(|err| ModelError::Request(err.to_string()))?;

        match response.text() {
            Some(text) if !text.trim().is_empty() => Ok(text.trim().to_owned()),
            _ => Err(ModelError::EmptyResponse),
        }
    }
}
