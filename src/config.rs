// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pvbflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of pvbflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Command line and environment configuration.
//!
//! Every option can also be set through a `PVBFLOW_*` environment variable; flags win.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::llm::{ModelSettings, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::web::DEFAULT_MAX_SESSIONS;

pub const DEFAULT_PORT: u16 = 7860;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "pvbflow", version)]
#[command(about = "Turn a Product Vision Board into a Mermaid process diagram by chatting with an LLM")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Port for the web UI (0 picks a free one)
    #[arg(long, env = "PVBFLOW_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Listen on all interfaces instead of localhost only
    #[arg(long, env = "PVBFLOW_SHARE")]
    pub share: bool,

    /// Browser sessions kept in memory; the least recently used one is dropped beyond this
    #[arg(long, env = "PVBFLOW_MAX_SESSIONS", default_value_t = DEFAULT_MAX_SESSIONS)]
    pub max_sessions: usize,

    /// Model provider: ollama, openai, anthropic, google, groq, mistral, deepseek
    #[arg(long, env = "PVBFLOW_PROVIDER", default_value = "ollama")]
    pub provider: String,

    /// Model name (defaults per provider)
    #[arg(long, env = "PVBFLOW_MODEL")]
    pub model: Option<String>,

    #[arg(long, env = "PVBFLOW_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Override the provider endpoint (e.g. a remote Ollama)
    #[arg(long, env = "PVBFLOW_BASE_URL")]
    pub base_url: Option<String>,

    #[arg(long, env = "PVBFLOW_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    #[arg(long, env = "PVBFLOW_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    /// Answer with canned diagrams instead of calling a model
    #[arg(long, env = "PVBFLOW_DEMO")]
    pub demo: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the Mermaid Live Editor URL for a diagram
    Encode {
        /// Mermaid file to read (stdin when omitted)
        file: Option<PathBuf>,

        /// Print a Markdown snippet (link plus fenced diagram) instead of the bare URL
        #[arg(long)]
        markdown: bool,
    },
}

impl Cli {
    pub fn bind_addr(&self) -> SocketAddr {
        let ip = if self.share { Ipv4Addr::UNSPECIFIED } else { Ipv4Addr::LOCALHOST };
        SocketAddr::new(IpAddr::V4(ip), self.port)
    }

    pub fn model_settings(&self) -> ModelSettings {
        ModelSettings {
            provider: self.provider.clone(),
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            demo: self.demo,
        }
    }
}
