// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pvbflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of pvbflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! pvbflow CLI entrypoint.
//!
//! By default this serves the web UI at `http://127.0.0.1:<port>/`. `pvbflow encode [FILE]`
//! prints the Mermaid Live Editor URL for a diagram instead.

use std::error::Error;
use std::io::Read;
use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pvbflow::chat::ChatEngine;
use pvbflow::config::{Cli, Command};
use pvbflow::llm::select_model;
use pvbflow::share::{live_editor_url, share_markdown};
use pvbflow::web::{self, AppState, SessionStore};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pvbflow=info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn read_diagram(file: Option<&Path>) -> std::io::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = (|| -> Result<(), Box<dyn Error>> {
        if let Some(Command::Encode { file, markdown }) = &cli.command {
            let diagram = read_diagram(file.as_deref())?;
            let output =
                if *markdown { share_markdown(&diagram)? } else { live_editor_url(&diagram)? };
            match output {
                Some(text) => println!("{text}"),
                None => return Err("no diagram to encode: input is empty".into()),
            }
            return Ok(());
        }

        let model = select_model(&cli.model_settings())?;
        let engine = ChatEngine::new(model);
        tracing::info!(
            os = std::env::consts::OS,
            arch = std::env::consts::ARCH,
            backend = engine.model_name(),
            "starting pvbflow"
        );

        let state = AppState::new(engine, SessionStore::new(cli.max_sessions));
        let addr = cli.bind_addr();
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            let local = listener.local_addr()?;
            tracing::info!(url = %format!("http://{local}/"), "open the web ui");

            web::serve(listener, state, async {
                if let Err(err) = tokio::signal::ctrl_c().await {
                    tracing::warn!(%err, "could not listen for ctrl-c");
                    std::future::pending::<()>().await;
                }
                tracing::info!("shutting down");
            })
            .await?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("pvbflow: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::read_diagram;

    #[test]
    fn reads_diagram_from_file() {
        let path = std::env::temp_dir()
            .join(format!("pvbflow-read-diagram-{}.mmd", std::process::id()));
        let mut file = std::fs::File::create(&path).expect("create");
        file.write_all(b"flowchart TD\n    A-->B\n").expect("write");
        drop(file);

        let text = read_diagram(Some(&path)).expect("read");
        std::fs::remove_file(&path).expect("cleanup");
        assert_eq!(text, "flowchart TD\n    A-->B\n");
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("pvbflow-definitely-missing.mmd");
        read_diagram(Some(&path)).unwrap_err();
    }
}
