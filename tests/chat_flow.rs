// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pvbflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of pvbflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use serde_json::json;

use pvbflow::chat::{share_link, ChatEngine, TurnOutcome, BOARD_RECEIVED_MESSAGE};
use pvbflow::llm::{select_model, ModelSettings, ScriptedModel};
use pvbflow::model::{Role, Session};
use pvbflow::share::EditorState;

fn bakery_board() -> String {
    json!({
        "1. Utilisateur Cible": ["Neighbourhood bakeries", "Regular customers"],
        "2. Description du Produit": ["Pre-order app with pickup slots"],
        "3. Fonctionnalités Clés": ["Daily menu", "Pickup reminders", "Loyalty points"],
        "4. Enjeux et Indicateurs": ["Reduce unsold bread by 25%"]
    })
    .to_string()
}

#[tokio::test]
async fn board_to_diagram_to_refinement_to_share() {
    let model = Arc::new(ScriptedModel::with_texts([
        "```mermaid\nflowchart TD\n    A[Order]-->B[Bake]\n    B-->C[Pickup]\n```",
        "Added a reminder step.\n```mermaid\nflowchart TD\n    A[Order]-->B[Bake]\n    B-->R[Reminder]\n    R-->C[Pickup]\n```",
    ]));
    let engine = ChatEngine::new(model.clone());
    let mut session = Session::new();

    let first = engine.handle_message(&mut session, &bakery_board()).await;
    assert_eq!(first, TurnOutcome::Replied { diagram_updated: true });
    assert_eq!(session.conversation()[0].content, BOARD_RECEIVED_MESSAGE);
    assert_eq!(
        session.board().map(|board| board.summary()).as_deref(),
        Some("Target users: Neighbourhood bakeries, Regular customers | Key objective: Reduce unsold bread by 25%")
    );

    let second = engine.handle_message(&mut session, "add a reminder before pickup").await;
    assert_eq!(second, TurnOutcome::Replied { diagram_updated: true });
    assert!(session.diagram_source().contains("R[Reminder]"));

    let received = model.received();
    assert_eq!(received.len(), 2);
    assert_eq!(received[1].len(), 3);
    assert!(received[1].iter().all(|turn| !turn.content.is_empty()));
    assert_eq!(received[1][2].role, Role::User);

    let link = share_link(&session).expect("encode").expect("diagram to share");
    let fragment = link.url.rsplit_once("#pako:").map(|(_, fragment)| fragment).expect("marker");
    let compressed = {
        use base64::Engine as _;
        base64::engine::general_purpose::URL_SAFE_NO_PAD.decode(fragment).expect("base64url")
    };
    let state: EditorState = {
        use std::io::Read as _;
        let mut json = Vec::new();
        flate2::read::ZlibDecoder::new(compressed.as_slice())
            .read_to_end(&mut json)
            .expect("inflate");
        serde_json::from_slice(&json).expect("state")
    };
    assert_eq!(state.code, session.diagram_source());
}

#[tokio::test]
async fn demo_back_end_drives_a_full_session_offline() {
    let settings = ModelSettings { demo: true, ..ModelSettings::default() };
    let engine = ChatEngine::new(select_model(&settings).expect("demo model"));
    let mut session = Session::new();

    engine.handle_message(&mut session, &bakery_board()).await;
    let initial = session.diagram_source().to_owned();
    assert!(initial.starts_with("flowchart TD"));

    engine.handle_message(&mut session, "make it left to right").await;
    assert!(session.diagram_source().starts_with("flowchart LR"));
    assert_ne!(session.diagram_source(), initial);

    engine.clear(&mut session);
    assert_eq!(share_link(&session).expect("encode"), None);
}
