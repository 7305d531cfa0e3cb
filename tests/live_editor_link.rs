// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pvbflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of pvbflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::io::Read;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use flate2::read::ZlibDecoder;
use proptest::prelude::*;

use pvbflow::format::mermaid::extract_mermaid_block;
use pvbflow::share::{encode_pako_fragment, live_editor_url, EditorState};

const EDITOR_PREFIX: &str = "https://mermaid.live/edit#pako:";

fn decode_fragment(fragment: &str) -> serde_json::Value {
    let compressed = URL_SAFE_NO_PAD.decode(fragment).expect("base64url fragment");
    let mut json = String::new();
    ZlibDecoder::new(compressed.as_slice()).read_to_string(&mut json).expect("zlib stream");
    serde_json::from_str(&json).expect("editor state json")
}

fn non_blank_diagram() -> impl Strategy<Value = String> {
    any::<String>().prop_filter("needs a non-whitespace character", |text| !text.trim().is_empty())
}

proptest! {
    #[test]
    fn url_fragment_round_trips_to_editor_state(diagram in non_blank_diagram()) {
        let url = live_editor_url(&diagram).expect("encode").expect("non-blank input has a url");
        let fragment = url.strip_prefix(EDITOR_PREFIX).expect("editor prefix");

        let state: EditorState = serde_json::from_value(decode_fragment(fragment)).expect("state");
        prop_assert_eq!(&state.code, &diagram);
        prop_assert_eq!(state.mermaid.theme.as_str(), "default");
        prop_assert!(state.auto_sync);
        prop_assert!(state.update_diagram);
    }

    #[test]
    fn encoding_is_deterministic(diagram in any::<String>()) {
        prop_assert_eq!(
            encode_pako_fragment(&diagram).expect("first"),
            encode_pako_fragment(&diagram).expect("second")
        );
    }

    #[test]
    fn fragment_uses_only_url_safe_characters(diagram in non_blank_diagram()) {
        let fragment = encode_pako_fragment(&diagram).expect("encode");
        prop_assert!(!fragment.is_empty());
        prop_assert!(fragment
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_'));
    }

    #[test]
    fn different_diagrams_get_different_fragments(
        left in non_blank_diagram(),
        right in non_blank_diagram(),
    ) {
        prop_assume!(left != right);
        prop_assert_ne!(
            encode_pako_fragment(&left).expect("left"),
            encode_pako_fragment(&right).expect("right")
        );
    }

    #[test]
    fn whitespace_only_input_has_no_url(blank in "[ \t\r\n]{0,32}") {
        prop_assert_eq!(encode_pako_fragment(&blank).expect("encode"), "");
        prop_assert_eq!(live_editor_url(&blank).expect("url"), None);
    }
}

#[test]
fn flowchart_scenario_decodes_to_exact_state() {
    let diagram = "flowchart TD\n    A-->B";
    let fragment = encode_pako_fragment(diagram).expect("encode");

    assert_eq!(
        decode_fragment(&fragment),
        serde_json::json!({
            "code": "flowchart TD\n    A-->B",
            "mermaid": {"theme": "default"},
            "autoSync": true,
            "updateDiagram": true
        })
    );
    assert_eq!(
        live_editor_url(diagram).expect("url"),
        Some(format!("https://mermaid.live/edit#pako:{fragment}"))
    );
}

#[test]
fn fragment_is_a_zlib_stream_not_raw_deflate() {
    let fragment = encode_pako_fragment("graph LR\n  start --> finish").expect("encode");
    let compressed = URL_SAFE_NO_PAD.decode(&fragment).expect("base64url");

    assert_eq!(compressed[0], 0x78, "deflate with a 32K window");
    assert_eq!(((u16::from(compressed[0]) << 8) | u16::from(compressed[1])) % 31, 0);
    assert_eq!(compressed[1] & 0x20, 0, "no preset dictionary");
    assert!(compressed.len() > 6, "header, body and adler-32 trailer");
}

#[test]
fn extractor_scenario_feeds_the_encoder() {
    let reply = "```mermaid\nflowchart TD\n    A-->B\n```";
    let block = extract_mermaid_block(reply).expect("fenced block");
    assert!(block.is_valid());
    assert_eq!(block.code(), "flowchart TD\n    A-->B");
    assert!(live_editor_url(block.code()).expect("url").is_some());

    assert!(extract_mermaid_block("no diagram in this reply").is_none());
}
