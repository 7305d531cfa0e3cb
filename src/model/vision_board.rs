// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pvbflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of pvbflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Product Vision Board input.
//!
//! A board is a JSON object keyed by fixed section titles, each holding a list of entries.
//! Titles are part of the input format users paste, so they are matched verbatim.

use std::fmt;

use serde_json::{Map, Value};

pub const SUMMARY_KEY: &str = "Summary";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BoardSection {
    TargetUsers,
    ProductDescription,
    KeyFeatures,
    Objectives,
}

impl BoardSection {
    pub const ALL: [Self; 4] =
        [Self::TargetUsers, Self::ProductDescription, Self::KeyFeatures, Self::Objectives];

    pub fn title(self) -> &'static str {
        match self {
            Self::TargetUsers => "1. Utilisateur Cible",
            Self::ProductDescription => "2. Description du Produit",
            Self::KeyFeatures => "3. Fonctionnalités Clés",
            Self::Objectives => "4. Enjeux et Indicateurs",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VisionBoardError {
    #[error("invalid JSON format: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("JSON must be an object, not an array or primitive")]
    NotAnObject,
    #[error("no Product Vision Board sections found")]
    NoSections,
    #[error("section '{section}' must be a list")]
    SectionNotAList { section: &'static str },
}

/// A validated Product Vision Board. Key order is the order of the pasted JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct VisionBoard {
    fields: Map<String, Value>,
}

impl VisionBoard {
    pub fn parse(input: &str) -> Result<Self, VisionBoardError> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, VisionBoardError> {
        let Value::Object(fields) = value else {
            return Err(VisionBoardError::NotAnObject);
        };

        let mut found_section = false;
        for section in BoardSection::ALL {
            match fields.get(section.title()) {
                None => {}
                Some(Value::Array(_)) => found_section = true,
                Some(_) => {
                    return Err(VisionBoardError::SectionNotAList { section: section.title() })
                }
            }
        }

        if !found_section {
            return Err(VisionBoardError::NoSections);
        }

        Ok(Self { fields })
    }

    pub fn section(&self, section: BoardSection) -> Option<&[Value]> {
        self.fields.get(section.title()).and_then(Value::as_array).map(Vec::as_slice)
    }

    /// Sections present on the board, in canonical order.
    pub fn sections(&self) -> Vec<BoardSection> {
        BoardSection::ALL.into_iter().filter(|section| self.section(*section).is_some()).collect()
    }

    pub fn summary(&self) -> String {
        if let Some(summary) = self.fields.get(SUMMARY_KEY) {
            return entry_text(summary);
        }

        let mut parts = Vec::new();
        if let Some(users) = self.section(BoardSection::TargetUsers) {
            let users = users.iter().map(entry_text).collect::<Vec<_>>();
            parts.push(format!("Target users: {}", users.join(", ")));
        }
        if let Some(objective) = self.section(BoardSection::Objectives).and_then(<[_]>::first) {
            parts.push(format!("Key objective: {}", entry_text(objective)));
        }

        if parts.is_empty() {
            "Product Vision Board".to_owned()
        } else {
            parts.join(" | ")
        }
    }
}

/// Pretty JSON in the original key order, non-ASCII left as-is.
impl fmt::Display for VisionBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(&self.fields).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

fn entry_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Cheap pre-check: looks like a JSON object mentioning a section title.
pub fn is_vision_board_like(input: &str) -> bool {
    input.trim_start().starts_with('{')
        && BoardSection::ALL.iter().any(|section| input.contains(section.title()))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{is_vision_board_like, BoardSection, VisionBoard, VisionBoardError};

    fn recipe_board() -> String {
        json!({
            "1. Utilisateur Cible": ["Home cooks", "Restaurant staff"],
            "2. Description du Produit": ["Recipe manager with weekly planning"],
            "3. Fonctionnalités Clés": ["Search by ingredient", "Shopping list"],
            "4. Enjeux et Indicateurs": ["Cut food waste by 30%", "100k active users"]
        })
        .to_string()
    }

    #[test]
    fn parses_full_board() {
        let board = VisionBoard::parse(&recipe_board()).expect("board");
        assert_eq!(board.sections(), BoardSection::ALL.to_vec());
        assert_eq!(board.section(BoardSection::KeyFeatures).map(<[_]>::len), Some(2));
    }

    #[test]
    fn accepts_a_single_section() {
        let board = VisionBoard::parse(r#"{"3. Fonctionnalités Clés": ["Export"], "extra": 1}"#)
            .expect("board");
        assert_eq!(board.sections(), vec![BoardSection::KeyFeatures]);
        assert_eq!(board.section(BoardSection::TargetUsers), None);
    }

    #[rstest]
    #[case::not_json("make it more vertical")]
    #[case::truncated(r#"{"1. Utilisateur Cible": ["#)]
    fn rejects_invalid_json(#[case] input: &str) {
        assert!(matches!(VisionBoard::parse(input), Err(VisionBoardError::InvalidJson(_))));
    }

    #[rstest]
    #[case::array(r#"["1. Utilisateur Cible"]"#)]
    #[case::number("42")]
    #[case::string(r#""1. Utilisateur Cible""#)]
    fn rejects_non_objects(#[case] input: &str) {
        assert!(matches!(VisionBoard::parse(input), Err(VisionBoardError::NotAnObject)));
    }

    #[test]
    fn rejects_objects_without_sections() {
        assert!(matches!(
            VisionBoard::parse(r#"{"name": "not a board"}"#),
            Err(VisionBoardError::NoSections)
        ));
    }

    #[test]
    fn rejects_sections_that_are_not_lists() {
        let err = VisionBoard::parse(
            r#"{"1. Utilisateur Cible": ["Cooks"], "4. Enjeux et Indicateurs": "grow"}"#,
        )
        .expect_err("section must be a list");
        assert!(matches!(
            err,
            VisionBoardError::SectionNotAList { section: "4. Enjeux et Indicateurs" }
        ));
        assert_eq!(err.to_string(), "section '4. Enjeux et Indicateurs' must be a list");
    }

    #[test]
    fn summary_prefers_explicit_summary() {
        let board = VisionBoard::parse(
            r#"{"1. Utilisateur Cible": ["Cooks"], "Summary": "Plan meals, waste less"}"#,
        )
        .expect("board");
        assert_eq!(board.summary(), "Plan meals, waste less");
    }

    #[test]
    fn summary_is_built_from_users_and_first_objective() {
        let board = VisionBoard::parse(&recipe_board()).expect("board");
        assert_eq!(
            board.summary(),
            "Target users: Home cooks, Restaurant staff | Key objective: Cut food waste by 30%"
        );

        let board =
            VisionBoard::parse(r#"{"3. Fonctionnalités Clés": ["Export"]}"#).expect("board");
        assert_eq!(board.summary(), "Product Vision Board");
    }

    #[test]
    fn display_keeps_key_order_and_accents() {
        let board = VisionBoard::parse(
            r#"{"4. Enjeux et Indicateurs": ["Réduire"], "1. Utilisateur Cible": ["Chefs"]}"#,
        )
        .expect("board");
        let pretty = board.to_string();
        let objectives = pretty.find("4. Enjeux").expect("objectives");
        let users = pretty.find("1. Utilisateur").expect("users");
        assert!(objectives < users);
        assert!(pretty.contains("Réduire"));
    }

    #[test]
    fn quick_check_needs_brace_and_title() {
        assert!(is_vision_board_like(&recipe_board()));
        assert!(is_vision_board_like("  {\"2. Description du Produit\": "));
        assert!(!is_vision_board_like("[\"1. Utilisateur Cible\"]"));
        assert!(!is_vision_board_like("{\"name\": 1}"));
    }
}
