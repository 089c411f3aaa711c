//! Property-based tests for string splitting, method-name classification
//! and pattern alternatives.

use proptest::prelude::*;
use rbcst::cst::{Child, Kind, Node};
use rbcst::normalize::{method_name, split_escapes, to_pattern};

/// Text mixing plain runs with every escape family and stray backslashes.
fn literal_text_strategy() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        "[a-zA-Z0-9 #{}]{1,8}",
        Just(r"\n".to_string()),
        Just(r"\\".to_string()),
        "\\\\x[0-9a-f]{1,2}",
        "\\\\[0-7]{1,3}",
        "\\\\u[0-9a-f]{4}",
        "\\\\u\\{[0-9a-f]{1,6}\\}",
        Just(r"\u".to_string()),
        Just("\\".to_string()),
    ];
    prop::collection::vec(piece, 0..12).prop_map(|pieces| pieces.concat())
}

fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,8}[=?!]?"
}

proptest! {
    #[test]
    fn test_split_escapes_covers_input(text in literal_text_strategy()) {
        let parts = split_escapes(&text);
        let joined: String = parts.iter().filter_map(Node::token).collect();
        prop_assert_eq!(joined, text);
        for part in &parts {
            prop_assert!(matches!(part.kind(), Kind::StringContent | Kind::EscapeSequence));
        }
    }

    #[test]
    fn test_split_escapes_never_emits_adjacent_content(text in literal_text_strategy()) {
        let parts = split_escapes(&text);
        for pair in parts.windows(2) {
            prop_assert!(
                !(pair[0].kind() == Kind::StringContent && pair[1].kind() == Kind::StringContent)
            );
        }
    }

    #[test]
    fn test_method_name_depends_on_case_and_suffix(name in identifier_strategy()) {
        let classified = method_name(Node::leaf(Kind::Identifier, name.clone()));
        let expected = if name.ends_with('=') {
            Kind::Setter
        } else if name.starts_with(|c: char| c.is_ascii_uppercase()) {
            Kind::Constant
        } else {
            Kind::Identifier
        };
        prop_assert_eq!(classified.kind(), expected);
    }

    #[test]
    fn test_method_name_is_idempotent(name in identifier_strategy()) {
        let once = method_name(Node::leaf(Kind::Identifier, name));
        let twice = method_name(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_alternatives_flatten_at_any_length(count in 2usize..8) {
        let mut chain = Node::leaf(Kind::Integer, "0");
        for index in 1..count {
            let mut binary = Node::new(Kind::Binary);
            binary.add_field("left", chain);
            binary.add_token("|");
            binary.add_field("right", Node::leaf(Kind::Integer, index.to_string()));
            chain = binary;
        }
        let pattern = to_pattern(chain).expect("pattern");
        prop_assert_eq!(pattern.kind(), Kind::AlternativePattern);
        let alternatives: Vec<&Node> = pattern
            .children()
            .iter()
            .filter_map(Child::as_node)
            .collect();
        prop_assert_eq!(alternatives.len(), count);
        for alternative in alternatives {
            prop_assert_eq!(alternative.kind(), Kind::Integer);
        }
    }
}
