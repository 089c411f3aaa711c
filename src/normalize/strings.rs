//! Splitting of raw literal text into content and escape-sequence nodes.

use once_cell::sync::Lazy;
use regex::Regex;

use super::context::Context;
use super::value::Value;
use crate::cst::{Kind, Node};

/// `\` followed by a single non-`u`/`x`/octal character, `\xH{1,2}`,
/// `\NNN`, `\uHHHH` or `\u{...}`.
static ESCAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\([^ux0-7]|x[0-9a-fA-F]{1,2}|[0-7]{1,3}|u[0-9a-fA-F]{4}|u\{[0-9a-fA-F ]+\})")
        .unwrap() // static pattern
});

/// Splits `text` according to the innermost open literal. Raw literals
/// become one `string_content` node. Everything else alternates
/// `string_content` and `escape_sequence` nodes that together cover the
/// input exactly.
pub fn split_content(cx: &Context, text: &str) -> Vec<Node> {
    if cx.raw_literal() {
        return vec![Node::leaf(Kind::StringContent, text)];
    }
    split_escapes(text)
}

/// Scans `text` with the escape grammar.
pub fn split_escapes(text: &str) -> Vec<Node> {
    let mut parts = Vec::new();
    let mut pos = 0;
    for escape in ESCAPE.find_iter(text) {
        if pos < escape.start() {
            parts.push(Node::leaf(Kind::StringContent, &text[pos..escape.start()]));
        }
        parts.push(Node::leaf(Kind::EscapeSequence, escape.as_str()));
        pos = escape.end();
    }
    if pos < text.len() {
        parts.push(Node::leaf(Kind::StringContent, &text[pos..]));
    }
    parts
}

/// Content parts for a string-like `*_add` event. Token text is split; any
/// other part (an interpolation, a `string_dvar`) is kept as one node.
pub fn content_parts(cx: &Context, part: Value) -> Vec<Value> {
    match part {
        Value::Text(text) => split_content(cx, &text).into_iter().map(Value::Node).collect(),
        other => vec![other],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(nodes: &[Node]) -> Vec<(Kind, String)> {
        nodes
            .iter()
            .map(|n| (n.kind(), n.token().unwrap_or_default().to_string()))
            .collect()
    }

    #[test]
    fn test_plain_text_is_one_content_node() {
        assert_eq!(
            shape(&split_escapes("hello")),
            vec![(Kind::StringContent, "hello".to_string())]
        );
    }

    #[test]
    fn test_escape_families() {
        let parts = split_escapes(r"a\nb\x41\101\u00e9\u{1F600 20}\q");
        assert_eq!(
            shape(&parts),
            vec![
                (Kind::StringContent, "a".to_string()),
                (Kind::EscapeSequence, r"\n".to_string()),
                (Kind::StringContent, "b".to_string()),
                (Kind::EscapeSequence, r"\x41".to_string()),
                (Kind::EscapeSequence, r"\101".to_string()),
                (Kind::EscapeSequence, r"\u00e9".to_string()),
                (Kind::EscapeSequence, r"\u{1F600 20}".to_string()),
                (Kind::EscapeSequence, r"\q".to_string()),
            ]
        );
    }

    #[test]
    fn test_incomplete_unicode_escape_is_content() {
        let parts = split_escapes(r"\uZZ");
        assert_eq!(shape(&parts), vec![(Kind::StringContent, r"\uZZ".to_string())]);
    }

    #[test]
    fn test_raw_literal_is_not_scanned() {
        let mut cx = Context::new();
        cx.push_delimiter("'");
        assert_eq!(
            shape(&split_content(&cx, r"a\nb")),
            vec![(Kind::StringContent, r"a\nb".to_string())]
        );
    }

    #[test]
    fn test_escaped_newline() {
        let parts = split_escapes("a\\\nb");
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1].token(), Some("\\\n"));
    }
}
