//! Numbers, strings, symbols, regexps, word arrays, arrays and hashes.

use super::context::Context;
use super::expressions::unary_node;
use super::strings::{content_parts, split_content};
use super::value::Value;
use super::Handled;
use crate::cst::{Kind, Node};

// ============================================================================
// NUMBERS
// ============================================================================

/// A literal of `kind`; a leading `+` is hoisted into a unary node.
fn signed(cx: &mut Context, kind: Kind, text: &str) -> Node {
    match text.strip_prefix('+') {
        Some(digits) => unary_node(cx, "+", Some(Node::leaf(kind, digits))),
        None => Node::leaf(kind, text),
    }
}

fn number(cx: &mut Context, text: &str) -> Node {
    if text.contains('.') {
        signed(cx, Kind::Float, text)
    } else {
        signed(cx, Kind::Integer, text)
    }
}

/// Wraps a number in `kind`, keeping any sign outermost.
fn wrap_number(cx: &mut Context, kind: Kind, number: Node) -> Node {
    if number.kind() != Kind::Unary {
        return Node::new(kind).with_child(number);
    }
    let operator = number.token().unwrap_or_default().to_string();
    let operand = number.into_first_node();
    unary_node(cx, &operator, Some(Node::new(kind).with_child(operand)))
}

fn without_suffix(text: &str) -> &str {
    let mut chars = text.chars();
    chars.next_back();
    chars.as_str()
}

fn rational_node(cx: &mut Context, text: &str) -> Node {
    let inner = number(cx, without_suffix(text));
    wrap_number(cx, Kind::Rational, inner)
}

pub(super) fn int(cx: &mut Context, token: Value) -> Handled {
    Ok(signed(cx, Kind::Integer, &token.token_text()).into())
}

pub(super) fn float(cx: &mut Context, token: Value) -> Handled {
    Ok(signed(cx, Kind::Float, &token.token_text()).into())
}

pub(super) fn rational(cx: &mut Context, token: Value) -> Handled {
    Ok(rational_node(cx, &token.token_text()).into())
}

pub(super) fn imaginary(cx: &mut Context, token: Value) -> Handled {
    let text = token.token_text();
    let body = without_suffix(&text);
    let inner = if body.ends_with('r') {
        rational_node(cx, body)
    } else {
        number(cx, body)
    };
    Ok(wrap_number(cx, Kind::Complex, inner).into())
}

// ============================================================================
// OPENERS
// ============================================================================

/// Any literal opener: remember it until the matching literal completes.
pub(super) fn opener(cx: &mut Context, token: Value) -> Handled {
    cx.push_delimiter(token.token_text());
    Ok(Value::Nil)
}

/// Heredoc openers are also returned as text.
pub(super) fn heredoc_beg(cx: &mut Context, token: Value) -> Handled {
    let text = token.token_text();
    cx.push_delimiter(text.clone());
    Ok(Value::Text(text))
}

pub(super) fn heredoc_dedent() -> Handled {
    Ok(Node::new(Kind::HeredocDedent).into())
}

// ============================================================================
// STRINGS
// ============================================================================

pub(super) fn string_content(cx: &Context) -> Handled {
    let kind = if cx.in_heredoc() {
        Kind::HeredocBody
    } else if cx.in_delimited_symbol() {
        Kind::DelimitedSymbol
    } else {
        Kind::String
    };
    Ok(Node::new(kind).into())
}

pub(super) fn string_add(cx: &Context, string: Value, part: Value) -> Handled {
    let mut string = string.require_node("string")?;
    match part {
        Value::Text(text) => {
            string.add_children(split_content(cx, &text));
        }
        other => {
            string.add_child(other.into_node("string part")?);
        }
    }
    Ok(string.into())
}

pub(super) fn string_concat(left: Value, right: Value) -> Handled {
    let left = left.require_node("concatenated string")?;
    let right = right.into_node("concatenated string")?;
    if left.kind() == Kind::ChainedString {
        let mut chain = left;
        chain.add_child(right);
        return Ok(chain.into());
    }
    Ok(Node::new(Kind::ChainedString)
        .with_child(left)
        .with_child(right)
        .into())
}

pub(super) fn string_embexpr(stmts: Value) -> Handled {
    Ok(Node::new(Kind::Interpolation)
        .with_children(stmts.into_nodes("interpolated statements")?)
        .into())
}

/// `"#@ivar"`
pub(super) fn string_dvar(variable: Value) -> Handled {
    string_embexpr(variable)
}

/// Completes a string-like literal. Heredoc content is retagged and closed
/// with a `heredoc_end` marker.
pub(super) fn string_literal(cx: &mut Context, parts: Value) -> Handled {
    let mut parts = parts.require_node("string literal")?;
    if parts.kind() == Kind::HeredocBody {
        for child in parts.nodes_mut() {
            if child.kind() == Kind::StringContent {
                child.retag(Kind::HeredocContent);
            }
        }
        parts.add_child(Node::new(Kind::HeredocEnd));
    }
    cx.pop_delimiter()?;
    Ok(parts.into())
}

pub(super) fn xstring_new(cx: &mut Context) -> Handled {
    if cx.in_heredoc() {
        return Ok(Node::new(Kind::HeredocBody).into());
    }
    let opener = cx.current_token().unwrap_or("`").to_string();
    cx.push_delimiter(opener);
    Ok(Node::new(Kind::Subshell).into())
}

// ============================================================================
// SYMBOLS
// ============================================================================

pub(super) fn symbol(cx: &mut Context, contents: Value) -> Handled {
    cx.pop_delimiter()?;
    Ok(Node::leaf(Kind::SimpleSymbol, contents.token_text()).into())
}

pub(super) fn symbol_literal(contents: Value) -> Handled {
    Ok(contents.require_node("symbol")?.into())
}

pub(super) fn dyna_symbol(cx: &mut Context, contents: Value) -> Handled {
    cx.pop_delimiter()?;
    Ok(contents)
}

// ============================================================================
// REGEXPS
// ============================================================================

pub(super) fn regexp_new() -> Handled {
    Ok(Value::List(Vec::new()))
}

pub(super) fn regexp_add(cx: &Context, regexp: Value, part: Value) -> Handled {
    let mut items = regexp.into_list("regexp parts")?;
    items.extend(content_parts(cx, part));
    Ok(Value::List(items))
}

pub(super) fn regexp_literal(cx: &mut Context, regexp: Value) -> Handled {
    cx.pop_delimiter()?;
    Ok(Node::new(Kind::Regex)
        .with_children(regexp.into_nodes("regexp parts")?)
        .into())
}

// ============================================================================
// WORD AND SYMBOL ARRAYS
// ============================================================================

pub(super) fn word_array(kind: Kind) -> Handled {
    Ok(Node::new(kind).into())
}

pub(super) fn word_new() -> Handled {
    Ok(Value::List(Vec::new()))
}

pub(super) fn word_add(cx: &Context, word: Value, part: Value) -> Handled {
    let mut items = word.into_list("word parts")?;
    items.extend(content_parts(cx, part));
    Ok(Value::List(items))
}

/// Appends a word built from interpolating parts (`%W`, `%I`).
pub(super) fn add_word(element: Kind, array: Value, word: Value) -> Handled {
    let mut array = array.require_node("word array")?;
    array.add_child(Node::new(element).with_children(word.into_nodes("word parts")?));
    Ok(array.into())
}

/// Appends a word of raw content (`%w`, `%i`).
pub(super) fn add_raw_word(cx: &Context, element: Kind, array: Value, content: Value) -> Handled {
    let mut array = array.require_node("word array")?;
    let parts = Value::List(content_parts(cx, content)).into_nodes("word parts")?;
    array.add_child(Node::new(element).with_children(parts));
    Ok(array.into())
}

// ============================================================================
// ARRAYS AND HASHES
// ============================================================================

pub(super) fn array(cx: &mut Context, contents: Value) -> Handled {
    match contents {
        Value::Node(words) if matches!(words.kind(), Kind::StringArray | Kind::SymbolArray) => {
            cx.pop_delimiter()?;
            Ok(words.into())
        }
        other => Ok(Node::new(Kind::Array)
            .with_children(other.into_nodes("array elements")?)
            .into()),
    }
}

pub(super) fn hash(assocs: Value) -> Handled {
    Ok(Node::new(Kind::Hash)
        .with_children(assocs.into_nodes("hash pairs")?)
        .into())
}

pub(super) fn assoc_new(key: Value, value: Value) -> Handled {
    Ok(Node::new(Kind::Pair)
        .with_field("key", key.into_node("pair key")?)
        .with_field("value", value.into_node("pair value")?)
        .into())
}

pub(super) fn assoc_splat(contents: Value) -> Handled {
    Ok(Node::new(Kind::HashSplatArgument)
        .with_child(contents.into_node("double splat argument")?)
        .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::context::Position;

    fn render(value: Value) -> String {
        value.as_node().map(Node::pretty).unwrap_or_default()
    }

    #[test]
    fn test_signed_numbers_hoist_unary() {
        let mut cx = Context::new();
        let node = int(&mut cx, Value::Text("+1".into())).unwrap();
        assert_eq!(render(node), "(unary\n  operand: (integer))");
        assert_eq!(render(float(&mut cx, Value::Text("2.5".into())).unwrap()), "(float)");
        assert_eq!(
            render(rational(&mut cx, Value::Text("+3r".into())).unwrap()),
            "(unary\n  operand: (rational\n    (integer)))"
        );
        assert_eq!(
            render(imaginary(&mut cx, Value::Text("1.5ri".into())).unwrap()),
            "(complex\n  (rational\n    (float)))"
        );
        let node = imaginary(&mut cx, Value::Text("2i".into())).unwrap();
        assert_eq!(render(node), "(complex\n  (integer))");
    }

    #[test]
    fn test_double_quoted_string_with_escape() {
        let mut cx = Context::new();
        opener(&mut cx, Value::Text("\"".into())).unwrap();
        let string = string_content(&cx).unwrap();
        let string = string_add(&cx, string, Value::Text("a\\tb".into())).unwrap();
        let string = string_literal(&mut cx, string).unwrap();
        assert_eq!(
            render(string),
            "(string\n  (string_content)\n  (escape_sequence)\n  (string_content))"
        );
        assert!(cx.top_delimiter().is_none());
    }

    #[test]
    fn test_heredoc_body_is_closed() {
        let mut cx = Context::new();
        assert_eq!(
            heredoc_beg(&mut cx, Value::Text("<<~EOS".into())).unwrap(),
            Value::Text("<<~EOS".into())
        );
        let body = string_content(&cx).unwrap();
        let body = string_add(&cx, body, Value::Text("hi\n".into())).unwrap();
        let body = string_literal(&mut cx, body).unwrap();
        assert_eq!(render(body), "(heredoc_body\n  (heredoc_content)\n  (heredoc_end))");
    }

    #[test]
    fn test_delimited_symbol() {
        let mut cx = Context::new();
        opener(&mut cx, Value::Text(":\"".into())).unwrap();
        let sym = string_content(&cx).unwrap();
        let sym = string_add(&cx, sym, Value::Text("a b".into())).unwrap();
        let sym = dyna_symbol(&mut cx, sym).unwrap();
        assert_eq!(render(sym), "(delimited_symbol\n  (string_content))");
    }

    #[test]
    fn test_raw_word_array() {
        let mut cx = Context::new();
        opener(&mut cx, Value::Text("%w[".into())).unwrap();
        let words = word_array(Kind::StringArray).unwrap();
        let words = add_raw_word(&cx, Kind::BareString, words, Value::Text("a\\n".into())).unwrap();
        let words = array(&mut cx, words).unwrap();
        assert_eq!(render(words), "(string_array\n  (bare_string\n    (string_content)))");
        assert!(cx.top_delimiter().is_none());
    }

    #[test]
    fn test_xstring_pushes_current_token() {
        let mut cx = Context::new();
        cx.enter_event(Position::new(1, 0), Some("%x(".into()));
        let command = xstring_new(&mut cx).unwrap();
        assert!(command.is_kind(Kind::Subshell));
        assert_eq!(cx.top_delimiter(), Some("%x("));
        let command = string_add(&cx, command, Value::Text("ls\\n".into())).unwrap();
        let command = string_literal(&mut cx, command).unwrap();
        assert_eq!(
            render(command),
            "(subshell\n  (string_content)\n  (escape_sequence))"
        );
        assert!(cx.top_delimiter().is_none());
    }

    #[test]
    fn test_xstring_without_token_uses_backtick() {
        let mut cx = Context::new();
        xstring_new(&mut cx).unwrap();
        assert_eq!(cx.top_delimiter(), Some("`"));
    }

    #[test]
    fn test_xstring_in_heredoc_is_heredoc_body() {
        let mut cx = Context::new();
        heredoc_beg(&mut cx, Value::Text("<<`EOS`".into())).unwrap();
        cx.enter_event(Position::new(1, 7), Some("<<`EOS`".into()));
        let body = xstring_new(&mut cx).unwrap();
        assert!(body.is_kind(Kind::HeredocBody));
        let body = string_add(&cx, body, Value::Text("ls\n".into())).unwrap();
        let body = string_literal(&mut cx, body).unwrap();
        assert_eq!(render(body), "(heredoc_body\n  (heredoc_content)\n  (heredoc_end))");
        assert!(cx.top_delimiter().is_none());
    }

    #[test]
    fn test_regexp_scans_escapes_and_keeps_interpolation() {
        let mut cx = Context::new();
        opener(&mut cx, Value::Text("/".into())).unwrap();
        let regexp = regexp_new().unwrap();
        let regexp = regexp_add(&cx, regexp, Value::Text("a\\d".into())).unwrap();
        let regexp = regexp_add(&cx, regexp, Node::new(Kind::Interpolation).into()).unwrap();
        let regexp = regexp_literal(&mut cx, regexp).unwrap();
        assert_eq!(
            render(regexp),
            "(regex\n  (string_content)\n  (escape_sequence)\n  (interpolation))"
        );
        assert!(cx.top_delimiter().is_none());
    }

    #[test]
    fn test_percent_r_regexp_is_not_raw() {
        let mut cx = Context::new();
        opener(&mut cx, Value::Text("%r{".into())).unwrap();
        let regexp = regexp_add(&cx, regexp_new().unwrap(), Value::Text("\\s".into())).unwrap();
        let regexp = regexp_literal(&mut cx, regexp).unwrap();
        assert_eq!(render(regexp), "(regex\n  (escape_sequence))");
    }

    #[test]
    fn test_regexp_literal_without_opener_is_fatal() {
        let mut cx = Context::new();
        assert!(regexp_literal(&mut cx, regexp_new().unwrap()).is_err());
    }

    #[test]
    fn test_chained_strings_flatten() {
        let a: Value = Node::new(Kind::String).into();
        let chain = string_concat(string_concat(a.clone(), a.clone()).unwrap(), a).unwrap();
        assert_eq!(render(chain), "(chained_string\n  (string)\n  (string)\n  (string))");
    }
}
