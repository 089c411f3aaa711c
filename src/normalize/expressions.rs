//! Scanner tokens, operators, variables, constant paths and error recovery.

use super::context::Context;
use super::value::Value;
use super::Handled;
use crate::cst::{Kind, Node};

// ============================================================================
// SCANNER TOKENS
// ============================================================================

/// A token that becomes a leaf of `kind` carrying its text.
pub(super) fn leaf(kind: Kind, token: Value) -> Handled {
    Ok(Node::leaf(kind, token.token_text()).into())
}

pub(super) fn kw(cx: &mut Context, token: Value) -> Handled {
    let keyword = token.token_text();
    cx.saw_keyword(&keyword);
    let node = match keyword.as_str() {
        "nil" => Node::new(Kind::Nil),
        "true" => Node::new(Kind::True),
        "false" => Node::new(Kind::False),
        "self" => Node::new(Kind::SelfKw),
        "BEGIN" | "END" => Node::leaf(Kind::Constant, keyword),
        _ => Node::leaf(Kind::Identifier, keyword),
    };
    Ok(node.into())
}

pub(super) fn op(cx: &mut Context, token: Value) -> Handled {
    let operator = token.token_text();
    cx.saw_operator(&operator);
    Ok(Node::leaf(Kind::Operator, operator).into())
}

pub(super) fn rparen(cx: &mut Context) -> Handled {
    cx.saw_rparen();
    Ok(Value::Nil)
}

pub(super) fn semicolon(cx: &mut Context) -> Handled {
    cx.saw_semicolon();
    Ok(Value::Nil)
}

/// `__END__`: nothing after it is interpreted.
pub(super) fn end_marker(cx: &mut Context) -> Handled {
    cx.saw_end_marker();
    Ok(Value::Nil)
}

// ============================================================================
// OPERATORS
// ============================================================================

pub(super) fn binary(left: Value, operator: Value, right: Value) -> Handled {
    let mut node = Node::new(Kind::Binary);
    node.add_field("left", left.into_node("left operand")?);
    node.add_token(operator.token_text());
    node.add_field("right", right.into_node("right operand")?);
    Ok(node.into())
}

/// Builds a unary node. `not (x)` and `defined?(x)` keep their parentheses
/// as a `parenthesized_statements` operand when the `)` closed right before
/// this event, and claim that parenthesis.
pub(super) fn unary_node(cx: &mut Context, operator: &str, operand: Option<Node>) -> Node {
    let mut operand = operand;
    if matches!(operator, "not" | "defined?") && cx.rparen_just_closed() {
        cx.claim_rparen();
        operand = Some(Node::new(Kind::ParenthesizedStatements).with_child(operand));
    }
    Node::new(Kind::Unary)
        .with_token(operator)
        .with_field("operand", operand)
}

pub(super) fn unary(cx: &mut Context, operator: Value, operand: Value) -> Handled {
    let operand = operand.into_node("unary operand")?;
    Ok(unary_node(cx, &operator.token_text(), operand).into())
}

pub(super) fn defined(cx: &mut Context, operand: Value) -> Handled {
    let operand = operand.into_node("defined? operand")?;
    Ok(unary_node(cx, "defined?", operand).into())
}

/// A parenthesized group. When a `not`/`defined?` operand already claimed
/// the closing parenthesis, the inner duplicate group is unwrapped.
pub(super) fn paren(cx: &Context, contents: Value) -> Handled {
    let mut children = contents.into_nodes("parenthesized statements")?;
    if cx.rparen_just_closed() && cx.rparen_claimed() {
        if let Some(last) = children.last_mut() {
            let doubled = last.kind() == Kind::Unary
                && last
                    .last_node()
                    .is_some_and(|operand| operand.kind() == Kind::ParenthesizedStatements);
            if doubled {
                if let Some(inner) = last.pop_node() {
                    last.add_field("operand", inner.into_first_node());
                }
            }
        }
    }
    Ok(Node::new(Kind::ParenthesizedStatements)
        .with_children(children)
        .into())
}

pub(super) fn range(begin: Value, end: Value) -> Handled {
    Ok(Node::new(Kind::Range)
        .with_field("begin", begin.into_node("range begin")?)
        .with_field("end", end.into_node("range end")?)
        .into())
}

// ============================================================================
// VARIABLES AND CONSTANT PATHS
// ============================================================================

pub(super) fn pass(value: Value) -> Handled {
    Ok(value)
}

pub(super) fn const_path(scope: Value, name: Value) -> Handled {
    Ok(Node::new(Kind::ScopeResolution)
        .with_field("scope", scope.into_node("constant scope")?)
        .with_field("name", name.into_node("constant name")?)
        .into())
}

/// `::Name`
pub(super) fn top_const(name: Value) -> Handled {
    Ok(Node::new(Kind::ScopeResolution)
        .with_field("name", name.into_node("constant name")?)
        .into())
}

// ============================================================================
// ERROR RECOVERY
// ============================================================================

pub(super) fn parse_error(cx: &mut Context, message: Value) -> Handled {
    cx.report(message.token_text());
    Ok(Node::new(Kind::Error).into())
}

/// `*_error` events: record the message, keep the partial node.
pub(super) fn recovered(cx: &mut Context, message: Value, node: Value) -> Handled {
    cx.report(message.token_text());
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::context::Position;

    #[test]
    fn test_keywords() {
        let mut cx = Context::new();
        let render = |value: Value| value.as_node().map(Node::pretty).unwrap_or_default();
        assert_eq!(render(kw(&mut cx, Value::Text("self".into())).unwrap()), "(self)");
        assert_eq!(render(kw(&mut cx, Value::Text("END".into())).unwrap()), "(constant)");
        assert_eq!(render(kw(&mut cx, Value::Text("__LINE__".into())).unwrap()), "(identifier)");
    }

    #[test]
    fn test_not_with_adjacent_paren_wraps_operand() {
        let mut cx = Context::new();
        cx.enter_event(Position::new(1, 6), None);
        cx.saw_rparen();
        cx.enter_event(Position::new(1, 7), None);
        let operand = Node::leaf(Kind::Identifier, "x").into();
        let node = unary(&mut cx, Value::Symbol("not".into()), operand).unwrap();
        assert_eq!(
            node.as_node().unwrap().pretty(),
            "(unary\n  operand: (parenthesized_statements\n    (identifier)))"
        );
        assert!(cx.rparen_claimed());

        let outer = paren(&cx, Value::List(vec![node])).unwrap();
        assert_eq!(
            outer.as_node().unwrap().pretty(),
            "(parenthesized_statements\n  (unary\n    operand: (identifier)))"
        );
    }

    #[test]
    fn test_not_without_paren() {
        let mut cx = Context::new();
        cx.enter_event(Position::new(1, 4), None);
        let operand = Node::leaf(Kind::Identifier, "x").into();
        let node = unary(&mut cx, Value::Symbol("not".into()), operand).unwrap();
        assert_eq!(node.as_node().unwrap().pretty(), "(unary\n  operand: (identifier))");
    }

    #[test]
    fn test_parse_error_records_diagnostic() {
        let mut cx = Context::new();
        cx.enter_event(Position::new(3, 0), None);
        let message = Value::Text("syntax error, unexpected end".into());
        let node = parse_error(&mut cx, message).unwrap();
        assert!(node.is_kind(Kind::Error));
        assert_eq!(cx.diagnostics()[0].to_string(), "3: syntax error, unexpected end");
    }
}
