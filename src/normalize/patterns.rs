//! Pattern matching: `case ... in`, one-line matches and pattern shapes.
//!
//! Ripper delivers pattern positions as ordinary expressions. [`to_pattern`]
//! reinterprets such an expression as a pattern once its position is known.

use super::context::Context;
use super::value::Value;
use super::Handled;
use crate::cst::{Child, Kind, Node};
use crate::err_msg;

/// Reinterprets an expression in pattern position.
pub fn to_pattern(tree: Node) -> Option<Node> {
    match tree.kind() {
        Kind::VarField => tree.into_first_node(),
        Kind::Begin => {
            let mut pinned = Node::new(Kind::ExpressionReferencePattern);
            for value in tree.into_nodes() {
                pinned.add_field("value", value);
            }
            Some(pinned)
        }
        Kind::IfModifier | Kind::UnlessModifier => tree.into_first_node().and_then(to_pattern),
        Kind::GlobalVariable | Kind::InstanceVariable | Kind::ClassVariable => {
            Some(Node::new(Kind::VariableReferencePattern).with_field("name", tree))
        }
        Kind::Identifier => {
            let pseudo = match tree.token() {
                Some("__LINE__") => Some(Kind::Line),
                Some("__FILE__") => Some(Kind::File),
                Some("__ENCODING__") => Some(Kind::Encoding),
                _ => None,
            };
            Some(match pseudo {
                Some(kind) => Node::new(kind),
                None => Node::new(Kind::VariableReferencePattern).with_field("name", tree),
            })
        }
        Kind::Binary => binary_pattern(tree),
        _ => Some(tree),
    }
}

/// `a | b` is an alternative, `value => name` a binding. Other operators
/// stay as written.
fn binary_pattern(tree: Node) -> Option<Node> {
    let operator = tree.children().iter().find_map(|child| match child {
        Child::Token(text) => Some(text.clone()),
        Child::Node(_) => None,
    });
    let as_alternative = match operator.as_deref() {
        Some("|") => true,
        Some("=>") => false,
        _ => return Some(tree),
    };
    let mut operands = tree.into_nodes();
    let right = operands.pop().and_then(to_pattern);
    let left = operands.into_iter().next().and_then(to_pattern);
    if !as_alternative {
        return Some(
            Node::new(Kind::AsPattern)
                .with_field("value", left)
                .with_field("name", right),
        );
    }
    let mut alternatives = match left {
        Some(chain) if chain.kind() == Kind::AlternativePattern => chain,
        left => Node::new(Kind::AlternativePattern).with_field("alternatives", left),
    };
    alternatives.add_field("alternatives", right);
    Some(alternatives)
}

fn patterns(values: Value, what: &str) -> Result<Vec<Node>, crate::CstError> {
    Ok(values
        .into_nodes(what)?
        .into_iter()
        .filter_map(to_pattern)
        .collect())
}

/// `*name` inside an array or find pattern.
fn splat(var_field: Option<Node>) -> Option<Node> {
    var_field.map(|field| {
        Node::new(Kind::SplatParameter).with_field("name", field.into_first_node())
    })
}

pub(super) fn aryptn(constant: Value, pre: Value, rest: Value, post: Value) -> Handled {
    let mut node = Node::new(Kind::ArrayPattern)
        .with_field("class", constant.into_node("pattern class")?);
    node.add_children(patterns(pre, "array pattern")?);
    node.add_child(splat(rest.into_node("array pattern splat")?));
    node.add_children(patterns(post, "array pattern")?);
    Ok(node.into())
}

pub(super) fn fndptn(constant: Value, pre: Value, values: Value, post: Value) -> Handled {
    let mut node = Node::new(Kind::FindPattern)
        .with_field("class", constant.into_node("pattern class")?);
    node.add_child(splat(pre.into_node("find pattern splat")?));
    node.add_children(patterns(values, "find pattern")?);
    node.add_child(splat(post.into_node("find pattern splat")?));
    Ok(node.into())
}

pub(super) fn hshptn(cx: &mut Context, constant: Value, pairs: Value, rest: Value) -> Handled {
    let saw_double_star = cx.take_kwrest();
    let mut node = Node::new(Kind::HashPattern)
        .with_field("class", constant.into_node("pattern class")?);
    for pair in pairs.into_list("hash pattern pairs")? {
        let mut items = pair.into_list("hash pattern pair")?.into_iter();
        let (Some(key), value) = (items.next(), items.next()) else {
            return Err(err_msg!(Shape, "hash pattern pair must hold a key"));
        };
        let mut keyword = Node::new(Kind::KeywordPattern)
            .with_field("key", key.into_node("pattern key")?);
        if let Some(value) = value.unwrap_or_default().into_node("pattern value")? {
            keyword.add_field("value", to_pattern(value));
        }
        node.add_child(keyword);
    }
    match rest.into_node("hash pattern rest")? {
        // `**nil`
        Some(field) if field.first_node().is_none() => {
            node.add_child(Node::new(Kind::HashSplatNil));
        }
        Some(field) => {
            node.add_child(
                Node::new(Kind::HashSplatParameter).with_field("name", field.into_first_node()),
            );
        }
        None if saw_double_star => {
            node.add_child(Node::new(Kind::HashSplatParameter));
        }
        None => {}
    }
    Ok(node.into())
}

/// Splits `pattern if guard` into the pattern and its guard clause.
fn split_guard(pattern: Node) -> (Option<Node>, Option<Node>) {
    let guard = match pattern.kind() {
        Kind::IfModifier => Kind::IfGuard,
        Kind::UnlessModifier => Kind::UnlessGuard,
        _ => return (Some(pattern), None),
    };
    let mut parts = pattern.into_nodes();
    let condition = parts.pop();
    let body = parts.into_iter().next();
    (body, Some(Node::new(guard).with_field("condition", condition)))
}

/// An `in` clause. With neither a body nor further clauses it is a one-line
/// match whose kind depends on the most recent `in`/`=>` token.
pub(super) fn in_(cx: &Context, pattern: Value, stmts: Value, consequent: Value) -> Handled {
    let pattern = pattern.require_node("in pattern")?;
    let consequent = consequent.into_node("in consequent")?;
    if consequent.is_none() && stmts.is_nil() {
        return Ok(Node::new(cx.oneline_pattern())
            .with_field("pattern", to_pattern(pattern))
            .into());
    }
    let mut case_match = match consequent {
        None => Node::new(Kind::CaseMatch),
        Some(else_node) if else_node.kind() == Kind::Else => {
            Node::new(Kind::CaseMatch).with_field("else", else_node)
        }
        Some(case_match) => case_match,
    };
    let (pattern, guard) = split_guard(pattern);
    let mut clause = Node::new(Kind::InClause)
        .with_field("pattern", pattern.and_then(to_pattern))
        .with_field("guard", guard);
    let body = stmts.into_nodes("in body")?;
    if !body.is_empty() {
        clause.add_field("body", Node::new(Kind::Then).with_children(body));
    }
    case_match.prepend_field("clauses", clause);
    Ok(case_match.into())
}
