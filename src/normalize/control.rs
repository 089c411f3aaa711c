//! Statement lists, bodies and control-flow productions.

use super::context::Context;
use super::value::Value;
use super::{statements, Handled};
use crate::cst::{Kind, Node};

// ============================================================================
// STATEMENT LISTS
// ============================================================================

pub(super) fn program(cx: &Context, stmts: Value) -> Handled {
    let mut node = Node::new(Kind::Program).with_children(stmts.into_nodes("program")?);
    if cx.has_end_marker() {
        node.add_child(Node::new(Kind::Uninterpreted));
    }
    Ok(node.into())
}

pub(super) fn stmts_new() -> Handled {
    Ok(Value::List(Vec::new()))
}

pub(super) fn stmts_add(cx: &mut Context, stmts: Value, stmt: Value) -> Handled {
    cx.saw_statement();
    match stmts {
        Value::Node(mut node) => {
            node.add_child(stmt.into_node("statement")?);
            Ok(node.into())
        }
        other => {
            let mut items = other.into_list("statement list")?;
            if !stmt.is_nil() {
                items.push(stmt);
            }
            Ok(Value::List(items))
        }
    }
}

/// An explicit `;` right before this point is an empty statement; any other
/// void statement vanishes.
pub(super) fn void_stmt(cx: &Context) -> Handled {
    if cx.semicolon_just_seen() {
        Ok(Node::new(Kind::EmptyStatement).into())
    } else {
        Ok(Value::Nil)
    }
}

pub(super) fn bodystmt(
    cx: &mut Context,
    stmts: Value,
    rescued: Value,
    elsed: Value,
    ensured: Value,
) -> Handled {
    cx.saw_body_statement();
    let mut items = stmts.into_list("body statements")?;
    items.extend(rescued.into_items());
    if !elsed.is_nil() {
        let else_node = Node::new(Kind::Else).with_children(elsed.into_nodes("else body")?);
        items.push(else_node.into());
    }
    if !ensured.is_nil() {
        items.push(ensured);
    }
    Ok(Value::List(items))
}

pub(super) fn begin(stmts: Value) -> Handled {
    Ok(Node::new(Kind::Begin)
        .with_children(statements(stmts, "begin body")?)
        .into())
}

pub(super) fn begin_block(stmts: Value) -> Handled {
    Ok(Node::new(Kind::BeginBlock)
        .with_children(statements(stmts, "BEGIN body")?)
        .into())
}

pub(super) fn end_block(stmts: Value) -> Handled {
    Ok(Node::new(Kind::EndBlock)
        .with_children(statements(stmts, "END body")?)
        .into())
}

// ============================================================================
// CONDITIONALS AND LOOPS
// ============================================================================

/// Shared shape of `if`, `unless` and `elsif`.
fn conditional(kind: Kind, predicate: Value, then_stmts: Value, alternative: Value) -> Handled {
    let mut node = Node::new(kind).with_field("condition", predicate.into_node("condition")?);
    let then = then_stmts.into_nodes("consequence")?;
    if !then.is_empty() {
        node.add_field("consequence", Node::new(Kind::Then).with_children(then));
    }
    node.add_field("alternative", alternative.into_node("alternative")?);
    Ok(node.into())
}

pub(super) fn if_(predicate: Value, then_stmts: Value, else_stmts: Value) -> Handled {
    conditional(Kind::If, predicate, then_stmts, else_stmts)
}

pub(super) fn unless(predicate: Value, then_stmts: Value, else_stmts: Value) -> Handled {
    conditional(Kind::Unless, predicate, then_stmts, else_stmts)
}

pub(super) fn elsif(predicate: Value, then_stmts: Value, else_stmts: Value) -> Handled {
    conditional(Kind::Elsif, predicate, then_stmts, else_stmts)
}

pub(super) fn else_(stmts: Value) -> Handled {
    Ok(Node::new(Kind::Else)
        .with_children(statements(stmts, "else body")?)
        .into())
}

/// `body if condition` and friends.
pub(super) fn modifier(kind: Kind, predicate: Value, statement: Value) -> Handled {
    Ok(Node::new(kind)
        .with_field("body", statement.into_node("modified statement")?)
        .with_field("condition", predicate.into_node("modifier condition")?)
        .into())
}

pub(super) fn ifop(predicate: Value, truthy: Value, falsy: Value) -> Handled {
    Ok(Node::new(Kind::Conditional)
        .with_field("condition", predicate.into_node("condition")?)
        .with_field("consequence", truthy.into_node("consequence")?)
        .with_field("alternative", falsy.into_node("alternative")?)
        .into())
}

/// `while` and `until` loops always carry a `do` body.
pub(super) fn loop_(kind: Kind, predicate: Value, stmts: Value) -> Handled {
    Ok(Node::new(kind)
        .with_field("condition", predicate.into_node("loop condition")?)
        .with_field(
            "body",
            Node::new(Kind::Do).with_children(stmts.into_nodes("loop body")?),
        )
        .into())
}

pub(super) fn for_(iterator: Value, enumerable: Value, stmts: Value) -> Handled {
    let pattern = match iterator {
        Value::Node(node) if node.kind() == Kind::VarField => node.into_first_node(),
        other => Some(
            Node::new(Kind::LeftAssignmentList).with_children(other.into_nodes("for iterator")?),
        ),
    };
    let mut node = Node::new(Kind::For)
        .with_field("pattern", pattern)
        .with_field(
            "value",
            Node::new(Kind::In).with_child(enumerable.into_node("for enumerable")?),
        );
    if !stmts.is_nil() {
        node.add_field(
            "body",
            Node::new(Kind::Do).with_children(stmts.into_nodes("for body")?),
        );
    }
    Ok(node.into())
}

// ============================================================================
// CASE / WHEN
// ============================================================================

pub(super) fn case(switch: Value, consequent: Value) -> Handled {
    let mut node = consequent
        .into_node("case clauses")?
        .unwrap_or_else(|| Node::new(Kind::Case));
    node.prepend_field("value", switch.into_node("case value")?);
    Ok(node.into())
}

pub(super) fn when(predicate: Value, stmts: Value, consequent: Value) -> Handled {
    let mut case = match consequent.into_node("when consequent")? {
        None => Node::new(Kind::Case),
        Some(else_node) if else_node.kind() == Kind::Else => {
            Node::new(Kind::Case).with_child(else_node)
        }
        Some(case) => case,
    };
    let mut clause = Node::new(Kind::When);
    for pattern in predicate.into_nodes("when patterns")? {
        clause.add_field("pattern", Node::new(Kind::Pattern).with_child(pattern));
    }
    let body = stmts.into_nodes("when body")?;
    if !body.is_empty() {
        clause.add_field("body", Node::new(Kind::Then).with_children(body));
    }
    case.prepend_child(clause);
    Ok(case.into())
}

// ============================================================================
// EXCEPTIONS
// ============================================================================

pub(super) fn rescue(
    exceptions: Value,
    variable: Value,
    stmts: Value,
    consequent: Value,
) -> Handled {
    let mut clause = Node::new(Kind::Rescue);
    if !exceptions.is_nil() {
        let exceptions = match exceptions {
            Value::Node(list) if list.kind() == Kind::RightAssignmentList => list.into_nodes(),
            other => other.into_nodes("rescue exceptions")?,
        };
        clause.add_field(
            "exceptions",
            Node::new(Kind::Exceptions).with_children(exceptions),
        );
    }
    if let Some(variable) = variable.into_node("rescue variable")? {
        let variable = super::unwrap_var_field(variable);
        clause.add_field(
            "variable",
            Node::new(Kind::ExceptionVariable).with_child(variable),
        );
    }
    let body = stmts.into_nodes("rescue body")?;
    if !body.is_empty() {
        clause.add_field("body", Node::new(Kind::Then).with_children(body));
    }
    let mut clauses = consequent.into_list("rescue clauses")?;
    clauses.insert(0, clause.into());
    Ok(Value::List(clauses))
}

pub(super) fn rescue_mod(statement: Value, rescued: Value) -> Handled {
    Ok(Node::new(Kind::RescueModifier)
        .with_field("body", statement.into_node("rescued statement")?)
        .with_field("handler", rescued.into_node("rescue handler")?)
        .into())
}

pub(super) fn ensure(stmts: Value) -> Handled {
    Ok(Node::new(Kind::Ensure)
        .with_children(stmts.into_nodes("ensure body")?)
        .into())
}
