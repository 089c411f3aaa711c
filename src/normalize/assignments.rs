//! Single, operator and multiple assignment.

use super::value::Value;
use super::{unwrap_var_field, Handled};
use crate::cst::{Kind, Node};

/// Right-hand sides with several values become a `right_assignment_list`.
fn right_side(value: Value) -> Result<Option<Node>, crate::CstError> {
    match value {
        Value::List(mut items) if items.len() == 1 => {
            items.pop().unwrap_or_default().into_node("assigned value")
        }
        Value::List(items) => Ok(Some(
            Node::new(Kind::RightAssignmentList)
                .with_children(Value::List(items).into_nodes("assigned values")?),
        )),
        other => other.into_node("assigned value"),
    }
}

pub(super) fn assign(left: Value, right: Value) -> Handled {
    let left = unwrap_var_field(left.require_node("assignment target")?);
    Ok(Node::new(Kind::Assignment)
        .with_field("left", left)
        .with_field("right", right_side(right)?)
        .into())
}

pub(super) fn opassign(left: Value, operator: Value, right: Value) -> Handled {
    let left = unwrap_var_field(left.require_node("assignment target")?);
    let mut node = Node::new(Kind::OperatorAssignment);
    node.add_field("left", left);
    node.add_token(operator.token_text());
    node.add_field("right", right.into_node("assigned value")?);
    Ok(node.into())
}

pub(super) fn massign(left: Value, right: Value) -> Handled {
    let right = match right {
        Value::List(items) if items.is_empty() => None,
        other => right_side(other)?,
    };
    Ok(Node::new(Kind::Assignment)
        .with_field(
            "left",
            Node::new(Kind::LeftAssignmentList)
                .with_children(left.into_nodes("assignment targets")?),
        )
        .with_field("right", right)
        .into())
}

// ============================================================================
// LEFT-HAND SIDES
// ============================================================================

pub(super) fn mlhs_new() -> Handled {
    Ok(Value::List(Vec::new()))
}

pub(super) fn mlhs_add(mlhs: Value, part: Value) -> Handled {
    let mut items = mlhs.into_list("assignment targets")?;
    items.push(unwrap_var_field(part.require_node("assignment target")?).into());
    Ok(Value::List(items))
}

pub(super) fn mlhs_add_star(mlhs: Value, part: Value) -> Handled {
    let mut items = mlhs.into_list("assignment targets")?;
    let rest = part.into_node("rest target")?.and_then(unwrap_var_field);
    items.push(Node::new(Kind::RestAssignment).with_child(rest).into());
    Ok(Value::List(items))
}

pub(super) fn mlhs_add_post(star: Value, post: Value) -> Handled {
    let mut items = star.into_list("assignment targets")?;
    items.extend(post.into_list("assignment targets")?);
    Ok(Value::List(items))
}

pub(super) fn mlhs_paren(contents: Value) -> Handled {
    Ok(Node::new(Kind::DestructuredLeftAssignment)
        .with_children(contents.into_nodes("destructured targets")?)
        .into())
}

pub(super) fn var_field(name: Value) -> Handled {
    if name.is_symbol("nil") {
        return Ok(Node::new(Kind::VarField).into());
    }
    Ok(Node::new(Kind::VarField)
        .with_field("name", name.into_node("variable name")?)
        .into())
}

// ============================================================================
// RIGHT-HAND SIDES
// ============================================================================

/// Values collected so far, whether still a list node or already a plain
/// list after a splat.
fn mrhs_values(mrhs: Value) -> Result<Vec<Value>, crate::CstError> {
    match mrhs {
        Value::Node(list) => Ok(list.into_nodes().into_iter().map(Value::Node).collect()),
        other => other.into_list("assigned values"),
    }
}

pub(super) fn mrhs_new() -> Handled {
    Ok(Node::new(Kind::RightAssignmentList).into())
}

pub(super) fn mrhs_new_from_args(arguments: Value) -> Handled {
    Ok(Node::new(Kind::RightAssignmentList)
        .with_children(arguments.into_nodes("assigned values")?)
        .into())
}

pub(super) fn mrhs_add(mrhs: Value, part: Value) -> Handled {
    match mrhs {
        Value::Node(mut list) => {
            list.add_child(part.into_node("assigned value")?);
            Ok(list.into())
        }
        other => {
            let mut items = other.into_list("assigned values")?;
            items.push(part);
            Ok(Value::List(items))
        }
    }
}

/// A splat turns the values into a plain list.
pub(super) fn mrhs_add_star(mrhs: Value, part: Value) -> Handled {
    let mut items = mrhs_values(mrhs)?;
    items.push(
        Node::new(Kind::SplatArgument)
            .with_child(part.into_node("splatted value")?)
            .into(),
    );
    Ok(Value::List(items))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Value {
        Node::new(Kind::VarField)
            .with_field("name", Node::leaf(Kind::Identifier, name))
            .into()
    }

    fn int(text: &str) -> Value {
        Node::leaf(Kind::Integer, text).into()
    }

    #[test]
    fn test_simple_assignment_unwraps_target() {
        let node = assign(var("x"), int("1")).unwrap();
        assert_eq!(
            node.as_node().unwrap().pretty(),
            "(assignment\n  left: (identifier)\n  right: (integer))"
        );
    }

    #[test]
    fn test_multiple_assignment() {
        let lhs = mlhs_add(mlhs_add(mlhs_new().unwrap(), var("a")).unwrap(), var("b")).unwrap();
        let rhs = mrhs_new_from_args(Value::List(vec![int("1")])).unwrap();
        let rhs = mrhs_add(rhs, int("2")).unwrap();
        let node = massign(lhs, rhs).unwrap();
        assert_eq!(
            node.as_node().unwrap().pretty(),
            "(assignment\n  left: (left_assignment_list\n    (identifier)\n    (identifier))\n  right: (right_assignment_list\n    (integer)\n    (integer)))"
        );
    }

    #[test]
    fn test_splat_on_right_yields_list() {
        let value = mrhs_add_star(mrhs_new().unwrap(), int("1")).unwrap();
        assert!(matches!(&value, Value::List(items) if items.len() == 1));
        let node = massign(Value::List(vec![var("a")]), value).unwrap();
        assert_eq!(
            node.as_node().unwrap().pretty(),
            "(assignment\n  left: (left_assignment_list\n    (var_field\n      name: (identifier)))\n  right: (splat_argument\n    (integer)))"
        );
    }

    #[test]
    fn test_list_of_values_in_single_assignment() {
        let node = assign(var("x"), Value::List(vec![int("1"), int("2")])).unwrap();
        assert_eq!(
            node.as_node().unwrap().pretty(),
            "(assignment\n  left: (identifier)\n  right: (right_assignment_list\n    (integer)\n    (integer)))"
        );
    }

    #[test]
    fn test_nil_var_field_is_empty() {
        let node = var_field(Value::Symbol("nil".into())).unwrap();
        assert_eq!(node.as_node().unwrap().pretty(), "(var_field)");
    }
}
