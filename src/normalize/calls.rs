//! Method calls, argument lists, blocks and the jump keywords.

use super::definitions::to_parameters;
use super::value::Value;
use super::{statements, Handled};
use crate::cst::{Kind, Node};
use crate::err_msg;

// ============================================================================
// CALLS
// ============================================================================

pub(super) fn call(receiver: Value, operator: Value, message: Value) -> Handled {
    let mut node = Node::new(Kind::Call);
    node.add_field("receiver", receiver.into_node("call receiver")?);
    node.add_token(operator.token_text());
    // `recv.()` names no method.
    if message.is_symbol("call") {
        return Ok(node.into());
    }
    let mut message = message.into_node("call message")?;
    if let Some(name) = message.as_mut() {
        if name.kind() == Kind::Identifier && name.starts_uppercase() {
            name.retag(Kind::Constant);
        }
    }
    node.add_field("method", message);
    Ok(node.into())
}

pub(super) fn fcall(message: Value) -> Handled {
    call(Value::Nil, Value::Text(".".into()), message)
}

pub(super) fn command(message: Value, arguments: Value) -> Handled {
    command_call(Value::Nil, Value::Text(".".into()), message, arguments)
}

pub(super) fn command_call(
    receiver: Value,
    operator: Value,
    message: Value,
    arguments: Value,
) -> Handled {
    method_add_arg(call(receiver, operator, message)?, arguments)
}

pub(super) fn field(receiver: Value, operator: Value, name: Value) -> Handled {
    command_call(receiver, operator, name, Value::List(Vec::new()))
}

/// Attaches an argument list. An absent list means `()` was written; an empty
/// one means nothing was.
pub(super) fn method_add_arg(method: Value, arguments: Value) -> Handled {
    let mut method = method.require_node("call target")?;
    if arguments.is_nil() {
        method.add_field("arguments", Node::new(Kind::ArgumentList));
        return Ok(method.into());
    }
    let items = arguments.into_items();
    if !items.is_empty() {
        let arguments = Value::List(items).into_nodes("arguments")?;
        method.add_field(
            "arguments",
            Node::new(Kind::ArgumentList).with_children(arguments),
        );
    }
    Ok(method.into())
}

pub(super) fn method_add_block(method: Value, block: Value) -> Handled {
    let mut method = method.require_node("block target")?;
    let mut block = block.into_node("block")?;
    let kind = method.kind();
    if matches!(kind, Kind::Break | Kind::Return | Kind::Next) {
        if let Some(block) = block.take() {
            // `break foo do ... end`: the block belongs to the call.
            let target = method
                .first_node_mut()
                .and_then(Node::first_node_mut)
                .ok_or_else(|| err_msg!(Shape, "`{}` carries a block but no call", kind))?;
            target.add_field("block", block);
            return Ok(method.into());
        }
    }
    if kind == Kind::Super {
        method = Node::new(Kind::Call).with_field("method", method);
    }
    method.add_field("block", block);
    Ok(method.into())
}

pub(super) fn aref(collection: Value, index: Value) -> Handled {
    Ok(Node::new(Kind::ElementReference)
        .with_field("object", collection.into_node("indexed object")?)
        .with_children(index.into_nodes("index arguments")?)
        .into())
}

// ============================================================================
// ARGUMENT LISTS
// ============================================================================

pub(super) fn args_new() -> Handled {
    Ok(Value::List(Vec::new()))
}

pub(super) fn args_add(arguments: Value, argument: Value) -> Handled {
    let mut items = arguments.into_list("argument list")?;
    match argument {
        Value::Nil => {}
        // Trailing `key: value` pairs become direct arguments.
        Value::Node(hash) if hash.kind() == Kind::BareAssocHash => {
            items.extend(hash.into_nodes().into_iter().map(Value::Node));
        }
        other => items.push(other),
    }
    Ok(Value::List(items))
}

/// `false` means no block argument; an absent one is an anonymous `&`.
pub(super) fn args_add_block(arguments: Value, block: Value) -> Handled {
    let mut items = arguments.into_list("argument list")?;
    match block {
        Value::Bool(false) => {}
        Value::Nil => items.push(Node::new(Kind::BlockArgument).into()),
        other => items.push(
            Node::new(Kind::BlockArgument)
                .with_child(other.require_node("block argument")?)
                .into(),
        ),
    }
    Ok(Value::List(items))
}

pub(super) fn args_add_star(arguments: Value, argument: Value) -> Handled {
    let mut items = arguments.into_list("argument list")?;
    items.push(
        Node::new(Kind::SplatArgument)
            .with_child(argument.into_node("splat argument")?)
            .into(),
    );
    Ok(Value::List(items))
}

pub(super) fn args_forward() -> Handled {
    Ok(Node::new(Kind::ForwardArgument).into())
}

pub(super) fn arg_paren(arguments: Value) -> Handled {
    Ok(arguments)
}

pub(super) fn bare_assoc_hash(assocs: Value) -> Handled {
    Ok(Node::new(Kind::BareAssocHash)
        .with_children(assocs.into_nodes("hash arguments")?)
        .into())
}

// ============================================================================
// SUPER, YIELD AND JUMPS
// ============================================================================

pub(super) fn super_(arguments: Value) -> Handled {
    let items = arguments.into_items();
    let arguments = if items.is_empty() {
        Value::Nil
    } else {
        Value::List(items)
    };
    command(Node::new(Kind::Super).into(), arguments)
}

pub(super) fn zsuper() -> Handled {
    Ok(Node::new(Kind::Super).into())
}

/// `(a, b)` after a jump keyword is an argument list, not a grouping.
fn unparenthesize(arguments: Value) -> Value {
    match arguments {
        Value::Node(paren) if paren.kind() == Kind::ParenthesizedStatements => {
            paren.into_nodes().into()
        }
        other => other,
    }
}

pub(super) fn yield_(arguments: Value) -> Handled {
    let arguments = unparenthesize(arguments);
    let mut node = Node::new(Kind::Yield);
    if !arguments.is_nil() {
        node.add_child(
            Node::new(Kind::ArgumentList).with_children(arguments.into_nodes("yield arguments")?),
        );
    }
    Ok(node.into())
}

pub(super) fn yield0() -> Handled {
    Ok(Node::new(Kind::Yield).into())
}

/// `break`, `next` and `return` with arguments.
pub(super) fn jump(kind: Kind, arguments: Value) -> Handled {
    let arguments = unparenthesize(arguments);
    let mut node = Node::new(kind);
    if !arguments.is_blank() {
        node.add_child(
            Node::new(Kind::ArgumentList).with_children(arguments.into_nodes("jump arguments")?),
        );
    }
    Ok(node.into())
}

pub(super) fn return0() -> Handled {
    Ok(Node::new(Kind::Return).into())
}

// ============================================================================
// BLOCKS
// ============================================================================

pub(super) fn brace_block(block_var: Value, stmts: Value) -> Handled {
    let mut node = Node::new(Kind::Block);
    node.add_field("parameters", block_var.into_node("block parameters")?);
    let body = stmts.into_nodes("block body")?;
    if !body.is_empty() {
        node.add_field("body", Node::new(Kind::BlockBody).with_children(body));
    }
    Ok(node.into())
}

pub(super) fn do_block(block_var: Value, bodystmt: Value) -> Handled {
    let mut node = Node::new(Kind::DoBlock);
    node.add_field("parameters", block_var.into_node("block parameters")?);
    let body = statements(bodystmt, "do block body")?;
    if !body.is_empty() {
        node.add_field("body", Node::new(Kind::BodyStatement).with_children(body));
    }
    Ok(node.into())
}

pub(super) fn block_var(params: Value, locals: Value) -> Handled {
    let mut node = Node::new(Kind::BlockParameters)
        .with_children(to_parameters(params.into_nodes("block parameters")?));
    if let Value::List(locals) = locals {
        for local in locals {
            node.add_field("locals", local.into_node("block local")?);
        }
    }
    Ok(node.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Value {
        Node::leaf(Kind::Identifier, name).into()
    }

    fn render(value: Value) -> String {
        value.as_node().map(Node::pretty).unwrap_or_default()
    }

    #[test]
    fn test_uppercase_method_is_constant() {
        let node = call(
            Node::leaf(Kind::Constant, "Foo").into(),
            Value::Text(".".into()),
            ident("Bar"),
        )
        .unwrap();
        assert_eq!(render(node), "(call\n  receiver: (constant)\n  method: (constant))");
    }

    #[test]
    fn test_implicit_call_has_no_method() {
        let node = call(ident("f"), Value::Text(".".into()), Value::Symbol("call".into())).unwrap();
        assert_eq!(render(node), "(call\n  receiver: (identifier))");
    }

    #[test]
    fn test_empty_parens_add_empty_argument_list() {
        let node = method_add_arg(fcall(ident("f")).unwrap(), Value::Nil).unwrap();
        assert_eq!(render(node), "(call\n  method: (identifier)\n  arguments: (argument_list))");
        let node = method_add_arg(fcall(ident("f")).unwrap(), Value::List(vec![])).unwrap();
        assert_eq!(render(node), "(call\n  method: (identifier))");
    }

    #[test]
    fn test_bare_hash_arguments_are_flattened() {
        let pair = Node::new(Kind::Pair);
        let hash = Node::new(Kind::BareAssocHash).with_children([pair.clone(), pair]);
        let args = args_add(args_new().unwrap(), hash.into()).unwrap();
        assert_eq!(args.into_nodes("test").unwrap().len(), 2);
    }

    #[test]
    fn test_block_on_return_attaches_to_inner_call() {
        let inner = fcall(ident("foo")).unwrap();
        let ret = jump(Kind::Return, Value::List(vec![inner])).unwrap();
        let node = method_add_block(ret, Node::new(Kind::DoBlock).into()).unwrap();
        assert_eq!(
            render(node),
            "(return\n  (argument_list\n    (call\n      method: (identifier)\n      block: (do_block))))"
        );
    }

    #[test]
    fn test_block_on_zsuper_wraps_in_call() {
        let node = method_add_block(zsuper().unwrap(), Node::new(Kind::Block).into()).unwrap();
        assert_eq!(render(node), "(call\n  method: (super)\n  block: (block))");
    }

    #[test]
    fn test_return_of_parenthesized_values() {
        let paren = Node::new(Kind::ParenthesizedStatements)
            .with_children([Node::leaf(Kind::Integer, "1"), Node::leaf(Kind::Integer, "2")]);
        let node = jump(Kind::Return, paren.into()).unwrap();
        assert_eq!(
            render(node),
            "(return\n  (argument_list\n    (integer)\n    (integer)))"
        );
        assert_eq!(render(jump(Kind::Next, Value::List(vec![])).unwrap()), "(next)");
    }
}
