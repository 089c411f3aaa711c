//! Method, class and module definitions, parameters, lambdas and aliases.

use super::context::Context;
use super::value::Value;
use super::{statements, Handled};
use crate::cst::{Kind, Node};
use crate::err_msg;

// ============================================================================
// NAMES AND PARAMETERS
// ============================================================================

/// Classifies a method name. Symbols, operators, constants, globals and
/// setters keep their kind. A `name=` identifier becomes a setter, a
/// capitalized one a constant. Anything else (keywords, variables) reads
/// as an identifier.
pub fn method_name(mut node: Node) -> Node {
    match node.kind() {
        Kind::SimpleSymbol
        | Kind::Operator
        | Kind::DelimitedSymbol
        | Kind::Constant
        | Kind::GlobalVariable
        | Kind::Setter => node,
        Kind::Identifier => {
            if let Some(base) = node.token().and_then(|name| name.strip_suffix('=')) {
                return Node::new(Kind::Setter)
                    .with_field("name", Node::leaf(Kind::Identifier, base));
            }
            if node.starts_uppercase() {
                node.retag(Kind::Constant);
            }
            node
        }
        _ => {
            node.retag(Kind::Identifier);
            node
        }
    }
}

/// Rewrites assignment-target shapes into parameter shapes, recursively
/// through destructuring.
pub fn to_parameters(params: Vec<Node>) -> Vec<Node> {
    params
        .into_iter()
        .map(|param| match param.kind() {
            Kind::DestructuredLeftAssignment => Node::new(Kind::DestructuredParameter)
                .with_children(to_parameters(param.into_nodes())),
            Kind::RestAssignment => {
                Node::new(Kind::SplatParameter).with_field("name", param.into_first_node())
            }
            _ => param,
        })
        .collect()
}

/// Splits a two-element `[name, value]` pair.
fn pair(value: Value, what: &str) -> Result<(Value, Value), crate::CstError> {
    let mut items = value.into_list(what)?.into_iter();
    match (items.next(), items.next(), items.next()) {
        (Some(name), value, None) => Ok((name, value.unwrap_or_default())),
        _ => Err(err_msg!(Shape, "{} must be a [name, value] pair", what)),
    }
}

pub(super) fn params(
    required: Value,
    optional: Value,
    rest: Value,
    post: Value,
    keywords: Value,
    keyword_rest: Value,
    block: Value,
) -> Handled {
    let mut out = required.into_nodes("required parameters")?;
    for item in optional.into_list("optional parameters")? {
        let (name, value) = pair(item, "optional parameter")?;
        out.push(
            Node::new(Kind::OptionalParameter)
                .with_field("name", name.into_node("parameter name")?)
                .with_field("value", value.into_node("parameter default")?),
        );
    }
    match rest {
        Value::Node(node) if node.kind() == Kind::ForwardArgument => {
            out.push(Node::new(Kind::ForwardParameter));
        }
        other => out.extend(other.into_node("rest parameter")?),
    }
    out.extend(post.into_nodes("post parameters")?);
    for item in keywords.into_list("keyword parameters")? {
        let (label, value) = pair(item, "keyword parameter")?;
        let name = label.token_text();
        let name = name.strip_suffix(':').unwrap_or(&name);
        let mut keyword = Node::new(Kind::KeywordParameter);
        keyword.add_field("name", Node::leaf(Kind::Identifier, name));
        if !value.is_falsy() {
            keyword.add_field("value", value.into_node("keyword default")?);
        }
        out.push(keyword);
    }
    match keyword_rest {
        Value::Symbol(sym) if sym == "nil" => out.push(Node::new(Kind::HashSplatNil)),
        Value::Node(node) if node.kind() == Kind::ForwardArgument => {
            out.push(Node::new(Kind::ForwardParameter));
        }
        other => out.extend(other.into_node("keyword rest parameter")?),
    }
    if !block.is_symbol("&") {
        out.extend(block.into_node("block parameter")?);
    }
    Ok(out.into())
}

pub(super) fn rest_param(name: Value) -> Handled {
    Ok(Node::new(Kind::SplatParameter)
        .with_field("name", name.into_node("splat name")?)
        .into())
}

pub(super) fn kwrest_param(name: Value) -> Handled {
    Ok(Node::new(Kind::HashSplatParameter)
        .with_field("name", name.into_node("double splat name")?)
        .into())
}

pub(super) fn nokw_param() -> Handled {
    Ok(Node::new(Kind::HashSplatNil).into())
}

pub(super) fn blockarg(name: Value) -> Handled {
    Ok(Node::new(Kind::BlockParameter)
        .with_field("name", name.into_node("block parameter name")?)
        .into())
}

pub(super) fn excessed_comma() -> Handled {
    Ok(Value::Nil)
}

/// Builds a parameter list node. A parenthesized group always yields one
/// when `keep_empty_parens` is set; a bare list only when non-empty.
fn parameter_list(
    kind: Kind,
    params: Value,
    keep_empty_parens: bool,
) -> Result<Option<Node>, crate::CstError> {
    let params = match params {
        Value::Node(paren) if paren.kind() == Kind::ParenthesizedStatements => {
            let params = paren.into_nodes();
            if params.is_empty() && !keep_empty_parens {
                return Ok(None);
            }
            params
        }
        Value::List(items) if !items.is_empty() => Value::List(items).into_nodes("parameters")?,
        _ => return Ok(None),
    };
    Ok(Some(Node::new(kind).with_children(params)))
}

// ============================================================================
// DEFINITIONS
// ============================================================================

fn with_body(mut node: Node, body: Value, what: &str) -> Handled {
    let body = statements(body, what)?;
    if !body.is_empty() {
        node.add_field("body", Node::new(Kind::BodyStatement).with_children(body));
    }
    Ok(node.into())
}

pub(super) fn def(name: Value, params: Value, body: Value) -> Handled {
    let mut node = Node::new(Kind::Method)
        .with_field("name", method_name(name.require_node("method name")?));
    node.add_field(
        "parameters",
        parameter_list(Kind::MethodParameters, params, true)?,
    );
    with_body(node, body, "method body")
}

pub(super) fn defs(
    object: Value,
    _operator: Value,
    name: Value,
    params: Value,
    body: Value,
) -> Handled {
    let object = match object {
        Value::Node(paren) if paren.kind() == Kind::ParenthesizedStatements => {
            paren.into_first_node()
        }
        other => other.into_node("singleton object")?,
    };
    let mut node = Node::new(Kind::SingletonMethod)
        .with_field("object", object)
        .with_field("name", method_name(name.require_node("method name")?));
    node.add_field(
        "parameters",
        parameter_list(Kind::MethodParameters, params, true)?,
    );
    with_body(node, body, "method body")
}

pub(super) fn class(name: Value, superclass: Value, body: Value) -> Handled {
    let mut node = Node::new(Kind::Class).with_field("name", name.into_node("class name")?);
    if let Some(superclass) = superclass.into_node("superclass")? {
        node.add_field(
            "superclass",
            Node::new(Kind::Superclass).with_child(superclass),
        );
    }
    with_body(node, body, "class body")
}

pub(super) fn module(name: Value, body: Value) -> Handled {
    let node = Node::new(Kind::Module).with_field("name", name.into_node("module name")?);
    with_body(node, body, "module body")
}

pub(super) fn sclass(object: Value, body: Value) -> Handled {
    let node = Node::new(Kind::SingletonClass)
        .with_field("value", object.into_node("singleton object")?);
    with_body(node, body, "singleton class body")
}

/// `-> (params) { body }`. The body's shape follows whichever of a plain
/// statement list or a full body statement completed last.
pub(super) fn lambda(cx: &Context, params: Value, stmts: Value) -> Handled {
    let mut node = Node::new(Kind::Lambda);
    node.add_field(
        "parameters",
        parameter_list(Kind::LambdaParameters, params, false)?,
    );
    let body = stmts.into_nodes("lambda body")?;
    if !body.is_empty() {
        let (outer, inner) = cx.lambda_body();
        node.add_field(
            "body",
            Node::new(outer).with_field("body", Node::new(inner).with_children(body)),
        );
    }
    Ok(node.into())
}

// ============================================================================
// ALIAS / UNDEF
// ============================================================================

pub(super) fn alias(left: Value, right: Value) -> Handled {
    Ok(Node::new(Kind::Alias)
        .with_field("name", method_name(left.require_node("alias name")?))
        .with_field("alias", method_name(right.require_node("aliased name")?))
        .into())
}

pub(super) fn undef(methods: Value) -> Handled {
    Ok(Node::new(Kind::Undef)
        .with_children(
            methods
                .into_nodes("undefined methods")?
                .into_iter()
                .map(method_name),
        )
        .into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_name_classes() {
        let setter = method_name(Node::leaf(Kind::Identifier, "name="));
        assert_eq!(setter.pretty(), "(setter\n  name: (identifier))");
        assert_eq!(method_name(Node::leaf(Kind::Identifier, "Foo")).kind(), Kind::Constant);
        assert_eq!(method_name(Node::leaf(Kind::InstanceVariable, "@a")).kind(), Kind::Identifier);
        assert_eq!(method_name(Node::leaf(Kind::Operator, "+")).kind(), Kind::Operator);
    }

    #[test]
    fn test_method_name_is_idempotent() {
        for node in [
            Node::leaf(Kind::Identifier, "name="),
            Node::leaf(Kind::Identifier, "Foo"),
            Node::leaf(Kind::Identifier, "foo"),
            Node::leaf(Kind::ClassVariable, "@@x"),
            Node::leaf(Kind::SimpleSymbol, ":x"),
        ] {
            let once = method_name(node);
            assert_eq!(method_name(once.clone()), once);
        }
    }

    #[test]
    fn test_destructuring_becomes_parameters() {
        let rest = Node::new(Kind::RestAssignment).with_child(Node::leaf(Kind::Identifier, "r"));
        let nested = Node::new(Kind::DestructuredLeftAssignment)
            .with_children([Node::leaf(Kind::Identifier, "a"), rest]);
        let params = to_parameters(vec![nested]);
        assert_eq!(
            params[0].pretty(),
            "(destructured_parameter\n  (identifier)\n  (splat_parameter\n    name: (identifier)))"
        );
    }

    #[test]
    fn test_params_flatten_in_order() {
        let list = params(
            Value::List(vec![Node::leaf(Kind::Identifier, "a").into()]),
            Value::List(vec![Value::List(vec![
                Node::leaf(Kind::Identifier, "b").into(),
                Node::leaf(Kind::Integer, "1").into(),
            ])]),
            Node::new(Kind::SplatParameter).into(),
            Value::Nil,
            Value::List(vec![Value::List(vec![
                Node::leaf(Kind::HashKeySymbol, "k:").into(),
                Value::Bool(false),
            ])]),
            Value::Symbol("nil".into()),
            Value::Nil,
        )
        .unwrap();
        let kinds: Vec<Kind> = list.into_nodes("test").unwrap().iter().map(Node::kind).collect();
        assert_eq!(
            kinds,
            vec![
                Kind::Identifier,
                Kind::OptionalParameter,
                Kind::SplatParameter,
                Kind::KeywordParameter,
                Kind::HashSplatNil,
            ]
        );
    }

    #[test]
    fn test_def_with_empty_parens_keeps_parameter_list() {
        let node = def(
            Node::leaf(Kind::Identifier, "f").into(),
            Node::new(Kind::ParenthesizedStatements).into(),
            Value::List(vec![]),
        )
        .unwrap();
        assert_eq!(
            node.as_node().unwrap().pretty(),
            "(method\n  name: (identifier)\n  parameters: (method_parameters))"
        );
    }

    #[test]
    fn test_lambda_body_follows_context() {
        let mut cx = Context::new();
        cx.saw_body_statement();
        let body = Value::List(vec![Node::new(Kind::Nil).into()]);
        let node = lambda(&cx, Value::List(vec![]), body).unwrap();
        assert_eq!(
            node.as_node().unwrap().pretty(),
            "(lambda\n  body: (do_block\n    body: (body_statement\n      (nil))))"
        );
    }
}
