//! Transient handler results.
//!
//! A handler returns one node, a transient list (argument lists, statement
//! lists, parameter pairs), or a pass-through value such as a bare token.

use crate::cst::{Kind, Node};
use crate::{err_msg, CstError};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent.
    #[default]
    Nil,
    Bool(bool),
    /// Scanner token text, e.g. raw string content or an operator spelling.
    Text(String),
    /// A bare symbolic argument such as `call`, `nil`, `&` or `not`.
    Symbol(String),
    Node(Node),
    List(Vec<Value>),
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Node(node)
    }
}

impl From<Option<Node>> for Value {
    fn from(node: Option<Node>) -> Self {
        node.map_or(Value::Nil, Value::Node)
    }
}

impl From<Vec<Node>> for Value {
    fn from(nodes: Vec<Node>) -> Self {
        Value::List(nodes.into_iter().map(Value::Node).collect())
    }
}

impl Value {
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Absent or `false`.
    pub fn is_falsy(&self) -> bool {
        matches!(self, Value::Nil | Value::Bool(false))
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn kind(&self) -> Option<Kind> {
        self.as_node().map(Node::kind)
    }

    pub fn is_kind(&self, kind: Kind) -> bool {
        self.kind() == Some(kind)
    }

    /// A list with no elements. Absent values are not lists.
    pub fn is_empty_list(&self) -> bool {
        matches!(self, Value::List(items) if items.is_empty())
    }

    /// True for an absent value or an empty list.
    pub fn is_blank(&self) -> bool {
        self.is_nil() || self.is_empty_list()
    }

    /// Text of a token-like value: token text, a symbol name, or the first
    /// token of a node (`ident`, `op`, ...).
    pub fn text(&self) -> Option<&str> {
        match self {
            Value::Text(text) | Value::Symbol(text) => Some(text),
            Value::Node(node) => node.token(),
            _ => None,
        }
    }

    /// Like [`Value::text`] but absent values read as the empty string.
    pub fn token_text(&self) -> String {
        self.text().unwrap_or_default().to_string()
    }

    pub fn is_symbol(&self, name: &str) -> bool {
        matches!(self, Value::Symbol(sym) if sym == name)
    }

    /// Splat semantics: absent is empty, a list yields its items, anything
    /// else is a single item.
    pub fn into_items(self) -> Vec<Value> {
        match self {
            Value::Nil => Vec::new(),
            Value::List(items) => items,
            other => vec![other],
        }
    }

    /// Splats and keeps the nodes. Absent items are skipped; any other
    /// non-node item is a shape error.
    pub fn into_nodes(self, what: &str) -> Result<Vec<Node>, CstError> {
        let mut nodes = Vec::new();
        for item in self.into_items() {
            match item {
                Value::Node(node) => nodes.push(node),
                Value::Nil | Value::Bool(false) => {}
                other => {
                    return Err(err_msg!(Shape, "{} must hold nodes, found {:?}", what, other))
                }
            }
        }
        Ok(nodes)
    }

    /// Absent (or `false`) reads as `None`; a node as `Some`.
    pub fn into_node(self, what: &str) -> Result<Option<Node>, CstError> {
        match self {
            Value::Nil | Value::Bool(false) => Ok(None),
            Value::Node(node) => Ok(Some(node)),
            other => Err(err_msg!(Shape, "{} must be a node, found {:?}", what, other)),
        }
    }

    pub fn require_node(self, what: &str) -> Result<Node, CstError> {
        match self {
            Value::Node(node) => Ok(node),
            other => Err(err_msg!(Shape, "{} must be a node, found {:?}", what, other)),
        }
    }

    /// The items of a transient list. Absent reads as empty.
    pub fn into_list(self, what: &str) -> Result<Vec<Value>, CstError> {
        match self {
            Value::Nil => Ok(Vec::new()),
            Value::List(items) => Ok(items),
            other => Err(err_msg!(Shape, "{} must be a list, found {:?}", what, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_items_splats() {
        assert!(Value::Nil.into_items().is_empty());
        assert_eq!(Value::Bool(true).into_items(), vec![Value::Bool(true)]);
        let list = Value::List(vec![Value::Nil, Value::Text("a".into())]);
        assert_eq!(list.into_items().len(), 2);
    }

    #[test]
    fn test_into_nodes_skips_absent_and_rejects_text() {
        let list = Value::List(vec![
            Value::Node(Node::new(Kind::Nil)),
            Value::Nil,
            Value::Node(Node::new(Kind::True)),
        ]);
        assert_eq!(list.into_nodes("statements").map(|n| n.len()).ok(), Some(2));
        let bad = Value::List(vec![Value::Text("x".into())]);
        assert!(bad.into_nodes("statements").is_err());
    }

    #[test]
    fn test_text_reads_tokens_symbols_and_leaves() {
        assert_eq!(Value::Symbol("call".into()).text(), Some("call"));
        assert_eq!(Value::Node(Node::leaf(Kind::Operator, "**")).text(), Some("**"));
        assert_eq!(Value::Nil.token_text(), "");
    }
}
