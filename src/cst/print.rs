//! Textual rendering of a tree in the tree-sitter test format.
//!
//! `(kind child...)`, one child per line, two spaces of indentation per depth,
//! `field: ` before children that occupy a named slot. Tokens are not printed.
//! The root is printed without a leading newline and without its own field.

use super::{Child, Field, Node};

pub(super) fn render(root: &Node) -> String {
    let mut out = String::new();
    write_node(root, 0, &mut out);
    out
}

fn write_node(node: &Node, indent: usize, out: &mut String) {
    if indent != 0 {
        out.push('\n');
        out.extend(std::iter::repeat(' ').take(indent));
        if let Field::Named(name) = node.field() {
            out.push_str(name);
            out.push_str(": ");
        }
    }
    out.push('(');
    out.push_str(node.kind().as_str());
    for child in node.children() {
        if let Child::Node(child) = child {
            write_node(child, indent + 2, out);
        }
    }
    out.push(')');
}

#[cfg(test)]
mod tests {
    use crate::cst::{Kind, Node};

    #[test]
    fn test_leaf_prints_without_tokens() {
        assert_eq!(Node::leaf(Kind::Identifier, "x").pretty(), "(identifier)");
    }

    #[test]
    fn test_nested_fields_and_indentation() {
        let tree = Node::new(Kind::Program).with_child(
            Node::new(Kind::Assignment)
                .with_field("left", Node::leaf(Kind::Identifier, "x"))
                .with_field("right", Node::leaf(Kind::Integer, "1")),
        );
        assert_eq!(
            tree.pretty(),
            "(program\n  (assignment\n    left: (identifier)\n    right: (integer)))"
        );
    }
}
