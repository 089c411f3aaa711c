//! Heredoc relocation.
//!
//! Ripper attaches a heredoc's body where the heredoc is referenced, in the
//! middle of an expression. The target tree keeps only an empty
//! `heredoc_beginning` marker there and places the body right after the
//! statement that referenced it, as a sibling inside the nearest enclosing
//! statement sequence.

use crate::cst::{Child, Kind, Node};

/// Moves every heredoc body in `root` to its enclosing statement sequence.
/// Bodies with no enclosing sequence (a non-container root) are returned.
pub fn relocate_heredocs(root: &mut Node) -> Vec<Node> {
    visit(root, Vec::new())
}

fn visit(tree: &mut Node, mut docs: Vec<Node>) -> Vec<Node> {
    match tree.kind() {
        Kind::HeredocBody => {
            docs.push(extract(tree));
            docs
        }
        kind if kind.is_statement_sequence() => {
            let mut children: Vec<Child> = docs.into_iter().map(Child::Node).collect();
            for child in tree.take_children() {
                match child {
                    Child::Node(mut node) => {
                        let nested = visit(&mut node, Vec::new());
                        children.push(Child::Node(node));
                        children.extend(nested.into_iter().map(Child::Node));
                    }
                    token => children.push(token),
                }
            }
            tree.set_children(children);
            Vec::new()
        }
        _ => {
            for child in tree.nodes_mut() {
                docs = visit(child, docs);
            }
            docs
        }
    }
}

/// Empties `tree` into a standalone body and leaves a `heredoc_beginning`
/// marker in its place. The body always starts with content, and runs of
/// adjacent content keep only their first node.
fn extract(tree: &mut Node) -> Node {
    let mut doc = Node::new(Kind::HeredocBody);
    let mut previous = None;
    for child in tree.take_children() {
        let Child::Node(child) = child else {
            continue;
        };
        let kind = child.kind();
        if previous.is_none() && kind != Kind::HeredocContent {
            doc.add_child(Node::new(Kind::HeredocContent));
        }
        if !(previous == Some(Kind::HeredocContent) && kind == Kind::HeredocContent) {
            doc.add_child(child);
        }
        previous = Some(kind);
    }
    tree.retag(Kind::HeredocBeginning);
    doc
}
