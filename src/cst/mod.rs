//! Concrete syntax tree model.
//!
//! A [`Node`] has a [`Kind`], a [`Field`] naming its slot in the parent, and an
//! ordered list of [`Child`]ren. Children are either nodes or opaque text
//! tokens. Tokens keep the spelling of identifiers, operators and literals
//! around for the handlers that inspect it; they are never printed.
//!
//! Mutation is append/prepend only. The one exception is the heredoc
//! relocation pass, which clears and rebuilds the children of a bounded set of
//! statement-sequence nodes.

mod kind;
mod print;

pub use kind::Kind;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// The role label of a node inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    /// A purely positional child.
    #[default]
    Unlabeled,
    Named(&'static str),
}

impl Field {
    pub fn name(self) -> Option<&'static str> {
        match self {
            Field::Unlabeled => None,
            Field::Named(name) => Some(name),
        }
    }
}

/// A child slot: either a node or a hidden text token.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Node(Node),
    Token(String),
}

impl Child {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Child::Node(node) => Some(node),
            Child::Token(_) => None,
        }
    }
}

/// A node of the normalized tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: Kind,
    field: Field,
    children: Vec<Child>,
}

// ============================================================================
// CONSTRUCTION AND ATTACHMENT
// ============================================================================

impl Node {
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            field: Field::Unlabeled,
            children: Vec::new(),
        }
    }

    /// A node holding a single text token, e.g. an identifier.
    pub fn leaf(kind: Kind, token: impl Into<String>) -> Self {
        Self::new(kind).with_token(token)
    }

    /// Attaches `child` under `name`. Absent children are ignored.
    pub fn add_field(&mut self, name: &'static str, child: impl Into<Option<Node>>) -> &mut Self {
        if let Some(mut child) = child.into() {
            child.field = Field::Named(name);
            self.children.push(Child::Node(child));
        }
        self
    }

    /// Like [`Node::add_field`] but inserts at position 0.
    pub fn prepend_field(
        &mut self,
        name: &'static str,
        child: impl Into<Option<Node>>,
    ) -> &mut Self {
        if let Some(mut child) = child.into() {
            child.field = Field::Named(name);
            self.children.insert(0, Child::Node(child));
        }
        self
    }

    /// Attaches an unlabeled child. Absent children are ignored.
    pub fn add_child(&mut self, child: impl Into<Option<Node>>) -> &mut Self {
        if let Some(mut child) = child.into() {
            child.field = Field::Unlabeled;
            self.children.push(Child::Node(child));
        }
        self
    }

    pub fn prepend_child(&mut self, child: impl Into<Option<Node>>) -> &mut Self {
        if let Some(mut child) = child.into() {
            child.field = Field::Unlabeled;
            self.children.insert(0, Child::Node(child));
        }
        self
    }

    /// Attaches each node in order as an unlabeled child.
    pub fn add_children<I: IntoIterator<Item = Node>>(&mut self, children: I) -> &mut Self {
        for child in children {
            self.add_child(child);
        }
        self
    }

    pub fn add_token(&mut self, token: impl Into<String>) -> &mut Self {
        self.children.push(Child::Token(token.into()));
        self
    }

    // Builder forms of the attachment operations, for chained construction.

    pub fn with_field(mut self, name: &'static str, child: impl Into<Option<Node>>) -> Self {
        self.add_field(name, child);
        self
    }

    pub fn with_child(mut self, child: impl Into<Option<Node>>) -> Self {
        self.add_child(child);
        self
    }

    pub fn with_children<I: IntoIterator<Item = Node>>(mut self, children: I) -> Self {
        self.add_children(children);
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.add_token(token);
        self
    }
}

// ============================================================================
// READ ACCESS
// ============================================================================

impl Node {
    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// Iterates the node children, skipping tokens.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter_map(Child::as_node)
    }

    /// The text of the first child when it is a token.
    pub fn token(&self) -> Option<&str> {
        match self.children.first() {
            Some(Child::Token(text)) => Some(text),
            _ => None,
        }
    }

    pub fn first_node(&self) -> Option<&Node> {
        self.nodes().next()
    }

    pub fn last_node(&self) -> Option<&Node> {
        self.children.iter().rev().find_map(Child::as_node)
    }

    /// True when the first character of the token is an ASCII capital.
    pub fn starts_uppercase(&self) -> bool {
        self.token()
            .and_then(|text| text.chars().next())
            .is_some_and(|c| c.is_ascii_uppercase())
    }

    /// Renders the tree in the diffable textual form.
    pub fn pretty(&self) -> String {
        print::render(self)
    }
}

// ============================================================================
// STRUCTURAL SPLICING (crate-internal)
// ============================================================================

impl Node {
    /// Reclassifies this node. Only used at the documented reclassification
    /// points; never exposed to callers of the crate.
    pub(crate) fn retag(&mut self, kind: Kind) {
        self.kind = kind;
    }

    pub(crate) fn first_node_mut(&mut self) -> Option<&mut Node> {
        self.children.iter_mut().find_map(|child| match child {
            Child::Node(node) => Some(node),
            Child::Token(_) => None,
        })
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.children.iter_mut().filter_map(|child| match child {
            Child::Node(node) => Some(node),
            Child::Token(_) => None,
        })
    }

    /// Removes and returns the last child if it is a node.
    pub(crate) fn pop_node(&mut self) -> Option<Node> {
        match self.children.last() {
            Some(Child::Node(_)) => match self.children.pop() {
                Some(Child::Node(node)) => Some(node),
                _ => None,
            },
            _ => None,
        }
    }

    /// Clears the children, handing them to the caller.
    pub(crate) fn take_children(&mut self) -> Vec<Child> {
        std::mem::take(&mut self.children)
    }

    /// Replaces the children verbatim; fields are kept as they are.
    pub(crate) fn set_children(&mut self, children: Vec<Child>) {
        self.children = children;
    }

    /// Consumes the node, returning its node children in order.
    pub(crate) fn into_nodes(self) -> Vec<Node> {
        self.children
            .into_iter()
            .filter_map(|child| match child {
                Child::Node(node) => Some(node),
                Child::Token(_) => None,
            })
            .collect()
    }

    /// Consumes the node, returning its first node child.
    pub(crate) fn into_first_node(self) -> Option<Node> {
        self.into_nodes().into_iter().next()
    }
}
