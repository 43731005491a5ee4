use crate::tag::Tag;
use derive_more::{From, IsVariant};
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// Deepest tree the codecs accept, counted in nodes from the root.
pub const MAX_DEPTH: usize = 256;

/// Leaf value carried by a node argument.
///
/// `Display` yields the text an evaluated literal contributes to rendered
/// output. Filters that fold literals into static text rely on it, so any
/// change here changes observable output.
///
/// Floats compare by bit pattern, so `NaN` equals itself and `-0.0` differs
/// from `0.0`.
#[derive(Debug, Clone, From, IsVariant)]
pub enum Literal {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Literal {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Literal::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Literal::Text(_) => "text",
            Literal::Int(_) => "int",
            Literal::Float(_) => "float",
            Literal::Bool(_) => "bool",
        }
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Literal::Text(a), Literal::Text(b)) => a == b,
            (Literal::Int(a), Literal::Int(b)) => a == b,
            (Literal::Float(a), Literal::Float(b)) => a.to_bits() == b.to_bits(),
            (Literal::Bool(a), Literal::Bool(b)) => a == b,
            _ => false,
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Text(text) => f.write_str(text),
            Literal::Int(value) => write!(f, "{}", value),
            Literal::Float(value) => write!(f, "{}", value),
            Literal::Bool(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for Literal {
    fn from(text: &str) -> Self {
        Literal::Text(text.to_string())
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Int(value.into())
    }
}

/// One argument slot of a node.
#[derive(Debug, Clone, PartialEq, From, IsVariant)]
pub enum Arg {
    Literal(Literal),
    Node(Node),
}

impl Arg {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Arg::Node(node) => Some(node),
            Arg::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Arg::Literal(literal) => Some(literal),
            Arg::Node(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        self.as_literal().and_then(Literal::as_text)
    }

    pub fn into_node(self) -> Option<Node> {
        match self {
            Arg::Node(node) => Some(node),
            Arg::Literal(_) => None,
        }
    }
}

impl From<&str> for Arg {
    fn from(text: &str) -> Self {
        Arg::Literal(text.into())
    }
}

impl From<String> for Arg {
    fn from(text: String) -> Self {
        Arg::Literal(text.into())
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Arg::Literal(value.into())
    }
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self {
        Arg::Literal(value.into())
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Literal(value.into())
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::Literal(value.into())
    }
}

impl Display for Arg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Arg::Literal(Literal::Text(text)) => write!(f, "{:?}", text),
            Arg::Literal(literal) => write!(f, "{}", literal),
            Arg::Node(node) => write!(f, "{}", node),
        }
    }
}

/// A node of the IR tree: a tag plus ordered arguments.
///
/// Nodes are values. There is no way to change the tag or the arguments of
/// an existing node; rewriting produces a new node. Equality is structural.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    tag: Tag,
    args: Vec<Arg>,
}

impl Node {
    pub fn new(tag: impl Into<Tag>, args: impl IntoIterator<Item = Arg>) -> Self {
        Self {
            tag: tag.into(),
            args: args.into_iter().collect(),
        }
    }

    pub fn sequence(children: impl IntoIterator<Item = Node>) -> Self {
        Self::new(Tag::SEQUENCE, children.into_iter().map(Arg::Node))
    }

    /// An empty sequence, which renders nothing.
    pub fn empty() -> Self {
        Self::sequence([])
    }

    pub fn static_text(text: impl Into<String>) -> Self {
        Self::new(Tag::STATIC, [Arg::Literal(Literal::Text(text.into()))])
    }

    pub fn dynamic(expr: impl Into<String>) -> Self {
        Self::new(Tag::DYNAMIC, [Arg::Literal(Literal::Text(expr.into()))])
    }

    pub fn block(code: impl Into<String>) -> Self {
        Self::new(Tag::BLOCK, [Arg::Literal(Literal::Text(code.into()))])
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn is(&self, tag: &Tag) -> bool {
        &self.tag == tag
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    pub fn arg(&self, index: usize) -> Option<&Arg> {
        self.args.get(index)
    }

    pub fn text_arg(&self, index: usize) -> Option<&str> {
        self.arg(index).and_then(Arg::as_text)
    }

    pub fn node_arg(&self, index: usize) -> Option<&Node> {
        self.arg(index).and_then(Arg::as_node)
    }

    /// Node-valued arguments in order, skipping literals.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.args.iter().filter_map(Arg::as_node)
    }

    pub fn is_empty_sequence(&self) -> bool {
        self.is(&Tag::SEQUENCE) && self.args.is_empty()
    }

    pub fn into_parts(self) -> (Tag, Vec<Arg>) {
        (self.tag, self.args)
    }

    pub fn into_args(self) -> Vec<Arg> {
        self.args
    }

    /// A new node with this node's tag and the given arguments.
    pub fn with_args(&self, args: impl IntoIterator<Item = Arg>) -> Node {
        Node::new(self.tag.clone(), args)
    }

    /// Total number of nodes in the tree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children().map(Node::node_count).sum::<usize>()
    }

    pub fn depth(&self) -> usize {
        1 + self.children().map(Node::depth).max().unwrap_or(0)
    }

    /// Whether the tree nests more than `limit` nodes deep. Never descends
    /// past `limit`.
    pub fn deeper_than(&self, limit: usize) -> bool {
        match limit {
            0 => true,
            _ => self.children().any(|child| child.deeper_than(limit - 1)),
        }
    }

    /// First non-finite float literal in the tree, if any.
    pub fn find_non_finite(&self) -> Option<f64> {
        self.args.iter().find_map(|arg| match arg {
            Arg::Literal(Literal::Float(value)) if !value.is_finite() => Some(*value),
            Arg::Literal(_) => None,
            Arg::Node(child) => child.find_non_finite(),
        })
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.args.is_empty() {
            return write!(f, "[{}]", self.tag);
        }
        write!(f, "[{}, {}]", self.tag, self.args.iter().join(", "))
    }
}
