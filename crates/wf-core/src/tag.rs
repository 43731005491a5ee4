use derive_more::Display;
use std::borrow::Cow;
use std::collections::BTreeSet;

/// Raw names of the well-known tags, usable in `match` patterns.
pub mod names {
    pub const SEQUENCE: &str = "sequence";
    pub const STATIC: &str = "static";
    pub const DYNAMIC: &str = "dynamic";
    pub const BLOCK: &str = "block";

    pub const IF: &str = "if";
    pub const LOOP: &str = "loop";
    pub const COMMENT: &str = "comment";
}

/// Identifier of a node kind.
///
/// The tag space is open: any string is a valid tag. The four core tags
/// (`sequence`, `static`, `dynamic`, `block`) form the vocabulary that
/// generators accept; everything else is a higher-level abstraction that
/// some filter has to lower before generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub struct Tag(Cow<'static, str>);

pub type TagSet = BTreeSet<Tag>;

impl Tag {
    pub const SEQUENCE: Tag = Tag::from_static(names::SEQUENCE);
    pub const STATIC: Tag = Tag::from_static(names::STATIC);
    pub const DYNAMIC: Tag = Tag::from_static(names::DYNAMIC);
    pub const BLOCK: Tag = Tag::from_static(names::BLOCK);

    pub const IF: Tag = Tag::from_static(names::IF);
    pub const LOOP: Tag = Tag::from_static(names::LOOP);
    pub const COMMENT: Tag = Tag::from_static(names::COMMENT);

    pub const fn from_static(name: &'static str) -> Self {
        Tag(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Tag(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this tag belongs to the core vocabulary.
    pub fn is_core(&self) -> bool {
        matches!(
            self.as_str(),
            names::SEQUENCE | names::STATIC | names::DYNAMIC | names::BLOCK
        )
    }
}

pub fn core_vocabulary() -> TagSet {
    [Tag::SEQUENCE, Tag::STATIC, Tag::DYNAMIC, Tag::BLOCK]
        .into_iter()
        .collect()
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Tag::new(name)
    }
}

impl From<String> for Tag {
    fn from(name: String) -> Self {
        Tag(Cow::Owned(name))
    }
}

impl From<&Tag> for Tag {
    fn from(tag: &Tag) -> Self {
        tag.clone()
    }
}

impl PartialEq<str> for Tag {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
