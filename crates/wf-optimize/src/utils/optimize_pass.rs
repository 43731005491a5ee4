// OptimizePass trait - interface for filter passes

use derive_more::IsVariant;
use wf_core::error::ConfigError;
use wf_core::{Node, Result, Tag};
use wf_pipeline::{OptionSpec, ResolvedOptions};

/// What the fold does with a node whose tag the pass does not handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum Unhandled {
    /// Keep the node and fold its children.
    Descend,
    /// Fail with a shape error naming the pass.
    Reject,
}

/// The rewrite a filter applies to a single node.
///
/// A pass never walks the tree itself; [`FoldOptimizer`](crate::FoldOptimizer)
/// does, bottom-up, and hands each handled node to
/// [`optimize_node`](OptimizePass::optimize_node) once all of its children
/// have been rewritten.
pub trait OptimizePass: Sized {
    const NAME: &'static str;

    fn option_specs() -> &'static [OptionSpec] {
        &[]
    }

    fn from_options(options: &ResolvedOptions) -> std::result::Result<Self, ConfigError>;

    fn handles(&self, tag: &Tag) -> bool;

    fn unhandled(&self, _tag: &Tag) -> Unhandled {
        Unhandled::Descend
    }

    fn optimize_node(&self, node: Node) -> Result<Node>;
}
