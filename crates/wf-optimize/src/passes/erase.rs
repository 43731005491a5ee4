use crate::utils::{FoldOptimizer, OptimizePass};
use tracing::debug;
use wf_core::error::ConfigError;
use wf_core::{Node, Result, Tag, TagSet};
use wf_pipeline::{OptionKind, OptionSpec, ResolvedOptions};

pub type Erase = FoldOptimizer<ErasePass>;

/// Replaces every node carrying one of the configured tags by an empty
/// sequence, which renders as nothing.
#[derive(Debug, Clone)]
pub struct ErasePass {
    pub tags: TagSet,
}

impl OptimizePass for ErasePass {
    const NAME: &'static str = "erase";

    fn option_specs() -> &'static [OptionSpec] {
        const SPECS: &[OptionSpec] = &[OptionSpec::optional(
            "erase",
            OptionKind::TextList,
            "tags to remove from the tree (default [\"comment\"])",
        )];
        SPECS
    }

    fn from_options(options: &ResolvedOptions) -> std::result::Result<Self, ConfigError> {
        let tags = options
            .text_list_or("erase", &[wf_core::tag::names::COMMENT])
            .into_iter()
            .map(Tag::from)
            .collect();
        Ok(ErasePass { tags })
    }

    fn handles(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    fn optimize_node(&self, node: Node) -> Result<Node> {
        debug!(tag = %node.tag(), "erased node");
        Ok(Node::empty())
    }
}
