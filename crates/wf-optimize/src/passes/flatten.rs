use crate::utils::{FoldOptimizer, OptimizePass};
use wf_core::error::ConfigError;
use wf_core::{Arg, Node, Result, Tag};
use wf_pipeline::{OptionKind, OptionSpec, ResolvedOptions};

pub type Flatten = FoldOptimizer<FlattenPass>;

/// Splices nested sequences into their parent. With `unwrap_single`, a
/// sequence holding exactly one node is replaced by that node.
#[derive(Debug, Clone)]
pub struct FlattenPass {
    pub unwrap_single: bool,
}

impl Default for FlattenPass {
    fn default() -> Self {
        Self {
            unwrap_single: true,
        }
    }
}

impl OptimizePass for FlattenPass {
    const NAME: &'static str = "flatten";

    fn option_specs() -> &'static [OptionSpec] {
        const SPECS: &[OptionSpec] = &[OptionSpec::optional(
            "unwrap_single",
            OptionKind::Bool,
            "replace single-child sequences by their child (default true)",
        )];
        SPECS
    }

    fn from_options(options: &ResolvedOptions) -> std::result::Result<Self, ConfigError> {
        Ok(FlattenPass {
            unwrap_single: options.bool_or("unwrap_single", true),
        })
    }

    fn handles(&self, tag: &Tag) -> bool {
        *tag == Tag::SEQUENCE
    }

    fn optimize_node(&self, node: Node) -> Result<Node> {
        let (tag, args) = node.into_parts();
        let mut flat = Vec::with_capacity(args.len());
        for arg in args {
            match arg {
                // already flattened, one level is enough
                Arg::Node(child) if child.is(&Tag::SEQUENCE) => flat.extend(child.into_args()),
                other => flat.push(other),
            }
        }

        if self.unwrap_single && flat.len() == 1 && flat[0].is_node() {
            if let Some(Arg::Node(only)) = flat.pop() {
                return Ok(only);
            }
        }
        Ok(Node::new(tag, flat))
    }
}
