// Passes - the canonical filters, each an OptimizePass run by FoldOptimizer

pub mod control_flow;
pub mod erase;
pub mod flatten;
pub mod inline_dynamic;
pub mod merge_static;
pub mod validate;

pub use control_flow::*;
pub use erase::*;
pub use flatten::*;
pub use inline_dynamic::*;
pub use merge_static::*;
pub use validate::*;

use wf_core::Node;
use wf_pipeline::StageRegistry;

/// Every canonical filter, declarable by name.
pub fn default_filters() -> StageRegistry<Node, Node> {
    StageRegistry::new()
        .with::<MergeStatic>()
        .with::<InlineDynamic>()
        .with::<Flatten>()
        .with::<Erase>()
        .with::<ControlFlow>()
        .with::<Validate>()
}
