use crate::utils::{FoldOptimizer, OptimizePass};
use tracing::debug;
use wf_core::error::ConfigError;
use wf_core::expr::parse_literal;
use wf_core::{Node, Result, Tag};
use wf_pipeline::ResolvedOptions;

pub type InlineDynamic = FoldOptimizer<InlineDynamicPass>;

/// Rewrites a dynamic node whose expression is a literal into the static text
/// that evaluating it would produce.
#[derive(Debug, Clone, Default)]
pub struct InlineDynamicPass;

impl OptimizePass for InlineDynamicPass {
    const NAME: &'static str = "inline-dynamic";

    fn from_options(_options: &ResolvedOptions) -> std::result::Result<Self, ConfigError> {
        Ok(InlineDynamicPass)
    }

    fn handles(&self, tag: &Tag) -> bool {
        *tag == Tag::DYNAMIC
    }

    fn optimize_node(&self, node: Node) -> Result<Node> {
        let literal = match node.args() {
            [expr] => expr.as_text().and_then(parse_literal),
            _ => None,
        };
        match literal {
            Some(literal) => {
                debug!(expr = ?node.text_arg(0), "inlined literal expression");
                Ok(Node::static_text(literal.to_string()))
            }
            None => Ok(node),
        }
    }
}
