use crate::opt_ensure;
use crate::utils::{FoldOptimizer, OptimizePass, Unhandled};
use wf_core::error::ConfigError;
use wf_core::tag::names;
use wf_core::{Node, Result, Tag};
use wf_pipeline::ResolvedOptions;

pub type Validate = FoldOptimizer<ValidatePass>;

/// Checks that a tree is expressed in the core vocabulary with well-formed
/// arguments and returns it unchanged. Meant to run right before a generator.
#[derive(Debug, Clone, Default)]
pub struct ValidatePass;

impl OptimizePass for ValidatePass {
    const NAME: &'static str = "validate";

    fn from_options(_options: &ResolvedOptions) -> std::result::Result<Self, ConfigError> {
        Ok(ValidatePass)
    }

    fn handles(&self, tag: &Tag) -> bool {
        tag.is_core()
    }

    fn unhandled(&self, _tag: &Tag) -> Unhandled {
        Unhandled::Reject
    }

    fn optimize_node(&self, node: Node) -> Result<Node> {
        match node.tag().as_str() {
            names::SEQUENCE => {
                opt_ensure!(
                    node.args().iter().all(|arg| arg.is_node()),
                    Self::NAME,
                    node,
                    "sequence arguments must be nodes"
                );
            }
            names::STATIC => {
                opt_ensure!(
                    node.args().len() == 1 && node.text_arg(0).is_some(),
                    Self::NAME,
                    node,
                    "static expects one text literal"
                );
            }
            _ => {
                opt_ensure!(
                    node.args().len() == 1
                        && node.text_arg(0).is_some_and(|code| !code.trim().is_empty()),
                    Self::NAME,
                    node,
                    "`{}` expects one non-empty text literal",
                    node.tag()
                );
            }
        }
        Ok(node)
    }
}
