use crate::utils::{OptimizePass, Unhandled};
use wf_core::error::ConfigError;
use wf_core::{shape_bail, Arg, Node, Result};
use wf_pipeline::{ConfigurableStage, OptionSpec, ResolvedOptions, Stage};

/// Runs an [`OptimizePass`] over a whole tree as a Node -> Node stage.
///
/// Children are folded before their parent, so a pass always sees subtrees
/// that are already in its output form. The input tree is only borrowed;
/// every rewrite builds new nodes.
#[derive(Debug, Clone)]
pub struct FoldOptimizer<P> {
    pass: P,
}

impl<P: OptimizePass> FoldOptimizer<P> {
    pub fn new(pass: P) -> Self {
        Self { pass }
    }

    pub fn pass(&self) -> &P {
        &self.pass
    }

    pub fn optimize(&self, node: &Node) -> Result<Node> {
        let handled = self.pass.handles(node.tag());
        if !handled && self.pass.unhandled(node.tag()).is_reject() {
            shape_bail!(P::NAME, node, "tag is neither handled nor passed through");
        }

        let args = node
            .args()
            .iter()
            .map(|arg| match arg {
                Arg::Node(child) => self.optimize(child).map(Arg::Node),
                Arg::Literal(literal) => Ok(Arg::Literal(literal.clone())),
            })
            .collect::<Result<Vec<_>>>()?;
        let folded = node.with_args(args);

        if handled {
            self.pass.optimize_node(folded)
        } else {
            Ok(folded)
        }
    }
}

impl<P: OptimizePass> Stage for FoldOptimizer<P> {
    type Input = Node;
    type Output = Node;

    fn name(&self) -> &str {
        P::NAME
    }

    fn run(&self, input: &Node) -> Result<Node> {
        self.optimize(input)
    }
}

impl<P: OptimizePass> ConfigurableStage for FoldOptimizer<P> {
    const NAME: &'static str = P::NAME;

    fn option_specs() -> &'static [OptionSpec] {
        P::option_specs()
    }

    fn from_options(options: &ResolvedOptions) -> std::result::Result<Self, ConfigError> {
        P::from_options(options).map(FoldOptimizer::new)
    }
}
