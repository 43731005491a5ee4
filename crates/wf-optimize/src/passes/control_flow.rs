use crate::opt_ensure;
use crate::utils::{FoldOptimizer, OptimizePass, Unhandled};
use tracing::debug;
use wf_core::error::ConfigError;
use wf_core::tag::names;
use wf_core::{Arg, Node, Result, Tag, TagSet};
use wf_pipeline::{OptionKind, OptionSpec, ResolvedOptions};

pub type ControlFlow = FoldOptimizer<ControlFlowPass>;

/// Lowers `if` and `loop` into block fragments around their bodies.
///
/// ```text
/// [if, cond, then, else?]  ->  [sequence, [block, "if cond {"], then,
///                               [block, "} else {"], else, [block, "}"]]
/// [loop, header, body]     ->  [sequence, [block, "header {"], body, [block, "}"]]
/// ```
///
/// Any tag outside the core vocabulary and the `pass_through` list is
/// rejected, so nothing higher-level slips through to a generator.
#[derive(Debug, Clone, Default)]
pub struct ControlFlowPass {
    pub pass_through: TagSet,
}

impl ControlFlowPass {
    fn lower_if(&self, node: &Node) -> Result<Node> {
        let args = node.args();
        opt_ensure!(
            (2..=3).contains(&args.len()),
            Self::NAME,
            node,
            "expects a condition, a branch and an optional else branch, found {} arguments",
            args.len()
        );
        let cond = condition(node, &args[0])?;
        let mut lowered = vec![Node::block(format!("if {cond} {{")), branch(node, &args[1])?];
        if let Some(otherwise) = args.get(2) {
            lowered.push(Node::block("} else {"));
            lowered.push(branch(node, otherwise)?);
        }
        lowered.push(Node::block("}"));
        Ok(Node::sequence(lowered))
    }

    fn lower_loop(&self, node: &Node) -> Result<Node> {
        let args = node.args();
        opt_ensure!(
            args.len() == 2,
            Self::NAME,
            node,
            "expects a header and a body, found {} arguments",
            args.len()
        );
        let header = condition(node, &args[0])?;
        Ok(Node::sequence([
            Node::block(format!("{header} {{")),
            branch(node, &args[1])?,
            Node::block("}"),
        ]))
    }
}

fn condition<'a>(node: &Node, arg: &'a Arg) -> Result<&'a str> {
    let text = arg.as_text().map(str::trim).unwrap_or_default();
    opt_ensure!(
        !text.is_empty(),
        ControlFlowPass::NAME,
        node,
        "the first argument must be non-empty code, found {arg}"
    );
    Ok(text)
}

fn branch(node: &Node, arg: &Arg) -> Result<Node> {
    match arg.as_node() {
        Some(body) => Ok(body.clone()),
        None => Err(crate::error::malformed(
            ControlFlowPass::NAME,
            node,
            format!("branches must be nodes, found {arg}"),
        )),
    }
}

impl OptimizePass for ControlFlowPass {
    const NAME: &'static str = "control-flow";

    fn option_specs() -> &'static [OptionSpec] {
        const SPECS: &[OptionSpec] = &[OptionSpec::optional(
            "pass_through",
            OptionKind::TextList,
            "higher-level tags left for a later filter",
        )];
        SPECS
    }

    fn from_options(options: &ResolvedOptions) -> std::result::Result<Self, ConfigError> {
        Ok(ControlFlowPass {
            pass_through: options
                .text_list_or("pass_through", &[])
                .into_iter()
                .map(Tag::from)
                .collect(),
        })
    }

    fn handles(&self, tag: &Tag) -> bool {
        *tag == Tag::IF || *tag == Tag::LOOP
    }

    fn unhandled(&self, tag: &Tag) -> Unhandled {
        if tag.is_core() || self.pass_through.contains(tag) {
            Unhandled::Descend
        } else {
            Unhandled::Reject
        }
    }

    fn optimize_node(&self, node: Node) -> Result<Node> {
        debug!(tag = %node.tag(), "lowering control flow");
        match node.tag().as_str() {
            names::IF => self.lower_if(&node),
            names::LOOP => self.lower_loop(&node),
            _ => Ok(node),
        }
    }
}
