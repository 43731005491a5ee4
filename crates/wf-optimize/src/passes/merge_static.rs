use crate::utils::{FoldOptimizer, OptimizePass};
use tracing::debug;
use wf_core::error::ConfigError;
use wf_core::{Arg, Node, Result, Tag};
use wf_pipeline::ResolvedOptions;

pub type MergeStatic = FoldOptimizer<MergeStaticPass>;

/// Combines runs of adjacent static children of a sequence into one static
/// node. Everything else keeps its place.
#[derive(Debug, Clone, Default)]
pub struct MergeStaticPass;

impl MergeStaticPass {
    fn static_text(arg: &Arg) -> Option<&str> {
        let node = arg.as_node()?;
        match node.args() {
            [text] if node.is(&Tag::STATIC) => text.as_text(),
            _ => None,
        }
    }
}

impl OptimizePass for MergeStaticPass {
    const NAME: &'static str = "merge-static";

    fn from_options(_options: &ResolvedOptions) -> std::result::Result<Self, ConfigError> {
        Ok(MergeStaticPass)
    }

    fn handles(&self, tag: &Tag) -> bool {
        *tag == Tag::SEQUENCE
    }

    fn optimize_node(&self, node: Node) -> Result<Node> {
        let (tag, args) = node.into_parts();
        let before = args.len();
        let mut merged: Vec<Arg> = Vec::with_capacity(before);
        let mut run: Option<String> = None;

        for arg in args {
            match Self::static_text(&arg) {
                Some(text) => run.get_or_insert_with(String::new).push_str(text),
                None => {
                    if let Some(text) = run.take() {
                        merged.push(Node::static_text(text).into());
                    }
                    merged.push(arg);
                }
            }
        }
        if let Some(text) = run {
            merged.push(Node::static_text(text).into());
        }

        if merged.len() < before {
            debug!(before, after = merged.len(), "merged adjacent static nodes");
        }
        Ok(Node::new(tag, merged))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wf_core::node;
    use wf_pipeline::{ConfigurableStage, Stage};

    #[test]
    fn merges_runs_and_keeps_the_rest_in_place() {
        let merge = MergeStatic::with_defaults().unwrap();
        let tree = node![
            sequence,
            node![static, "a"],
            node![static, "b"],
            node![dynamic, "x"],
            node![static, "c"],
            node![block, "}"],
            node![static, "d"],
            node![static, "e"],
            node![static, "f"]
        ];
        assert_eq!(
            merge.run(&tree).unwrap(),
            node![
                sequence,
                node![static, "ab"],
                node![dynamic, "x"],
                node![static, "c"],
                node![block, "}"],
                node![static, "def"]
            ]
        );
    }

    #[test]
    fn non_text_static_nodes_are_left_alone() {
        let merge = MergeStatic::with_defaults().unwrap();
        let tree = node![sequence, node![static, "a"], node![static, 1], node![static, "b"]];
        assert_eq!(merge.run(&tree).unwrap(), tree);
    }
}
