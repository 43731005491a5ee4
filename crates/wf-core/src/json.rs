//! Textual encoding of IR trees.
//!
//! Thin wrappers over `serde_json` using the array notation, so trees can be
//! handed between processes or implementations:
//!
//! ```json
//! ["sequence", ["static", "Hello "], ["dynamic", "name"]]
//! ```
//!
//! Both directions accept trees up to [`MAX_DEPTH`] nodes deep. Non-finite
//! floats have no JSON representation; use [`crate::binary`] for trees that
//! carry them.

use crate::error::CompileError;
use crate::node::{Node, MAX_DEPTH};
use crate::Result;
use serde::Deserialize;
use serde_json::de::{Read, SliceRead, StrRead};
use serde_json::Deserializer;

/// Load a `Node` directly from a string slice containing JSON.
pub fn load_node_from_str(contents: &str) -> Result<Node> {
    load(Deserializer::new(StrRead::new(contents)))
}

pub fn load_node_from_slice(contents: &[u8]) -> Result<Node> {
    load(Deserializer::new(SliceRead::new(contents)))
}

// The node visitors bound the nesting, so serde_json's own limit is lifted.
fn load<'de, R: Read<'de>>(mut de: Deserializer<R>) -> Result<Node> {
    de.disable_recursion_limit();
    let node = Node::deserialize(&mut de)?;
    de.end()?;
    Ok(node)
}

pub fn write_node_to_string(node: &Node) -> Result<String> {
    ensure_encodable(node)?;
    Ok(serde_json::to_string(node)?)
}

pub fn write_node_to_string_pretty(node: &Node) -> Result<String> {
    ensure_encodable(node)?;
    Ok(serde_json::to_string_pretty(node)?)
}

fn ensure_encodable(node: &Node) -> Result<()> {
    if node.deeper_than(MAX_DEPTH) {
        return Err(CompileError::encode(format!(
            "nesting deeper than {MAX_DEPTH}"
        )));
    }
    if let Some(value) = node.find_non_finite() {
        return Err(CompileError::encode(format!(
            "JSON cannot represent the float {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deep(depth: usize) -> Node {
        let mut node = Node::empty();
        for _ in 1..depth {
            node = Node::sequence([node]);
        }
        node
    }

    #[test]
    fn round_trips_up_to_the_depth_limit() {
        for depth in [MAX_DEPTH - 1, MAX_DEPTH] {
            let tree = deep(depth);
            assert_eq!(tree.depth(), depth);
            let json = write_node_to_string(&tree).unwrap();
            assert_eq!(load_node_from_str(&json).unwrap(), tree);
            assert_eq!(load_node_from_slice(json.as_bytes()).unwrap(), tree);
        }
    }

    #[test]
    fn rejects_trees_past_the_depth_limit() {
        let tree = deep(MAX_DEPTH + 1);
        let err = write_node_to_string(&tree).unwrap_err();
        assert!(matches!(err, CompileError::Encode { .. }));

        let json = format!("{}{}", "[\"sequence\",".repeat(MAX_DEPTH), "[\"sequence\"]")
            + &"]".repeat(MAX_DEPTH);
        let err = load_node_from_str(&json).unwrap_err();
        assert!(err.to_string().contains("nesting deeper than 256"), "{err}");
    }

    #[test]
    fn non_finite_floats_do_not_encode() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = write_node_to_string_pretty(&node![x, value]).unwrap_err();
            assert!(matches!(err, CompileError::Encode { .. }));
        }
    }
}
