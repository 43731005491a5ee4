//! Generator stages: turn a core-vocabulary tree into Rust source text.
//!
//! A generator only decides how each core node is spelled in the target
//! program; [`Codegen`] walks the tree, checks its shape and drives the
//! generator's callbacks in tree order. The emitted text is the body of a
//! block expression that evaluates to the rendered `String`, with every
//! dynamic expression and block fragment copied in as Rust code.

mod array;
mod buffer;
mod emitter;
mod generator;

pub use array::*;
pub use buffer::*;
pub use emitter::Emitter;
pub use generator::*;

use wf_core::Node;
use wf_pipeline::StageRegistry;

/// Both reference generators, declarable by name.
pub fn default_generators() -> StageRegistry<Node, String> {
    StageRegistry::new()
        .with::<BufferCodegen>()
        .with::<ArrayCodegen>()
}
