//! Weft core: the tagged-tree IR shared by every compilation stage.

#[macro_use]
pub mod macros;

pub mod binary;
pub mod error;
pub mod expr;
pub mod json;
pub mod node;
pub mod render;
mod serialize;
pub mod tag;

// Re-export commonly used items for convenience
pub use tracing;

pub use node::{Arg, Literal, Node};
pub use tag::{Tag, TagSet};

// Alias for error types
pub type Error = crate::error::CompileError;
pub type Result<T> = crate::error::Result<T>;
