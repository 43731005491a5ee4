//! Command implementations for the Weft CLI

pub mod common;
pub mod compile;
pub mod convert;
pub mod render;
pub mod stages;

// Re-export command functions
pub use compile::compile_command;
pub use convert::{decode_command, encode_command};
pub use render::render_command;
pub use stages::stages_command;
