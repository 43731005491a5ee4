// wf-optimize: filter stages for Weft trees
//
// Architecture:
// - utils: the pass trait and the fold that turns a pass into a stage
// - passes: the canonical lowering and optimization filters

pub mod error;
pub mod passes;
pub mod utils;

// Re-export key types for convenience
pub use passes::*;
pub use utils::*;
