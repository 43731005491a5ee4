// Utils - the pass contract and its tree traversal

pub mod optimize_pass;
pub mod optimizer;

pub use optimize_pass::*;
pub use optimizer::*;
