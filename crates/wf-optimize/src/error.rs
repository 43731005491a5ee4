use wf_core::error::CompileError;
use wf_core::Node;

/// Shape error raised by filter `pass` on `node`.
pub fn malformed(pass: &str, node: &Node, message: impl Into<String>) -> CompileError {
    CompileError::shape(pass, node.clone(), message)
}

/// Return early with a shape error unless `$cond` holds.
#[macro_export]
macro_rules! opt_ensure {
    ($cond:expr, $pass:expr, $node:expr, $($arg:tt)*) => {
        if !($cond) {
            return Err($crate::error::malformed($pass, &$node, format!($($arg)*)));
        }
    };
}
