/// Build a [`Node`](crate::node::Node) in array notation.
///
/// ```
/// use wf_core::node;
///
/// let tree = node![sequence, node![static, "Hello "], node![dynamic, "name"]];
/// assert_eq!(tree.children().count(), 2);
/// ```
#[macro_export]
macro_rules! node {
    (@build $tag:expr $(, $arg:expr)*) => {{
        let args: ::std::vec::Vec<$crate::node::Arg> =
            ::std::vec![$($crate::node::Arg::from($arg)),*];
        $crate::node::Node::new($tag, args)
    }};
    ($tag:ident $(, $arg:expr)* $(,)?) => {
        $crate::node!(@build stringify!($tag) $(, $arg)*)
    };
    ($tag:literal $(, $arg:expr)* $(,)?) => {
        $crate::node!(@build $tag $(, $arg)*)
    };
}

/// Return early with a shape error for `$node`, attributed to `$stage`.
#[macro_export]
macro_rules! shape_bail {
    ($stage:expr, $node:expr, $($arg:tt)*) => {
        return Err($crate::error::CompileError::shape(
            $stage,
            ::std::clone::Clone::clone($node),
            format!($($arg)*),
        ))
    };
}

/// Return early with a generation error for `$node`, attributed to `$stage`.
#[macro_export]
macro_rules! generation_bail {
    ($stage:expr, $node:expr, $($arg:tt)*) => {
        return Err($crate::error::CompileError::generation(
            $stage,
            Some(::std::clone::Clone::clone($node)),
            format!($($arg)*),
        ))
    };
}
