/// Build an [`Options`](crate::config::Options) map.
///
/// ```
/// use wf_pipeline::options;
///
/// let options = options! { "buffer" => "_out", "erase" => vec!["comment"] };
/// assert_eq!(options.len(), 2);
/// ```
#[macro_export]
macro_rules! options {
    () => {
        $crate::config::Options::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut options = $crate::config::Options::new();
        $(
            options.insert(
                ::std::string::String::from($name),
                $crate::config::OptionValue::from($value),
            );
        )+
        options
    }};
}
