/// Compile a regex literal once and hand back a `&'static Regex`.
/// Panics on first use if the pattern is invalid.
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).expect("invalid built-in regex"));
        &*RE
    }};
}
