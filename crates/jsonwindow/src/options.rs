/// Configuration options for a [`Window`](crate::Window).
///
/// # Examples
///
/// ```rust
/// use jsonwindow::{ErrorKind, Window, WindowOptions};
///
/// let options = WindowOptions {
///     max_depth: Some(2),
///     ..Default::default()
/// };
/// let mut window = Window::with_options(b"[[[]]]", options);
/// let err = window.next_value().unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::DepthLimitExceeded(2));
/// ```
///
/// # Default
///
/// No depth limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowOptions {
    /// Maximum nesting depth of objects and arrays read by
    /// [`Window::next_value`](crate::Window::next_value) and the walkers.
    ///
    /// A top-level `[]` has depth 1. With `None` nesting is unbounded and
    /// deeply nested input recurses until the call stack is exhausted.
    ///
    /// # Default
    ///
    /// `None`
    pub max_depth: Option<usize>,
}
