//! Parser configuration.

/// Default cap on recorded diagnostics.
pub const DEFAULT_MAX_ERRORS: usize = 100;

/// Knobs for one [`Parser`](crate::Parser).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Resume after an error. When `false`, everything from the first
    /// error to end of input becomes a single `ERROR` node.
    pub recover: bool,
    /// Stop recording diagnostics after this many. Nodes are still built.
    pub max_errors: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            recover: true,
            max_errors: DEFAULT_MAX_ERRORS,
        }
    }
}

impl ParseOptions {
    /// Options that stop at the first error.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            recover: false,
            ..Self::default()
        }
    }

    /// Override the diagnostic cap.
    #[must_use]
    pub fn with_max_errors(self, max_errors: usize) -> Self {
        Self { max_errors, ..self }
    }
}
