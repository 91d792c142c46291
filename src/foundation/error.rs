/// Convenience result type used across bubblepix.
pub type BubbleResult<T> = Result<T, BubbleError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Cancellation is deliberately absent: a cancelled pass is reported through
/// [`PassOutcome::Cancelled`], never as an error.
#[derive(thiserror::Error, Debug)]
pub enum BubbleError {
    /// Invalid caller-provided parameters or data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Export was requested but there is no grid (or the grid has no usable cells).
    #[error("empty grid: nothing to export")]
    EmptyGrid,

    /// The drawing surface could not be created or addressed.
    #[error("surface error: {0}")]
    Surface(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BubbleError {
    /// Build a [`BubbleError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BubbleError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }
}

/// Result of a pass that may be stopped early by its host.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PassOutcome<T> {
    /// The pass ran to the end.
    Completed(T),
    /// The host asked the pass to stop; no partial result is carried.
    Cancelled,
}

impl<T> PassOutcome<T> {
    /// `true` when the pass observed a cancellation request.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// The completed value, if any.
    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(v) => Some(v),
            Self::Cancelled => None,
        }
    }

    /// Map the completed value, leaving cancellation untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PassOutcome<U> {
        match self {
            Self::Completed(v) => PassOutcome::Completed(f(v)),
            Self::Cancelled => PassOutcome::Cancelled,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
