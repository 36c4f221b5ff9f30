use thiserror::Error;

/// A malformed placeholder. Offsets are byte positions in the scanned text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    #[error("Placeholder opened at byte {offset} is never closed.")]
    Unterminated { offset: usize },
    #[error("Placeholder opened inside another placeholder at byte {offset}.")]
    Nested { offset: usize },
}
