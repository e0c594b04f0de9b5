//! Idempotent resource primitives.
pub mod deployment;
pub mod fs;
pub mod package;
pub mod palette;
pub mod probe;

/// Result of applying a package change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// Resource was created or updated.
    Applied,
    /// Resource was already correct (no change needed).
    AlreadyCorrect,
    /// Resource was skipped, with the reason.
    Skipped {
        /// Reason why the resource was skipped.
        reason: String,
    },
}
