use alloc::collections::TryReserveError;

/// Errors reported by the fallible tree operations.
///
/// Lookups of absent values and removals at the end cursor are not errors; they return the end
/// cursor or `None`.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// Node storage could not grow. The tree is unchanged.
    #[error("failed to allocate tree node storage")]
    AllocationFailure(#[from] TryReserveError),

    /// The operation needs a node but was handed the end cursor.
    #[error("cursor is at the end position")]
    EndCursor,

    /// The node the cursor named has been removed from the tree.
    #[error("cursor refers to a removed node")]
    StaleCursor,
}
