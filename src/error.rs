//! Error type shared by the fallible table operations.

use std::collections::TryReserveError;

/// Failure to obtain memory for a table operation.
///
/// Every operation returning this error leaves the table exactly as it was.
/// A missing key is not an error; lookups and removals return `None`.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TableError {
    #[error("allocation failed: {0}")]
    AllocationFailure(#[from] TryReserveError),
    #[error("bucket count {capacity} cannot be doubled")]
    CapacityOverflow { capacity: usize },
}
