//! # Errors
//!
//! Every fallible list operation reports a [`ListError`] naming the
//! [`Operation`] that rejected the call. Errors are raised before the
//! chain is touched, so a failed call leaves the list exactly as it was.

use std::fmt;

/// Result type for list operations.
pub type Result<T> = std::result::Result<T, ListError>;

/// The list operation an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Destroy,
    Add,
    Insert,
    Get,
    Set,
    Remove,
    Verify,
}

impl Operation {
    /// Short lowercase name used in diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Destroy => "destroy",
            Operation::Add => "add",
            Operation::Insert => "insert",
            Operation::Get => "get",
            Operation::Set => "set",
            Operation::Remove => "remove",
            Operation::Verify => "verify",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Coarse classification of a [`ListError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The call was malformed for the current state: empty list, index
    /// out of range, or broken sentinel linkage.
    InvalidArgument,
    /// Storage for a node or the sentinels could not be reserved.
    Allocation,
}

/// Errors raised by [`LinkedList`](crate::LinkedList) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// The operation needs at least one element.
    #[error("{op}: list is empty")]
    Empty { op: Operation },

    /// The index does not name an interior node.
    #[error("{op}: index {index} is out of bounds for length {len}")]
    IndexOutOfBounds {
        op: Operation,
        index: usize,
        len: usize,
    },

    /// Node storage could not be reserved.
    #[error("{op}: node allocation failed")]
    Allocation { op: Operation },

    /// The sentinel-bounded chain does not satisfy its invariants.
    #[error("{op}: broken list linkage: {reason}")]
    Corrupted {
        op: Operation,
        reason: &'static str,
    },
}

impl ListError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ListError::Allocation { .. } => ErrorKind::Allocation,
            ListError::Empty { .. }
            | ListError::IndexOutOfBounds { .. }
            | ListError::Corrupted { .. } => ErrorKind::InvalidArgument,
        }
    }

    #[must_use]
    pub fn operation(&self) -> Operation {
        match *self {
            ListError::Empty { op }
            | ListError::IndexOutOfBounds { op, .. }
            | ListError::Allocation { op }
            | ListError::Corrupted { op, .. } => op,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_operation() {
        let err = ListError::IndexOutOfBounds {
            op: Operation::Get,
            index: 3,
            len: 2,
        };
        assert_eq!(err.to_string(), "get: index 3 is out of bounds for length 2");

        let err = ListError::Empty {
            op: Operation::Insert,
        };
        assert_eq!(err.to_string(), "insert: list is empty");

        let err = ListError::Allocation { op: Operation::Add };
        assert_eq!(err.to_string(), "add: node allocation failed");
    }

    #[test]
    fn test_kind_classification() {
        let empty = ListError::Empty {
            op: Operation::Remove,
        };
        let alloc = ListError::Allocation {
            op: Operation::Create,
        };
        let corrupted = ListError::Corrupted {
            op: Operation::Destroy,
            reason: "tail does not loop to itself",
        };

        assert_eq!(empty.kind(), ErrorKind::InvalidArgument);
        assert_eq!(alloc.kind(), ErrorKind::Allocation);
        assert_eq!(corrupted.kind(), ErrorKind::InvalidArgument);
        assert_eq!(corrupted.operation(), Operation::Destroy);
    }
}
