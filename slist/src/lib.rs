//! # slist
//!
//! A generic singly linked list bounded by head and tail sentinel nodes,
//! with positional insertion, removal and access.
//!
//! ## Modules
//!
//! - [`arena`]: Slot arena with a free list, the backing store for nodes
//! - [`list`]: The sentinel-bounded [`LinkedList`] and its iterators
//! - [`render`]: Textual rendering through a caller-supplied formatter
//! - [`error`]: [`ListError`] and the operation it came from
//!
//! ## Design Principles
//!
//! 1. **Ownership-based**: The list owns every node; links are arena indices,
//!    not shared pointers
//! 2. **Typed results**: Every fallible operation returns [`Result`] instead
//!    of a status code plus out-parameter
//! 3. **Allocate, then link**: Storage is reserved before the chain is
//!    touched, so a failed call never leaves a half-linked node behind

pub mod arena;
pub mod error;
pub mod list;
pub mod render;

// Re-export main types for convenience
pub use error::{ErrorKind, ListError, Operation, Result};
pub use list::{IntoIter, Iter, LinkedList};
pub use render::{DisplayWith, Render};
