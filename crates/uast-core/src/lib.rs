//! Core of the UAST transformation engine: the shared tree schema, the
//! stack-safe traversal driver, the closed UAST tag vocabulary, and the
//! snapshot format used to persist trees between processes.

#[macro_use]
pub mod macros;

pub mod error;
pub mod snapshot;
pub mod tag;
pub mod tree;
pub mod walk;

// Re-export commonly used items for convenience
pub use tracing;

pub use error::{Error, Result};
pub use tag::UastTag;
pub use tree::{Fields, NodeRef, Value};
pub use walk::{fold_value, Fold, Rewrite};
