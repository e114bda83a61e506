//! JSX binding for the UAST engine: the concrete-syntax vocabulary, the
//! pre-lowering normalizer, and the lowering/lifting passes between JSX
//! trees and the canonical UAST.

pub mod cst;
pub mod lift;
pub mod lower;
pub mod normalize;

pub use lift::lift;
pub use lower::{lower, HOOK_CALLS};
pub use normalize::normalize;

use uast_core::{Result, Value};

/// Full forward pipeline: canonicalize a raw JSX tree, then lower it.
pub fn to_uast(cst: &Value) -> Result<Value> {
    let normalized = normalize(cst)?;
    lower(&normalized)
}

/// Inverse direction, materializing a JSX tree for the code generator.
pub fn from_uast(uast: &Value) -> Result<Value> {
    lift(uast)
}
