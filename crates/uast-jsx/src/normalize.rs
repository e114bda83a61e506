//! Pre-lowering canonicalization of raw JSX trees.
//!
//! Collapses the several equivalent source spellings the parser can emit
//! into one canonical shape each, so the lowering engine only ever sees
//! one grouping construct and one text shape. Every rule either rewrites
//! or passes a node through; none of them can fail, and the whole pass is
//! a fixed point (normalizing a normalized tree changes nothing).

use crate::cst::{self, kind};
use uast_core::walk::{fold_value, Fold, Rewrite};
use uast_core::{Fields, NodeRef, Result, Value};

pub fn normalize(root: &Value) -> Result<Value> {
    fold_value(root, &mut Normalizer)
}

struct Normalizer;

impl Fold for Normalizer {
    fn rebuild(&mut self, node: &NodeRef, mut fields: Fields) -> Result<Rewrite> {
        match node.kind() {
            // Whitespace-only text renders as nothing; drop it.
            kind::JSX_TEXT => {
                let blank = fields
                    .get("value")
                    .and_then(Value::as_str)
                    .map(|v| v.chars().all(char::is_whitespace))
                    .unwrap_or(false);
                if blank {
                    return Ok(Rewrite::Remove);
                }
                Ok(passthrough(node, fields))
            }
            // Fragments become a marked `<span>` so downstream passes have
            // a single grouping shape to deal with.
            kind::JSX_FRAGMENT => {
                let children = match fields.swap_remove("children") {
                    Some(Value::List(items)) => items,
                    _ => Vec::new(),
                };
                let span = cst::element_parts(
                    cst::open_tag(
                        cst::jsx_ident("span"),
                        vec![Value::Node(cst::attr(cst::FRAGMENT_MARKER_ATTR, Value::Null))],
                        false,
                    ),
                    children,
                    Some(cst::close_tag(cst::jsx_ident("span"))),
                );
                Ok(Rewrite::node(span))
            }
            kind::JSX_EXPRESSION_CONTAINER => {
                match fields.get("expression") {
                    // `{/* comment */}` is a compile-time-empty slot.
                    Some(expr) if expr.kind() == Some(kind::JSX_EMPTY_EXPRESSION) => {
                        Ok(Rewrite::Remove)
                    }
                    // `{"literal"}` means exactly the same as plain text.
                    Some(expr) if expr.kind() == Some(kind::STRING_LITERAL) => {
                        let value = expr
                            .as_node()
                            .and_then(|n| n.get("value"))
                            .unwrap_or(Value::Null);
                        match value {
                            // Whitespace-only literals fall under the text
                            // rule, keeping the pass a fixed point.
                            Value::Str(v) if v.chars().all(char::is_whitespace) => {
                                Ok(Rewrite::Remove)
                            }
                            Value::Str(v) => Ok(Rewrite::node(cst::text(v))),
                            _ => Ok(passthrough(node, fields)),
                        }
                    }
                    _ => Ok(passthrough(node, fields)),
                }
            }
            // Unmatched nodes pass through untouched.
            _ => Ok(passthrough(node, fields)),
        }
    }
}

fn passthrough(node: &NodeRef, fields: Fields) -> Rewrite {
    Rewrite::node(NodeRef::with_fields(node.kind(), fields))
}
