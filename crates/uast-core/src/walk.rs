//! Stack-safe traversal engine shared by every pass.
//!
//! The walker schedules nodes top-down, transforms field values left to
//! right in stored order, and reassembles each node bottom-up through the
//! pass's [`Fold::rebuild`]. Control flow is continuation-passing in
//! defunctionalized form: instead of recursing, every pending "rest of the
//! work" is pushed as an explicit [`Frame`] and a trampoline loop pops one
//! step at a time, so stack usage stays constant no matter how deep the
//! tree is.
//!
//! Shared and cyclic structure is handled with a per-call identity map:
//! a node that already finished transforming contributes its transformed
//! value again (aliased, not recomputed), and a node revisited while
//! still in flight is a cycle and is returned unchanged instead of being
//! re-entered.

use crate::error::Result;
use crate::tree::{Fields, NodeId, NodeRef, Value};
use std::collections::{HashMap, HashSet};

/// Outcome of rebuilding one node.
#[derive(Debug, Clone, PartialEq)]
pub enum Rewrite {
    /// Use this value in place of the node.
    Value(Value),
    /// Delete the node: dropped from an enclosing list, nulled in an
    /// enclosing named field, `Null` at the root.
    Remove,
}

impl Rewrite {
    pub fn node(node: NodeRef) -> Rewrite {
        Rewrite::Value(Value::Node(node))
    }
}

/// One tree-to-tree pass. Field values handed to [`rebuild`](Fold::rebuild)
/// are already transformed; the implementation only rearranges them.
pub trait Fold {
    /// Inspect a node before any of its fields are visited. Returning a
    /// value substitutes it wholesale and skips the descent; this is the
    /// hook for per-node idempotence guards.
    fn intercept(&mut self, node: &NodeRef) -> Option<Value> {
        let _ = node;
        None
    }

    /// Fields answering `true` are dropped from every rebuilt node before
    /// their values are visited (source positions and similar metadata).
    fn strip_field(&self, name: &str) -> bool {
        let _ = name;
        false
    }

    /// Build the replacement for `node` from its transformed fields.
    fn rebuild(&mut self, node: &NodeRef, fields: Fields) -> Result<Rewrite>;
}

/// Continuation frames of the defunctionalized traversal.
enum Frame {
    Visit(Value),
    /// All `len` elements of a list have been scheduled; collect them.
    BuildList { len: usize },
    /// All kept fields of `node` have been scheduled; collect and rebuild.
    BuildNode { node: NodeRef, names: Vec<String> },
}

struct Walker<'f, F: Fold> {
    fold: &'f mut F,
    /// Transformed value per node identity, for aliased subtrees.
    done: HashMap<NodeId, Value>,
    /// Nodes between scheduling and rebuild; hitting one is a cycle.
    in_flight: HashSet<NodeId>,
}

/// Transform `root` under `fold`. The visited state is owned by this one
/// call; concurrent traversals of independent trees cannot interfere.
pub fn fold_value<F: Fold>(root: &Value, fold: &mut F) -> Result<Value> {
    let mut walker = Walker {
        fold,
        done: HashMap::new(),
        in_flight: HashSet::new(),
    };
    match walker.run(root.clone())? {
        Rewrite::Value(value) => Ok(value),
        Rewrite::Remove => Ok(Value::Null),
    }
}

impl<F: Fold> Walker<'_, F> {
    fn run(&mut self, root: Value) -> Result<Rewrite> {
        let mut frames = vec![Frame::Visit(root)];
        let mut results: Vec<Rewrite> = Vec::new();

        // Trampoline: one frame per iteration, never a nested call.
        while let Some(frame) = frames.pop() {
            match frame {
                Frame::Visit(value) => self.visit(value, &mut frames, &mut results),
                Frame::BuildList { len } => {
                    let mut items = Vec::with_capacity(len);
                    for rewrite in results.drain(results.len() - len..) {
                        // Removed elements vanish from the list.
                        if let Rewrite::Value(item) = rewrite {
                            items.push(item);
                        }
                    }
                    results.push(Rewrite::Value(Value::List(items)));
                }
                Frame::BuildNode { node, names } => {
                    let mut fields = Fields::with_capacity(names.len());
                    let taken: Vec<Rewrite> =
                        results.drain(results.len() - names.len()..).collect();
                    for (name, rewrite) in names.into_iter().zip(taken) {
                        let value = match rewrite {
                            Rewrite::Value(value) => value,
                            // A removed named field is nulled, not dropped:
                            // the field slot itself still exists.
                            Rewrite::Remove => Value::Null,
                        };
                        fields.insert(name, value);
                    }
                    let rebuilt = self.fold.rebuild(&node, fields)?;
                    self.in_flight.remove(&node.id());
                    if let Rewrite::Value(value) = &rebuilt {
                        self.done.insert(node.id(), value.clone());
                    }
                    results.push(rebuilt);
                }
            }
        }

        debug_assert_eq!(results.len(), 1);
        Ok(results.pop().unwrap_or(Rewrite::Value(Value::Null)))
    }

    fn visit(&mut self, value: Value, frames: &mut Vec<Frame>, results: &mut Vec<Rewrite>) {
        match value {
            Value::Node(node) => {
                let id = node.id();
                if let Some(done) = self.done.get(&id) {
                    results.push(Rewrite::Value(done.clone()));
                    return;
                }
                if self.in_flight.contains(&id) {
                    // Cycle: hand the original back untouched.
                    results.push(Rewrite::Value(Value::Node(node)));
                    return;
                }
                if let Some(replacement) = self.fold.intercept(&node) {
                    self.done.insert(id, replacement.clone());
                    results.push(Rewrite::Value(replacement));
                    return;
                }
                self.in_flight.insert(id);

                let mut names = Vec::new();
                let mut values = Vec::new();
                {
                    let fields = node.fields();
                    for (name, value) in fields.iter() {
                        if self.fold.strip_field(name) {
                            continue;
                        }
                        names.push(name.clone());
                        values.push(value.clone());
                    }
                }
                frames.push(Frame::BuildNode { node, names });
                // Reverse push so the trampoline pops fields left to right.
                for value in values.into_iter().rev() {
                    frames.push(Frame::Visit(value));
                }
            }
            Value::List(items) => {
                frames.push(Frame::BuildList { len: items.len() });
                for item in items.into_iter().rev() {
                    frames.push(Frame::Visit(item));
                }
            }
            scalar => results.push(Rewrite::Value(scalar)),
        }
    }
}
