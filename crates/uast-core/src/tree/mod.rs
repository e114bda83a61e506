//! Trees are shared, so nodes live behind `Rc` handles.
//!
//! One tagged schema covers both concrete syntax trees and the canonical
//! UAST: a node is a `kind` discriminator plus an insertion-ordered field
//! map, and a field holds either a scalar, a list, or another node. The
//! handle type keeps pointer identity observable (visited sets key on it)
//! while equality stays structural.

use crate::error::{Error, Result};
use crate::tag::{is_uast_kind, UastTag};
use indexmap::IndexMap;
use serde_json::Number;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

pub mod json;

/// Insertion-ordered field map. Field order is the traversal and
/// serialization order, so it must be stable.
pub type Fields = IndexMap<String, Value>;

/// Any value a node field can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Num(Number),
    Str(String),
    List(Vec<Value>),
    Node(NodeRef),
}

impl Value {
    pub fn str(v: impl Into<String>) -> Value {
        Value::Str(v.into())
    }

    pub fn int(v: i64) -> Value {
        Value::Num(Number::from(v))
    }

    pub fn float(v: f64) -> Value {
        Number::from_f64(v).map(Value::Num).unwrap_or(Value::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&NodeRef> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Kind tag of the value, if it is a node.
    pub fn kind(&self) -> Option<&str> {
        self.as_node().map(|n| n.kind())
    }

    /// True when the value is a node already carrying a canonical tag.
    pub fn is_uast(&self) -> bool {
        self.as_node().map(NodeRef::is_uast).unwrap_or(false)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Value {
        Value::Bool(v)
    }
}
impl From<i64> for Value {
    fn from(v: i64) -> Value {
        Value::int(v)
    }
}
impl From<&str> for Value {
    fn from(v: &str) -> Value {
        Value::Str(v.to_string())
    }
}
impl From<String> for Value {
    fn from(v: String) -> Value {
        Value::Str(v)
    }
}
impl From<NodeRef> for Value {
    fn from(v: NodeRef) -> Value {
        Value::Node(v)
    }
}
impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Value {
        Value::List(v)
    }
}

/// Stable identity of one node allocation for the lifetime of a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Shared handle to a node. Clones alias the same allocation; a pass that
/// rewrites a node always allocates a fresh one.
#[derive(Clone)]
pub struct NodeRef(Rc<NodeData>);

pub struct NodeData {
    kind: String,
    // Interior mutability so callers (and tests) can alias a node into two
    // parents or into itself; the traversal engine tolerates both.
    fields: RefCell<Fields>,
}

impl NodeRef {
    pub fn new(kind: impl Into<String>) -> NodeRef {
        NodeRef::with_fields(kind, Fields::new())
    }

    pub fn with_fields(kind: impl Into<String>, fields: Fields) -> NodeRef {
        NodeRef(Rc::new(NodeData {
            kind: kind.into(),
            fields: RefCell::new(fields),
        }))
    }

    /// Anonymous record, the shape a tag-less serialized object loads as.
    pub fn anonymous(fields: Fields) -> NodeRef {
        NodeRef::with_fields("", fields)
    }

    pub fn kind(&self) -> &str {
        &self.0.kind
    }

    pub fn is_anonymous(&self) -> bool {
        self.0.kind.is_empty()
    }

    pub fn is_uast(&self) -> bool {
        is_uast_kind(&self.0.kind)
    }

    /// Tag of the node when it belongs to the closed UAST vocabulary.
    pub fn uast_tag(&self) -> Option<UastTag> {
        UastTag::parse(&self.0.kind)
    }

    pub fn fields(&self) -> Ref<'_, Fields> {
        self.0.fields.borrow()
    }

    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.fields.borrow_mut().insert(name.into(), value.into());
    }

    /// Chainable [`set`](NodeRef::set), for building literal trees.
    pub fn field(self, name: impl Into<String>, value: impl Into<Value>) -> NodeRef {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.fields().get(name).cloned()
    }

    /// Fetch a field that the node's tag mandates. Absent or null fields
    /// are a structural violation, reported, never papered over.
    pub fn require(&self, name: &str) -> Result<Value> {
        match self.get(name) {
            Some(value) if !value.is_null() => Ok(value),
            _ => Err(Error::missing_field(self.kind(), name)),
        }
    }

    pub fn id(&self) -> NodeId {
        NodeId(Rc::as_ptr(&self.0) as usize)
    }

    pub fn ptr_eq(&self, other: &NodeRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Field values are intentionally elided: a node can contain itself.
        let fields = self.fields();
        let mut dbg = f.debug_struct("Node");
        dbg.field("kind", &self.kind());
        dbg.field("fields", &fields.keys().collect::<Vec<_>>());
        dbg.finish()
    }
}

impl fmt::Debug for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeData({})", self.kind)
    }
}

// Structural equality. Comparing cyclic trees does not terminate; trees
// produced by the engine are acyclic.
impl PartialEq for NodeRef {
    fn eq(&self, other: &NodeRef) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        self.kind() == other.kind() && *self.fields() == *other.fields()
    }
}

impl Drop for NodeData {
    fn drop(&mut self) {
        // Trees can be as deep as the traversal engine allows, which is far
        // deeper than the call stack. Drain descendants iteratively so the
        // recursive Drop chain never materializes.
        let mut queue: Vec<Value> = self
            .fields
            .get_mut()
            .drain(..)
            .map(|(_, value)| value)
            .collect();
        while let Some(value) = queue.pop() {
            match value {
                Value::List(items) => queue.extend(items),
                Value::Node(NodeRef(rc)) => {
                    if let Some(mut data) = Rc::into_inner(rc) {
                        queue.extend(data.fields.get_mut().drain(..).map(|(_, value)| value));
                    }
                }
                _ => {}
            }
        }
    }
}
