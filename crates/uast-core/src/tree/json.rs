//! Serde mapping between trees and the portable JSON interchange form.
//!
//! A node serializes as an object whose first entry is the `type`
//! discriminator, followed by its fields in stored order; lists serialize
//! as arrays and scalars as themselves. Deserialization accepts `type`
//! anywhere in the object and loads tag-less objects as anonymous nodes so
//! that artifacts of generic persistence (for example a sequence written
//! out as an indexed mapping) survive the trip and can be re-normalized by
//! the lifting engine.
//!
//! Serde's visitor API walks the tree with the call stack, which would cap
//! the depth far below what the traversal engine handles. Both directions
//! therefore grow the stack on demand at each nesting level, and parsing
//! runs with serde_json's recursion limit disabled, so any tree the engine
//! can produce survives the trip. Input must be acyclic; the engine only
//! ever produces acyclic trees.

use super::{Fields, NodeRef, Value};
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Name of the discriminator entry in serialized nodes.
pub const TYPE_KEY: &str = "type";

/// Remaining-stack threshold below which another segment is mapped in,
/// and the size of that segment. One check per nesting level.
const STACK_RED_ZONE: usize = 64 * 1024;
const STACK_GROW_BY: usize = 4 * 1024 * 1024;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_BY, move || match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Num(n) => n.serialize(serializer),
            Value::Str(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Node(node) => node.serialize(serializer),
        })
    }
}

impl Serialize for NodeRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = self.fields();
        let tagged = !self.is_anonymous();
        let mut map = serializer.serialize_map(Some(fields.len() + usize::from(tagged)))?;
        if tagged {
            map.serialize_entry(TYPE_KEY, self.kind())?;
        }
        for (name, value) in fields.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value describing a syntax tree")
    }

    fn visit_unit<E>(self) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Num(v.into()))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Num(v.into()))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::float(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Str(v.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Str(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Value>()? {
            items.push(item);
        }
        Ok(Value::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut kind = String::new();
        let mut fields = Fields::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((name, value)) = map.next_entry::<String, Value>()? {
            match value {
                Value::Str(tag) if name == TYPE_KEY && kind.is_empty() => kind = tag,
                // A non-string `type` entry is an ordinary field.
                other => {
                    fields.insert(name, other);
                }
            }
        }
        Ok(Value::Node(NodeRef::with_fields(kind, fields)))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_BY, move || {
            deserializer.deserialize_any(ValueVisitor)
        })
    }
}

impl<'de> Deserialize<'de> for NodeRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<NodeRef, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Node(node) => Ok(node),
            other => Err(serde::de::Error::custom(format!(
                "expected a node object, got {other:?}"
            ))),
        }
    }
}

impl Value {
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> crate::Result<Value> {
        // The depth guard is the stack growth above, not a frame budget.
        let mut deserializer = serde_json::Deserializer::from_str(text);
        deserializer.disable_recursion_limit();
        let value = Value::deserialize(&mut deserializer)?;
        deserializer.end()?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Value {
        Value::Node(
            NodeRef::new("UAST_OpenTag")
                .field(
                    "name",
                    NodeRef::new("UAST_Identifier").field("name", "div"),
                )
                .field(
                    "attributes",
                    vec![Value::Node(
                        NodeRef::new("UAST_Attr")
                            .field("name", "id")
                            .field("value", Value::Null),
                    )],
                )
                .field("selfClosing", false),
        )
    }

    #[test]
    fn tag_and_field_names_survive_round_trip() {
        let tree = sample();
        let text = tree.to_json().unwrap();
        assert!(text.starts_with("{\"type\":\"UAST_OpenTag\""));
        let back = Value::from_json(&text).unwrap();
        assert_eq!(back, tree);
    }

    #[test]
    fn serialization_is_deterministic() {
        let a = sample().to_json().unwrap();
        let b = sample().to_json().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn tagless_object_loads_as_anonymous_node() {
        let value = Value::from_json(r#"{"0":{"type":"UAST_Text","value":"hi"},"1":null}"#).unwrap();
        let node = value.as_node().expect("node");
        assert!(node.is_anonymous());
        let names: Vec<_> = node.fields().keys().cloned().collect();
        assert_eq!(names, ["0", "1"]);
    }

    #[test]
    fn moderately_deep_trees_reload_exactly() {
        // Deep enough to blow serde_json's default 128-frame parse limit.
        let mut tree = Value::Node(NodeRef::new("Leaf"));
        for _ in 0..300 {
            tree = Value::Node(NodeRef::new("Wrapper").field("child", tree));
        }
        let back = Value::from_json(&tree.to_json().unwrap()).unwrap();
        assert_eq!(back, tree);
    }

    #[test]
    fn hundred_thousand_levels_survive_the_json_trip() {
        let mut tree = Value::Node(NodeRef::new("Leaf"));
        for _ in 0..100_000 {
            tree = Value::Node(NodeRef::new("Wrapper").field("child", tree));
        }
        let text = tree.to_json().unwrap();
        let back = Value::from_json(&text).unwrap();
        // Structural equality would recurse as deep as the tree; spot
        // check the top instead.
        assert_eq!(back.kind(), Some("Wrapper"));
        let child = back.as_node().unwrap().get("child").unwrap();
        assert_eq!(child.kind(), Some("Wrapper"));
    }

    #[test]
    fn scalar_payloads_round_trip_exactly() {
        for text in ["0", "-3", "1.5", "true", "null", "\"a b\""] {
            let value = Value::from_json(text).unwrap();
            assert_eq!(value.to_json().unwrap(), text);
        }
    }
}
