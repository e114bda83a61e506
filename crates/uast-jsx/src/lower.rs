//! Lowering: JSX concrete syntax to the canonical UAST.
//!
//! One rule per recognized kind, all dispatched from a single table in
//! [`Lowerer::rebuild`]. Anything outside the table is carried across by a
//! deep structural conversion (same kind tag, every field lowered, source
//! metadata gone) so the output is always UAST-shaped even while the
//! modeled vocabulary grows. Nodes that already carry a canonical tag are
//! returned untouched, which makes the pass idempotent on mixed inputs.

use crate::cst::{is_metadata_field, kind};
use std::collections::HashSet;
use uast_core::walk::{fold_value, Fold, Rewrite};
use uast_core::{warn, Fields, NodeRef, Result, UastTag, Value};

/// Call names lowered to specialized tags instead of the generic call tag.
/// Extending the whitelist is a configuration change, not an engine change.
pub const HOOK_CALLS: &[&str] = &[
    "useState",
    "useEffect",
    "useRef",
    "useContext",
    "useReducer",
];

pub fn lower(root: &Value) -> Result<Value> {
    fold_value(root, &mut Lowerer::default())
}

#[derive(Default)]
struct Lowerer {
    /// Kinds already reported through the unrecognized-construct warning.
    warned: HashSet<String>,
}

impl Fold for Lowerer {
    fn intercept(&mut self, node: &NodeRef) -> Option<Value> {
        // Already in the target schema: hands off.
        node.is_uast().then(|| Value::Node(node.clone()))
    }

    fn strip_field(&self, name: &str) -> bool {
        is_metadata_field(name)
    }

    fn rebuild(&mut self, node: &NodeRef, mut fields: Fields) -> Result<Rewrite> {
        let f = &mut fields;
        let lowered = match node.kind() {
            kind::JSX_ELEMENT => UastTag::Element
                .node()
                .field("opening", take(f, "openingElement"))
                .field("children", take_list(f, "children"))
                .field("closing", take(f, "closingElement")),
            kind::JSX_OPENING_ELEMENT => UastTag::OpenTag
                .node()
                .field("name", take(f, "name"))
                .field("attributes", take_list(f, "attributes"))
                .field("selfClosing", take_bool(f, "selfClosing")),
            kind::JSX_CLOSING_ELEMENT => {
                UastTag::CloseTag.node().field("name", take(f, "name"))
            }
            kind::JSX_ATTRIBUTE => UastTag::Attr
                .node()
                .field("name", flatten_attr_name(take(f, "name")))
                .field("value", take(f, "value")),
            kind::JSX_TEXT => UastTag::Text.node().field("value", take(f, "value")),
            kind::JSX_FRAGMENT => UastTag::Fragment
                .node()
                .field("children", take_list(f, "children")),
            kind::JSX_EXPRESSION_CONTAINER => UastTag::Expr
                .node()
                .field("expression", take(f, "expression")),
            kind::JSX_SPREAD_ATTRIBUTE => UastTag::SpreadAttr
                .node()
                .field("argument", take(f, "argument")),
            kind::JSX_SPREAD_CHILD => UastTag::SpreadChild
                .node()
                .field("expression", take(f, "expression")),
            kind::VARIABLE_DECLARATION => UastTag::VarDecl
                .node()
                .field("kind", take(f, "kind"))
                .field("declarations", take_list(f, "declarations")),
            kind::VARIABLE_DECLARATOR => UastTag::VarDeclarator
                .node()
                .field("id", take(f, "id"))
                .field("init", take(f, "init")),
            kind::ARROW_FUNCTION_EXPRESSION => UastTag::Func
                .node()
                .field("params", take_list(f, "params"))
                .field("body", take(f, "body"))
                .field("async", take_bool(f, "async")),
            kind::FUNCTION_DECLARATION => UastTag::FuncDecl
                .node()
                .field("id", take(f, "id"))
                .field("params", take_list(f, "params"))
                .field("body", take(f, "body"))
                .field("async", take_bool(f, "async")),
            kind::IMPORT_DECLARATION => UastTag::Import
                .node()
                .field("specifiers", take_list(f, "specifiers"))
                .field("source", take(f, "source")),
            kind::IMPORT_DEFAULT_SPECIFIER => UastTag::ImportDefaultSpecifier
                .node()
                .field("local", take(f, "local")),
            kind::IMPORT_SPECIFIER => UastTag::ImportSpecifier
                .node()
                .field("imported", take(f, "imported"))
                .field("local", take(f, "local")),
            kind::IMPORT_NAMESPACE_SPECIFIER => UastTag::ImportNamespaceSpecifier
                .node()
                .field("local", take(f, "local")),
            kind::EXPORT_NAMED_DECLARATION => UastTag::ExportNamed
                .node()
                .field("declaration", take(f, "declaration"))
                .field("specifiers", take_list(f, "specifiers"))
                .field("source", take(f, "source")),
            kind::EXPORT_DEFAULT_DECLARATION => UastTag::ExportDefault
                .node()
                .field("declaration", take(f, "declaration")),
            kind::RETURN_STATEMENT => UastTag::Return
                .node()
                .field("argument", take(f, "argument")),
            kind::CALL_EXPRESSION => call_tag(node)
                .node()
                .field("callee", take(f, "callee"))
                .field("arguments", take_list(f, "arguments")),
            kind::MEMBER_EXPRESSION | kind::JSX_MEMBER_EXPRESSION => UastTag::MemberExpr
                .node()
                .field("object", take(f, "object"))
                .field("property", take(f, "property")),
            kind::STRING_LITERAL | kind::NUMERIC_LITERAL | kind::BOOLEAN_LITERAL => {
                UastTag::Literal.node().field("value", take(f, "value"))
            }
            kind::NULL_LITERAL => UastTag::Literal.node().field("value", Value::Null),
            kind::IDENTIFIER | kind::JSX_IDENTIFIER => {
                UastTag::Identifier.node().field("name", take(f, "name"))
            }
            kind::JSX_NAMESPACED_NAME => UastTag::NamespacedName
                .node()
                .field("namespace", take(f, "namespace"))
                .field("name", take(f, "name")),
            kind::JSX_EMPTY_EXPRESSION => UastTag::EmptyExpr.node(),
            // Deep structural fallback: same kind, already-lowered fields,
            // metadata already stripped by the walker.
            other => {
                if !other.is_empty() && self.warned.insert(other.to_string()) {
                    warn!("no lowering rule for `{other}`, converting structurally");
                }
                NodeRef::with_fields(other, fields)
            }
        };
        Ok(Rewrite::node(lowered))
    }
}

/// Specialized tag for whitelisted hook calls; everything else, including
/// calls through member or computed callees, stays generic.
fn call_tag(node: &NodeRef) -> UastTag {
    let callee = match node.get("callee") {
        Some(Value::Node(callee)) => callee,
        _ => return UastTag::CallExpr,
    };
    let name = match callee.kind() {
        kind::IDENTIFIER | kind::JSX_IDENTIFIER | "UAST_Identifier" => {
            callee.get("name")
        }
        _ => None,
    };
    let Some(Value::Str(name)) = name else {
        return UastTag::CallExpr;
    };
    if !HOOK_CALLS.contains(&name.as_str()) {
        return UastTag::CallExpr;
    }
    UastTag::parse(&format!("UAST_{}", capitalize(&name))).unwrap_or(UastTag::CallExpr)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn take(fields: &mut Fields, name: &str) -> Value {
    fields.swap_remove(name).unwrap_or(Value::Null)
}

fn take_list(fields: &mut Fields, name: &str) -> Value {
    match take(fields, name) {
        list @ Value::List(_) => list,
        Value::Null => Value::List(Vec::new()),
        single => Value::List(vec![single]),
    }
}

fn take_bool(fields: &mut Fields, name: &str) -> Value {
    Value::Bool(matches!(take(fields, name), Value::Bool(true)))
}

/// An attribute name is stored as a plain string when it is a simple
/// identifier; namespaced names keep their node form.
fn flatten_attr_name(name: Value) -> Value {
    match &name {
        Value::Node(node) if node.kind() == UastTag::Identifier.as_str() => {
            node.get("name").unwrap_or(name.clone())
        }
        _ => name,
    }
}
