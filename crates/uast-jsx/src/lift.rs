//! Lifting: canonical UAST back to a JSX concrete syntax tree.
//!
//! The inverse of lowering, with three responsibilities the schema gap
//! forces on this side only: rebuilding tag names (identifier vs member
//! path vs namespaced name), re-deriving the attribute value spelling the
//! UAST no longer records, and repairing list fields that generic
//! persistence may have written out as indexed mappings. Tags outside the
//! vocabulary are passed through best-effort; required fields that are
//! missing fail the subtree immediately.

use crate::cst::{self, kind};
use std::collections::HashSet;
use uast_core::walk::{fold_value, Fold, Rewrite};
use uast_core::{warn, Error, Fields, NodeRef, Result, UastTag, Value};

pub fn lift(root: &Value) -> Result<Value> {
    fold_value(root, &mut Lifter::default())
}

#[derive(Default)]
struct Lifter {
    warned: HashSet<String>,
}

impl Fold for Lifter {
    fn rebuild(&mut self, node: &NodeRef, mut fields: Fields) -> Result<Rewrite> {
        let Some(tag) = node.uast_tag() else {
            // Unliftable construct: opaque passthrough, caller's call.
            // Anonymous records are legitimate serialization artifacts and
            // not worth a warning.
            if !node.is_anonymous() && self.warned.insert(node.kind().to_string()) {
                warn!(
                    "no lifting rule for `{}`, passing through verbatim",
                    node.kind()
                );
            }
            return Ok(Rewrite::node(NodeRef::with_fields(node.kind(), fields)));
        };

        let f = &mut fields;
        let lifted = match tag {
            UastTag::Element => cst::element_parts(
                require_node(node, f, "opening")?,
                into_list(take(f, "children")),
                match take(f, "closing") {
                    Value::Node(closing) => Some(closing),
                    _ => None,
                },
            ),
            UastTag::OpenTag => {
                let name = lift_jsx_name(require(node, f, "name")?)?;
                cst::open_tag(
                    name,
                    into_list(take(f, "attributes")),
                    matches!(take(f, "selfClosing"), Value::Bool(true)),
                )
            }
            UastTag::CloseTag => cst::close_tag(lift_jsx_name(require(node, f, "name")?)?),
            UastTag::Fragment => cst::fragment(into_list(take(f, "children"))),
            UastTag::Attr => lift_attr(node, f)?,
            UastTag::SpreadAttr => cst::spread_attr(require(node, f, "argument")?),
            UastTag::SpreadChild => NodeRef::new(kind::JSX_SPREAD_CHILD)
                .field("expression", require(node, f, "expression")?),
            UastTag::Text => cst::text(require_str(node, f, "value")?),
            UastTag::Expr => cst::expr_container(require(node, f, "expression")?),
            UastTag::VarDecl => NodeRef::new(kind::VARIABLE_DECLARATION)
                .field("kind", require_str(node, f, "kind")?)
                .field("declarations", into_list(take(f, "declarations"))),
            UastTag::VarDeclarator => NodeRef::new(kind::VARIABLE_DECLARATOR)
                .field("id", require(node, f, "id")?)
                .field("init", take(f, "init")),
            UastTag::Func => NodeRef::new(kind::ARROW_FUNCTION_EXPRESSION)
                .field("params", into_list(take(f, "params")))
                .field("body", require(node, f, "body")?)
                .field("async", matches!(take(f, "async"), Value::Bool(true))),
            UastTag::FuncDecl => NodeRef::new(kind::FUNCTION_DECLARATION)
                .field("id", require(node, f, "id")?)
                .field("params", into_list(take(f, "params")))
                .field("body", require(node, f, "body")?)
                .field("async", matches!(take(f, "async"), Value::Bool(true))),
            UastTag::Import => NodeRef::new(kind::IMPORT_DECLARATION)
                .field("specifiers", into_list(take(f, "specifiers")))
                .field("source", require(node, f, "source")?),
            UastTag::ImportDefaultSpecifier => NodeRef::new(kind::IMPORT_DEFAULT_SPECIFIER)
                .field("local", require(node, f, "local")?),
            UastTag::ImportSpecifier => NodeRef::new(kind::IMPORT_SPECIFIER)
                .field("imported", require(node, f, "imported")?)
                .field("local", require(node, f, "local")?),
            UastTag::ImportNamespaceSpecifier => {
                NodeRef::new(kind::IMPORT_NAMESPACE_SPECIFIER)
                    .field("local", require(node, f, "local")?)
            }
            UastTag::ExportNamed => NodeRef::new(kind::EXPORT_NAMED_DECLARATION)
                .field("declaration", take(f, "declaration"))
                .field("specifiers", into_list(take(f, "specifiers")))
                .field("source", take(f, "source")),
            UastTag::ExportDefault => NodeRef::new(kind::EXPORT_DEFAULT_DECLARATION)
                .field("declaration", require(node, f, "declaration")?),
            UastTag::Return => {
                NodeRef::new(kind::RETURN_STATEMENT).field("argument", take(f, "argument"))
            }
            // Specialized hook tags lose nothing: the callee spelling is in
            // the `callee` field, so they lift to a plain call.
            UastTag::CallExpr
            | UastTag::UseState
            | UastTag::UseEffect
            | UastTag::UseRef
            | UastTag::UseContext
            | UastTag::UseReducer => NodeRef::new(kind::CALL_EXPRESSION)
                .field("callee", require(node, f, "callee")?)
                .field("arguments", into_list(take(f, "arguments"))),
            UastTag::MemberExpr => {
                let object = require(node, f, "object")?;
                let property = require(node, f, "property")?;
                let computed = !matches!(
                    property.kind(),
                    Some(kind::IDENTIFIER) | Some(kind::PRIVATE_NAME)
                );
                cst::member(object, property, computed)
            }
            UastTag::Literal => lift_literal(take(f, "value"))?,
            UastTag::Identifier => cst::ident(require_str(node, f, "name")?),
            UastTag::NamespacedName => NodeRef::new(kind::JSX_NAMESPACED_NAME)
                .field("namespace", lift_jsx_name(require(node, f, "namespace")?)?)
                .field("name", lift_jsx_name(require(node, f, "name")?)?),
            UastTag::EmptyExpr => cst::empty_expr(),
        };
        Ok(Rewrite::node(lifted))
    }
}

fn lift_attr(node: &NodeRef, fields: &mut Fields) -> Result<NodeRef> {
    let name = match require(node, fields, "name")? {
        Value::Str(name) => cst::jsx_ident(name),
        // Lowering keeps namespaced attribute names in node form.
        name => match lift_jsx_name(name)? {
            Value::Node(name) => name,
            other => return Err(Error::bad_tag_name(format!("{other:?}"))),
        },
    };
    let value = match take(fields, "value") {
        Value::Null => Value::Null,
        Value::Node(value) => {
            // Quoted text fits the attribute grammar slot directly; any
            // other expression shape needs the `{...}` container.
            if value.kind() == kind::STRING_LITERAL || value.kind().starts_with("JSX") {
                Value::Node(value)
            } else {
                Value::Node(cst::expr_container(value))
            }
        }
        scalar => Value::Node(cst::expr_container(scalar)),
    };
    Ok(NodeRef::new(kind::JSX_ATTRIBUTE)
        .field("name", name)
        .field("value", value))
}

/// Rebuild a lifted expression into the name grammar of an element tag.
/// Names and name expressions occupy different grammar positions, so this
/// dispatches on the node's own tag rather than reusing expression rules.
fn lift_jsx_name(value: Value) -> Result<Value> {
    match value {
        Value::Str(name) => Ok(Value::Node(cst::jsx_ident(name))),
        Value::Node(_) => fold_value(&value, &mut JsxNameFold),
        other => Err(Error::bad_tag_name(format!("{other:?}"))),
    }
}

struct JsxNameFold;

impl Fold for JsxNameFold {
    fn rebuild(&mut self, node: &NodeRef, mut fields: Fields) -> Result<Rewrite> {
        let f = &mut fields;
        let name = match node.kind() {
            kind::IDENTIFIER | kind::JSX_IDENTIFIER => {
                cst::jsx_ident(require_str(node, f, "name")?)
            }
            kind::MEMBER_EXPRESSION | kind::JSX_MEMBER_EXPRESSION => {
                NodeRef::new(kind::JSX_MEMBER_EXPRESSION)
                    .field("object", require(node, f, "object")?)
                    .field("property", require(node, f, "property")?)
            }
            kind::JSX_NAMESPACED_NAME => NodeRef::new(kind::JSX_NAMESPACED_NAME)
                .field("namespace", require(node, f, "namespace")?)
                .field("name", require(node, f, "name")?),
            other => return Err(Error::bad_tag_name(other)),
        };
        Ok(Rewrite::node(name))
    }
}

fn lift_literal(value: Value) -> Result<NodeRef> {
    Ok(match value {
        Value::Str(v) => cst::string(v),
        Value::Num(v) => NodeRef::new(kind::NUMERIC_LITERAL).field("value", Value::Num(v)),
        Value::Bool(v) => cst::boolean(v),
        Value::Null => cst::null(),
        // Structured payloads have no literal spelling; fall back to the
        // JSON text as a string literal.
        other => cst::string(other.to_json()?),
    })
}

fn take(fields: &mut Fields, name: &str) -> Value {
    fields.swap_remove(name).unwrap_or(Value::Null)
}

fn require(node: &NodeRef, fields: &mut Fields, name: &str) -> Result<Value> {
    match fields.swap_remove(name) {
        Some(value) if !value.is_null() => Ok(value),
        _ => Err(Error::missing_field(node.kind(), name)),
    }
}

fn require_node(node: &NodeRef, fields: &mut Fields, name: &str) -> Result<NodeRef> {
    match require(node, fields, name)? {
        Value::Node(value) => Ok(value),
        _ => Err(Error::missing_field(node.kind(), name)),
    }
}

fn require_str(node: &NodeRef, fields: &mut Fields, name: &str) -> Result<String> {
    match require(node, fields, name)? {
        Value::Str(value) => Ok(value),
        _ => Err(Error::missing_field(node.kind(), name)),
    }
}

/// Repair a list field: true sequences pass through, sequences persisted
/// as indexed mappings are rebuilt in index order, anything else defaults
/// to empty rather than failing the whole node.
fn into_list(value: Value) -> Vec<Value> {
    match value {
        Value::List(items) => items,
        Value::Node(node) => {
            let fields = node.fields();
            let indexed = !fields.is_empty()
                && fields
                    .keys()
                    .all(|k| !k.is_empty() && k.bytes().all(|b| b.is_ascii_digit()));
            if !indexed {
                return Vec::new();
            }
            let mut items: Vec<(usize, Value)> = fields
                .iter()
                .filter_map(|(k, v)| k.parse::<usize>().ok().map(|i| (i, v.clone())))
                .collect();
            items.sort_by_key(|(i, _)| *i);
            items.into_iter().map(|(_, v)| v).collect()
        }
        _ => Vec::new(),
    }
}
