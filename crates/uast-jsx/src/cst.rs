//! JSX/ECMAScript concrete-syntax vocabulary and node builders.
//!
//! The parser that produces these trees is external; the engine only
//! relies on the kind tags and field names below. Builders exist so passes
//! and tests can assemble well-formed trees without spelling field maps by
//! hand, and they fix the canonical field order per kind.

use uast_core::{NodeRef, Value};

/// Kind tags of the modeled concrete-syntax vocabulary.
pub mod kind {
    pub const JSX_ELEMENT: &str = "JSXElement";
    pub const JSX_OPENING_ELEMENT: &str = "JSXOpeningElement";
    pub const JSX_CLOSING_ELEMENT: &str = "JSXClosingElement";
    pub const JSX_FRAGMENT: &str = "JSXFragment";
    pub const JSX_OPENING_FRAGMENT: &str = "JSXOpeningFragment";
    pub const JSX_CLOSING_FRAGMENT: &str = "JSXClosingFragment";
    pub const JSX_ATTRIBUTE: &str = "JSXAttribute";
    pub const JSX_SPREAD_ATTRIBUTE: &str = "JSXSpreadAttribute";
    pub const JSX_SPREAD_CHILD: &str = "JSXSpreadChild";
    pub const JSX_TEXT: &str = "JSXText";
    pub const JSX_EXPRESSION_CONTAINER: &str = "JSXExpressionContainer";
    pub const JSX_EMPTY_EXPRESSION: &str = "JSXEmptyExpression";
    pub const JSX_IDENTIFIER: &str = "JSXIdentifier";
    pub const JSX_MEMBER_EXPRESSION: &str = "JSXMemberExpression";
    pub const JSX_NAMESPACED_NAME: &str = "JSXNamespacedName";

    pub const IDENTIFIER: &str = "Identifier";
    pub const PRIVATE_NAME: &str = "PrivateName";
    pub const STRING_LITERAL: &str = "StringLiteral";
    pub const NUMERIC_LITERAL: &str = "NumericLiteral";
    pub const BOOLEAN_LITERAL: &str = "BooleanLiteral";
    pub const NULL_LITERAL: &str = "NullLiteral";

    pub const VARIABLE_DECLARATION: &str = "VariableDeclaration";
    pub const VARIABLE_DECLARATOR: &str = "VariableDeclarator";
    pub const ARROW_FUNCTION_EXPRESSION: &str = "ArrowFunctionExpression";
    pub const FUNCTION_DECLARATION: &str = "FunctionDeclaration";
    pub const IMPORT_DECLARATION: &str = "ImportDeclaration";
    pub const IMPORT_DEFAULT_SPECIFIER: &str = "ImportDefaultSpecifier";
    pub const IMPORT_SPECIFIER: &str = "ImportSpecifier";
    pub const IMPORT_NAMESPACE_SPECIFIER: &str = "ImportNamespaceSpecifier";
    pub const EXPORT_NAMED_DECLARATION: &str = "ExportNamedDeclaration";
    pub const EXPORT_DEFAULT_DECLARATION: &str = "ExportDefaultDeclaration";
    pub const RETURN_STATEMENT: &str = "ReturnStatement";
    pub const CALL_EXPRESSION: &str = "CallExpression";
    pub const MEMBER_EXPRESSION: &str = "MemberExpression";
}

/// Source-position and comment bookkeeping attached by the parser. Not
/// part of the portable schema; stripped wholesale during lowering.
pub const METADATA_FIELDS: &[&str] = &[
    "start",
    "end",
    "loc",
    "range",
    "leadingComments",
    "trailingComments",
    "innerComments",
    "extra",
];

pub fn is_metadata_field(name: &str) -> bool {
    METADATA_FIELDS.contains(&name)
}

/// Sentinel attribute marking an element that stands in for a fragment.
pub const FRAGMENT_MARKER_ATTR: &str = "data-fragment";

pub fn ident(name: impl Into<String>) -> NodeRef {
    NodeRef::new(kind::IDENTIFIER).field("name", name.into())
}

pub fn jsx_ident(name: impl Into<String>) -> NodeRef {
    NodeRef::new(kind::JSX_IDENTIFIER).field("name", name.into())
}

pub fn string(value: impl Into<String>) -> NodeRef {
    NodeRef::new(kind::STRING_LITERAL).field("value", value.into())
}

pub fn number(value: i64) -> NodeRef {
    NodeRef::new(kind::NUMERIC_LITERAL).field("value", value)
}

pub fn boolean(value: bool) -> NodeRef {
    NodeRef::new(kind::BOOLEAN_LITERAL).field("value", value)
}

pub fn null() -> NodeRef {
    NodeRef::new(kind::NULL_LITERAL)
}

pub fn text(value: impl Into<String>) -> NodeRef {
    NodeRef::new(kind::JSX_TEXT).field("value", value.into())
}

pub fn expr_container(expression: impl Into<Value>) -> NodeRef {
    NodeRef::new(kind::JSX_EXPRESSION_CONTAINER).field("expression", expression)
}

pub fn empty_expr() -> NodeRef {
    NodeRef::new(kind::JSX_EMPTY_EXPRESSION)
}

/// `name={value}` / `name="value"`; pass `Value::Null` for a bare flag.
pub fn attr(name: impl Into<String>, value: impl Into<Value>) -> NodeRef {
    NodeRef::new(kind::JSX_ATTRIBUTE)
        .field("name", jsx_ident(name))
        .field("value", value)
}

pub fn spread_attr(argument: impl Into<Value>) -> NodeRef {
    NodeRef::new(kind::JSX_SPREAD_ATTRIBUTE).field("argument", argument)
}

pub fn open_tag(name: impl Into<Value>, attributes: Vec<Value>, self_closing: bool) -> NodeRef {
    NodeRef::new(kind::JSX_OPENING_ELEMENT)
        .field("name", name)
        .field("attributes", attributes)
        .field("selfClosing", self_closing)
}

pub fn close_tag(name: impl Into<Value>) -> NodeRef {
    NodeRef::new(kind::JSX_CLOSING_ELEMENT).field("name", name)
}

pub fn element_parts(
    opening: NodeRef,
    children: Vec<Value>,
    closing: Option<NodeRef>,
) -> NodeRef {
    NodeRef::new(kind::JSX_ELEMENT)
        .field("openingElement", opening)
        .field("children", children)
        .field(
            "closingElement",
            closing.map(Value::Node).unwrap_or(Value::Null),
        )
}

/// `<tag attrs...>children...</tag>`
pub fn element(tag: &str, attributes: Vec<Value>, children: Vec<Value>) -> NodeRef {
    element_parts(
        open_tag(jsx_ident(tag), attributes, false),
        children,
        Some(close_tag(jsx_ident(tag))),
    )
}

pub fn fragment(children: Vec<Value>) -> NodeRef {
    NodeRef::new(kind::JSX_FRAGMENT)
        .field("openingFragment", NodeRef::new(kind::JSX_OPENING_FRAGMENT))
        .field("children", children)
        .field("closingFragment", NodeRef::new(kind::JSX_CLOSING_FRAGMENT))
}

pub fn call(callee: impl Into<Value>, arguments: Vec<Value>) -> NodeRef {
    NodeRef::new(kind::CALL_EXPRESSION)
        .field("callee", callee)
        .field("arguments", arguments)
}

pub fn member(object: impl Into<Value>, property: impl Into<Value>, computed: bool) -> NodeRef {
    NodeRef::new(kind::MEMBER_EXPRESSION)
        .field("object", object)
        .field("property", property)
        .field("computed", computed)
}

pub fn var_decl(decl_kind: &str, declarations: Vec<Value>) -> NodeRef {
    NodeRef::new(kind::VARIABLE_DECLARATION)
        .field("kind", decl_kind)
        .field("declarations", declarations)
}

pub fn declarator(id: impl Into<Value>, init: impl Into<Value>) -> NodeRef {
    NodeRef::new(kind::VARIABLE_DECLARATOR)
        .field("id", id)
        .field("init", init)
}

pub fn arrow(params: Vec<Value>, body: impl Into<Value>, is_async: bool) -> NodeRef {
    NodeRef::new(kind::ARROW_FUNCTION_EXPRESSION)
        .field("params", params)
        .field("body", body)
        .field("async", is_async)
}

pub fn ret(argument: impl Into<Value>) -> NodeRef {
    NodeRef::new(kind::RETURN_STATEMENT).field("argument", argument)
}

pub fn import(specifiers: Vec<Value>, source: NodeRef) -> NodeRef {
    NodeRef::new(kind::IMPORT_DECLARATION)
        .field("specifiers", specifiers)
        .field("source", source)
}

pub fn import_default(local: NodeRef) -> NodeRef {
    NodeRef::new(kind::IMPORT_DEFAULT_SPECIFIER).field("local", local)
}

pub fn import_named(imported: NodeRef, local: NodeRef) -> NodeRef {
    NodeRef::new(kind::IMPORT_SPECIFIER)
        .field("imported", imported)
        .field("local", local)
}

pub fn export_default(declaration: impl Into<Value>) -> NodeRef {
    NodeRef::new(kind::EXPORT_DEFAULT_DECLARATION).field("declaration", declaration)
}
