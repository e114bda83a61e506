// Lifting tests: canonical UAST back into JSX concrete syntax
// Focus: name reconstruction, attribute rewrap, list repair, failures

use pretty_assertions::assert_eq;
use uast_core::{Error, NodeRef, Result, UastTag, Value};
use uast_jsx::cst::kind;
use uast_jsx::lift;

fn get(value: &Value, name: &str) -> Value {
    value
        .as_node()
        .and_then(|n| n.get(name))
        .unwrap_or(Value::Null)
}

fn uast_ident(name: &str) -> NodeRef {
    UastTag::Identifier.node().field("name", name)
}

fn uast_literal(value: impl Into<Value>) -> NodeRef {
    UastTag::Literal.node().field("value", value)
}

fn uast_attr(name: impl Into<Value>, value: impl Into<Value>) -> NodeRef {
    UastTag::Attr.node().field("name", name).field("value", value)
}

// ===== TAG NAME RECONSTRUCTION =====

#[test]
fn test_string_name_lifts_to_jsx_identifier() -> Result<()> {
    let opening = UastTag::OpenTag
        .node()
        .field("name", "div")
        .field("attributes", Vec::new())
        .field("selfClosing", true);

    let cst = lift(&Value::Node(opening))?;
    assert_eq!(cst.kind(), Some(kind::JSX_OPENING_ELEMENT));
    let name = get(&cst, "name");
    assert_eq!(name.kind(), Some(kind::JSX_IDENTIFIER));
    assert_eq!(get(&name, "name"), Value::from("div"));
    assert_eq!(get(&cst, "selfClosing"), Value::from(true));
    Ok(())
}

#[test]
fn test_identifier_node_name_lifts_to_jsx_identifier() -> Result<()> {
    let opening = UastTag::OpenTag.node().field("name", uast_ident("Widget"));
    let cst = lift(&Value::Node(opening))?;
    let name = get(&cst, "name");
    assert_eq!(name.kind(), Some(kind::JSX_IDENTIFIER));
    assert_eq!(get(&name, "name"), Value::from("Widget"));
    Ok(())
}

#[test]
fn test_member_name_lifts_to_jsx_member_expression() -> Result<()> {
    let name = UastTag::MemberExpr
        .node()
        .field("object", uast_ident("Motion"))
        .field("property", uast_ident("div"));
    let opening = UastTag::OpenTag.node().field("name", name);

    let cst = lift(&Value::Node(opening))?;
    let name = get(&cst, "name");
    assert_eq!(name.kind(), Some(kind::JSX_MEMBER_EXPRESSION));
    let object = get(&name, "object");
    assert_eq!(object.kind(), Some(kind::JSX_IDENTIFIER));
    assert_eq!(get(&object, "name"), Value::from("Motion"));
    let property = get(&name, "property");
    assert_eq!(property.kind(), Some(kind::JSX_IDENTIFIER));
    assert_eq!(get(&property, "name"), Value::from("div"));
    Ok(())
}

#[test]
fn test_literal_in_name_position_is_rejected() {
    let opening = UastTag::OpenTag.node().field("name", uast_literal("div"));
    let err = lift(&Value::Node(opening)).unwrap_err();
    assert!(matches!(err, Error::BadTagName { .. }), "got {err}");
}

// ===== ATTRIBUTE VALUE REWRAP =====

#[test]
fn test_literal_attribute_value_stays_bare() -> Result<()> {
    let attr = uast_attr("id", uast_literal("root"));
    let cst = lift(&Value::Node(attr))?;
    assert_eq!(cst.kind(), Some(kind::JSX_ATTRIBUTE));
    assert_eq!(get(&cst, "value").kind(), Some(kind::STRING_LITERAL));
    Ok(())
}

#[test]
fn test_expression_attribute_value_gets_container() -> Result<()> {
    let attr = uast_attr("value", uast_ident("count"));
    let cst = lift(&Value::Node(attr))?;
    let value = get(&cst, "value");
    assert_eq!(value.kind(), Some(kind::JSX_EXPRESSION_CONTAINER));
    assert_eq!(
        get(&value, "expression").kind(),
        Some(kind::IDENTIFIER)
    );
    Ok(())
}

#[test]
fn test_container_attribute_value_is_not_double_wrapped() -> Result<()> {
    let container = UastTag::Expr.node().field("expression", uast_ident("x"));
    let attr = uast_attr("onClick", container);
    let cst = lift(&Value::Node(attr))?;
    let value = get(&cst, "value");
    assert_eq!(value.kind(), Some(kind::JSX_EXPRESSION_CONTAINER));
    assert_eq!(
        get(&value, "expression").kind(),
        Some(kind::IDENTIFIER)
    );
    Ok(())
}

#[test]
fn test_valueless_attribute_stays_valueless() -> Result<()> {
    let attr = uast_attr("disabled", Value::Null);
    let cst = lift(&Value::Node(attr))?;
    assert_eq!(get(&cst, "value"), Value::Null);
    Ok(())
}

// ===== LIST REPAIR =====

#[test]
fn test_indexed_mapping_children_rebuild_in_order() -> Result<()> {
    // Generic persistence can write a list out as an index-keyed record.
    let children = NodeRef::new("")
        .field("1", UastTag::Text.node().field("value", "b"))
        .field("0", UastTag::Text.node().field("value", "a"));
    let element = UastTag::Element
        .node()
        .field(
            "opening",
            UastTag::OpenTag.node().field("name", "div"),
        )
        .field("children", children);

    let cst = lift(&Value::Node(element))?;
    let children = get(&cst, "children");
    let children = children.as_list().expect("children list");
    assert_eq!(children.len(), 2);
    assert_eq!(get(&children[0], "value"), Value::from("a"));
    assert_eq!(get(&children[1], "value"), Value::from("b"));
    Ok(())
}

#[test]
fn test_non_indexed_record_in_list_position_becomes_empty() -> Result<()> {
    let element = UastTag::Element
        .node()
        .field(
            "opening",
            UastTag::OpenTag.node().field("name", "div"),
        )
        .field("children", NodeRef::new("").field("oops", "x"));

    let cst = lift(&Value::Node(element))?;
    assert_eq!(get(&cst, "children"), Value::List(Vec::new()));
    Ok(())
}

// ===== TAG RULES =====

#[test]
fn test_hook_tags_lift_to_plain_calls() -> Result<()> {
    let call = UastTag::UseState
        .node()
        .field("callee", uast_ident("useState"))
        .field("arguments", vec![Value::Node(uast_literal(0_i64))]);

    let cst = lift(&Value::Node(call))?;
    assert_eq!(cst.kind(), Some(kind::CALL_EXPRESSION));
    assert_eq!(get(&cst, "callee").kind(), Some(kind::IDENTIFIER));
    let arguments = get(&cst, "arguments");
    assert_eq!(
        arguments.as_list().expect("arguments")[0].kind(),
        Some(kind::NUMERIC_LITERAL)
    );
    Ok(())
}

#[test]
fn test_literal_payloads_pick_their_spelling() -> Result<()> {
    let cases = [
        (Value::from("s"), kind::STRING_LITERAL),
        (Value::from(3_i64), kind::NUMERIC_LITERAL),
        (Value::from(true), kind::BOOLEAN_LITERAL),
        (Value::Null, kind::NULL_LITERAL),
    ];
    for (payload, expected) in cases {
        let cst = lift(&Value::Node(uast_literal(payload)))?;
        assert_eq!(cst.kind(), Some(expected));
    }
    Ok(())
}

#[test]
fn test_member_computed_is_inferred_from_property() -> Result<()> {
    let plain = UastTag::MemberExpr
        .node()
        .field("object", uast_ident("a"))
        .field("property", uast_ident("b"));
    let cst = lift(&Value::Node(plain))?;
    assert_eq!(get(&cst, "computed"), Value::from(false));

    let keyed = UastTag::MemberExpr
        .node()
        .field("object", uast_ident("a"))
        .field("property", uast_literal("b"));
    let cst = lift(&Value::Node(keyed))?;
    assert_eq!(get(&cst, "computed"), Value::from(true));
    Ok(())
}

#[test]
fn test_fragment_lifts_with_markers() -> Result<()> {
    let fragment = UastTag::Fragment
        .node()
        .field("children", vec![Value::Node(UastTag::Text.node().field("value", "x"))]);
    let cst = lift(&Value::Node(fragment))?;
    assert_eq!(cst.kind(), Some(kind::JSX_FRAGMENT));
    assert_eq!(
        get(&cst, "openingFragment").kind(),
        Some(kind::JSX_OPENING_FRAGMENT)
    );
    assert_eq!(
        get(&cst, "closingFragment").kind(),
        Some(kind::JSX_CLOSING_FRAGMENT)
    );
    Ok(())
}

// ===== FAILURES AND FALLBACK =====

#[test]
fn test_missing_required_field_fails() {
    let err = lift(&Value::Node(UastTag::Identifier.node())).unwrap_err();
    match err {
        Error::MissingField { kind, field } => {
            assert_eq!(kind, UastTag::Identifier.as_str());
            assert_eq!(field, "name");
        }
        other => panic!("expected MissingField, got {other}"),
    }
}

#[test]
fn test_text_without_value_fails() {
    let err = lift(&Value::Node(UastTag::Text.node())).unwrap_err();
    assert!(matches!(err, Error::MissingField { .. }));
}

#[test]
fn test_unknown_tags_pass_through_with_lifted_fields() -> Result<()> {
    let node = NodeRef::new("UAST_SomethingNew").field("child", uast_ident("x"));
    let cst = lift(&Value::Node(node))?;
    let node = cst.as_node().expect("node");
    assert_eq!(node.kind(), "UAST_SomethingNew");
    assert_eq!(
        node.get("child").and_then(|v| v.kind().map(str::to_string)),
        Some(kind::IDENTIFIER.to_string())
    );
    Ok(())
}
