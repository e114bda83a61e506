//! The closed, versioned UAST tag vocabulary.
//!
//! Every canonical node carries one of these tags as its `type`
//! discriminator, spelled with the `UAST_` prefix in serialized form.
//! Constructs outside the vocabulary are carried as passthrough nodes with
//! their source kind tag; they never masquerade as UAST tags.

use crate::tree::NodeRef;
use std::fmt;

/// Discriminator prefix shared by every canonical tag.
pub const UAST_PREFIX: &str = "UAST_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UastTag {
    Element,
    OpenTag,
    CloseTag,
    Fragment,
    Attr,
    SpreadAttr,
    Text,
    Expr,
    SpreadChild,
    VarDecl,
    VarDeclarator,
    Func,
    FuncDecl,
    Import,
    ImportDefaultSpecifier,
    ImportSpecifier,
    ImportNamespaceSpecifier,
    ExportNamed,
    ExportDefault,
    Return,
    CallExpr,
    UseState,
    UseEffect,
    UseRef,
    UseContext,
    UseReducer,
    MemberExpr,
    Literal,
    Identifier,
    NamespacedName,
    EmptyExpr,
}

impl UastTag {
    pub fn as_str(self) -> &'static str {
        match self {
            UastTag::Element => "UAST_Element",
            UastTag::OpenTag => "UAST_OpenTag",
            UastTag::CloseTag => "UAST_CloseTag",
            UastTag::Fragment => "UAST_Fragment",
            UastTag::Attr => "UAST_Attr",
            UastTag::SpreadAttr => "UAST_SpreadAttr",
            UastTag::Text => "UAST_Text",
            UastTag::Expr => "UAST_Expr",
            UastTag::SpreadChild => "UAST_SpreadChild",
            UastTag::VarDecl => "UAST_VarDecl",
            UastTag::VarDeclarator => "UAST_VarDeclarator",
            UastTag::Func => "UAST_Func",
            UastTag::FuncDecl => "UAST_FuncDecl",
            UastTag::Import => "UAST_Import",
            UastTag::ImportDefaultSpecifier => "UAST_ImportDefaultSpecifier",
            UastTag::ImportSpecifier => "UAST_ImportSpecifier",
            UastTag::ImportNamespaceSpecifier => "UAST_ImportNamespaceSpecifier",
            UastTag::ExportNamed => "UAST_ExportNamed",
            UastTag::ExportDefault => "UAST_ExportDefault",
            UastTag::Return => "UAST_Return",
            UastTag::CallExpr => "UAST_CallExpr",
            UastTag::UseState => "UAST_UseState",
            UastTag::UseEffect => "UAST_UseEffect",
            UastTag::UseRef => "UAST_UseRef",
            UastTag::UseContext => "UAST_UseContext",
            UastTag::UseReducer => "UAST_UseReducer",
            UastTag::MemberExpr => "UAST_MemberExpr",
            UastTag::Literal => "UAST_Literal",
            UastTag::Identifier => "UAST_Identifier",
            UastTag::NamespacedName => "UAST_NamespacedName",
            UastTag::EmptyExpr => "UAST_EmptyExpr",
        }
    }

    /// Parse a serialized tag back into the vocabulary. Tags outside the
    /// closed set (including other `UAST_`-prefixed strings) return `None`.
    pub fn parse(tag: &str) -> Option<UastTag> {
        let tag = match tag {
            "UAST_Element" => UastTag::Element,
            "UAST_OpenTag" => UastTag::OpenTag,
            "UAST_CloseTag" => UastTag::CloseTag,
            "UAST_Fragment" => UastTag::Fragment,
            "UAST_Attr" => UastTag::Attr,
            "UAST_SpreadAttr" => UastTag::SpreadAttr,
            "UAST_Text" => UastTag::Text,
            "UAST_Expr" => UastTag::Expr,
            "UAST_SpreadChild" => UastTag::SpreadChild,
            "UAST_VarDecl" => UastTag::VarDecl,
            "UAST_VarDeclarator" => UastTag::VarDeclarator,
            "UAST_Func" => UastTag::Func,
            "UAST_FuncDecl" => UastTag::FuncDecl,
            "UAST_Import" => UastTag::Import,
            "UAST_ImportDefaultSpecifier" => UastTag::ImportDefaultSpecifier,
            "UAST_ImportSpecifier" => UastTag::ImportSpecifier,
            "UAST_ImportNamespaceSpecifier" => UastTag::ImportNamespaceSpecifier,
            "UAST_ExportNamed" => UastTag::ExportNamed,
            "UAST_ExportDefault" => UastTag::ExportDefault,
            "UAST_Return" => UastTag::Return,
            "UAST_CallExpr" => UastTag::CallExpr,
            "UAST_UseState" => UastTag::UseState,
            "UAST_UseEffect" => UastTag::UseEffect,
            "UAST_UseRef" => UastTag::UseRef,
            "UAST_UseContext" => UastTag::UseContext,
            "UAST_UseReducer" => UastTag::UseReducer,
            "UAST_MemberExpr" => UastTag::MemberExpr,
            "UAST_Literal" => UastTag::Literal,
            "UAST_Identifier" => UastTag::Identifier,
            "UAST_NamespacedName" => UastTag::NamespacedName,
            "UAST_EmptyExpr" => UastTag::EmptyExpr,
            _ => return None,
        };
        Some(tag)
    }

    /// True for the specialized call tags produced by the hook whitelist.
    pub fn is_call(self) -> bool {
        matches!(
            self,
            UastTag::CallExpr
                | UastTag::UseState
                | UastTag::UseEffect
                | UastTag::UseRef
                | UastTag::UseContext
                | UastTag::UseReducer
        )
    }

    /// Start an empty node carrying this tag.
    pub fn node(self) -> NodeRef {
        NodeRef::new(self.as_str())
    }
}

impl fmt::Display for UastTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-tag test for "already in the target schema", used by the lowering
/// idempotence guard. Deliberately a string test: mixed inputs may carry
/// canonical tags on nodes that were never built through [`UastTag`].
pub fn is_uast_kind(kind: &str) -> bool {
    kind.starts_with(UAST_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_spelling_round_trips() {
        for tag in [
            UastTag::Element,
            UastTag::OpenTag,
            UastTag::Attr,
            UastTag::UseReducer,
            UastTag::EmptyExpr,
        ] {
            assert_eq!(UastTag::parse(tag.as_str()), Some(tag));
        }
        assert_eq!(UastTag::parse("UAST_Unknown"), None);
        assert_eq!(UastTag::parse("JSXElement"), None);
    }

    #[test]
    fn prefix_test_is_not_identity_based() {
        assert!(is_uast_kind("UAST_Element"));
        assert!(is_uast_kind("UAST_SomethingNewer"));
        assert!(!is_uast_kind("JSXElement"));
    }
}
