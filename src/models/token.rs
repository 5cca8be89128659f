//! Token stream model
//!
//! Tokens are the atomic unit of reconstructed output. A builder produces them
//! once, in order; renderers only read them.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Keyword,
    Punctuation,
    Whitespace,
    Newline,
    TypeName,
    MemberName,
    StringLiteral,
    Literal,
    Text,
    LineIdMarker,
    DocumentationRangeStart,
    DocumentationRangeEnd,
    DeprecatedRangeStart,
    DeprecatedRangeEnd,
    SkipDiffRangeStart,
    SkipDiffRangeEnd,
}

impl TokenKind {
    /// Range markers and line-id markers print nothing
    pub fn is_marker(&self) -> bool {
        matches!(
            self,
            Self::LineIdMarker
                | Self::DocumentationRangeStart
                | Self::DocumentationRangeEnd
                | Self::DeprecatedRangeStart
                | Self::DeprecatedRangeEnd
                | Self::SkipDiffRangeStart
                | Self::SkipDiffRangeEnd
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Keyword => "keyword",
            Self::Punctuation => "punctuation",
            Self::Whitespace => "whitespace",
            Self::Newline => "newline",
            Self::TypeName => "type_name",
            Self::MemberName => "member_name",
            Self::StringLiteral => "string_literal",
            Self::Literal => "literal",
            Self::Text => "text",
            Self::LineIdMarker => "line_id_marker",
            Self::DocumentationRangeStart => "documentation_range_start",
            Self::DocumentationRangeEnd => "documentation_range_end",
            Self::DeprecatedRangeStart => "deprecated_range_start",
            Self::DeprecatedRangeEnd => "deprecated_range_end",
            Self::SkipDiffRangeStart => "skip_diff_range_start",
            Self::SkipDiffRangeEnd => "skip_diff_range_end",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Set on the token that marks a symbol's declaration point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition_id: Option<String>,
    /// Set on references to a type defined in the same document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigate_to_id: Option<String>,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: Some(value.into()),
            definition_id: None,
            navigate_to_id: None,
        }
    }

    pub fn marker(kind: TokenKind) -> Self {
        Self {
            kind,
            value: None,
            definition_id: None,
            navigate_to_id: None,
        }
    }

    pub fn line_id(definition_id: impl Into<String>) -> Self {
        Self {
            kind: TokenKind::LineIdMarker,
            value: None,
            definition_id: Some(definition_id.into()),
            navigate_to_id: None,
        }
    }

    pub fn newline() -> Self {
        Self::new(TokenKind::Newline, "\n")
    }

    pub fn with_navigate_to(mut self, id: Option<String>) -> Self {
        self.navigate_to_id = id;
        self
    }

    pub fn text(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

/// Renders a token sequence back to plain text, ignoring markers
pub fn concat(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter(|t| !t.kind.is_marker())
        .map(Token::text)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_tokens_have_no_text() {
        let token = Token::marker(TokenKind::DeprecatedRangeStart);
        assert!(token.kind.is_marker());
        assert_eq!(token.text(), "");

        let id = Token::line_id("T:N.C");
        assert_eq!(id.definition_id.as_deref(), Some("T:N.C"));
        assert!(id.value.is_none());
    }

    #[test]
    fn test_concat_skips_markers() {
        let tokens = vec![
            Token::new(TokenKind::Keyword, "public"),
            Token::line_id("T:C"),
            Token::new(TokenKind::Whitespace, " "),
            Token::new(TokenKind::TypeName, "C"),
            Token::newline(),
        ];
        assert_eq!(concat(&tokens), "public C\n");
    }

    #[test]
    fn test_serialization_omits_empty_ids() {
        let json = serde_json::to_value(Token::new(TokenKind::Keyword, "class")).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "keyword", "value": "class"}));
    }
}
