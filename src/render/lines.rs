//! Line renderer
//!
//! Reduces a built token sequence into display lines. The reduction itself is
//! fixed; a [`LineStyle`] decides how text is decorated, so plain text and
//! HTML passes share one token stream.

use std::borrow::Cow;

use serde::Serialize;

use crate::models::token::{Token, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayLine {
    pub text: String,
    pub definition_id: Option<String>,
}

/// Ranges open at the point a token is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderFlags {
    pub deprecated: bool,
    pub documentation: bool,
}

/// Override points for a rendering pass
pub trait LineStyle: Send + Sync {
    fn documentation_start(&self, _line: &mut String) {}

    fn documentation_end(&self, _line: &mut String) {}

    fn deprecated_start(&self, _line: &mut String) {}

    fn deprecated_end(&self, _line: &mut String) {}

    fn style_text<'t>(&self, text: &'t str, _flags: RenderFlags) -> Cow<'t, str> {
        Cow::Borrowed(text)
    }
}

/// Token text as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyle;

impl LineStyle for PlainStyle {}

/// Escaped HTML; deprecated and documentation text wrapped in classed spans.
///
/// Spans are closed per token so every line stays well-formed on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlStyle;

impl LineStyle for HtmlStyle {
    fn style_text<'t>(&self, text: &'t str, flags: RenderFlags) -> Cow<'t, str> {
        let escaped = escape_html(text);
        let class = if flags.deprecated {
            "deprecated"
        } else if flags.documentation {
            "documentation"
        } else {
            return escaped;
        };
        if text.trim().is_empty() {
            return escaped;
        }
        Cow::Owned(format!("<span class=\"{}\">{}</span>", class, escaped))
    }
}

pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['<', '>', '&', '"']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// One line per `Newline` token; the last definition id seen on a line wins.
pub fn render_lines(tokens: &[Token], style: &dyn LineStyle) -> Vec<DisplayLine> {
    let mut lines = Vec::new();
    let mut buffer = String::new();
    let mut current_id: Option<&str> = None;
    let mut deprecated_depth = 0usize;
    let mut documentation_depth = 0usize;

    for token in tokens {
        if let Some(id) = token.definition_id.as_deref() {
            current_id = Some(id);
        }
        match token.kind {
            TokenKind::Newline => lines.push(DisplayLine {
                text: std::mem::take(&mut buffer),
                definition_id: current_id.take().map(str::to_string),
            }),
            TokenKind::DocumentationRangeStart => {
                documentation_depth += 1;
                style.documentation_start(&mut buffer);
            }
            TokenKind::DocumentationRangeEnd => {
                documentation_depth = documentation_depth.saturating_sub(1);
                style.documentation_end(&mut buffer);
            }
            TokenKind::DeprecatedRangeStart => {
                deprecated_depth += 1;
                style.deprecated_start(&mut buffer);
            }
            TokenKind::DeprecatedRangeEnd => {
                deprecated_depth = deprecated_depth.saturating_sub(1);
                style.deprecated_end(&mut buffer);
            }
            TokenKind::LineIdMarker | TokenKind::SkipDiffRangeStart | TokenKind::SkipDiffRangeEnd => {}
            _ => {
                let flags = RenderFlags {
                    deprecated: deprecated_depth > 0,
                    documentation: documentation_depth > 0,
                };
                buffer.push_str(&style.style_text(token.text(), flags));
            }
        }
    }

    if !buffer.is_empty() {
        tracing::debug!("Dropping {} trailing bytes without a line break", buffer.len());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Token> {
        vec![
            Token::new(TokenKind::Keyword, "public"),
            Token::new(TokenKind::Whitespace, " "),
            Token::new(TokenKind::Keyword, "class"),
            Token::new(TokenKind::Whitespace, " "),
            Token::line_id("T:N.C"),
            Token::new(TokenKind::TypeName, "C"),
            Token::newline(),
            Token::marker(TokenKind::DeprecatedRangeStart),
            Token::new(TokenKind::Text, "/// <old> & \"odd\""),
            Token::newline(),
            Token::marker(TokenKind::DeprecatedRangeEnd),
            Token::marker(TokenKind::SkipDiffRangeStart),
            Token::new(TokenKind::Literal, "42"),
            Token::marker(TokenKind::SkipDiffRangeEnd),
            Token::newline(),
        ]
    }

    #[test]
    fn test_one_line_per_newline() {
        let tokens = sample();
        let newlines = tokens.iter().filter(|t| t.kind == TokenKind::Newline).count();
        let lines = render_lines(&tokens, &PlainStyle);
        assert_eq!(lines.len(), newlines);
        assert_eq!(lines[0].text, "public class C");
        assert_eq!(lines[0].definition_id.as_deref(), Some("T:N.C"));
        assert_eq!(lines[1].definition_id, None);
        assert_eq!(lines[2].text, "42");
    }

    #[test]
    fn test_last_definition_on_line_wins() {
        let tokens = vec![
            Token::line_id("M:A"),
            Token::new(TokenKind::MemberName, "A"),
            Token::line_id("M:B"),
            Token::new(TokenKind::MemberName, "B"),
            Token::newline(),
            Token::new(TokenKind::Punctuation, "}"),
            Token::newline(),
        ];
        let lines = render_lines(&tokens, &PlainStyle);
        assert_eq!(lines[0].definition_id.as_deref(), Some("M:B"));
        assert_eq!(lines[1].definition_id, None);
    }

    #[test]
    fn test_render_is_repeatable() {
        let tokens = sample();
        assert_eq!(
            render_lines(&tokens, &PlainStyle),
            render_lines(&tokens, &PlainStyle)
        );
        assert_eq!(
            render_lines(&tokens, &HtmlStyle),
            render_lines(&tokens, &HtmlStyle)
        );
    }

    #[test]
    fn test_html_style_escapes_and_marks_deprecated() {
        let lines = render_lines(&sample(), &HtmlStyle);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].text, "public class C");
        assert_eq!(
            lines[1].text,
            "<span class=\"deprecated\">/// &lt;old&gt; &amp; &quot;odd&quot;</span>"
        );
        assert_eq!(lines[2].text, "42");
    }

    #[test]
    fn test_trailing_text_without_newline_is_not_a_line() {
        let tokens = vec![Token::new(TokenKind::Text, "dangling")];
        assert!(render_lines(&tokens, &PlainStyle).is_empty());
    }

    #[test]
    fn test_escape_html_borrows_clean_text() {
        assert!(matches!(escape_html("plain"), Cow::Borrowed(_)));
        assert_eq!(escape_html("a<b>"), "a&lt;b&gt;");
    }
}
