//! Token emission primitives shared by the builder and constant formatting

use std::collections::HashSet;

use super::index::DocumentIndex;
use crate::error::BuildError;
use crate::models::symbol::TypeRef;
use crate::models::token::{Token, TokenKind};

pub struct TokenWriter<'i> {
    tokens: Vec<Token>,
    index: &'i DocumentIndex,
    defined: HashSet<String>,
    indent_width: usize,
    opened: usize,
    closed: usize,
}

impl<'i> TokenWriter<'i> {
    pub fn new(index: &'i DocumentIndex, indent_width: usize) -> Self {
        Self {
            tokens: Vec::new(),
            index,
            defined: HashSet::new(),
            indent_width,
            opened: 0,
            closed: 0,
        }
    }

    pub fn index(&self) -> &'i DocumentIndex {
        self.index
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn keyword(&mut self, keyword: &str) {
        self.push(Token::new(TokenKind::Keyword, keyword));
    }

    pub fn punct(&mut self, punctuation: &str) {
        self.push(Token::new(TokenKind::Punctuation, punctuation));
    }

    pub fn space(&mut self) {
        self.push(Token::new(TokenKind::Whitespace, " "));
    }

    pub fn text(&mut self, text: &str) {
        self.push(Token::new(TokenKind::Text, text));
    }

    pub fn literal(&mut self, literal: &str) {
        self.push(Token::new(TokenKind::Literal, literal));
    }

    pub fn string_literal(&mut self, literal: &str) {
        self.push(Token::new(TokenKind::StringLiteral, literal));
    }

    pub fn member_name(&mut self, name: &str) {
        self.push(Token::new(TokenKind::MemberName, name));
    }

    pub fn type_name(&mut self, name: &str, navigate_to: Option<String>) {
        self.push(Token::new(TokenKind::TypeName, name).with_navigate_to(navigate_to));
    }

    /// Keyword followed by a space
    pub fn keyword_sp(&mut self, keyword: &str) {
        self.keyword(keyword);
        self.space();
    }

    pub fn newline(&mut self) {
        self.push(Token::newline());
    }

    pub fn marker(&mut self, kind: TokenKind) {
        self.push(Token::marker(kind));
    }

    pub fn indent(&mut self, depth: usize) {
        let width = self.indent_width * depth;
        if width > 0 {
            self.push(Token::new(TokenKind::Whitespace, " ".repeat(width)));
        }
    }

    /// Claim a definition id and mark the declaration point
    pub fn define(&mut self, id: &str) -> Result<(), BuildError> {
        if !self.defined.insert(id.to_string()) {
            return Err(BuildError::DuplicateDefinition { id: id.to_string() });
        }
        self.push(Token::line_id(id));
        Ok(())
    }

    /// ` {` and a line break; pairs with [`close_block`](Self::close_block)
    pub fn open_block(&mut self) {
        self.space();
        self.punct("{");
        self.newline();
        self.opened += 1;
    }

    pub fn close_block(&mut self, depth: usize) {
        self.indent(depth);
        self.punct("}");
        self.newline();
        self.closed += 1;
    }

    pub fn is_balanced(&self) -> bool {
        self.opened == self.closed
    }

    pub fn separated<T>(
        &mut self,
        items: impl IntoIterator<Item = T>,
        separator: &str,
        mut write: impl FnMut(&mut Self, T),
    ) {
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.punct(separator);
                self.space();
            }
            write(self, item);
        }
    }

    pub fn type_ref(&mut self, reference: &TypeRef, defining: Option<&str>) {
        if reference.is_keyword() {
            self.keyword(&reference.name);
        } else {
            for outer in &reference.containing_types {
                let name = outer.split('`').next().unwrap_or(outer);
                self.type_name(name, None);
                self.punct(".");
            }
            let navigate_to = self.index.navigate_to(reference, defining);
            self.type_name(&reference.name, navigate_to);
            if !reference.type_arguments.is_empty() {
                self.punct("<");
                self.separated(&reference.type_arguments, ",", |w, arg| {
                    w.type_ref(arg, defining)
                });
                self.punct(">");
            }
        }
        if reference.nullable {
            self.punct("?");
        }
        for _ in 0..reference.array_rank {
            self.punct("[]");
        }
    }

    pub fn defined_count(&self) -> usize {
        self.defined.len()
    }

    pub fn finish(self) -> Vec<Token> {
        self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::token::concat;

    #[test]
    fn test_duplicate_definition_rejected() {
        let index = DocumentIndex::default();
        let mut w = TokenWriter::new(&index, 4);
        assert!(w.define("T:N.C").is_ok());
        assert_eq!(
            w.define("T:N.C"),
            Err(BuildError::DuplicateDefinition {
                id: "T:N.C".to_string()
            })
        );
        assert_eq!(w.defined_count(), 1);
    }

    #[test]
    fn test_blocks_balance() {
        let index = DocumentIndex::default();
        let mut w = TokenWriter::new(&index, 4);
        w.keyword("namespace");
        w.open_block();
        assert!(!w.is_balanced());
        w.close_block(0);
        assert!(w.is_balanced());
        assert_eq!(concat(&w.finish()), "namespace {\n}\n");
    }

    #[test]
    fn test_type_ref_rendering() {
        let index = DocumentIndex::default();
        let mut w = TokenWriter::new(&index, 4);
        let reference = TypeRef::new("Dictionary")
            .in_namespace("System.Collections.Generic")
            .with_type_argument(TypeRef::new("string"))
            .with_type_argument(TypeRef::new("int").array(1));
        w.type_ref(&reference, None);
        let tokens = w.finish();
        assert_eq!(concat(&tokens), "Dictionary<string, int[]>");
        assert_eq!(tokens[0].kind, TokenKind::TypeName);
        assert_eq!(tokens[2].kind, TokenKind::Keyword);
    }

    #[test]
    fn test_nested_reference_and_nullable() {
        let index = DocumentIndex::default();
        let mut w = TokenWriter::new(&index, 2);
        let mut reference = TypeRef::new("Inner").in_namespace("N");
        reference.containing_types.push("Outer`1".to_string());
        reference.nullable = true;
        w.indent(1);
        w.type_ref(&reference, None);
        assert_eq!(concat(&w.finish()), "  Outer.Inner?");
    }
}
