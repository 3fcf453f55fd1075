//! Token-cursor parser engine.
//!
//! [`Parser`] owns the materialized token buffer, a cursor into it, the
//! [`LineIndex`] used to position error messages, and the embedded
//! [`GreenTreeBuilder`] the grammar drives. Concrete grammars sit on top and
//! call `consume`/`expect`/`start_node` to emit the tree.
//!
//! The first fault aborts the parse; there is no recovery.

use crate::builder::{Checkpoint, GreenTreeBuilder};
use crate::error::ParseError;
use crate::green::{GreenNode, Token};
use crate::lexer::TokenKind;
use crate::line_index::LineIndex;

pub struct Parser<'s, K: TokenKind, N> {
    tokens: Vec<Token<'s, K>>,
    idx: usize,
    line_index: LineIndex,
    builder: GreenTreeBuilder<'s, K, N>,
}

impl<'s, K: TokenKind, N> Parser<'s, K, N> {
    pub fn new(source: &'s str, tokens: Vec<Token<'s, K>>) -> Self {
        Self {
            tokens,
            idx: 0,
            line_index: LineIndex::new(source),
            builder: GreenTreeBuilder::new(),
        }
    }

    /// The token under the cursor, if any.
    pub fn peek(&self) -> Option<&Token<'s, K>> {
        self.tokens.get(self.idx)
    }

    pub fn peek_kind(&self) -> Option<K> {
        self.peek().map(|token| token.kind)
    }

    /// Whether the cursor sits on a token of `kind`.
    pub fn at(&self, kind: K) -> bool {
        self.peek_kind() == Some(kind)
    }

    pub fn at_end(&self) -> bool {
        self.idx >= self.tokens.len()
    }

    /// The first non-trivia token at or after the cursor.
    pub fn peek_past_trivia(&self) -> Option<&Token<'s, K>> {
        self.tokens[self.idx..]
            .iter()
            .find(|token| !token.kind.is_trivia())
    }

    /// Appends the current token to the tree and advances.
    pub fn consume(&mut self) -> Result<(), ParseError> {
        match self.tokens.get(self.idx) {
            Some(&token) => {
                self.builder.token(token);
                self.idx += 1;
                Ok(())
            }
            None => Err(ParseError::UnexpectedEof {
                expected: "a token".into(),
            }),
        }
    }

    /// Consumes the current token after checking its kind.
    pub fn expect(&mut self, kind: K) -> Result<(), ParseError> {
        if self.at(kind) {
            self.consume()
        } else {
            Err(self.expected_here(kind.to_string()))
        }
    }

    /// Consumes the current token if it is of either kind.
    pub fn expect2(&mut self, first: K, second: K) -> Result<(), ParseError> {
        if self.at(first) || self.at(second) {
            self.consume()
        } else {
            Err(self.expected_here(format!("{first} or {second}")))
        }
    }

    /// Checks the current token's kind and advances without appending it to
    /// the tree. Used to drop delimiters a node conveys structurally.
    pub fn expect_ignore(&mut self, kind: K) -> Result<(), ParseError> {
        if self.at(kind) {
            self.idx += 1;
            Ok(())
        } else {
            Err(self.expected_here(kind.to_string()))
        }
    }

    /// Advances without appending to the tree.
    pub fn ignore(&mut self) {
        assert!(self.idx < self.tokens.len(), "ignore called at end of input");
        self.idx += 1;
    }

    /// Consumes trivia tokens into the current node.
    pub fn eat_trivia(&mut self) -> Result<(), ParseError> {
        while self.peek_kind().is_some_and(|kind| kind.is_trivia()) {
            self.consume()?;
        }
        Ok(())
    }

    /// 1-indexed position of the byte at `offset`.
    pub fn position_at(&self, offset: usize) -> (usize, usize) {
        self.line_index
            .locate(offset)
            .expect("token offsets lie within the source")
    }

    /// `Expected … found …` error at the current token, or an end-of-input
    /// error when the buffer is exhausted.
    pub fn expected_here(&self, expected: impl Into<String>) -> ParseError {
        let expected = expected.into();
        match self.peek() {
            Some(token) => {
                let (row, col) = self.position_at(token.offset);
                ParseError::Expected {
                    expected,
                    found: token.kind.to_string(),
                    row,
                    col,
                }
            }
            None => ParseError::UnexpectedEof { expected },
        }
    }

    pub fn start_node(&mut self, kind: N) {
        self.builder.start_node(kind);
    }

    pub fn checkpoint(&self) -> Checkpoint {
        self.builder.checkpoint()
    }

    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: N) {
        self.builder.start_node_at(checkpoint, kind);
    }

    pub fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    /// Consumes the engine and returns the finished tree.
    pub fn finish(self) -> GreenNode<'s, K, N> {
        self.builder.finish()
    }
}
