//! Recursive-descent parser for LaTeX surface syntax.
//!
//! Produces a lossless tree: trivia is consumed verbatim into whichever node
//! encloses it, delimiters stay inside their groups, and unknown commands
//! are preserved as generic [`LatexKind::Command`] nodes. The parser is
//! permissive where LaTeX is: mixed `(a, b]` delimiters are allowed and
//! `\begin`/`\end` names are not required to match.

use crate::error::{ParseError, SyntaxError};
use crate::green::Token;
use crate::lexer::Lexer;
use crate::parser::Parser;

use super::{LatexKind, LatexNode, LatexToken};

/// Parses `source` into a lossless LaTeX tree.
///
/// The first lexical or structural fault aborts the parse.
pub fn parse(source: &str) -> Result<LatexNode<'_>, SyntaxError> {
    let mut lexer = Lexer::<LatexToken>::new(source);
    let tokens = lexer.tokenize()?;
    if !lexer.is_at_end() {
        return Err(lexer.leftover_error().into());
    }
    log::debug!("parsing {} LaTeX tokens", tokens.len());
    let parser = LatexParser::new(source, tokens);
    Ok(parser.parse_root()?)
}

struct LatexParser<'s> {
    p: Parser<'s, LatexToken, LatexKind>,
}

impl<'s> LatexParser<'s> {
    fn new(source: &'s str, tokens: Vec<Token<'s, LatexToken>>) -> Self {
        Self {
            p: Parser::new(source, tokens),
        }
    }

    fn parse_root(mut self) -> Result<LatexNode<'s>, ParseError> {
        self.p.start_node(LatexKind::Root);
        while !self.p.at_end() {
            self.content()?;
        }
        self.p.finish_node();
        Ok(self.p.finish())
    }

    /// Parses one content item at the cursor. Enclosing loops stop on their
    /// own terminators before calling this.
    fn content(&mut self) -> Result<(), ParseError> {
        let Some(token) = self.p.peek() else {
            return Ok(());
        };
        let kind = token.kind;
        let offset = token.offset;
        let command_name = token.name();
        let command_symbol = token.symbol();
        match kind {
            LatexToken::LineBreak | LatexToken::Whitespace | LatexToken::LineComment => {
                self.p.consume()
            }
            LatexToken::RightCurly | LatexToken::RightParen | LatexToken::RightBracket => {
                let (row, col) = self.p.position_at(offset);
                Err(ParseError::UnmatchedPunctuation { row, col })
            }
            LatexToken::LeftCurly => self.curly_group(),
            LatexToken::LeftParen | LatexToken::LeftBracket => self.mixed_group(),
            LatexToken::Dollar => self.formula(),
            LatexToken::Word => self.text(),
            LatexToken::Eq | LatexToken::Pipe | LatexToken::Comma => self.p.consume(),
            LatexToken::Command => {
                if command_name == Some("begin") {
                    self.environment()
                } else if command_symbol == Some('[') {
                    self.equation()
                } else {
                    self.command()
                }
            }
        }
    }

    /// `{ Content* }`, both delimiters kept as children.
    fn curly_group(&mut self) -> Result<(), ParseError> {
        self.p.start_node(LatexKind::CurlyGroup);
        self.p.consume()?; // '{'
        while !matches!(self.p.peek_kind(), None | Some(LatexToken::RightCurly)) {
            self.content()?;
        }
        self.p.expect(LatexToken::RightCurly)?;
        self.p.finish_node();
        Ok(())
    }

    /// `[ Content* ]`, the optional-argument form after `\begin`.
    fn bracket_group(&mut self) -> Result<(), ParseError> {
        self.p.start_node(LatexKind::BracketGroup);
        self.p.consume()?; // '['
        loop {
            match self.p.peek_kind() {
                None | Some(LatexToken::RightCurly) | Some(LatexToken::RightBracket) => break,
                _ if self.at_end_command() => break,
                _ => self.content()?,
            }
        }
        self.p.expect(LatexToken::RightBracket)?;
        self.p.finish_node();
        Ok(())
    }

    /// `( Content* )` or `[ Content* ]`; the delimiters may be mismatched,
    /// as in `(a, b]`.
    fn mixed_group(&mut self) -> Result<(), ParseError> {
        self.p.start_node(LatexKind::MixedGroup);
        self.p.consume()?; // '(' or '['
        loop {
            match self.p.peek_kind() {
                None
                | Some(LatexToken::RightCurly)
                | Some(LatexToken::RightParen)
                | Some(LatexToken::RightBracket) => break,
                _ if self.at_end_command() => break,
                _ => self.content()?,
            }
        }
        self.p.expect2(LatexToken::RightParen, LatexToken::RightBracket)?;
        self.p.finish_node();
        Ok(())
    }

    /// Inline math: `$ Content* $`.
    fn formula(&mut self) -> Result<(), ParseError> {
        self.p.start_node(LatexKind::Formula);
        self.p.consume()?; // '$'
        loop {
            match self.p.peek_kind() {
                None | Some(LatexToken::Dollar) | Some(LatexToken::RightCurly) => break,
                _ if self.at_end_command() => break,
                _ => self.content()?,
            }
        }
        self.p.expect(LatexToken::Dollar)?;
        self.p.finish_node();
        Ok(())
    }

    /// Display math: `\[ Content* \]`.
    fn equation(&mut self) -> Result<(), ParseError> {
        self.p.start_node(LatexKind::Equation);
        self.p.consume()?; // '\['
        loop {
            match self.p.peek_kind() {
                None | Some(LatexToken::RightCurly) => break,
                _ if self.at_end_command() || self.at_command_symbol(']') => break,
                _ => self.content()?,
            }
        }
        if self.at_command_symbol(']') {
            self.p.consume()?;
        } else {
            return Err(self.p.expected_here("'\\]'"));
        }
        self.p.finish_node();
        Ok(())
    }

    /// `Begin Content* End`. The begin and end names are recorded but not
    /// checked against each other; a later pass can validate them.
    fn environment(&mut self) -> Result<(), ParseError> {
        self.p.start_node(LatexKind::Environment);
        self.begin()?;
        loop {
            match self.p.peek_kind() {
                None | Some(LatexToken::RightCurly) => {
                    return Err(self.p.expected_here("'\\end'"));
                }
                _ if self.at_end_command() => break,
                _ => self.content()?,
            }
        }
        self.end()?;
        self.p.finish_node();
        Ok(())
    }

    /// `\begin` with an optional `{name}` and an optional `[options]`.
    fn begin(&mut self) -> Result<(), ParseError> {
        self.p.start_node(LatexKind::Begin);
        self.p.consume()?; // '\begin'
        if self.lookahead(LatexToken::LeftCurly) {
            self.p.eat_trivia()?;
            self.curly_group()?;
        }
        if self.lookahead(LatexToken::LeftBracket) {
            self.p.eat_trivia()?;
            self.bracket_group()?;
        }
        self.p.finish_node();
        Ok(())
    }

    /// `\end` with an optional `{name}`.
    fn end(&mut self) -> Result<(), ParseError> {
        self.p.start_node(LatexKind::End);
        self.p.consume()?; // '\end'
        if self.lookahead(LatexToken::LeftCurly) {
            self.p.eat_trivia()?;
            self.curly_group()?;
        }
        self.p.finish_node();
        Ok(())
    }

    /// A generic command and the argument-like groups that follow it.
    fn command(&mut self) -> Result<(), ParseError> {
        self.p.start_node(LatexKind::Command);
        self.p.consume()?; // the command token
        loop {
            match self.p.peek_past_trivia().map(|token| token.kind) {
                Some(LatexToken::LeftCurly) => {
                    self.p.eat_trivia()?;
                    self.curly_group()?;
                }
                Some(LatexToken::LeftBracket) | Some(LatexToken::LeftParen) => {
                    self.p.eat_trivia()?;
                    self.mixed_group()?;
                }
                _ => break,
            }
        }
        self.p.finish_node();
        Ok(())
    }

    /// A leading word and every following text-like token.
    fn text(&mut self) -> Result<(), ParseError> {
        self.p.start_node(LatexKind::Text);
        self.p.consume()?; // the leading word
        while matches!(
            self.p.peek_kind(),
            Some(
                LatexToken::Word
                    | LatexToken::LineBreak
                    | LatexToken::LineComment
                    | LatexToken::Whitespace
                    | LatexToken::Comma
                    | LatexToken::Pipe
            )
        ) {
            self.p.consume()?;
        }
        self.p.finish_node();
        Ok(())
    }

    fn lookahead(&self, kind: LatexToken) -> bool {
        self.p
            .peek_past_trivia()
            .is_some_and(|token| token.kind == kind)
    }

    fn at_end_command(&self) -> bool {
        self.p
            .peek()
            .is_some_and(|token| token.kind == LatexToken::Command && token.name() == Some("end"))
    }

    fn at_command_symbol(&self, symbol: char) -> bool {
        self.p
            .peek()
            .is_some_and(|token| token.kind == LatexToken::Command && token.symbol() == Some(symbol))
    }
}
