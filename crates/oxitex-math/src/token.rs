//! Token grammar for math mode.
//!
//! Math mode reuses the command scanner from the surface grammar but is
//! otherwise its own closed set: digit runs become [`MathToken::Number`],
//! single ASCII letters become [`MathToken::Symbol`] (one letter per token),
//! and the operator punctuation is split out so the parser can map it to
//! infix operators. The row separator `//` lexes as [`MathToken::LineBreak`];
//! actual newlines are plain whitespace here.

use std::fmt;

use once_cell::sync::Lazy;
use serde::Serialize;

use oxitex_syntax::latex::scan_command;
use oxitex_syntax::{LexError, Lexer, Rule, ScanFault, ScanHit, Token, TokenData, TokenKind};

/// Token kinds of math mode. Declaration order is match-priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MathToken {
    /// The row separator `//`.
    LineBreak,
    /// Run of whitespace, newlines included.
    Whitespace,
    /// `\word` or a control symbol such as `\[`.
    Command,
    /// Run of ASCII digits.
    Number,
    /// A single ASCII letter.
    Symbol,
    LeftCurly,
    RightCurly,
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,
    Comma,
    Pipe,
    Ampersand,
    Eq,
    Plus,
    Minus,
    Asterisk,
    LeftAngle,
    RightAngle,
    Underscore,
    Caret,
}

static MATH_RULES: Lazy<Vec<Rule<MathToken>>> = Lazy::new(|| {
    vec![
        Rule::pattern(MathToken::LineBreak, r"//"),
        Rule::pattern(MathToken::Whitespace, r"\s+"),
        Rule::scan(MathToken::Command, scan_command),
        Rule::pattern(MathToken::Number, r"[0-9]+"),
        Rule::scan(MathToken::Symbol, scan_symbol),
        Rule::pattern(MathToken::LeftCurly, r"\{"),
        Rule::pattern(MathToken::RightCurly, r"\}"),
        Rule::pattern(MathToken::LeftBracket, r"\["),
        Rule::pattern(MathToken::RightBracket, r"\]"),
        Rule::pattern(MathToken::LeftParen, r"\("),
        Rule::pattern(MathToken::RightParen, r"\)"),
        Rule::pattern(MathToken::Comma, r","),
        Rule::pattern(MathToken::Pipe, r"\|"),
        Rule::pattern(MathToken::Ampersand, r"&"),
        Rule::pattern(MathToken::Eq, r"="),
        Rule::pattern(MathToken::Plus, r"\+"),
        Rule::pattern(MathToken::Minus, r"-"),
        Rule::pattern(MathToken::Asterisk, r"\*"),
        Rule::pattern(MathToken::LeftAngle, r"<"),
        Rule::pattern(MathToken::RightAngle, r">"),
        Rule::pattern(MathToken::Underscore, r"_"),
        Rule::pattern(MathToken::Caret, r"\^"),
    ]
});

impl TokenKind for MathToken {
    fn rules() -> &'static [Rule<Self>] {
        &MATH_RULES
    }

    fn is_trivia(self) -> bool {
        matches!(self, MathToken::LineBreak | MathToken::Whitespace)
    }
}

impl fmt::Display for MathToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MathToken::LineBreak => "'//'",
            MathToken::Whitespace => "whitespace",
            MathToken::Command => "command",
            MathToken::Number => "number",
            MathToken::Symbol => "symbol",
            MathToken::LeftCurly => "'{'",
            MathToken::RightCurly => "'}'",
            MathToken::LeftBracket => "'['",
            MathToken::RightBracket => "']'",
            MathToken::LeftParen => "'('",
            MathToken::RightParen => "')'",
            MathToken::Comma => "','",
            MathToken::Pipe => "'|'",
            MathToken::Ampersand => "'&'",
            MathToken::Eq => "'='",
            MathToken::Plus => "'+'",
            MathToken::Minus => "'-'",
            MathToken::Asterisk => "'*'",
            MathToken::LeftAngle => "'<'",
            MathToken::RightAngle => "'>'",
            MathToken::Underscore => "'_'",
            MathToken::Caret => "'^'",
        };
        f.write_str(name)
    }
}

/// Scans a single ASCII letter; each letter is its own token.
fn scan_symbol(rest: &str) -> Result<Option<ScanHit<'_>>, ScanFault> {
    match rest.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => Ok(Some(ScanHit {
            len: 1,
            data: Some(TokenData::Char(c)),
        })),
        _ => Ok(None),
    }
}

/// Lexes `source` with the math token grammar.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_, MathToken>>, LexError> {
    Lexer::<MathToken>::new(source).tokenize()
}
