//! The LaTeX surface language: token grammar, structural parser, and typed
//! AST view.
//!
//! The grammar is purely syntactic. Unknown commands are preserved verbatim,
//! `\begin`/`\end` names are recorded but not required to match, and trivia
//! (whitespace, line breaks, comments) stays in the tree so the parse is
//! lossless.

pub mod ast;
pub mod parser;

use std::fmt;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::LexError;
use crate::green::{GreenChild, GreenNode, Token, TokenData};
use crate::lexer::{Lexer, Rule, ScanFault, ScanHit, TokenKind};

pub use parser::parse;

/// Token kinds of the LaTeX surface syntax.
///
/// Declaration order is match-priority order: the command scanner runs
/// before the catch-all word rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LatexToken {
    /// Run of `\r` and `\n` characters.
    LineBreak,
    /// Run of horizontal whitespace.
    Whitespace,
    /// `%` through the end of the line, excluding the terminator.
    LineComment,
    /// `\word` or a control symbol such as `\%`.
    Command,
    LeftCurly,
    RightCurly,
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,
    Comma,
    Pipe,
    Eq,
    /// `$` or `$$`.
    Dollar,
    /// Maximal run of characters with no special meaning.
    Word,
}

static LATEX_RULES: Lazy<Vec<Rule<LatexToken>>> = Lazy::new(|| {
    vec![
        Rule::pattern(LatexToken::LineBreak, r"[\r\n]+"),
        Rule::pattern(LatexToken::Whitespace, r"[^\S\r\n]+"),
        Rule::pattern(LatexToken::LineComment, r"%[^\r\n]*"),
        Rule::scan(LatexToken::Command, scan_command),
        Rule::pattern(LatexToken::LeftCurly, r"\{"),
        Rule::pattern(LatexToken::RightCurly, r"\}"),
        Rule::pattern(LatexToken::LeftBracket, r"\["),
        Rule::pattern(LatexToken::RightBracket, r"\]"),
        Rule::pattern(LatexToken::LeftParen, r"\("),
        Rule::pattern(LatexToken::RightParen, r"\)"),
        Rule::pattern(LatexToken::Comma, r","),
        Rule::pattern(LatexToken::Pipe, r"\|"),
        Rule::pattern(LatexToken::Eq, r"="),
        Rule::pattern(LatexToken::Dollar, r"\$\$?"),
        Rule::pattern(LatexToken::Word, r"[^\s\\%{},$\[\]()=|]+"),
    ]
});

impl TokenKind for LatexToken {
    fn rules() -> &'static [Rule<Self>] {
        &LATEX_RULES
    }

    fn is_trivia(self) -> bool {
        matches!(
            self,
            LatexToken::LineBreak | LatexToken::Whitespace | LatexToken::LineComment
        )
    }
}

impl fmt::Display for LatexToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LatexToken::LineBreak => "line break",
            LatexToken::Whitespace => "whitespace",
            LatexToken::LineComment => "comment",
            LatexToken::Command => "command",
            LatexToken::LeftCurly => "'{'",
            LatexToken::RightCurly => "'}'",
            LatexToken::LeftBracket => "'['",
            LatexToken::RightBracket => "']'",
            LatexToken::LeftParen => "'('",
            LatexToken::RightParen => "')'",
            LatexToken::Comma => "','",
            LatexToken::Pipe => "'|'",
            LatexToken::Eq => "'='",
            LatexToken::Dollar => "'$'",
            LatexToken::Word => "word",
        };
        f.write_str(name)
    }
}

/// Scans a TeX control sequence at the cursor.
///
/// A control word is `\` followed by the longest run of ASCII letters and
/// carries the name as payload; a control symbol is `\` followed by a single
/// non-letter and carries that character. A lone `\` at the end of input
/// fails the lex.
pub fn scan_command(rest: &str) -> Result<Option<ScanHit<'_>>, ScanFault> {
    if !rest.starts_with('\\') {
        return Ok(None);
    }
    let after = &rest[1..];
    let letters = after
        .bytes()
        .take_while(|byte| byte.is_ascii_alphabetic())
        .count();
    if letters > 0 {
        return Ok(Some(ScanHit {
            len: 1 + letters,
            data: Some(TokenData::Name(&after[..letters])),
        }));
    }
    match after.chars().next() {
        Some(c) => Ok(Some(ScanHit {
            len: 1 + c.len_utf8(),
            data: Some(TokenData::Char(c)),
        })),
        None => Err(ScanFault {
            message: "Unexpected EOF after '\\'".into(),
        }),
    }
}

/// Node kinds emitted by the structural parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LatexKind {
    Root,
    /// `\begin` with its name and optional argument groups.
    Begin,
    /// `\end` with its name group.
    End,
    /// A `Begin`, its content, and the matching `End`.
    Environment,
    /// Inline math: `$ … $`.
    Formula,
    /// Display math: `\[ … \]`.
    Equation,
    /// `{ … }`, both delimiters included.
    CurlyGroup,
    /// `[ … ]`, used for optional arguments after `\begin`.
    BracketGroup,
    /// `( … )` or `[ … ]` with possibly mismatched delimiters.
    MixedGroup,
    /// A command with any argument-like groups that follow it.
    Command,
    /// A run of words and intervening trivia.
    Text,
}

/// A node of the LaTeX tree.
pub type LatexNode<'s> = GreenNode<'s, LatexToken, LatexKind>;
/// A child (token or node) of the LaTeX tree.
pub type LatexChild<'s> = GreenChild<'s, LatexToken, LatexKind>;

/// Lexes `source` with the LaTeX token grammar.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_, LatexToken>>, LexError> {
    Lexer::<LatexToken>::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_texts(input: &str) -> Vec<(LatexToken, &str)> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|token| (token.kind, token.text))
            .collect()
    }

    #[test]
    fn test_basic_tokens() {
        let input = "\\section{Hello} % comment";
        assert_eq!(
            kinds_and_texts(input),
            vec![
                (LatexToken::Command, "\\section"),
                (LatexToken::LeftCurly, "{"),
                (LatexToken::Word, "Hello"),
                (LatexToken::RightCurly, "}"),
                (LatexToken::Whitespace, " "),
                (LatexToken::LineComment, "% comment"),
            ]
        );
    }

    #[test]
    fn test_command_payloads() {
        let tokens = tokenize("\\begin \\[ \\%").unwrap();
        assert_eq!(tokens[0].name(), Some("begin"));
        assert_eq!(tokens[2].symbol(), Some('['));
        assert_eq!(tokens[2].text, "\\[");
        assert_eq!(tokens[4].symbol(), Some('%'));
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_line_break_runs() {
        assert_eq!(
            kinds_and_texts("a\r\n\nb"),
            vec![
                (LatexToken::Word, "a"),
                (LatexToken::LineBreak, "\r\n\n"),
                (LatexToken::Word, "b"),
            ]
        );
    }

    #[test]
    fn test_comment_excludes_terminator() {
        assert_eq!(
            kinds_and_texts("% note\nx"),
            vec![
                (LatexToken::LineComment, "% note"),
                (LatexToken::LineBreak, "\n"),
                (LatexToken::Word, "x"),
            ]
        );
    }

    #[test]
    fn test_dollar_forms() {
        assert_eq!(
            kinds_and_texts("$x$ $$y$$"),
            vec![
                (LatexToken::Dollar, "$"),
                (LatexToken::Word, "x"),
                (LatexToken::Dollar, "$"),
                (LatexToken::Whitespace, " "),
                (LatexToken::Dollar, "$$"),
                (LatexToken::Word, "y"),
                (LatexToken::Dollar, "$$"),
            ]
        );
    }

    #[test]
    fn test_punctuation_kinds() {
        assert_eq!(
            kinds_and_texts("(a,b)=[c]|"),
            vec![
                (LatexToken::LeftParen, "("),
                (LatexToken::Word, "a"),
                (LatexToken::Comma, ","),
                (LatexToken::Word, "b"),
                (LatexToken::RightParen, ")"),
                (LatexToken::Eq, "="),
                (LatexToken::LeftBracket, "["),
                (LatexToken::Word, "c"),
                (LatexToken::RightBracket, "]"),
                (LatexToken::Pipe, "|"),
            ]
        );
    }

    #[test]
    fn test_lone_backslash_fails() {
        let err = tokenize("\\").unwrap_err();
        assert_eq!(err.to_string(), "Unexpected EOF after '\\' at 1:1");
    }

    #[test]
    fn test_lone_backslash_after_text_fails() {
        let err = tokenize("ab\n\\").unwrap_err();
        assert_eq!(err.row, 2);
        assert_eq!(err.col, 1);
    }

    #[test]
    fn test_offsets_are_contiguous() {
        let input = "\\frac{a}{b} % half\n";
        let tokens = tokenize(input).unwrap();
        let mut end = 0;
        for token in &tokens {
            assert_eq!(token.offset, end);
            end = token.end();
        }
        assert_eq!(end, input.len());
    }

    #[test]
    fn test_lossless_concatenation() {
        let input = "\\begin{x}[opt] a, b | c = d $e$\n% done";
        let tokens = tokenize(input).unwrap();
        let rebuilt: String = tokens.iter().map(|token| token.text).collect();
        assert_eq!(rebuilt, input);
    }

    #[test]
    fn test_non_ascii_in_words() {
        assert_eq!(
            kinds_and_texts("Étude für"),
            vec![
                (LatexToken::Word, "Étude"),
                (LatexToken::Whitespace, " "),
                (LatexToken::Word, "für"),
            ]
        );
    }

    #[test]
    fn test_control_symbol_with_non_ascii() {
        let tokens = tokenize("\\é").unwrap();
        assert_eq!(tokens[0].kind, LatexToken::Command);
        assert_eq!(tokens[0].symbol(), Some('é'));
        assert_eq!(tokens[0].text, "\\é");
    }
}
