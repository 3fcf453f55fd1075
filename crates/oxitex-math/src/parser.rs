//! Pratt parser for math-mode expressions.
//!
//! Every infix operator carries a `(left, right)` binding-power pair.
//! Left-associativity falls out of the iteration in [`MathParser::expr`];
//! right-associativity would come from recursing at the operator's own left
//! power. The table lives in [`InfixOp::binding_power`] and the token
//! mapping in [`InfixOp::from_token`] so both stay easy to extend.
//!
//! Trivia (`//` and whitespace) is filtered from the token buffer before
//! parsing; math is whitespace-insensitive at this level, so unlike the
//! surface grammar the math tree is not lossless.

use serde::Serialize;

use oxitex_syntax::{
    GreenChild, GreenNode, Lexer, ParseError, Parser, SyntaxError, Token, TokenKind,
};

use crate::token::MathToken;

/// Node kinds of the math tree.
///
/// `Literal`, `Symbol`, `Equal`, `Frac`, `Command`, and `Expression` are
/// reserved for forms the grammar does not produce yet: numbers, letters,
/// and commands are carried as bare tokens today, and relations such as `=`
/// terminate the expression instead of nesting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MathKind {
    Root,
    /// `lhs op rhs`, exactly three children.
    BinOp,
    /// A bracketed subexpression; the delimiters are dropped from the tree.
    Grouping,
    Literal,
    Symbol,
    Equal,
    Frac,
    Command,
    Expression,
}

/// A node of the math tree.
pub type MathNode<'s> = GreenNode<'s, MathToken, MathKind>;
/// A child (token or node) of the math tree.
pub type MathChild<'s> = GreenChild<'s, MathToken, MathKind>;

/// The infix operators the Pratt loop recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InfixOp {
    Union,
    Intersection,
    In,
    Le,
    Ge,
    Plus,
    Minus,
    Times,
    Superscript,
    Subscript,
}

impl InfixOp {
    /// Maps a token to its infix operator, if it has one.
    pub fn from_token(token: &Token<'_, MathToken>) -> Option<Self> {
        match token.kind {
            MathToken::Command => match token.name()? {
                "cup" => Some(InfixOp::Union),
                "cap" => Some(InfixOp::Intersection),
                "in" => Some(InfixOp::In),
                _ => None,
            },
            MathToken::LeftAngle => Some(InfixOp::Le),
            MathToken::RightAngle => Some(InfixOp::Ge),
            MathToken::Plus => Some(InfixOp::Plus),
            MathToken::Minus => Some(InfixOp::Minus),
            MathToken::Asterisk => Some(InfixOp::Times),
            MathToken::Caret => Some(InfixOp::Superscript),
            MathToken::Underscore => Some(InfixOp::Subscript),
            _ => None,
        }
    }

    /// The `(left, right)` binding powers of this operator.
    pub fn binding_power(self) -> (u8, u8) {
        match self {
            InfixOp::Union => (78, 79),
            InfixOp::Intersection => (80, 81),
            InfixOp::In => (90, 91),
            InfixOp::Le => (90, 91),
            InfixOp::Ge => (90, 91),
            InfixOp::Plus => (100, 101),
            InfixOp::Minus => (100, 101),
            InfixOp::Times => (102, 103),
            InfixOp::Superscript => (104, 105),
            InfixOp::Subscript => (104, 105),
        }
    }
}

/// Parses `source` as a single math-mode expression under a `Root` node.
///
/// The first lexical or structural fault aborts the parse; trailing tokens
/// after the expression are a fault too.
pub fn parse(source: &str) -> Result<MathNode<'_>, SyntaxError> {
    let mut lexer = Lexer::<MathToken>::new(source);
    let tokens = lexer.tokenize()?;
    if !lexer.is_at_end() {
        return Err(lexer.leftover_error().into());
    }
    let tokens: Vec<Token<'_, MathToken>> = tokens
        .into_iter()
        .filter(|token| !token.kind.is_trivia())
        .collect();
    log::debug!("parsing {} math tokens", tokens.len());
    let parser = MathParser::new(source, tokens);
    Ok(parser.parse_root()?)
}

struct MathParser<'s> {
    p: Parser<'s, MathToken, MathKind>,
}

impl<'s> MathParser<'s> {
    fn new(source: &'s str, tokens: Vec<Token<'s, MathToken>>) -> Self {
        Self {
            p: Parser::new(source, tokens),
        }
    }

    fn parse_root(mut self) -> Result<MathNode<'s>, ParseError> {
        self.p.start_node(MathKind::Root);
        self.expr(0)?;
        if !self.p.at_end() {
            return Err(self.p.expected_here("end of input"));
        }
        self.p.finish_node();
        Ok(self.p.finish())
    }

    /// Parses an expression whose operators all bind at least `min_bp`.
    fn expr(&mut self, min_bp: u8) -> Result<(), ParseError> {
        let lhs = self.p.checkpoint();
        self.prefix()?;
        loop {
            let op = match self.p.peek() {
                Some(token) => match InfixOp::from_token(token) {
                    Some(op) => op,
                    None => break,
                },
                None => break,
            };
            let (left_bp, right_bp) = op.binding_power();
            if left_bp < min_bp {
                break;
            }
            self.p.start_node_at(lhs, MathKind::BinOp);
            self.p.consume()?; // the operator token
            self.expr(right_bp)?;
            self.p.finish_node();
        }
        Ok(())
    }

    /// Parses the atom or bracketed subexpression an expression starts with.
    fn prefix(&mut self) -> Result<(), ParseError> {
        let Some(token) = self.p.peek() else {
            return Err(ParseError::UnexpectedEof {
                expected: "an expression".into(),
            });
        };
        let kind = token.kind;
        let offset = token.offset;
        match kind {
            MathToken::LeftCurly | MathToken::LeftParen | MathToken::LeftBracket => {
                self.grouping(kind)
            }
            MathToken::Number | MathToken::Symbol => self.p.consume(),
            MathToken::Command => self.prefix_command(),
            MathToken::RightCurly | MathToken::RightParen | MathToken::RightBracket => {
                let (row, col) = self.p.position_at(offset);
                Err(ParseError::UnmatchedGrouping { row, col })
            }
            _ => {
                let (row, col) = self.p.position_at(offset);
                Err(ParseError::UnexpectedPunctuation { row, col })
            }
        }
    }

    /// A bracketed subexpression. The `Grouping` node conveys the grouping
    /// structurally, so neither delimiter is appended to the tree.
    fn grouping(&mut self, open: MathToken) -> Result<(), ParseError> {
        self.p.start_node(MathKind::Grouping);
        self.p.ignore(); // the opening delimiter
        self.expr(0)?;
        self.p.expect_ignore(closing_delimiter(open))?;
        self.p.finish_node();
        Ok(())
    }

    /// A command in expression position parses as a bare atom.
    ///
    /// TODO: parse the `{numerator}{denominator}` arguments of `\frac` into
    /// a `Frac` node once the argument grammar for prefix commands is
    /// settled.
    fn prefix_command(&mut self) -> Result<(), ParseError> {
        self.p.consume()
    }
}

fn closing_delimiter(open: MathToken) -> MathToken {
    match open {
        MathToken::LeftCurly => MathToken::RightCurly,
        MathToken::LeftParen => MathToken::RightParen,
        MathToken::LeftBracket => MathToken::RightBracket,
        _ => panic!("not an opening delimiter: {open:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node<'a, 's>(child: &'a MathChild<'s>) -> &'a MathNode<'s> {
        child.as_node().expect("expected a node")
    }

    fn token_text<'s>(child: &MathChild<'s>) -> &'s str {
        child.as_token().expect("expected a token").text
    }

    #[test]
    fn test_single_atom() {
        let root = parse("x").unwrap();
        assert_eq!(root.kind, MathKind::Root);
        assert_eq!(root.children.len(), 1);
        assert_eq!(token_text(&root.children[0]), "x");
    }

    #[test]
    fn test_binop_children_shape() {
        let root = parse("1+2").unwrap();
        let binop = node(&root.children[0]);
        assert_eq!(binop.kind, MathKind::BinOp);
        assert_eq!(binop.children.len(), 3);
        assert_eq!(token_text(&binop.children[0]), "1");
        assert_eq!(token_text(&binop.children[1]), "+");
        assert_eq!(token_text(&binop.children[2]), "2");
    }

    #[test]
    fn test_left_associativity_at_equal_power() {
        let root = parse("a+b-c").unwrap();
        let outer = node(&root.children[0]);
        assert_eq!(token_text(&outer.children[1]), "-");
        let inner = node(&outer.children[0]);
        assert_eq!(inner.kind, MathKind::BinOp);
        assert_eq!(token_text(&inner.children[1]), "+");
        assert_eq!(token_text(&inner.children[0]), "a");
    }

    #[test]
    fn test_times_binds_tighter_than_plus() {
        let root = parse("a+b*c").unwrap();
        let outer = node(&root.children[0]);
        assert_eq!(token_text(&outer.children[1]), "+");
        let rhs = node(&outer.children[2]);
        assert_eq!(token_text(&rhs.children[1]), "*");
    }

    #[test]
    fn test_intersection_binds_tighter_than_union() {
        let root = parse("a \\cup b \\cap c").unwrap();
        let outer = node(&root.children[0]);
        assert_eq!(token_text(&outer.children[1]), "\\cup");
        assert_eq!(token_text(&outer.children[0]), "a");
        let rhs = node(&outer.children[2]);
        assert_eq!(token_text(&rhs.children[1]), "\\cap");
    }

    #[test]
    fn test_grouping_drops_delimiters() {
        let root = parse("(x)").unwrap();
        let grouping = node(&root.children[0]);
        assert_eq!(grouping.kind, MathKind::Grouping);
        assert_eq!(grouping.children.len(), 1);
        assert_eq!(token_text(&grouping.children[0]), "x");
        assert_eq!(grouping.text(), "x");
    }

    #[test]
    fn test_grouping_overrides_precedence() {
        let root = parse("2 + (2^e * 4)").unwrap();
        let outer = node(&root.children[0]);
        assert_eq!(token_text(&outer.children[1]), "+");
        let grouping = node(&outer.children[2]);
        assert_eq!(grouping.kind, MathKind::Grouping);
        let times = node(&grouping.children[0]);
        assert_eq!(token_text(&times.children[1]), "*");
        let caret = node(&times.children[0]);
        assert_eq!(token_text(&caret.children[1]), "^");
        assert_eq!(token_text(&caret.children[0]), "2");
        assert_eq!(token_text(&caret.children[2]), "e");
    }

    #[test]
    fn test_bracket_kinds_must_match() {
        let err = parse("(x]").unwrap_err();
        let SyntaxError::Parse(ParseError::Expected { expected, found, .. }) = err else {
            panic!("expected an Expected error");
        };
        assert_eq!(expected, "')'");
        assert_eq!(found, "']'");
    }

    #[test]
    fn test_subscript_chain() {
        let root = parse("x_i^2").unwrap();
        let outer = node(&root.children[0]);
        assert_eq!(token_text(&outer.children[1]), "^");
        let inner = node(&outer.children[0]);
        assert_eq!(token_text(&inner.children[1]), "_");
    }

    #[test]
    fn test_command_atom() {
        let root = parse("\\alpha + 1").unwrap();
        let binop = node(&root.children[0]);
        assert_eq!(token_text(&binop.children[0]), "\\alpha");
    }

    #[test]
    fn test_unexpected_punctuation_in_prefix_position() {
        let err = parse("a + , b").unwrap_err();
        assert_eq!(err.to_string(), "Unexpected punctuation at 1:5");
    }

    #[test]
    fn test_unmatched_grouping_in_prefix_position() {
        let err = parse(")x").unwrap_err();
        assert_eq!(err.to_string(), "Unmatched grouping at 1:1");
    }

    #[test]
    fn test_trailing_tokens_fail() {
        let err = parse("a = b").unwrap_err();
        let SyntaxError::Parse(ParseError::Expected { expected, found, .. }) = err else {
            panic!("expected an Expected error");
        };
        assert_eq!(expected, "end of input");
        assert_eq!(found, "'='");
    }

    #[test]
    fn test_empty_input_fails() {
        let err = parse("").unwrap_err();
        assert!(matches!(
            err,
            SyntaxError::Parse(ParseError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_unclosed_grouping_fails() {
        let err = parse("(a + b").unwrap_err();
        assert!(matches!(
            err,
            SyntaxError::Parse(ParseError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_unknown_character_reported() {
        let err = parse("a ? b").unwrap_err();
        let SyntaxError::Lex(lex) = err else {
            panic!("expected a lex error");
        };
        assert_eq!(lex.to_string(), "Unexpected character '?' at 1:3");
    }
}
