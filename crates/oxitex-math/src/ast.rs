//! Typed, kind-checked views over the math tree.
//!
//! Unlike the surface language, the interesting leaves here are tokens:
//! [`Literal`] and [`Symbol`] wrap `Number` and `Symbol` tokens directly,
//! while [`BinOp`] wraps a `BinOp` node and exposes its operands. All
//! constructors are gated: a wrapper exists only for the matching kind.

use oxitex_syntax::Token;

use crate::parser::{InfixOp, MathChild, MathKind, MathNode};
use crate::token::MathToken;

/// A `Number` token viewed as an integer literal.
#[derive(Debug, Clone, Copy)]
pub struct Literal<'a, 's> {
    syntax: &'a Token<'s, MathToken>,
}

impl<'a, 's> Literal<'a, 's> {
    pub fn cast(syntax: &'a Token<'s, MathToken>) -> Option<Self> {
        (syntax.kind == MathToken::Number).then_some(Self { syntax })
    }

    pub fn syntax(&self) -> &'a Token<'s, MathToken> {
        self.syntax
    }

    /// The token text parsed as a decimal integer; `None` on overflow.
    pub fn value(&self) -> Option<i64> {
        self.syntax.text.parse().ok()
    }
}

/// A `Symbol` token viewed as a named variable.
#[derive(Debug, Clone, Copy)]
pub struct Symbol<'a, 's> {
    syntax: &'a Token<'s, MathToken>,
    name: char,
}

impl<'a, 's> Symbol<'a, 's> {
    pub fn cast(syntax: &'a Token<'s, MathToken>) -> Option<Self> {
        if syntax.kind != MathToken::Symbol {
            return None;
        }
        syntax.symbol().map(|name| Self { syntax, name })
    }

    pub fn syntax(&self) -> &'a Token<'s, MathToken> {
        self.syntax
    }

    /// The single-letter name of this symbol.
    pub fn name(&self) -> char {
        self.name
    }
}

/// A `BinOp` node whose children are exactly `[lhs, op, rhs]` with a known
/// operator token.
#[derive(Debug, Clone, Copy)]
pub struct BinOp<'a, 's> {
    syntax: &'a MathNode<'s>,
    op: InfixOp,
}

impl<'a, 's> BinOp<'a, 's> {
    pub fn cast(syntax: &'a MathNode<'s>) -> Option<Self> {
        if syntax.kind != MathKind::BinOp || syntax.children.len() != 3 {
            return None;
        }
        let op_token = syntax.children[1].as_token()?;
        let op = InfixOp::from_token(op_token)?;
        Some(Self { syntax, op })
    }

    pub fn syntax(&self) -> &'a MathNode<'s> {
        self.syntax
    }

    pub fn op(&self) -> InfixOp {
        self.op
    }

    /// The left operand, coerced through [`MathExpr::cast`].
    pub fn lhs(&self) -> Option<MathExpr<'a, 's>> {
        MathExpr::cast(&self.syntax.children[0])
    }

    /// The right operand, coerced through [`MathExpr::cast`].
    pub fn rhs(&self) -> Option<MathExpr<'a, 's>> {
        MathExpr::cast(&self.syntax.children[2])
    }
}

/// A child coerced into the typed view.
#[derive(Debug, Clone, Copy)]
pub enum MathExpr<'a, 's> {
    Literal(Literal<'a, 's>),
    Symbol(Symbol<'a, 's>),
    BinOp(BinOp<'a, 's>),
}

impl<'a, 's> MathExpr<'a, 's> {
    /// Tries `Literal`, then `Symbol`, then `BinOp`; `None` if none applies.
    pub fn cast(child: &'a MathChild<'s>) -> Option<Self> {
        match child {
            MathChild::Token(token) => Literal::cast(token)
                .map(MathExpr::Literal)
                .or_else(|| Symbol::cast(token).map(MathExpr::Symbol)),
            MathChild::Node(node) => BinOp::cast(node).map(MathExpr::BinOp),
        }
    }

    pub fn as_literal(&self) -> Option<&Literal<'a, 's>> {
        match self {
            MathExpr::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol<'a, 's>> {
        match self {
            MathExpr::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    pub fn as_bin_op(&self) -> Option<&BinOp<'a, 's>> {
        match self {
            MathExpr::BinOp(bin_op) => Some(bin_op),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn root_bin_op<'a, 's>(root: &'a MathNode<'s>) -> BinOp<'a, 's> {
        let node = root.children[0].as_node().unwrap();
        BinOp::cast(node).unwrap()
    }

    #[test]
    fn test_literal_value() {
        let root = parse("42+1").unwrap();
        let binop = root_bin_op(&root);
        let lhs = binop.lhs().unwrap();
        assert_eq!(lhs.as_literal().unwrap().value(), Some(42));
    }

    #[test]
    fn test_symbol_name() {
        let root = parse("x+1").unwrap();
        let binop = root_bin_op(&root);
        assert_eq!(binop.lhs().unwrap().as_symbol().unwrap().name(), 'x');
    }

    #[test]
    fn test_bin_op_accessors() {
        let root = parse("1+2*3").unwrap();
        let binop = root_bin_op(&root);
        assert_eq!(binop.op(), InfixOp::Plus);
        let rhs = binop.rhs().unwrap();
        assert_eq!(rhs.as_bin_op().unwrap().op(), InfixOp::Times);
    }

    #[test]
    fn test_set_operator_nesting() {
        let root = parse("a \\cup b \\cap c").unwrap();
        let binop = root_bin_op(&root);
        assert_eq!(binop.op(), InfixOp::Union);
        assert_eq!(binop.rhs().unwrap().as_bin_op().unwrap().op(), InfixOp::Intersection);
    }

    #[test]
    fn test_cast_is_kind_gated() {
        let root = parse("(x)").unwrap();
        let grouping = root.children[0].as_node().unwrap();
        assert!(BinOp::cast(grouping).is_none());
        assert!(MathExpr::cast(&root.children[0]).is_none());
    }

    #[test]
    fn test_token_wrappers_are_kind_gated() {
        let root = parse("x+1").unwrap();
        let binop = root_bin_op(&root);
        let lhs_token = binop.syntax().children[0].as_token().unwrap();
        assert!(Literal::cast(lhs_token).is_none());
        assert!(Symbol::cast(lhs_token).is_some());
        assert!(std::ptr::eq(
            Symbol::cast(lhs_token).unwrap().syntax(),
            lhs_token
        ));
    }
}
