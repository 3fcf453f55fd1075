//! # OxiTeX Math
//!
//! Token grammar, Pratt parser, and typed AST for the inner language of
//! LaTeX math mode.
//!
//! ## Overview
//!
//! Math mode is its own small language: letters are one-character symbols,
//! digit runs are literals, and operators carry binding powers. This crate
//! builds that language on the engine from `oxitex-syntax` (the same lexer
//! framework and tree builder) with a precedence-climbing parser instead of
//! recursive descent.
//!
//! Trivia is filtered before parsing, and grouping delimiters are conveyed
//! structurally by `Grouping` nodes rather than kept as tokens, so math
//! trees are compact rather than lossless.
//!
//! ## Examples
//!
//! ```
//! use oxitex_math::{parse, MathKind};
//!
//! let root = parse("2 + (2^e * 4)").unwrap();
//! assert_eq!(root.kind, MathKind::Root);
//! let sum = root.children[0].as_node().unwrap();
//! assert_eq!(sum.kind, MathKind::BinOp);
//! ```
//!
//! ```
//! use oxitex_math::ast::BinOp;
//! use oxitex_math::{parse, InfixOp};
//!
//! let root = parse("a \\cap b").unwrap();
//! let binop = BinOp::cast(root.children[0].as_node().unwrap()).unwrap();
//! assert_eq!(binop.op(), InfixOp::Intersection);
//! assert_eq!(binop.lhs().unwrap().as_symbol().unwrap().name(), 'a');
//! ```

pub mod ast;
pub mod parser;
pub mod token;

pub use parser::{parse, InfixOp, MathChild, MathKind, MathNode};
pub use token::{tokenize, MathToken};
