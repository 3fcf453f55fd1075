//! # OxiTeX Syntax
//!
//! Lexer, parser, and lossless syntax tree implementation for LaTeX source
//! code.
//!
//! ## Overview
//!
//! This crate turns raw LaTeX into a **lossless concrete syntax tree**: every
//! byte of the input is reachable from the root, so the tree reconstructs the
//! source exactly (`parse(source).text() == source`). On top of the tree, a
//! typed AST layer offers kind-checked views for semantic work such as
//! locating environments.
//!
//! ## Architecture
//!
//! The pipeline consists of three main components:
//!
//! ```text
//! ┌──────────┐      ┌────────┐      ┌─────────────┐
//! │  Source  │ ───► │ Lexer  │ ───► │   Parser    │
//! │  (str)   │      │        │      │             │
//! └──────────┘      └────────┘      └─────────────┘
//!                       │                   │
//!                       ▼                   ▼
//!                    Token              GreenNode
//!                   buffer                (CST)
//! ```
//!
//! ### Component Responsibilities
//!
//! - **[`lexer`]** - Generic, table-driven tokenizer; grammars declare an
//!   ordered table of regex or procedural matchers
//! - **[`parser`]** - Generic token cursor driving the tree builder
//! - **[`builder`]** - Stack-based constructor of the lossless tree
//! - **[`latex`]** - The LaTeX token grammar, structural parser, and typed
//!   AST view
//! - **[`line_index`]** - Byte offset to 1-indexed line/column mapping for
//!   error messages
//!
//! The math-mode language lives in the sibling `oxitex-math` crate and reuses
//! the engine, builder, and error types from here.
//!
//! ## Design Principles
//!
//! ### 1. Lossless Representation
//!
//! The syntax tree preserves **all** source information including:
//! - Whitespace and line breaks
//! - Comments
//! - Unknown commands, kept verbatim
//!
//! ### 2. Fail Fast
//!
//! The first lexical or structural fault aborts the parse with an error
//! positioned at a 1-indexed `(row, col)`. There is no recovery and there are
//! no warnings; a tree is returned only for well-formed input.
//!
//! ### 3. Purely Syntactic
//!
//! No macro expansion and no layout. `\begin`/`\end` names are recorded but
//! not matched against each other; a later checker can use the typed view to
//! validate them.
//!
//! ## Examples
//!
//! ### Basic Parsing
//!
//! ```
//! use oxitex_syntax::latex;
//!
//! let source = "\\begin{center}Hello\\end{center}";
//! let root = latex::parse(source).unwrap();
//!
//! // The tree is lossless.
//! assert_eq!(root.text(), source);
//! ```
//!
//! ### Using the Lexer Directly
//!
//! ```
//! use oxitex_syntax::latex::{self, LatexToken};
//!
//! let tokens = latex::tokenize("\\section{Intro}").unwrap();
//! assert_eq!(tokens[0].kind, LatexToken::Command);
//! assert_eq!(tokens[0].name(), Some("section"));
//! assert_eq!(tokens[0].offset, 0);
//! ```
//!
//! ### The Typed View
//!
//! ```
//! use oxitex_syntax::latex::ast::{AstNode, Environment};
//! use oxitex_syntax::latex;
//!
//! let root = latex::parse("\\begin{doc}body\\end{doc}").unwrap();
//! let env = root.child_nodes().find_map(Environment::cast).unwrap();
//! assert_eq!(env.begin().unwrap().name(), Some("doc"));
//! assert_eq!(env.body_text().unwrap(), "body");
//! ```

pub mod builder;
pub mod error;
pub mod green;
pub mod latex;
pub mod lexer;
pub mod line_index;
pub mod parser;

pub use builder::{Checkpoint, GreenTreeBuilder};
pub use error::{LexError, ParseError, SyntaxError};
pub use green::{GreenChild, GreenNode, Token, TokenData};
pub use lexer::{Lexer, Rule, ScanFault, ScanFn, ScanHit, TokenKind};
pub use line_index::LineIndex;
pub use parser::Parser;
