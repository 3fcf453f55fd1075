//! Typed, kind-checked views over the LaTeX tree.
//!
//! Wrappers borrow the green node they describe and never mutate it.
//! Construction goes through [`AstNode::cast`], which fails on a node of the
//! wrong kind, so holding a wrapper proves the kind.

use super::{LatexKind, LatexNode, LatexToken};
use crate::green::GreenChild;

/// Casting interface shared by the typed wrappers.
pub trait AstNode<'a, 's>: Sized {
    fn can_cast(kind: LatexKind) -> bool;

    /// Wraps `syntax` if its kind matches, `None` otherwise.
    fn cast(syntax: &'a LatexNode<'s>) -> Option<Self>;

    /// The underlying green node.
    fn syntax(&self) -> &'a LatexNode<'s>;
}

/// The `\begin` clause of an environment.
#[derive(Debug, Clone, Copy)]
pub struct Begin<'a, 's> {
    syntax: &'a LatexNode<'s>,
}

impl<'a, 's> AstNode<'a, 's> for Begin<'a, 's> {
    fn can_cast(kind: LatexKind) -> bool {
        kind == LatexKind::Begin
    }

    fn cast(syntax: &'a LatexNode<'s>) -> Option<Self> {
        Self::can_cast(syntax.kind).then_some(Self { syntax })
    }

    fn syntax(&self) -> &'a LatexNode<'s> {
        self.syntax
    }
}

impl<'a, 's> Begin<'a, 's> {
    /// The environment name: the first word anywhere under this clause,
    /// typically inside its curly group.
    pub fn name(&self) -> Option<&'s str> {
        first_word(self.syntax)
    }
}

/// The `\end` clause of an environment.
#[derive(Debug, Clone, Copy)]
pub struct End<'a, 's> {
    syntax: &'a LatexNode<'s>,
}

impl<'a, 's> AstNode<'a, 's> for End<'a, 's> {
    fn can_cast(kind: LatexKind) -> bool {
        kind == LatexKind::End
    }

    fn cast(syntax: &'a LatexNode<'s>) -> Option<Self> {
        Self::can_cast(syntax.kind).then_some(Self { syntax })
    }

    fn syntax(&self) -> &'a LatexNode<'s> {
        self.syntax
    }
}

impl<'a, 's> End<'a, 's> {
    /// The environment name recorded at the closing clause.
    pub fn name(&self) -> Option<&'s str> {
        first_word(self.syntax)
    }
}

/// A `\begin … \end` block.
#[derive(Debug, Clone, Copy)]
pub struct Environment<'a, 's> {
    syntax: &'a LatexNode<'s>,
}

impl<'a, 's> AstNode<'a, 's> for Environment<'a, 's> {
    fn can_cast(kind: LatexKind) -> bool {
        kind == LatexKind::Environment
    }

    fn cast(syntax: &'a LatexNode<'s>) -> Option<Self> {
        Self::can_cast(syntax.kind).then_some(Self { syntax })
    }

    fn syntax(&self) -> &'a LatexNode<'s> {
        self.syntax
    }
}

impl<'a, 's> Environment<'a, 's> {
    /// The opening clause, if the parse recorded one.
    pub fn begin(&self) -> Option<Begin<'a, 's>> {
        self.syntax.child_nodes().find_map(Begin::cast)
    }

    /// The closing clause, if the parse recorded one.
    pub fn end(&self) -> Option<End<'a, 's>> {
        self.syntax.child_nodes().find_map(End::cast)
    }

    /// The source text strictly between the begin and end clauses, or `None`
    /// when either clause is missing.
    pub fn body_text(&self) -> Option<String> {
        let children = &self.syntax.children;
        let begin = children
            .iter()
            .position(|child| child_is(child, LatexKind::Begin))?;
        let end = children
            .iter()
            .position(|child| child_is(child, LatexKind::End))?;
        let mut out = String::new();
        for child in &children[begin + 1..end] {
            child.write_text(&mut out);
        }
        Some(out)
    }
}

fn child_is(child: &GreenChild<'_, LatexToken, LatexKind>, kind: LatexKind) -> bool {
    child.as_node().is_some_and(|node| node.kind == kind)
}

fn first_word<'s>(node: &LatexNode<'s>) -> Option<&'s str> {
    node.descendant_tokens()
        .find(|token| token.kind == LatexToken::Word)
        .map(|token| token.text)
}
