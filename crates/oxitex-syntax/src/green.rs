//! The lossless, homogeneous syntax tree.
//!
//! A [`GreenNode`] is a kind tag plus an ordered sequence of children, where
//! every child is either a [`Token`] (a leaf holding the exact source slice
//! it was lexed from) or another node. Concatenating the token text under any
//! subtree reproduces the input span it covers, so
//! `parse(source).text() == source` holds for every successful parse.
//!
//! The tree is an owning value tree: every non-root node has exactly one
//! parent and nothing is shared. Tokens borrow from the source buffer, so a
//! tree lives no longer than the text it was parsed from.

use serde::Serialize;

/// Kind-specific payload attached to procedurally matched tokens.
///
/// Pattern-matched tokens carry no payload; the command and symbol scanners
/// record the recognized name or character here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenData<'s> {
    /// A control-word name, e.g. `begin` for `\begin`.
    Name(&'s str),
    /// A single character, e.g. `[` for the control symbol `\[` or the
    /// letter of a math symbol.
    Char(char),
}

/// One lexed token: kind, optional payload, exact source slice, and the
/// absolute byte offset of that slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'s, K> {
    pub kind: K,
    pub data: Option<TokenData<'s>>,
    pub text: &'s str,
    pub offset: usize,
}

impl<'s, K> Token<'s, K> {
    /// Length of the consumed slice in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte offset one past the end of this token.
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    /// The control-word name, if this token carries one.
    pub fn name(&self) -> Option<&'s str> {
        match self.data {
            Some(TokenData::Name(name)) => Some(name),
            _ => None,
        }
    }

    /// The character payload, if this token carries one.
    pub fn symbol(&self) -> Option<char> {
        match self.data {
            Some(TokenData::Char(c)) => Some(c),
            _ => None,
        }
    }
}

/// A child of a green node: a leaf token or a nested node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GreenChild<'s, K, N> {
    Token(Token<'s, K>),
    Node(GreenNode<'s, K, N>),
}

impl<'s, K, N> GreenChild<'s, K, N> {
    pub fn as_token(&self) -> Option<&Token<'s, K>> {
        match self {
            GreenChild::Token(token) => Some(token),
            GreenChild::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&GreenNode<'s, K, N>> {
        match self {
            GreenChild::Node(node) => Some(node),
            GreenChild::Token(_) => None,
        }
    }

    /// Appends the source text under this child to `out`.
    pub fn write_text(&self, out: &mut String) {
        match self {
            GreenChild::Token(token) => out.push_str(token.text),
            GreenChild::Node(node) => node.write_text(out),
        }
    }

    /// The source text covered by this child.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }
}

/// An interior node of the lossless tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GreenNode<'s, K, N> {
    pub kind: N,
    pub children: Vec<GreenChild<'s, K, N>>,
}

impl<'s, K, N> GreenNode<'s, K, N> {
    /// Appends the source text under this node to `out`.
    pub fn write_text(&self, out: &mut String) {
        for child in &self.children {
            child.write_text(out);
        }
    }

    /// Reconstructs the exact source span this node covers.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    /// Direct child nodes, in input order.
    pub fn child_nodes(&self) -> impl Iterator<Item = &GreenNode<'s, K, N>> {
        self.children.iter().filter_map(GreenChild::as_node)
    }

    /// Direct child tokens, in input order.
    pub fn child_tokens(&self) -> impl Iterator<Item = &Token<'s, K>> {
        self.children.iter().filter_map(GreenChild::as_token)
    }

    /// Every token under this node, in input order.
    pub fn descendant_tokens(&self) -> DescendantTokens<'_, 's, K, N> {
        DescendantTokens {
            stack: vec![self.children.iter()],
        }
    }
}

/// Depth-first, in-order iterator over the tokens of a subtree.
pub struct DescendantTokens<'a, 's, K, N> {
    stack: Vec<std::slice::Iter<'a, GreenChild<'s, K, N>>>,
}

impl<'a, 's, K, N> Iterator for DescendantTokens<'a, 's, K, N> {
    type Item = &'a Token<'s, K>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let iter = self.stack.last_mut()?;
            match iter.next() {
                None => {
                    self.stack.pop();
                }
                Some(GreenChild::Token(token)) => return Some(token),
                Some(GreenChild::Node(node)) => self.stack.push(node.children.iter()),
            }
        }
    }
}
