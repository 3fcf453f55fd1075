//! Stack-based constructor for the green tree.
//!
//! The builder is a zipper over a partially constructed node: a flat buffer
//! of pending children plus a stack of open frames. `start_node` pushes a
//! frame remembering how many children were pending; `finish_node` pops it
//! and folds everything pushed since into the completed node.
//!
//! Misuse panics. Unbalanced `start_node`/`finish_node` pairs or a `finish`
//! with open frames are bugs in the driving parser, never input errors.

use crate::green::{GreenChild, GreenNode, Token};

/// A position in the pending-children buffer, taken before a prefix is
/// parsed so it can later be wrapped into a retrofitted node.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint(usize);

/// Builds a [`GreenNode`] from a sequence of `start_node`/`token`/
/// `finish_node` calls.
pub struct GreenTreeBuilder<'s, K, N> {
    parents: Vec<(N, usize)>,
    children: Vec<GreenChild<'s, K, N>>,
}

impl<'s, K, N> Default for GreenTreeBuilder<'s, K, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'s, K, N> GreenTreeBuilder<'s, K, N> {
    pub fn new() -> Self {
        Self {
            parents: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Opens a node of `kind`; subsequent children belong to it until the
    /// matching [`finish_node`](Self::finish_node).
    pub fn start_node(&mut self, kind: N) {
        self.parents.push((kind, self.children.len()));
    }

    /// Remembers the current position for a later
    /// [`start_node_at`](Self::start_node_at).
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.children.len())
    }

    /// Opens a node of `kind` that adopts every child pushed since
    /// `checkpoint` was taken.
    ///
    /// Panics if the checkpoint predates the currently open node.
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: N) {
        let Checkpoint(at) = checkpoint;
        assert!(
            at <= self.children.len(),
            "checkpoint is ahead of the pending children"
        );
        if let Some(&(_, saved)) = self.parents.last() {
            assert!(
                saved <= at,
                "checkpoint was taken before the currently open node"
            );
        }
        self.parents.push((kind, at));
    }

    /// Appends a token to the currently open node.
    pub fn token(&mut self, token: Token<'s, K>) {
        self.children.push(GreenChild::Token(token));
    }

    /// Appends an already-built node to the currently open node.
    pub fn node(&mut self, node: GreenNode<'s, K, N>) {
        self.children.push(GreenChild::Node(node));
    }

    /// Closes the most recently opened node.
    ///
    /// Panics if no node is open.
    pub fn finish_node(&mut self) {
        let (kind, saved) = self
            .parents
            .pop()
            .expect("finish_node called without a matching start_node");
        let children = self.children.split_off(saved);
        self.children.push(GreenChild::Node(GreenNode { kind, children }));
    }

    /// Number of currently open nodes.
    pub fn open_nodes(&self) -> usize {
        self.parents.len()
    }

    /// Consumes the builder and returns the root node.
    ///
    /// Panics if any node is still open or the pending buffer does not hold
    /// exactly one completed node.
    pub fn finish(mut self) -> GreenNode<'s, K, N> {
        assert!(
            self.parents.is_empty(),
            "finish called with {} unfinished node(s)",
            self.parents.len()
        );
        assert_eq!(
            self.children.len(),
            1,
            "finish expects exactly one root element"
        );
        match self.children.pop() {
            Some(GreenChild::Node(node)) => node,
            _ => panic!("finish expects the root element to be a node"),
        }
    }
}
