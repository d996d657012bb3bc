// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Prefix-shared storage for the chains found by the reverse search.
//!
//! A search can record a very large number of chains, most of them sharing
//! long prefixes near the halting transition. Each chain is stored as a path
//! from the root, nearest-the-halt state first, and nodes are only created
//! where no child with the same label exists yet.
//!
//! Chains can be as long as the search depth, so every walk over the tree,
//! dropping included, uses an explicit stack rather than recursion.
//!
//! # Textual format
//!
//! `<result count>|<tree>`, where a node is its label (`-` for the root, a
//! state letter otherwise) followed, if it has children, by the decimal child
//! count and each child in turn. For example, the single chain `B A` is
//! `1|-1B1A`. Sibling labels are distinct.

use crate::error::TrieParseError;
use crate::machine::{StateId, MAX_STATES};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One node of the trie. The root has no state.
#[derive(Default)]
pub struct TrieNode {
    state: Option<StateId>,
    children: Vec<TrieNode>,
}

impl TrieNode {
    fn new(state: Option<StateId>) -> Self {
        Self {
            state,
            children: Vec::new(),
        }
    }

    pub fn state(&self) -> Option<StateId> {
        self.state
    }

    pub fn children(&self) -> &[TrieNode] {
        &self.children
    }

    /// The child labelled `state`, created if missing.
    fn child(&mut self, state: StateId) -> &mut TrieNode {
        let index = match self.children.iter().position(|c| c.state == Some(state)) {
            Some(index) => index,
            None => {
                self.children.push(TrieNode::new(Some(state)));
                self.children.len() - 1
            }
        };
        &mut self.children[index]
    }

    /// Every node below and including `self`, depth first with children in
    /// insertion order, paired with its distance from `self`.
    fn preorder(&self) -> Preorder<'_> {
        Preorder {
            stack: vec![(0, self)],
        }
    }

    fn node_count(&self) -> usize {
        self.preorder().count()
    }

    fn depth(&self) -> usize {
        self.preorder().map(|(depth, _)| depth).max().unwrap_or(0)
    }

    fn chains(&self) -> Vec<Vec<StateId>> {
        let mut out = Vec::new();
        let mut prefix = Vec::new();
        for (depth, node) in self.preorder().skip(1) {
            prefix.truncate(depth - 1);
            if let Some(state) = node.state {
                prefix.push(state);
            }
            if node.children.is_empty() {
                out.push(prefix.clone());
            }
        }
        out
    }

    fn write_to(&self, out: &mut String) {
        for (_, node) in self.preorder() {
            out.push(node.state.map_or('-', StateId::to_char));
            if !node.children.is_empty() {
                out.push_str(&node.children.len().to_string());
            }
        }
    }
}

struct Preorder<'a> {
    stack: Vec<(usize, &'a TrieNode)>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = (usize, &'a TrieNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

/// Reassembles a tree from its nodes in preorder, each announced with the
/// number of children that follow it.
struct Builder {
    /// Nodes still waiting for children, with how many are missing. The
    /// bottom entry is a placeholder whose one child is the root.
    open: Vec<(TrieNode, usize)>,
}

impl Builder {
    fn new() -> Self {
        Self {
            open: vec![(TrieNode::new(None), 1)],
        }
    }

    fn expects_root(&self) -> bool {
        self.open.len() == 1
    }

    /// Whether the node being filled already has a child labelled `state`.
    fn has_sibling(&self, state: Option<StateId>) -> bool {
        self.open
            .last()
            .is_some_and(|(parent, _)| parent.children.iter().any(|c| c.state == state))
    }

    /// Add the next node. Returns the root once the tree is complete.
    fn push(&mut self, node: TrieNode, child_count: usize) -> Option<TrieNode> {
        if child_count > 0 {
            self.open.push((node, child_count));
            return None;
        }
        let mut finished = node;
        loop {
            let (parent, missing) = self.open.last_mut()?;
            parent.children.push(finished);
            *missing -= 1;
            if *missing > 0 {
                return None;
            }
            let (mut complete, _) = self.open.pop()?;
            if self.open.is_empty() {
                return complete.children.pop();
            }
            finished = complete;
        }
    }
}

impl Drop for TrieNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

impl Clone for TrieNode {
    fn clone(&self) -> Self {
        let mut builder = Builder::new();
        for (_, node) in self.preorder() {
            let copy = TrieNode::new(node.state);
            if let Some(root) = builder.push(copy, node.children.len()) {
                return root;
            }
        }
        TrieNode::new(self.state)
    }
}

/// Shallow: a deep tree is better read through its textual form.
impl fmt::Debug for TrieNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrieNode")
            .field("state", &self.state)
            .field("children", &self.children.len())
            .finish()
    }
}

/// Children are a set: equality ignores their order.
impl PartialEq for TrieNode {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((one, two)) = pending.pop() {
            if one.state != two.state || one.children.len() != two.children.len() {
                return false;
            }
            for child in &one.children {
                match two.children.iter().find(|o| o.state == child.state) {
                    Some(matching) => pending.push((child, matching)),
                    None => return false,
                }
            }
        }
        true
    }
}

impl Eq for TrieNode {}

/// The set of chains recorded during one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTrie {
    root: TrieNode,
    result_count: u64,
}

impl ResultTrie {
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(None),
            result_count: 0,
        }
    }

    /// Insert `chain` (nearest-the-halt state first) and count it, even if
    /// the same chain was recorded before.
    pub fn add_result(&mut self, chain: &[StateId]) {
        self.result_count += 1;
        let mut node = &mut self.root;
        for &state in chain {
            node = node.child(state);
        }
    }

    /// Number of `add_result` calls, duplicates included.
    pub fn result_count(&self) -> u64 {
        self.result_count
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Length of the longest stored chain.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Every root-to-leaf chain. A chain that is a prefix of another is only
    /// reported as part of the longer one.
    pub fn chains(&self) -> Vec<Vec<StateId>> {
        self.root.chains()
    }
}

impl Default for ResultTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ResultTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tree = String::new();
        self.root.write_to(&mut tree);
        write!(f, "{}|{}", self.result_count, tree)
    }
}

/// Serialized as its textual form.
impl Serialize for ResultTrie {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct TreeReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    /// Offset of `bytes` within the full input, for error positions.
    base: usize,
}

impl TreeReader<'_> {
    /// One label and its optional child count.
    fn header(&mut self, root: bool) -> Result<(TrieNode, usize), TrieParseError> {
        let at = self.base + self.pos;
        let label = *self.bytes.get(self.pos).ok_or(TrieParseError::UnexpectedEnd)?;
        self.pos += 1;
        let state = match (root, label) {
            (true, b'-') => None,
            (false, b'A'..=b'Y') => Some(StateId::new(label - b'A')),
            _ => return Err(TrieParseError::BadLabel { pos: at }),
        };

        let digits = self.bytes[self.pos..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        let mut node = TrieNode::new(state);
        if digits == 0 {
            return Ok((node, 0));
        }
        let at = self.base + self.pos;
        let count: usize = std::str::from_utf8(&self.bytes[self.pos..self.pos + digits])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or(TrieParseError::BadCount)?;
        if count > MAX_STATES {
            return Err(TrieParseError::TooManyChildren { pos: at, count });
        }
        self.pos += digits;
        node.children.reserve(count);
        Ok((node, count))
    }

    fn tree(&mut self) -> Result<TrieNode, TrieParseError> {
        let mut builder = Builder::new();
        loop {
            let at = self.base + self.pos;
            let (node, count) = self.header(builder.expects_root())?;
            if builder.has_sibling(node.state) {
                return Err(TrieParseError::DuplicateChild { pos: at });
            }
            if let Some(root) = builder.push(node, count) {
                return Ok(root);
            }
        }
    }
}

impl FromStr for ResultTrie {
    type Err = TrieParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (count, tree) = text.split_once('|').ok_or(TrieParseError::MissingSeparator)?;
        let result_count = count.trim().parse().map_err(|_| TrieParseError::BadCount)?;
        let tree = tree.trim_end();
        let mut reader = TreeReader {
            bytes: tree.as_bytes(),
            pos: 0,
            base: count.len() + 1,
        };
        let root = reader.tree()?;
        if reader.pos != reader.bytes.len() {
            return Err(TrieParseError::TrailingInput {
                pos: reader.base + reader.pos,
            });
        }
        Ok(Self { root, result_count })
    }
}
