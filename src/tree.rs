//! Tree of candidate segmentations.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. The root holds the
//! unsplit word; each child refines one fragment of its parent. Every node
//! owns its own [`DecompoundedWord`] plus a per-fragment "split again" bit
//! vector used while the tree is being expanded.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::decompounded::DecompoundedWord;

/// Index of a node inside a [`DecompoundingTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node of the decompounding tree
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    value: DecompoundedWord,
    split_again: Vec<bool>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    depth: usize,
}

impl Node {
    /// The segmentation held by this node
    pub fn value(&self) -> &DecompoundedWord {
        &self.value
    }

    /// Whether fragment `index` is still a candidate for further splitting
    pub fn should_split_again(&self, index: usize) -> bool {
        self.split_again.get(index).copied().unwrap_or(false)
    }

    /// The parent node, `None` for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Check if the node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Distance from the root (the root is at depth 0)
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// All candidate segmentations of a word
#[derive(Debug, Clone, Serialize)]
pub struct DecompoundingTree {
    nodes: Vec<Node>,
}

impl DecompoundingTree {
    /// Create a tree holding `root`; every fragment of the root is eligible for splitting.
    pub fn new(root: DecompoundedWord) -> Self {
        let split_again = vec![true; root.len()];
        DecompoundingTree {
            nodes: vec![Node {
                value: root,
                split_again,
                parent: None,
                children: Vec::new(),
                depth: 0,
            }],
        }
    }

    /// Tree whose root is `word` unsplit, with `split` as its only child when it is a real split.
    pub fn from_split(word: &str, split: DecompoundedWord) -> Self {
        let root = DecompoundedWord::unsplit(word);
        let mut tree = DecompoundingTree::new(root);
        if split.is_compound() && split != *tree.root_value() {
            let flags = vec![false; split.len()];
            tree.add_child(tree.root(), split, flags);
        }
        tree
    }

    /// Id of the root node
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// The unsplit word held by the root
    pub fn root_value(&self) -> &DecompoundedWord {
        &self.nodes[0].value
    }

    /// Get a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Get a node, or `None` if `id` is not in this tree
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// The segmentation held by a node
    pub fn value(&self, id: NodeId) -> &DecompoundedWord {
        &self.node(id).value
    }

    /// Children of a node
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Attach a new child under `parent` and return its id
    pub fn add_child(
        &mut self,
        parent: NodeId,
        value: DecompoundedWord,
        split_again: Vec<bool>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        let depth = self.node(parent).depth + 1;
        self.nodes.push(Node {
            value,
            split_again,
            parent: Some(parent),
            children: Vec::new(),
            depth,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Number of nodes, including the root
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always has a root, so this is never true
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether no split was found (the tree is the root only)
    pub fn is_unsplit(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Maximum node depth
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Node ids in depth-first pre-order, children in insertion order
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];

        while let Some(id) = stack.pop() {
            order.push(id);
            for &child in self.children(id).iter().rev() {
                stack.push(child);
            }
        }

        order
    }

    /// Leaf node ids in depth-first order
    pub fn leaves(&self) -> Vec<NodeId> {
        self.preorder()
            .into_iter()
            .filter(|&id| self.node(id).is_leaf())
            .collect()
    }

    /// Every distinct segmentation in the tree, root first, depth-first order
    pub fn all_splits(&self) -> Vec<DecompoundedWord> {
        let mut seen = HashSet::new();
        self.preorder()
            .into_iter()
            .map(|id| self.value(id))
            .filter(|value| seen.insert(*value))
            .cloned()
            .collect()
    }

    /// The segmentation with the most fragments; ties go to the first found depth-first
    pub fn best_split(&self) -> &DecompoundedWord {
        let mut best = self.root();
        for id in self.preorder() {
            if self.value(id).len() > self.value(best).len() {
                best = id;
            }
        }
        self.value(best)
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId) -> fmt::Result {
        let node = self.node(id);
        writeln!(f, "{}{}", "  ".repeat(node.depth), node.value)?;
        for &child in &node.children {
            self.fmt_node(f, child)?;
        }
        Ok(())
    }
}

impl fmt::Display for DecompoundingTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.root())
    }
}
