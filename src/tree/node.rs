use std::ptr;
use std::fmt;

use super::InnerNode;
use super::index::NodeIndex;

/// A single node of the binary search tree
///
/// Nodes are read-only views into the tree. Keys can't be modified through them since that could
/// invalidate the ordering properties.
pub struct Node<'a, T> {
    nodes: &'a [InnerNode<T>],
    node: &'a InnerNode<T>,
}

impl<'a, T> fmt::Debug for Node<'a, T>
    where T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", self.key())
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<'a, T> Clone for Node<'a, T> {
    fn clone(&self) -> Self {
        Self {..*self}
    }
}

impl<'a, T> Copy for Node<'a, T> {}

impl<'a, T: PartialEq> PartialEq for Node<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        // If the pointers are the same, the keys are guaranteed to be equal (similar to `Arc`
        // using `ptr_eq` to optimize its `PartialEq` impl)
        self.ptr_eq(other) || self.key().eq(other.key())
    }
}

impl<'a, T: Eq> Eq for Node<'a, T> {}

impl<'a, T> Node<'a, T> {
    /// Creates a view of the node at `index`, or returns `None` if `index` is the empty index
    pub(super) fn new(nodes: &'a [InnerNode<T>], index: NodeIndex) -> Option<Self> {
        let node = nodes.get(index.into_index()?)?;
        Some(Self {nodes, node})
    }

    /// Returns the key of this node
    pub fn key(&self) -> &'a T {
        &self.node.key
    }

    /// Returns true if this node has a left subtree
    pub fn has_left(&self) -> bool {
        self.node.left.is_some()
    }

    /// Returns true if this node has a right subtree
    pub fn has_right(&self) -> bool {
        self.node.right.is_some()
    }

    /// Returns the left child node (subtree) of this node, if any
    pub fn left(&self) -> Option<Self> {
        Self::new(self.nodes, self.node.left)
    }

    /// Returns the right child node (subtree) of this node, if any
    pub fn right(&self) -> Option<Self> {
        Self::new(self.nodes, self.node.right)
    }

    /// Returns the parent of this node, or `None` for the root
    pub fn parent(&self) -> Option<Self> {
        Self::new(self.nodes, self.node.parent)
    }

    /// Returns true if both views refer to the same node of the same tree
    pub fn ptr_eq(&self, other: &Self) -> bool {
        ptr::eq(self.node, other.node)
    }
}
