use std::fmt;
use std::mem;
use std::cmp::Ordering;
use std::iter::FromIterator;

use log::trace;

use crate::error::{Error, Result};

mod index;
mod node;
mod preorder;
mod inorder;
mod postorder;

pub use node::*;
pub use preorder::*;
pub use inorder::*;
pub use postorder::*;

use index::NodeIndex;

#[derive(Debug, Clone, PartialEq, Eq)]
struct InnerNode<T> {
    key: T,
    left: NodeIndex,
    right: NodeIndex,
    /// Back-reference used for relinking during removal. Never owns anything.
    parent: NodeIndex,
}

impl<T> InnerNode<T> {
    fn new(key: T, parent: NodeIndex) -> Self {
        Self {
            key,
            left: NodeIndex::default(),
            right: NodeIndex::default(),
            parent,
        }
    }
}

/// An unbalanced binary search tree (BST)
///
/// BST properties: For each node with key `k`:
/// - The key of each node in the left subtree is less than `k`
/// - The key of each node in the right subtree is greater than or equal to `k`
///
/// Equal keys are allowed and always end up in the right subtree of the key they are equal to.
/// Nothing is ever rebalanced, so inserting keys in sorted order produces a tree with a height
/// equal to its length.
///
/// All nodes live in a single arena owned by the tree. Nodes refer to their children and their
/// parent by index, so dropping the tree never recurses through the structure.
#[derive(Debug, Clone)]
pub struct BinarySearchTree<T> {
    nodes: Vec<InnerNode<T>>,
    root: NodeIndex,
}

impl<T> Default for BinarySearchTree<T> {
    fn default() -> Self {
        Self {
            nodes: Default::default(),
            root: Default::default(),
        }
    }
}

impl<T: Ord> PartialEq for BinarySearchTree<T> {
    fn eq(&self, other: &Self) -> bool {
        // Two trees holding the same keys can have different shapes depending on the insertion
        // order, so compare the sorted key sequences instead of the structure.
        self.len() == other.len() && self.iter_inorder().eq(other.iter_inorder())
    }
}

impl<T: Ord> Eq for BinarySearchTree<T> {}

impl<T: Ord> BinarySearchTree<T> {
    /// Creates an empty tree
    ///
    /// # Examples
    ///
    /// ```
    /// use containers::BinarySearchTree;
    /// let tree: BinarySearchTree<i32> = BinarySearchTree::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty tree with room for at least `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: NodeIndex::default(),
        }
    }

    /// Returns the number of keys in the tree, counting duplicates
    ///
    /// Time complexity: `O(1)`
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree is empty
    ///
    /// Time complexity: `O(1)`
    pub fn is_empty(&self) -> bool {
        debug_assert!(self.nodes.is_empty() == self.root.is_none());
        self.nodes.is_empty()
    }

    /// Inserts a key into the tree
    ///
    /// Keys that are equal to a key already in the tree are inserted into its right subtree, so
    /// the tree always grows by exactly one node.
    ///
    /// Time complexity: `O(height)`
    ///
    /// # Examples
    ///
    /// ```
    /// use containers::BinarySearchTree;
    ///
    /// let mut tree = BinarySearchTree::new();
    /// tree.insert(2);
    /// tree.insert(2);
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.inorder_walk(), vec![2, 2]);
    /// ```
    pub fn insert(&mut self, key: T) {
        let mut parent = NodeIndex::none();
        let mut go_left = false;
        let mut current = self.root;
        while let Some(index) = current.into_index() {
            parent = current;
            let node = &self.nodes[index];
            go_left = key < node.key;
            current = if go_left { node.left } else { node.right };
        }

        let new_index = NodeIndex::from(self.nodes.len());
        self.nodes.push(InnerNode::new(key, parent));

        match parent.into_index() {
            None => self.root = new_index,
            Some(parent) if go_left => self.nodes[parent].left = new_index,
            Some(parent) => self.nodes[parent].right = new_index,
        }
    }

    /// Returns true if a key equal to the given key is in the tree
    ///
    /// Time complexity: `O(height)`
    ///
    /// # Examples
    ///
    /// ```
    /// use containers::BinarySearchTree;
    ///
    /// let mut tree = BinarySearchTree::new();
    /// assert!(!tree.search(&4));
    /// tree.insert(4);
    /// assert!(tree.search(&4));
    /// ```
    pub fn search(&self, key: &T) -> bool {
        self.find(key).is_some()
    }

    /// Removes a key from the tree and returns it
    ///
    /// If the matching node has two children, its key is replaced by its in-order successor (the
    /// smallest key of its right subtree) and the successor's node is removed instead. When the
    /// tree holds several equal keys, the first one reached from the root is removed.
    ///
    /// Returns `Error::NotFound` and leaves the tree untouched if no key is equal to `key`.
    ///
    /// Time complexity: `O(height)`
    ///
    /// # Examples
    ///
    /// ```
    /// use containers::{BinarySearchTree, Error};
    ///
    /// let mut tree: BinarySearchTree<_> = vec![2, 1, 4, 3, 5].into_iter().collect();
    /// assert_eq!(tree.remove(&4), Ok(4));
    /// assert_eq!(tree.inorder_walk(), vec![1, 2, 3, 5]);
    /// assert_eq!(tree.remove(&4), Err(Error::NotFound));
    /// ```
    pub fn remove(&mut self, key: &T) -> Result<T> {
        let found = self.find(key).ok_or(Error::NotFound)?;

        let node = &self.nodes[found];
        let target = match (node.left.into_index(), node.right.into_index()) {
            (Some(_), Some(right)) => {
                let successor = self.minimum(right);
                trace!("removing node {} by moving successor {} into it", found, successor);
                // The successor's node now holds the key being removed and has no left child
                self.swap_keys(found, successor);
                successor
            },

            _ => found,
        };

        Ok(self.unlink(target))
    }

    /// Removes all keys from the tree
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Returns the number of nodes on the longest path from the root to a leaf
    ///
    /// An empty tree has height 0 and a tree with a single node has height 1.
    ///
    /// Time complexity: `O(n)`
    ///
    /// # Examples
    ///
    /// ```
    /// use containers::BinarySearchTree;
    ///
    /// let tree: BinarySearchTree<_> = vec![2, 1, 4, 3, 5].into_iter().collect();
    /// assert_eq!(tree.height(), 3);
    /// ```
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<_> = self.root().map(|root| (root, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left().map(|left| (left, depth + 1)));
            stack.extend(node.right().map(|right| (right, depth + 1)));
        }

        height
    }

    /// Performs a pre-order traversal of the tree
    pub fn iter_preorder(&self) -> IterPreorder<T> {
        IterPreorder::new(self.root())
    }

    /// Performs an in-order traversal of the tree
    ///
    /// Keys are produced in ascending order.
    pub fn iter_inorder(&self) -> IterInorder<T> {
        IterInorder::new(self.root())
    }

    /// Performs a post-order traversal of the tree
    pub fn iter_postorder(&self) -> IterPostorder<T> {
        IterPostorder::new(self.root())
    }

    /// Returns every key of the tree in pre-order (node, left subtree, right subtree)
    pub fn preorder_walk(&self) -> Vec<T>
        where T: Clone,
    {
        self.iter_preorder().cloned().collect()
    }

    /// Returns every key of the tree in in-order, i.e. sorted in ascending order
    pub fn inorder_walk(&self) -> Vec<T>
        where T: Clone,
    {
        self.iter_inorder().cloned().collect()
    }

    /// Returns every key of the tree in post-order (left subtree, right subtree, node)
    pub fn postorder_walk(&self) -> Vec<T>
        where T: Clone,
    {
        self.iter_postorder().cloned().collect()
    }

    /// Returns the root node of the tree, or `None` if the tree is empty
    ///
    /// This is a low-level API meant to be used for implementing custom traversals.
    ///
    /// # Examples
    ///
    /// ```
    /// use containers::{BinarySearchTree, tree::Node};
    ///
    /// // Counts the leaves of a subtree
    /// fn leaves(node: Option<Node<i32>>) -> usize {
    ///     match node {
    ///         None => 0,
    ///         Some(node) if !node.has_left() && !node.has_right() => 1,
    ///         Some(node) => leaves(node.left()) + leaves(node.right()),
    ///     }
    /// }
    ///
    /// let tree: BinarySearchTree<_> = vec![2, 1, 4, 3, 5].into_iter().collect();
    /// assert_eq!(leaves(tree.root()), 3);
    /// ```
    pub fn root(&self) -> Option<Node<T>> {
        Node::new(&self.nodes, self.root)
    }

    /// Returns the arena index of a node whose key is equal to `key`
    fn find(&self, key: &T) -> Option<usize> {
        let mut current = self.root;
        while let Some(index) = current.into_index() {
            let node = &self.nodes[index];
            match node.key.cmp(key) {
                Ordering::Less => current = node.right,
                Ordering::Greater => current = node.left,
                Ordering::Equal => return Some(index),
            }
        }

        None
    }
}

impl<T> BinarySearchTree<T> {
    /// Returns the arena index of the leftmost node of the subtree rooted at `index`
    fn minimum(&self, mut index: usize) -> usize {
        while let Some(left) = self.nodes[index].left.into_index() {
            index = left;
        }
        index
    }

    fn swap_keys(&mut self, a: usize, b: usize) {
        debug_assert_ne!(a, b);
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.nodes.split_at_mut(high);
        mem::swap(&mut head[low].key, &mut tail[0].key);
    }

    /// Splices a node with at most one child out of the tree and returns its key
    fn unlink(&mut self, index: usize) -> T {
        let node = &self.nodes[index];
        debug_assert!(node.left.is_none() || node.right.is_none(),
            "bug: only nodes with at most one child can be spliced out");

        let child = if node.left.is_some() { node.left } else { node.right };
        let parent = node.parent;
        self.replace_in_parent(NodeIndex::from(index), child, parent);

        self.release(index)
    }

    /// Points the link that refers to `old` (the parent's child link, or the root) at `new`
    fn replace_in_parent(&mut self, old: NodeIndex, new: NodeIndex, parent: NodeIndex) {
        match parent.into_index() {
            Some(parent_index) => {
                let parent_node = &mut self.nodes[parent_index];
                if parent_node.left == old {
                    parent_node.left = new;
                } else {
                    debug_assert_eq!(parent_node.right, old);
                    parent_node.right = new;
                }
            },

            None => {
                debug_assert_eq!(self.root, old);
                self.root = new;
            },
        }

        if let Some(new_index) = new.into_index() {
            self.nodes[new_index].parent = parent;
        }
    }

    /// Frees the arena slot of a node that is no longer linked into the tree
    ///
    /// The last node of the arena is moved into the freed slot, so every link to it is updated.
    fn release(&mut self, index: usize) -> T {
        let last = self.nodes.len() - 1;
        let removed = self.nodes.swap_remove(index);

        if index != last {
            let moved_from = NodeIndex::from(last);
            let moved_to = NodeIndex::from(index);
            trace!("node {} moved to slot {}", last, index);

            let moved = &self.nodes[index];
            let (parent, left, right) = (moved.parent, moved.left, moved.right);
            self.replace_in_parent(moved_from, moved_to, parent);
            for &child in [left, right].iter() {
                if let Some(child) = child.into_index() {
                    self.nodes[child].parent = moved_to;
                }
            }
        }

        removed.key
    }
}

impl<T: fmt::Display> fmt::Display for BinarySearchTree<T> {
    /// Draws the tree rotated 90 degrees counter-clockwise: the right subtree is printed above
    /// each key and the left subtree below it, with one tab of indentation per level.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current = match Node::new(&self.nodes, self.root) {
            Some(root) => Some((root, 0)),
            None => return write!(f, "Empty"),
        };

        // Reverse in-order traversal
        let mut stack = Vec::new();
        loop {
            while let Some((node, level)) = current {
                stack.push((node, level));
                current = node.right().map(|right| (right, level + 1));
            }

            let (node, level) = match stack.pop() {
                Some(entry) => entry,
                None => break,
            };

            for _ in 0..level {
                f.write_str("\t")?;
            }
            writeln!(f, "{}", node.key())?;

            current = node.left().map(|left| (left, level + 1));
        }

        Ok(())
    }
}

impl<T: Ord> Extend<T> for BinarySearchTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T: Ord> FromIterator<T> for BinarySearchTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}
