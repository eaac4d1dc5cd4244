use std::iter::FusedIterator;

use super::Node;

pub struct IterPostorder<'a, T> {
    stack: Vec<Node<'a, T>>,
}

// See: https://www.geeksforgeeks.org/iterative-postorder-traversal-using-stack/
impl<'a, T> IterPostorder<'a, T> {
    pub(super) fn new(root: Option<Node<'a, T>>) -> Self {
        let mut iter = Self {stack: Vec::new()};
        if let Some(root) = root {
            iter.descend(root);
        }
        iter
    }

    /// Pushes `node` and its left spine, each preceded by its right child
    fn descend(&mut self, mut node: Node<'a, T>) {
        loop {
            self.stack.extend(node.right());
            self.stack.push(node);

            match node.left() {
                Some(left) => node = left,
                None => break,
            }
        }
    }
}

/// Compares two nodes for equality using pointer equality only
fn node_eq<T>(left: Option<&Node<T>>, right: &Node<T>) -> bool {
    left.map(|left| left.ptr_eq(right))
        // default to not equal
        .unwrap_or(false)
}

impl<'a, T> Iterator for IterPostorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = self.stack.pop()?;

            // If the top of the stack is the current node's right child, the right subtree has
            // not been visited yet
            match node.right() {
                Some(right) if node_eq(self.stack.last(), &right) => {
                    // Put the current node back under its right subtree
                    self.stack.pop();
                    self.stack.push(node);
                    self.descend(right);
                },

                _ => return Some(node.key()),
            }
        }
    }
}

impl<'a, T> FusedIterator for IterPostorder<'a, T> {}
