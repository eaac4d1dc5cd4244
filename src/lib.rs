//! Two generic containers: an unbalanced binary search tree and a singly-linked list.
//!
//! ```
//! use containers::{bst, list, Error};
//!
//! let mut tree = bst![2, 1, 4, 3, 5];
//! assert_eq!(tree.height(), 3);
//! assert_eq!(tree.remove(&4), Ok(4));
//! assert_eq!(tree.inorder_walk(), vec![1, 2, 3, 5]);
//!
//! let mut list = list![1, 2, 3];
//! list.add_first(0);
//! assert_eq!(list.get_last(), Ok(&3));
//! assert_eq!(list.get(4), Err(Error::OutOfRange {index: 4, len: 4}));
//! ```

pub mod error;
pub mod tree;
pub mod list;

pub use error::{Error, Result};
pub use tree::BinarySearchTree;
pub use list::LinkedList;

#[macro_export(local_inner_macros)]
macro_rules! bst {
    (@single $($x:tt)*) => (());
    (@count $($rest:expr),*) => (<[()]>::len(&[$(bst!(@single $rest)),*]));

    // trailing comma case
    ($($key:expr,)+) => { bst!($($key),+) };
    ($($key:expr),*) => {
        {
            let _cap = bst!(@count $($key),*);
            let mut _tree = $crate::BinarySearchTree::with_capacity(_cap);
            $(
                _tree.insert($key);
            )*
            _tree
        }
    };
}

#[macro_export]
macro_rules! list {
    // trailing comma case
    ($($value:expr,)+) => { $crate::list!($($value),+) };
    ($($value:expr),*) => {
        {
            let mut _list = $crate::LinkedList::new();
            $(
                _list.push($value);
            )*
            _list
        }
    };
}
