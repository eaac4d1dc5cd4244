/// The ways an operation on one of the containers can fail
///
/// A failed operation never modifies the container it was called on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Error {
    /// The key passed to `BinarySearchTree::remove` is not in the tree
    #[error("key not found in tree")]
    NotFound,

    /// A list index was outside of the range accepted by the operation
    #[error("index {index} is out of range for a list of length {len}")]
    OutOfRange {
        index: usize,
        len: usize,
    },

    /// A first/last accessor was called on an empty list
    #[error("list is empty")]
    EmptyCollection,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Turns an `OutOfRange` error into `EmptyCollection`
    ///
    /// Used by the first/last accessors, which only go out of range when the list is empty.
    pub(crate) fn into_empty(self) -> Self {
        match self {
            Error::OutOfRange {..} => Error::EmptyCollection,
            err => err,
        }
    }
}
