#[cfg(test)]
use std::mem;

#[cfg(test)]
use static_assertions::const_assert_eq;

/// The index of a node in the tree's arena, or "no node"
///
/// This type is essentially `Option<usize>`. The value usize::MAX is
/// reserved to represent `None`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub(crate) struct NodeIndex(usize);

// Every node stores three of these, so keep them the size of a usize
#[cfg(test)]
const_assert_eq!(mem::size_of::<NodeIndex>(), mem::size_of::<usize>());
#[cfg(test)]
const_assert_eq!(mem::size_of::<Option<usize>>(), 2 * mem::size_of::<usize>());

impl Default for NodeIndex {
    #[inline(always)]
    fn default() -> Self {
        Self::none()
    }
}

impl From<usize> for NodeIndex {
    #[inline(always)]
    fn from(index: usize) -> Self {
        debug_assert_ne!(index, usize::MAX, "bug: arena index collides with the `none` marker");
        NodeIndex(index)
    }
}

impl NodeIndex {
    #[inline(always)]
    pub fn none() -> Self {
        NodeIndex(usize::MAX)
    }

    // Methods on this type must be `#[inline]` so the compiler can see that the `Option` is only
    // an intermediate value and check for `usize::MAX` directly.
    #[inline(always)]
    pub fn into_index(self) -> Option<usize> {
        let NodeIndex(index) = self;
        if index == usize::MAX {
            None
        } else {
            Some(index)
        }
    }

    #[inline(always)]
    pub fn is_none(self) -> bool {
        self.0 == usize::MAX
    }

    #[inline(always)]
    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}
