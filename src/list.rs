use std::fmt;
use std::mem;
use std::iter::{once, FromIterator};

use log::trace;

use crate::error::{Error, Result};

mod iter;

pub use self::iter::*;

type Link<T> = Option<Box<ListNode<T>>>;

#[derive(Debug)]
struct ListNode<T> {
    data: T,
    next: Link<T>,
}

impl<T> ListNode<T> {
    fn new(data: T, next: Link<T>) -> Self {
        Self {data, next}
    }
}

/// A singly-linked list with index-based access
///
/// Each node is owned by its predecessor (or by the list for the first node). Every operation
/// that takes an index walks the list from the front, so it runs in `O(index)`.
pub struct LinkedList<T> {
    head: Link<T>,
    len: usize,
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self {
            head: None,
            len: 0,
        }
    }
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        // Unlink nodes one at a time so dropping a long list can't overflow the stack
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T> LinkedList<T> {
    /// Creates an empty list
    ///
    /// # Examples
    ///
    /// ```
    /// use containers::LinkedList;
    /// let list: LinkedList<i32> = LinkedList::new();
    /// assert!(list.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of elements in the list
    ///
    /// Time complexity: `O(1)`
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty
    ///
    /// Time complexity: `O(1)`
    pub fn is_empty(&self) -> bool {
        debug_assert!(self.len != 0 || self.head.is_none());
        self.len == 0
    }

    /// Inserts `value` so that it ends up at position `index`
    ///
    /// `index == 0` inserts at the front and `index == len()` appends. Any larger index fails with
    /// `Error::OutOfRange`.
    ///
    /// # Examples
    ///
    /// ```
    /// use containers::{LinkedList, Error};
    ///
    /// let mut list: LinkedList<_> = vec![1, 3].into_iter().collect();
    /// list.add(1, 2)?;
    /// list.add(3, 4)?;
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    /// assert_eq!(list.add(5, 6), Err(Error::OutOfRange {index: 5, len: 4}));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn add(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.len {
            return Err(self.out_of_range(index));
        }

        let link = self.link_mut(index)?;
        let next = link.take();
        *link = Some(Box::new(ListNode::new(value, next)));
        self.len += 1;
        trace!("inserted element at index {} (len = {})", index, self.len);

        Ok(())
    }

    /// Inserts `value` at the front of the list
    pub fn add_first(&mut self, value: T) {
        let next = self.head.take();
        self.head = Some(Box::new(ListNode::new(value, next)));
        self.len += 1;
    }

    /// Appends `value` to the end of the list
    ///
    /// Time complexity: `O(n)`
    pub fn add_last(&mut self, value: T) {
        self.extend(once(value));
    }

    /// Appends `value` to the end of the list, same as `add_last`
    pub fn push(&mut self, value: T) {
        self.add_last(value);
    }

    /// Removes and returns the element at position `index`
    ///
    /// Fails with `Error::OutOfRange` if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(self.out_of_range(index));
        }

        let len = self.len;
        let link = self.link_mut(index)?;
        let node = link.take().ok_or(Error::OutOfRange {index, len})?;
        let ListNode {data, next} = *node;
        *link = next;
        self.len -= 1;
        trace!("removed element at index {} (len = {})", index, self.len);

        Ok(data)
    }

    /// Returns a reference to the element at position `index`
    ///
    /// Fails with `Error::OutOfRange` if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.iter().nth(index).ok_or_else(|| self.out_of_range(index))
    }

    /// Returns a mutable reference to the element at position `index`
    ///
    /// Fails with `Error::OutOfRange` if `index >= len()`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let err = self.out_of_range(index);
        match self.link_mut(index)? {
            Some(node) => Ok(&mut node.data),
            None => Err(err),
        }
    }

    /// Replaces the element at position `index` with `value` and returns the previous element
    ///
    /// Fails with `Error::OutOfRange` if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use containers::LinkedList;
    ///
    /// let mut list: LinkedList<_> = vec![1, 2, 3].into_iter().collect();
    /// assert_eq!(list.set(1, 8), Ok(2));
    /// assert!(!list.contains(&2));
    /// assert!(list.set(3, 4).is_err());
    /// ```
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        let data = self.get_mut(index)?;
        Ok(mem::replace(data, value))
    }

    /// Returns the first element, or `Error::EmptyCollection` if the list is empty
    pub fn get_first(&self) -> Result<&T> {
        self.get(0).map_err(Error::into_empty)
    }

    /// Returns the last element, or `Error::EmptyCollection` if the list is empty
    pub fn get_last(&self) -> Result<&T> {
        self.get(self.len.wrapping_sub(1)).map_err(Error::into_empty)
    }

    /// Removes and returns the first element, or `Error::EmptyCollection` if the list is empty
    pub fn remove_first(&mut self) -> Result<T> {
        self.remove(0).map_err(Error::into_empty)
    }

    /// Removes and returns the last element, or `Error::EmptyCollection` if the list is empty
    pub fn remove_last(&mut self) -> Result<T> {
        self.remove(self.len.wrapping_sub(1)).map_err(Error::into_empty)
    }

    /// Returns the position of the first element equal to `value`, or `None` if there is none
    ///
    /// # Examples
    ///
    /// ```
    /// use containers::LinkedList;
    ///
    /// let list: LinkedList<_> = vec![4, 2, 4].into_iter().collect();
    /// assert_eq!(list.index_of(&4), Some(0));
    /// assert_eq!(list.index_of(&2), Some(1));
    /// assert_eq!(list.index_of(&7), None);
    /// ```
    pub fn index_of(&self, value: &T) -> Option<usize>
        where T: PartialEq,
    {
        self.iter().position(|data| data == value)
    }

    /// Returns true if an element equal to `value` is in the list
    pub fn contains(&self, value: &T) -> bool
        where T: PartialEq,
    {
        self.index_of(value).is_some()
    }

    /// Removes every element of the list
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Returns an iterator over the elements of the list, front to back
    pub fn iter(&self) -> Iter<T> {
        Iter::new(self.head.as_deref(), self.len)
    }

    fn out_of_range(&self, index: usize) -> Error {
        Error::OutOfRange {index, len: self.len}
    }

    /// Returns the link that owns the node at position `index`
    ///
    /// For `index == len()` this is the empty link after the last node.
    fn link_mut(&mut self, index: usize) -> Result<&mut Link<T>> {
        let len = self.len;
        let mut link = &mut self.head;
        for _ in 0..index {
            link = &mut link.as_mut().ok_or(Error::OutOfRange {index, len})?.next;
        }

        Ok(link)
    }
}

impl<T: fmt::Display> fmt::Display for LinkedList<T> {
    /// Writes the elements joined by `-->` followed by `End`, e.g. `1-->2-->End`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for data in self.iter() {
            write!(f, "{}-->", data)?;
        }
        write!(f, "End")
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let len = self.len;
        let mut added = 0;
        // Walk to the end once and keep appending from there
        if let Ok(mut link) = self.link_mut(len) {
            for data in iter {
                debug_assert!(link.is_none());
                let node = link.get_or_insert(Box::new(ListNode::new(data, None)));
                added += 1;
                link = &mut node.next;
            }
        }
        self.len += added;
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> From<Vec<T>> for LinkedList<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;

    use rand::prelude::*;

    fn to_vec<T: Clone>(list: &LinkedList<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn list_scenario() {
        let mut list = LinkedList::from(vec![1, 2, 3, 4, 5]);
        list.push(6);
        list.add_first(0);

        assert_eq!(to_vec(&list), vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(list.len(), 7);
        assert_eq!(list.get_first(), Ok(&0));
        assert_eq!(list.get_last(), Ok(&6));
        assert_eq!(list.index_of(&3), Some(3));

        assert_eq!(list.set(3, 8), Ok(3));
        assert!(!list.contains(&3));
        assert_eq!(list.set(3, 3), Ok(8));
        assert!(list.contains(&3));
    }

    #[test]
    fn out_of_range() {
        let mut list: LinkedList<_> = vec!['a', 'b', 'c'].into_iter().collect();

        assert_eq!(list.get(3), Err(Error::OutOfRange {index: 3, len: 3}));
        assert_eq!(list.get(usize::MAX), Err(Error::OutOfRange {index: usize::MAX, len: 3}));
        assert_eq!(list.add(4, 'x'), Err(Error::OutOfRange {index: 4, len: 3}));
        assert_eq!(list.remove(3), Err(Error::OutOfRange {index: 3, len: 3}));
        assert_eq!(list.set(3, 'x'), Err(Error::OutOfRange {index: 3, len: 3}));
        assert_eq!(to_vec(&list), vec!['a', 'b', 'c']);

        // Appending is allowed
        assert_eq!(list.add(3, 'x'), Ok(()));
        assert_eq!(to_vec(&list), vec!['a', 'b', 'c', 'x']);
    }

    #[test]
    fn empty_list() {
        let mut list: LinkedList<i32> = LinkedList::new();

        assert!(list.is_empty());
        assert_eq!(list.get_first(), Err(Error::EmptyCollection));
        assert_eq!(list.get_last(), Err(Error::EmptyCollection));
        assert_eq!(list.remove_first(), Err(Error::EmptyCollection));
        assert_eq!(list.remove_last(), Err(Error::EmptyCollection));
        assert_eq!(list.get(0), Err(Error::OutOfRange {index: 0, len: 0}));
        assert_eq!(list.index_of(&0), None);
        assert_eq!(list.to_string(), "End");
        assert_eq!(list.iter().next(), None);
    }

    #[test]
    fn remove_first_and_last() {
        let mut list: LinkedList<_> = (1..=4).collect();

        assert_eq!(list.remove_first(), Ok(1));
        assert_eq!(list.remove_last(), Ok(4));
        assert_eq!(to_vec(&list), vec![2, 3]);
        assert_eq!(list.remove(1), Ok(3));
        assert_eq!(list.remove(0), Ok(2));
        assert!(list.is_empty());
        assert_eq!(list.remove_last(), Err(Error::EmptyCollection));

        list.add_last(9);
        assert_eq!(list.get_first(), Ok(&9));
        assert_eq!(list.get_last(), Ok(&9));
    }

    #[test]
    fn display() {
        let list: LinkedList<_> = vec![1, 2, 3].into_iter().collect();
        assert_eq!(list.to_string(), "1-->2-->3-->End");
        assert_eq!(format!("{:?}", list), "[1, 2, 3]");
    }

    #[test]
    fn long_list_drops() {
        let list: LinkedList<_> = (0..200_000).collect();
        assert_eq!(list.len(), 200_000);
        assert_eq!(list.get_last(), Ok(&199_999));
        drop(list);
    }

    #[test]
    fn clone_eq() {
        let mut list: LinkedList<_> = (0..10).map(|i| i * -25).collect();
        let copy = list.clone();
        assert_eq!(list, copy);

        list.remove(5).unwrap();
        assert_ne!(list, copy);
        list.clear();
        assert_eq!(list, LinkedList::default());
    }

    #[test]
    fn into_iter() {
        let list: LinkedList<_> = vec!["a".to_string(), "b".to_string()].into_iter().collect();
        let mut borrowed = Vec::new();
        for value in &list {
            borrowed.push(value.as_str());
        }
        assert_eq!(borrowed, vec!["a", "b"]);

        let owned: Vec<String> = list.into_iter().collect();
        assert_eq!(owned, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_random_operations() {
        cfg_if::cfg_if! {
            if #[cfg(miri)] {
                const TEST_CASES: usize = 16;
                const OPERATIONS: usize = 24;

                (0..TEST_CASES).into_iter().for_each(|_| test_case());

            } else {
                use rayon::prelude::*;

                const TEST_CASES: usize = 512;
                const OPERATIONS: usize = 128;

                (0..TEST_CASES).into_par_iter().for_each(|_| test_case());
            }
        }

        fn test_case() {
            let mut list = LinkedList::new();
            // Compare against a VecDeque
            let mut expected = VecDeque::new();
            let mut successful_adds = 0;
            let mut successful_removes = 0;

            let mut rng = rand::thread_rng();
            for _ in 0..rng.gen_range(OPERATIONS..=OPERATIONS*2) {
                assert_eq!(list.len(), expected.len());
                assert_eq!(list.len(), successful_adds - successful_removes);

                // Sometimes pick an index just past the valid range
                let index = rng.gen_range(0..=expected.len() + 1);
                let value = rng.gen_range(0..=16);
                match rng.gen_range(1..=100) {
                    1..=35 => {
                        let result = list.add(index, value);
                        if index <= expected.len() {
                            assert_eq!(result, Ok(()));
                            expected.insert(index, value);
                            successful_adds += 1;
                        } else {
                            assert!(result.is_err());
                        }
                    },

                    36..=55 => {
                        let removed = expected.remove(index);
                        if removed.is_some() {
                            successful_removes += 1;
                        }
                        assert_eq!(list.remove(index).ok(), removed);
                    },

                    56..=70 => {
                        assert_eq!(list.get(index).ok(), expected.get(index));
                    },

                    71..=85 => {
                        let result = list.set(index, value);
                        match expected.get_mut(index) {
                            Some(slot) => assert_eq!(result, Ok(mem::replace(slot, value))),
                            None => assert!(result.is_err()),
                        }
                    },

                    86..=100 => {
                        let position = expected.iter().position(|&x| x == value);
                        assert_eq!(list.index_of(&value), position);
                        assert_eq!(list.contains(&value), position.is_some());
                    },

                    _ => unreachable!(),
                }

                for i in 0..list.len() {
                    assert!(list.get(i).is_ok());
                }
            }

            assert_eq!(to_vec(&list), expected.iter().copied().collect::<Vec<_>>());
        }
    }
}
