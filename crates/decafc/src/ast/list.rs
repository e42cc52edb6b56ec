//! Ordered, owned sibling lists

use std::collections::VecDeque;
use std::collections::vec_deque;

/// An ordered list of sibling nodes
///
/// Used wherever the grammar produces zero or more siblings: fields, methods,
/// parameters, block statements, call arguments and externs. The list owns
/// its elements; [`merge`](Self::merge) moves them rather than copying.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeList<T> {
    items: VecDeque<T>,
}

impl<T> NodeList<T> {
    pub fn new() -> Self {
        Self { items: VecDeque::new() }
    }

    pub fn push_front(&mut self, item: T) {
        self.items.push_front(item);
    }

    pub fn push_back(&mut self, item: T) {
        self.items.push_back(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Splice all of `other`'s elements onto the end of this list
    ///
    /// `other` is left empty but usable. `None` is a no-op.
    pub fn merge(&mut self, other: Option<&mut NodeList<T>>) {
        if let Some(other) = other {
            self.items.append(&mut other.items);
        }
    }

    pub fn first(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> vec_deque::IterMut<'_, T> {
        self.items.iter_mut()
    }
}

impl<T> Default for NodeList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for NodeList<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items: items.into() }
    }
}

impl<T> FromIterator<T> for NodeList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

impl<T> IntoIterator for NodeList<T> {
    type Item = T;
    type IntoIter = vec_deque::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a NodeList<T> {
    type Item = &'a T;
    type IntoIter = vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut NodeList<T> {
    type Item = &'a mut T;
    type IntoIter = vec_deque::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_front_and_back_keep_order() {
        let mut list = NodeList::new();
        list.push_back(2);
        list.push_back(3);
        list.push_front(1);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_merge_transfers_ownership() {
        let mut first = NodeList::from(vec!["a", "b", "c"]);
        let mut second = NodeList::from(vec!["d", "e"]);

        first.merge(Some(&mut second));

        assert_eq!(first.len(), 5);
        assert_eq!(second.len(), 0);
        assert!(second.is_empty());
        assert_eq!(first.iter().copied().collect::<Vec<_>>(), vec!["a", "b", "c", "d", "e"]);

        // The drained list is still usable
        second.push_back("f");
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_merge_none_is_noop() {
        let mut list = NodeList::from(vec![1, 2]);
        list.merge(None);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_merge_owned_boxes() {
        let mut first: NodeList<Box<String>> = NodeList::new();
        first.push_back(Box::new("x".to_string()));
        let mut second: NodeList<Box<String>> = NodeList::from(vec![Box::new("y".to_string())]);
        first.merge(Some(&mut second));
        drop(second);
        assert_eq!(first.get(1).map(|s| s.as_str()), Some("y"));
    }
}
