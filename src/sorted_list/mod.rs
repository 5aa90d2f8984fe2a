//! # Sorted List
//!
//! A vector-backed sequence that keeps its elements ordered by a pluggable
//! [`Comparator`]. Elements comparing `Equal` are treated as the same key, so
//! the list never holds two of them: [`SortedList::insert`] rejects the
//! second one and hands it back.
//!
//! The graph uses one instance per vertex for its outgoing edges (ordered by
//! adjacent vertex) and one for the vertex set itself (ordered by id), which
//! makes a vertex's position in the list equal to its id.

use std::cmp::Ordering;

/// Total order used by a [`SortedList`].
pub trait Comparator<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Orders elements by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord> Comparator<T> for NaturalOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "T: serde::Serialize",
        deserialize = "T: serde::Deserialize<'de>, C: Default"
    ))
)]
pub struct SortedList<T, C = NaturalOrder> {
    items: Vec<T>,
    #[cfg_attr(feature = "serde", serde(skip))]
    comparator: C,
}

impl<T, C: Default> Default for SortedList<T, C> {
    fn default() -> Self {
        SortedList {
            items: Vec::new(),
            comparator: C::default(),
        }
    }
}

impl<T, C: Default> SortedList<T, C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        SortedList {
            items: Vec::with_capacity(capacity),
            comparator: C::default(),
        }
    }
}

impl<T, C> SortedList<T, C> {
    pub fn with_comparator(comparator: C) -> Self {
        SortedList {
            items: Vec::new(),
            comparator,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn get(&self, pos: usize) -> Option<&T> {
        self.items.get(pos)
    }

    /// Mutable access at a position. Callers must not change the element's
    /// key, otherwise the ordering is broken.
    #[inline]
    pub fn get_mut(&mut self, pos: usize) -> Option<&mut T> {
        self.items.get_mut(pos)
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Same key restriction as [`SortedList::get_mut`].
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Binary search with a probe returning how the element at hand compares
    /// to the wanted key, as in [`slice::binary_search_by`].
    pub fn search_by(&self, probe: impl FnMut(&T) -> Ordering) -> Result<usize, usize> {
        self.items.binary_search_by(probe)
    }

    pub fn remove_at(&mut self, pos: usize) -> T {
        self.items.remove(pos)
    }

    /// Removes the element matched by `probe`, if any.
    pub fn remove_by(&mut self, probe: impl FnMut(&T) -> Ordering) -> Option<T> {
        let pos = self.search_by(probe).ok()?;
        Some(self.items.remove(pos))
    }

    pub fn clear(&mut self) {
        self.items.clear()
    }
}

impl<T, C: Comparator<T>> SortedList<T, C> {
    /// Inserts `item` at its ordered position and returns that position.
    ///
    /// If an element with an equal key is already present nothing changes
    /// and `item` is returned in the error.
    pub fn insert(&mut self, item: T) -> Result<usize, T> {
        let comparator = &self.comparator;
        match self
            .items
            .binary_search_by(|probe| comparator.compare(probe, &item))
        {
            Ok(_) => Err(item),
            Err(pos) => {
                self.items.insert(pos, item);
                Ok(pos)
            }
        }
    }

    pub fn position(&self, item: &T) -> Option<usize> {
        let comparator = &self.comparator;
        self.items
            .binary_search_by(|probe| comparator.compare(probe, item))
            .ok()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.position(item).is_some()
    }

    /// Checks that consecutive elements are strictly increasing.
    pub fn is_strictly_sorted(&self) -> bool {
        self.items
            .windows(2)
            .all(|w| self.comparator.compare(&w[0], &w[1]) == Ordering::Less)
    }
}

impl<T: PartialEq, C> PartialEq for SortedList<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<'a, T, C> IntoIterator for &'a SortedList<T, C> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T, C> IntoIterator for SortedList<T, C> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
