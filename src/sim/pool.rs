//! Fixed-capacity entity storage with swap-remove compaction
//!
//! Live entities occupy the dense prefix `0..len`. Removing one moves the last
//! live entity into its slot, so removal is O(1) and iteration never sees
//! holes. Indices are only stable until the next removal.

use std::ops::{Index, IndexMut};

#[derive(Debug, Clone)]
pub struct SwapPool<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> SwapPool<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Logical count of live entries
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Physical capacity, fixed at construction
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Append an entry. Returns its index, or `None` if the pool is full.
    pub fn insert(&mut self, item: T) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        self.items.push(item);
        Some(self.items.len() - 1)
    }

    /// Overwrite the entry at `index`, returning the old one
    pub fn replace(&mut self, index: usize, item: T) -> Option<T> {
        let slot = self.items.get_mut(index)?;
        Some(std::mem::replace(slot, item))
    }

    /// Swap-remove: the last entry takes over `index`
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        Some(self.items.swap_remove(index))
    }

    /// Swap-remove every entry matching `pred`, revisiting each vacated slot.
    /// Returns the number removed.
    pub fn sweep(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let mut removed = 0;
        let mut i = 0;
        while i < self.items.len() {
            if pred(&self.items[i]) {
                self.items.swap_remove(i);
                removed += 1;
            } else {
                i += 1;
            }
        }
        removed
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Dense view of the live entries
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> Index<usize> for SwapPool<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for SwapPool<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a SwapPool<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
