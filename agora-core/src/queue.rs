//! FIFO container used for notifications, follower logs and graph adjacency.

use crate::error::ContainerError;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A first-in, first-out sequence that owns its elements.
///
/// The graph keeps connection and pending-request lists in these queues and
/// walks them constantly. All read paths go through [`OrderedQueue::iter`];
/// draining a live queue to read it would silently empty a user's lists.
/// `Clone` yields a fully independent copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderedQueue<T> {
    items: VecDeque<T>,
}

impl<T> Default for OrderedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedQueue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Appends a value at the back.
    pub fn enqueue(&mut self, value: T) {
        self.items.push_back(value);
    }

    /// Removes and returns the front value.
    pub fn dequeue(&mut self) -> Result<T, ContainerError> {
        self.items
            .pop_front()
            .ok_or(ContainerError::Empty { container: "queue" })
    }

    /// Returns the front value without removing it.
    pub fn front(&self) -> Result<&T, ContainerError> {
        self.items
            .front()
            .ok_or(ContainerError::Empty { container: "queue" })
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of live elements.
    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterates front to back without removing anything.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> {
        self.items.iter()
    }

    /// Extracts the element at a 0-based position.
    ///
    /// Every other element keeps its relative order. Returns `None` when the
    /// position is past the end.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        self.items.remove(index)
    }
}

impl<T: PartialEq> OrderedQueue<T> {
    /// Linear membership test.
    pub fn contains(&self, value: &T) -> bool {
        self.items.contains(value)
    }
}

impl<T> FromIterator<T> for OrderedQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for OrderedQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<'a, T> IntoIterator for &'a OrderedQueue<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
