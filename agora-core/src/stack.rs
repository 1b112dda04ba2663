//! LIFO container used for posts and messages.

use crate::error::ContainerError;
use serde::{Deserialize, Serialize};

/// A last-in, first-out sequence that owns its elements.
///
/// Cloning produces an independent stack with the same element order, so a
/// copy can be drained without touching the original. For read-only walks
/// prefer [`OrderedStack::iter`], which never mutates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderedStack<T> {
    /// Bottom of the stack is index 0, top is the last element.
    items: Vec<T>,
}

impl<T> Default for OrderedStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedStack<T> {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Pushes a value on top.
    pub fn push(&mut self, value: T) {
        self.items.push(value);
    }

    /// Removes and returns the top value.
    pub fn pop(&mut self) -> Result<T, ContainerError> {
        self.items
            .pop()
            .ok_or(ContainerError::Empty { container: "stack" })
    }

    /// Returns the top value without removing it.
    pub fn peek(&self) -> Result<&T, ContainerError> {
        self.items
            .last()
            .ok_or(ContainerError::Empty { container: "stack" })
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of live elements.
    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterates from top to bottom without removing anything.
    pub fn iter(&self) -> std::iter::Rev<std::slice::Iter<'_, T>> {
        self.items.iter().rev()
    }
}

impl<T> FromIterator<T> for OrderedStack<T> {
    /// Pushes in iteration order, so the last item ends up on top.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for OrderedStack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<'a, T> IntoIterator for &'a OrderedStack<T> {
    type Item = &'a T;
    type IntoIter = std::iter::Rev<std::slice::Iter<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
