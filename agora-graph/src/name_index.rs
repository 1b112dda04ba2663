//! Username index backed by an unbalanced binary search tree.
//!
//! Keys are compared as plain strings (case-sensitive, byte order). There is
//! no rebalancing, so inserting names in sorted order degrades the tree to
//! a list; [`NameTree::depth`] makes that visible.

use crate::error::{GraphError, Result};
use std::cmp::Ordering;
use tracing::warn;

#[derive(Debug, Clone)]
struct TreeNode<V> {
    key: String,
    value: V,
    left: Option<Box<TreeNode<V>>>,
    right: Option<Box<TreeNode<V>>>,
}

/// Maps usernames to values, listing them in ascending order.
///
/// Duplicate keys are refused rather than overwritten.
#[derive(Debug, Clone)]
pub struct NameTree<V> {
    root: Option<Box<TreeNode<V>>>,
    len: usize,
}

impl<V> Default for NameTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> NameTree<V> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Inserts a new key.
    ///
    /// An existing key leaves the tree untouched and returns
    /// [`GraphError::DuplicateName`].
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Result<()> {
        let key = key.into();
        match Self::insert_at(&mut self.root, key, value) {
            Ok(()) => {
                self.len += 1;
                Ok(())
            }
            Err(err) => {
                warn!("{}", err);
                Err(err)
            }
        }
    }

    fn insert_at(slot: &mut Option<Box<TreeNode<V>>>, key: String, value: V) -> Result<()> {
        match slot {
            Some(node) => match key.cmp(&node.key) {
                Ordering::Less => Self::insert_at(&mut node.left, key, value),
                Ordering::Greater => Self::insert_at(&mut node.right, key, value),
                Ordering::Equal => Err(GraphError::DuplicateName(key)),
            },
            None => {
                *slot = Some(Box::new(TreeNode {
                    key,
                    value,
                    left: None,
                    right: None,
                }));
                Ok(())
            }
        }
    }

    /// Exact lookup.
    pub fn get(&self, key: &str) -> Option<&V> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(node.key.as_str()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.value),
            };
        }
        None
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// All entries in ascending key order.
    pub fn in_order(&self) -> Vec<(&str, &V)> {
        let mut entries = Vec::with_capacity(self.len);
        Self::collect_in_order(self.root.as_deref(), &mut entries);
        entries
    }

    fn collect_in_order<'a>(node: Option<&'a TreeNode<V>>, out: &mut Vec<(&'a str, &'a V)>) {
        if let Some(node) = node {
            Self::collect_in_order(node.left.as_deref(), out);
            out.push((node.key.as_str(), &node.value));
            Self::collect_in_order(node.right.as_deref(), out);
        }
    }

    /// Height of the tree; 0 when empty.
    pub fn depth(&self) -> usize {
        fn height<V>(node: Option<&TreeNode<V>>) -> usize {
            node.map_or(0, |n| {
                1 + height(n.left.as_deref()).max(height(n.right.as_deref()))
            })
        }
        height(self.root.as_deref())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
