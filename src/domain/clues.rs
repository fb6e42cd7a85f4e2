//! Ordered, duplicate-free collection of discovered clues.
//!
//! Backed by a binary search tree keyed on the clue text. Descent, traversal
//! and teardown all use explicit stacks, so a degenerate (list-shaped) tree
//! never grows the call stack.

use std::cmp::Ordering;

use tracing::{instrument, trace};

#[derive(Debug)]
struct ClueEntry {
    text: String,
    left: Option<Box<ClueEntry>>,
    right: Option<Box<ClueEntry>>,
}

impl ClueEntry {
    fn new(text: &str) -> Box<Self> {
        Box::new(Self {
            text: text.to_string(),
            left: None,
            right: None,
        })
    }
}

/// Binary search tree of clue strings in ascending byte order.
#[derive(Debug, Default)]
pub struct ClueCollection {
    root: Option<Box<ClueEntry>>,
    len: usize,
}

impl ClueCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a clue, returning `true` if it was not present yet.
    ///
    /// Empty text is ignored. Comparison is exact and case-sensitive, so the
    /// first insert of a given text wins and later ones leave the tree as is.
    #[instrument(level = "trace", skip(self))]
    pub fn insert(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let mut slot = &mut self.root;
        while let Some(entry) = slot {
            slot = match text.cmp(entry.text.as_str()) {
                Ordering::Less => &mut entry.left,
                Ordering::Greater => &mut entry.right,
                Ordering::Equal => {
                    trace!("clue already collected");
                    return false;
                }
            };
        }
        *slot = Some(ClueEntry::new(text));
        self.len += 1;
        true
    }

    pub fn contains(&self, text: &str) -> bool {
        let mut node = self.root.as_deref();
        while let Some(entry) = node {
            node = match text.cmp(entry.text.as_str()) {
                Ordering::Less => entry.left.as_deref(),
                Ordering::Greater => entry.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the underlying tree, 0 when empty.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(&ClueEntry, usize)> =
            self.root.as_deref().map(|r| (r, 1)).into_iter().collect();
        while let Some((entry, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for child in [entry.left.as_deref(), entry.right.as_deref()].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        max_depth
    }

    /// Lazy in-order walk (left, entry, right): clues in ascending order.
    ///
    /// Every call starts a fresh walk.
    pub fn in_order(&self) -> InOrder<'_> {
        InOrder::new(self.root.as_deref())
    }

    pub fn iter(&self) -> InOrder<'_> {
        self.in_order()
    }

    /// Frees every entry, children before their parent.
    #[instrument(level = "trace", skip(self))]
    pub fn release(&mut self) {
        let mut stack: Vec<Box<ClueEntry>> = self.root.take().into_iter().collect();
        while let Some(mut entry) = stack.pop() {
            stack.extend(entry.left.take());
            stack.extend(entry.right.take());
        }
        self.len = 0;
    }
}

impl Drop for ClueCollection {
    fn drop(&mut self) {
        self.release();
    }
}

impl<'a> IntoIterator for &'a ClueCollection {
    type Item = &'a str;
    type IntoIter = InOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.in_order()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ClueCollection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut collection = ClueCollection::new();
        collection.extend(iter);
        collection
    }
}

impl<S: AsRef<str>> Extend<S> for ClueCollection {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for text in iter {
            self.insert(text.as_ref());
        }
    }
}

pub struct InOrder<'a> {
    stack: Vec<&'a ClueEntry>,
}

impl<'a> InOrder<'a> {
    fn new(root: Option<&'a ClueEntry>) -> Self {
        let mut walk = Self { stack: Vec::new() };
        walk.push_left_spine(root);
        walk
    }

    fn push_left_spine(&mut self, mut node: Option<&'a ClueEntry>) {
        while let Some(entry) = node {
            self.stack.push(entry);
            node = entry.left.as_deref();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.stack.pop()?;
        self.push_left_spine(entry.right.as_deref());
        Some(entry.text.as_str())
    }
}
