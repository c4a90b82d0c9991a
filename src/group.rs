// src/group.rs
//! Immutable named line groups and their staged builder.

use std::sync::Arc;

use crate::compact::{CompactMap, CompactSet};

/// An immutable named set of lines plus named references to nested groups.
///
/// A nested reference means this group's conceptual content includes all
/// lines of the nested group in addition to its own direct `lines`. Groups
/// are only constructed by completing a [`Builder`] and never change
/// afterwards; rebasing an existing group goes through
/// [`LineGroup::to_builder`], which stages a fresh copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineGroup {
    name: String,
    lines: CompactSet<String>,
    nested: CompactMap<String, Arc<LineGroup>>,
}

impl LineGroup {
    pub fn builder(name: impl Into<String>) -> Builder {
        Builder {
            name: name.into(),
            lines: CompactSet::new(),
            nested: CompactMap::new(),
        }
    }

    /// Stages a fresh builder seeded with this group's content.
    #[must_use]
    pub fn to_builder(&self) -> Builder {
        Builder {
            name: self.name.clone(),
            lines: self.lines.clone(),
            nested: self.nested.clone(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of directly owned lines, not counting nested groups.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn contains_line(&self, line: &str) -> bool {
        self.lines.contains(line)
    }

    /// True when every directly owned line of `other` is also directly owned
    /// by this group.
    pub fn contains_all_lines(&self, other: &LineGroup) -> bool {
        self.lines.contains_all(&other.lines)
    }

    #[must_use]
    pub fn has_nested(&self) -> bool {
        !self.nested.is_empty()
    }

    pub fn nested_names(&self) -> impl Iterator<Item = &str> {
        self.nested.iter().map(|(name, _)| name.as_str())
    }

    pub fn nested_group(&self, name: &str) -> Option<&Arc<LineGroup>> {
        self.nested.get(name)
    }

    pub fn nested_groups(&self) -> impl Iterator<Item = &Arc<LineGroup>> {
        self.nested.iter().map(|(_, group)| group)
    }
}

/// Staged, copy-on-write construction of a [`LineGroup`].
#[derive(Debug)]
pub struct Builder {
    name: String,
    lines: CompactSet<String>,
    nested: CompactMap<String, Arc<LineGroup>>,
}

impl Builder {
    /// Adds a line. Adding an already-present line is a no-op.
    #[must_use]
    pub fn add_line(mut self, line: impl Into<String>) -> Self {
        self.lines.insert(line.into());
        self
    }

    /// Removes a line. Removing an absent line is a no-op.
    #[must_use]
    pub fn remove_line(mut self, line: &str) -> Self {
        self.lines.remove(line);
        self
    }

    #[must_use]
    pub fn lines_total(&self) -> usize {
        self.lines.len()
    }

    /// Inserts or overwrites a nested-group reference under the group's name.
    #[must_use]
    pub fn nest_group(mut self, group: Arc<LineGroup>) -> Self {
        self.nested.insert(group.name().to_owned(), group);
        self
    }

    /// Freezes the working collections into an immutable group. Always
    /// succeeds.
    #[must_use]
    pub fn build(self) -> LineGroup {
        LineGroup {
            name: self.name,
            lines: self.lines,
            nested: self.nested,
        }
    }
}
