// src/index.rs
//! Inverted line-to-owners index used by the consolidation fixpoint.

use std::collections::HashMap;

use crate::compact::CompactSet;

/// Tracks, for every line, the names of the groups that directly own it.
///
/// Direct ownership means membership in a group's own line set, never via
/// nesting. The index is maintained incrementally while lines move between
/// groups; every `register` must be matched by at most one `unregister` for
/// the same (line, group) pairing.
#[derive(Debug, Default)]
pub struct OwnershipIndex {
    owners: HashMap<String, CompactSet<String>>,
}

impl OwnershipIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, line: &str, group: &str) {
        match self.owners.get_mut(line) {
            Some(set) => {
                set.insert(group.to_owned());
            }
            None => {
                let mut set = CompactSet::new();
                set.insert(group.to_owned());
                self.owners.insert(line.to_owned(), set);
            }
        }
    }

    /// Drops `group` from the owners of `line`, removing the entry entirely
    /// when no owner remains. Unregistering a line the index has never seen
    /// means register/unregister calls went unpaired; that is a defect, not a
    /// recoverable state.
    pub fn unregister(&mut self, line: &str, group: &str) {
        let Some(set) = self.owners.get_mut(line) else {
            panic!("ownership index out of sync: line {line:?} has no owners");
        };
        set.remove(group);
        if set.is_empty() {
            self.owners.remove(line);
        }
    }

    /// Names of the groups directly owning `line`, if any.
    pub fn owners_of(&self, line: &str) -> Option<&CompactSet<String>> {
        self.owners.get(line)
    }
}
