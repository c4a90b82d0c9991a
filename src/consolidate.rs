// src/consolidate.rs
//! Consolidation engine: superset folding followed by the extraction
//! fixpoint.
//!
//! The engine receives the full set of input groups, folds groups that are
//! wholly contained in another, then repeatedly extracts the first maximal
//! set of lines shared by two or more groups into a new shared group,
//! rebasing every affected group, until a full pass extracts nothing. The
//! result maps group name to group for both the (now reduced) originals and
//! the synthesized shared groups.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::compact::CompactSet;
use crate::error::{FoldError, Result};
use crate::group::LineGroup;
use crate::index::OwnershipIndex;

/// Final mapping from group name to group. Ordered by name so scans and
/// rendering are deterministic.
pub type GroupMap = BTreeMap<String, Arc<LineGroup>>;

/// Consolidates `groups` into a minimal nested hierarchy.
///
/// # Errors
/// - [`FoldError::DuplicateGroupName`] if two input groups share a name;
///   nothing is folded or extracted in that case.
/// - [`FoldError::AmbiguousIdenticalGroups`] if an extraction finds more than
///   one exact-content leaf owner to reuse as the shared group.
pub fn consolidate(groups: Vec<LineGroup>) -> Result<GroupMap> {
    let mut seen = HashSet::new();
    for group in &groups {
        if !seen.insert(group.name().to_owned()) {
            return Err(FoldError::DuplicateGroupName(group.name().to_owned()));
        }
    }

    let mut groups: Vec<Arc<LineGroup>> = groups.into_iter().map(Arc::new).collect();
    fold_contained(&mut groups);

    let mut map = GroupMap::new();
    let mut index = OwnershipIndex::new();
    for group in groups {
        for line in group.lines() {
            index.register(line, group.name());
        }
        map.insert(group.name().to_owned(), group);
    }

    let mut names = NameGen::default();
    let mut done = HashSet::new();
    while let Some(candidate) = find_candidate(&map, &index, &mut done) {
        extract(candidate, &mut map, &mut index, &mut names)?;
    }
    Ok(map)
}

/// Folds whole groups into groups that fully contain them: a containing
/// group drops the contained group's lines and nests it instead. Runs once,
/// in a single sweep over ordered pairs, before the fixpoint.
fn fold_contained(groups: &mut [Arc<LineGroup>]) {
    // Descending by line count; the sort is stable, so ties keep input order.
    groups.sort_by(|a, b| b.line_count().cmp(&a.line_count()));

    for i in 0..groups.len() {
        for j in i + 1..groups.len() {
            let small = Arc::clone(&groups[j]);
            // An empty line set is vacuously contained everywhere; folding it
            // would only add a spurious reference.
            if small.line_count() == 0 || !groups[i].contains_all_lines(&small) {
                continue;
            }
            let mut big = groups[i].to_builder();
            for line in small.lines() {
                big = big.remove_line(line);
            }
            groups[i] = Arc::new(big.nest_group(small).build());
        }
    }
}

/// A set of lines to extract, together with the owner-set signature that
/// selected them.
struct Candidate {
    lines: Vec<String>,
    owners: CompactSet<String>,
}

/// Scans groups not yet marked done, in name order, for the first extractable
/// line set shared by more than one group. The first multi-owner line found
/// fixes the target owner-set signature; the candidate then grows over the
/// remaining unprocessed lines of the same group whose owner sets cover that
/// signature. Groups scanned to the end without producing a candidate are
/// marked done.
fn find_candidate(
    map: &GroupMap,
    index: &OwnershipIndex,
    done: &mut HashSet<String>,
) -> Option<Candidate> {
    let mut processed: HashSet<&str> = HashSet::new();
    for group in map.values() {
        if done.contains(group.name()) {
            continue;
        }
        for line in group.lines() {
            if !processed.insert(line) {
                continue;
            }
            let owners = owners_or_defect(index, line);
            if owners.len() < 2 {
                continue;
            }
            let mut lines = Vec::new();
            for other in group.lines() {
                if processed.contains(other) {
                    continue;
                }
                if owners_or_defect(index, other).contains_all(owners) {
                    lines.push(other.to_owned());
                }
            }
            // The trigger line alone is never extracted; at least one
            // companion line must share the full owner set.
            if !lines.is_empty() {
                lines.push(line.to_owned());
                return Some(Candidate {
                    lines,
                    owners: owners.clone(),
                });
            }
        }
        done.insert(group.name().to_owned());
    }
    None
}

fn owners_or_defect<'a>(index: &'a OwnershipIndex, line: &str) -> &'a CompactSet<String> {
    match index.owners_of(line) {
        Some(owners) => owners,
        // Every directly owned line of every mapped group is registered; a
        // miss means the index and the working mapping have diverged.
        None => panic!("ownership index out of sync for line {line:?}"),
    }
}

/// Synthesizes (or canonicalizes) the shared group for `candidate` and
/// rebases every owner on it: owners lose the candidate's lines and gain a
/// nesting reference. An owner whose lines exactly equal the candidate's and
/// which nests nothing becomes the shared group itself instead of a synthetic
/// one; finding two such owners is a contract violation.
fn extract(
    candidate: Candidate,
    map: &mut GroupMap,
    index: &mut OwnershipIndex,
    names: &mut NameGen,
) -> Result<()> {
    let mut builder = LineGroup::builder(names.fresh(map));
    for line in &candidate.lines {
        builder = builder.add_line(line.clone());
    }
    let mut shared = Arc::new(builder.build());

    let mut rebuilders = Vec::new();
    let mut canonical = false;
    for owner_name in &candidate.owners {
        let owner = match map.get(owner_name) {
            Some(group) => Arc::clone(group),
            None => panic!("owner {owner_name:?} missing from the working mapping"),
        };
        // The candidate is a subset of every owner, so equal cardinality
        // means equal content.
        if owner.line_count() == shared.line_count() && !owner.has_nested() {
            if canonical {
                return Err(FoldError::AmbiguousIdenticalGroups {
                    first: shared.name().to_owned(),
                    second: owner.name().to_owned(),
                });
            }
            canonical = true;
            shared = owner;
            continue;
        }
        let mut rebuilder = owner.to_builder();
        for line in &candidate.lines {
            rebuilder = rebuilder.remove_line(line);
            index.unregister(line, owner_name);
        }
        rebuilders.push(rebuilder);
    }

    for rebuilder in rebuilders {
        let rebased = Arc::new(rebuilder.nest_group(Arc::clone(&shared)).build());
        map.insert(rebased.name().to_owned(), rebased);
    }

    if !canonical {
        for line in shared.lines() {
            index.register(line, shared.name());
        }
        map.insert(shared.name().to_owned(), Arc::clone(&shared));
    }
    Ok(())
}

/// Deterministic per-call names for synthesized groups, skipping any name an
/// input group already claimed.
#[derive(Default)]
struct NameGen {
    counter: usize,
}

impl NameGen {
    fn fresh(&mut self, taken: &GroupMap) -> String {
        loop {
            self.counter += 1;
            let name = format!("shared-{}", self.counter);
            if !taken.contains_key(&name) {
                return name;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, lines: &[&str]) -> Arc<LineGroup> {
        let mut builder = LineGroup::builder(name);
        for line in lines {
            builder = builder.add_line(*line);
        }
        Arc::new(builder.build())
    }

    fn seed(groups: &[Arc<LineGroup>]) -> (GroupMap, OwnershipIndex) {
        let mut map = GroupMap::new();
        let mut index = OwnershipIndex::new();
        for group in groups {
            for line in group.lines() {
                index.register(line, group.name());
            }
            map.insert(group.name().to_owned(), Arc::clone(group));
        }
        (map, index)
    }

    #[test]
    fn extract_reuses_exact_leaf_owner_as_canonical() {
        let o = leaf("o", &["a", "b"]);
        let x = leaf("x", &["a", "b", "x1"]);
        let (mut map, mut index) = seed(&[o, x]);

        let candidate = Candidate {
            lines: vec!["a".to_owned(), "b".to_owned()],
            owners: ["o".to_owned(), "x".to_owned()].into_iter().collect(),
        };
        let mut names = NameGen::default();
        extract(candidate, &mut map, &mut index, &mut names).unwrap();

        // No synthetic group: `o` itself became the shared group.
        assert_eq!(map.len(), 2);
        let x = &map["x"];
        assert_eq!(x.line_count(), 1);
        assert!(x.contains_line("x1"));
        assert!(x.nested_group("o").is_some());

        let o = &map["o"];
        assert_eq!(o.line_count(), 2);
        assert!(!o.has_nested());

        // The canonical owner keeps direct ownership of the extracted lines.
        let owners = index.owners_of("a").unwrap();
        assert!(owners.contains("o"));
        assert!(!owners.contains("x"));
    }

    #[test]
    fn extract_rejects_two_identical_leaf_owners() {
        let p = leaf("p", &["a", "b"]);
        let q = leaf("q", &["a", "b"]);
        let (mut map, mut index) = seed(&[p, q]);

        let candidate = Candidate {
            lines: vec!["a".to_owned(), "b".to_owned()],
            owners: ["p".to_owned(), "q".to_owned()].into_iter().collect(),
        };
        let mut names = NameGen::default();
        let err = extract(candidate, &mut map, &mut index, &mut names).unwrap_err();
        assert!(matches!(err, FoldError::AmbiguousIdenticalGroups { .. }));
    }

    #[test]
    fn name_gen_skips_taken_names() {
        let squatter = leaf("shared-1", &["z"]);
        let (map, _) = seed(&[squatter]);
        let mut names = NameGen::default();
        assert_eq!(names.fresh(&map), "shared-2");
        assert_eq!(names.fresh(&map), "shared-3");
    }
}
