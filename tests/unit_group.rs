// tests/unit_group.rs
use std::sync::Arc;

use linefold_core::group::LineGroup;

#[test]
fn add_line_is_idempotent() {
    let group = LineGroup::builder("g")
        .add_line("a")
        .add_line("a")
        .add_line("b")
        .build();
    assert_eq!(group.line_count(), 2);
    assert!(group.contains_line("a"));
    assert!(group.contains_line("b"));
}

#[test]
fn remove_absent_line_is_a_noop() {
    let group = LineGroup::builder("g")
        .add_line("a")
        .remove_line("missing")
        .build();
    assert_eq!(group.line_count(), 1);
    assert!(group.contains_line("a"));
}

#[test]
fn lines_total_tracks_the_working_set() {
    let builder = LineGroup::builder("g")
        .add_line("a")
        .add_line("b")
        .add_line("c")
        .remove_line("a");
    assert_eq!(builder.lines_total(), 2);
}

#[test]
fn rebuilding_leaves_the_original_untouched() {
    let original = LineGroup::builder("g").add_line("a").add_line("b").build();
    let reduced = original.to_builder().remove_line("a").build();

    assert_eq!(original.line_count(), 2);
    assert!(original.contains_line("a"));
    assert_eq!(reduced.line_count(), 1);
    assert!(!reduced.contains_line("a"));
    assert_eq!(reduced.name(), "g");
}

#[test]
fn nest_group_overwrites_by_name() {
    let first = Arc::new(LineGroup::builder("child").add_line("x").build());
    let second = Arc::new(LineGroup::builder("child").add_line("y").build());

    let parent = LineGroup::builder("p")
        .nest_group(first)
        .nest_group(Arc::clone(&second))
        .build();

    assert_eq!(parent.nested_names().count(), 1);
    let nested = parent.nested_group("child").unwrap();
    assert!(nested.contains_line("y"));
    assert!(!nested.contains_line("x"));
}

#[test]
fn nested_groups_are_shared_not_copied() {
    let child = Arc::new(LineGroup::builder("child").add_line("x").build());
    let p1 = LineGroup::builder("p1").nest_group(Arc::clone(&child)).build();
    let p2 = LineGroup::builder("p2").nest_group(Arc::clone(&child)).build();

    let from_p1 = p1.nested_group("child").unwrap();
    let from_p2 = p2.nested_group("child").unwrap();
    assert!(Arc::ptr_eq(from_p1, from_p2));
}

#[test]
fn contains_all_lines_checks_direct_ownership_only() {
    let child = Arc::new(LineGroup::builder("child").add_line("x").build());
    let parent = LineGroup::builder("p")
        .add_line("a")
        .nest_group(child)
        .build();
    let probe = LineGroup::builder("probe").add_line("x").build();

    // `x` is only reachable via nesting, so it does not count.
    assert!(!parent.contains_all_lines(&probe));
}
