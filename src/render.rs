// src/render.rs
//! Renders the consolidated mapping for terminal or machine consumption.
//!
//! Direct lines print sorted by content and nested-group names sort
//! lexicographically, so output is stable across runs.

use std::fmt::Write;

use colored::Colorize;
use serde::Serialize;

use crate::consolidate::GroupMap;
use crate::error::Result;
use crate::group::LineGroup;
use crate::ops;

/// How each direct line is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Lines are opaque text, printed as-is.
    Raw,
    /// Lines are JSON management operations, rendered in CLI form.
    Operations,
}

/// Formats the mapping for terminal display.
///
/// # Errors
/// Fails only in [`LineStyle::Operations`] mode, when a line is not a valid
/// JSON operation.
pub fn format_terminal(map: &GroupMap, style: LineStyle) -> Result<String> {
    let mut out = String::new();
    for group in map.values() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{} {}", "GROUP".cyan().bold(), group.name().bold());

        let includes = sorted_nested(group);
        if !includes.is_empty() {
            let _ = writeln!(out, " {} {}", "Includes:".dimmed(), includes.join(", "));
        }

        let lines = rendered_lines(group, style)?;
        if !lines.is_empty() {
            let _ = writeln!(out, " {}", "Lines:".dimmed());
            for line in &lines {
                let _ = writeln!(out, "  {line}");
            }
        }
    }
    Ok(out)
}

#[derive(Debug, Serialize)]
struct GroupDoc {
    name: String,
    lines: Vec<String>,
    includes: Vec<String>,
}

/// Formats the mapping as pretty-printed JSON, one document per group.
///
/// # Errors
/// Fails in [`LineStyle::Operations`] mode when a line is not a valid JSON
/// operation.
pub fn format_json(map: &GroupMap, style: LineStyle) -> Result<String> {
    let mut docs = Vec::with_capacity(map.len());
    for group in map.values() {
        docs.push(GroupDoc {
            name: group.name().to_owned(),
            lines: rendered_lines(group, style)?,
            includes: sorted_nested(group),
        });
    }
    Ok(serde_json::to_string_pretty(&docs)?)
}

// Sort by raw content before any transformation so the operation style
// cannot reorder lines.
fn rendered_lines(group: &LineGroup, style: LineStyle) -> Result<Vec<String>> {
    let mut lines: Vec<String> = group.lines().map(str::to_owned).collect();
    lines.sort();
    match style {
        LineStyle::Raw => Ok(lines),
        LineStyle::Operations => lines.iter().map(|line| ops::to_cli_line(line)).collect(),
    }
}

fn sorted_nested(group: &LineGroup) -> Vec<String> {
    let mut names: Vec<String> = group.nested_names().map(str::to_owned).collect();
    names.sort();
    names
}
