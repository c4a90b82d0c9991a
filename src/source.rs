// src/source.rs
//! Line source collaborator: one named input group per file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{FoldError, Result};
use crate::group::LineGroup;

/// Reads a group from `path`, named after the file name. Duplicate lines
/// collapse through the builder; line order within the file is irrelevant to
/// the group.
pub fn read_group(path: &Path) -> Result<LineGroup> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let file = File::open(path).map_err(|source| FoldError::Io {
        source,
        path: path.to_path_buf(),
    })?;

    let mut builder = LineGroup::builder(name);
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|source| FoldError::Io {
            source,
            path: path.to_path_buf(),
        })?;
        builder = builder.add_line(line);
    }
    Ok(builder.build())
}
