// src/cli.rs
//! CLI surface for the `linefold` binary.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use crate::consolidate::consolidate;
use crate::render::{self, LineStyle};
use crate::source;

#[derive(Parser)]
#[command(
    name = "linefold",
    version,
    about = "Folds lines shared across named collections into nested groups"
)]
pub struct Cli {
    /// Input files, one named group per file (the group is named after the file)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format: "terminal" or "json"
    #[arg(long, default_value = "terminal")]
    pub format: String,

    /// Treat each line as a JSON management operation when rendering
    #[arg(long)]
    pub ops: bool,
}

pub fn run(cli: &Cli) -> Result<()> {
    let mut groups = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        groups.push(source::read_group(path)?);
    }
    let arranged = consolidate(groups)?;

    let style = if cli.ops {
        LineStyle::Operations
    } else {
        LineStyle::Raw
    };
    let rendered = match cli.format.as_str() {
        "terminal" => render::format_terminal(&arranged, style)?,
        "json" => render::format_json(&arranged, style)?,
        other => bail!("unknown format: {other}"),
    };
    print!("{rendered}");
    Ok(())
}
