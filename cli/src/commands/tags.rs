//! TAGS command - Show pagination tag documentation.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use folio_tags::{TAGS, TagDoc, describe};
use serde::Serialize;

use super::{HumanReadable, output};

/// Arguments for the tags command.
#[derive(Args)]
pub struct TagsArgs {
    /// Tag to describe, e.g. paginate:pages (default: all)
    pub name: Option<String>,
}

/// Documentation of the selected tags.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct TagsOutput {
    pub tags: Vec<TagDoc>,
}

impl HumanReadable for TagsOutput {
    fn print_human(&self) {
        for doc in &self.tags {
            println!("{}", doc.name.green().bold());
            println!("  {}", doc.summary);
            println!();
            for line in doc.usage.lines() {
                println!("    {}", line.dimmed());
            }
            println!();
        }
    }
}

/// Execute the tags command.
pub fn execute(human: bool, args: TagsArgs) -> Result<()> {
    let tags = match args.name.as_deref() {
        None => TAGS.to_vec(),
        Some(name) => match describe(name) {
            Some(doc) => vec![*doc],
            None => bail!("unknown tag: {name}"),
        },
    };
    output(&TagsOutput { tags }, human)
}
