use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use crate::shards::{Shard, ShardMap};

#[derive(Debug, PartialEq)]
pub struct MergeOptions {
    pub a: String,
    pub b: String,
    pub presorted: bool,
    pub tag: bool,
}

pub fn run_merge(matches: &ArgMatches) -> Result<()> {
    let a = matches
        .get_one::<String>("a")
        .cloned()
        .context("A path to the first BED file is required.")?;

    let b = matches
        .get_one::<String>("b")
        .cloned()
        .context("A path to the second BED file is required.")?;

    let options = MergeOptions {
        a,
        b,
        presorted: matches.get_flag("presorted"),
        tag: matches.get_flag("tag"),
    };

    let out: Box<dyn Write> = match matches.get_one::<String>("output") {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create output file: {path}"))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = BufWriter::new(out);

    write_merged(&options, &mut writer)?;
    writer.flush()?;

    Ok(())
}

/// Append `label` to the value of every record in the shard.
pub fn tag_values(shard: &Shard, label: &str) -> Shard {
    shard.map_values(|rest| match rest {
        Some(rest) => Some(format!("{rest}\t{label}")),
        None => Some(label.to_string()),
    })
}

pub fn write_merged<W: Write>(options: &MergeOptions, writer: &mut W) -> Result<usize> {
    let mut left = ShardMap::load(&options.a, options.presorted)?;
    let mut right = ShardMap::load(&options.b, options.presorted)?;

    if options.tag {
        left = left.map_shards(|shard| tag_values(shard, "a"));
        right = right.map_shards(|shard| tag_values(shard, "b"));
    }

    let merged = left.merge(&right);
    let written = merged.write(writer)?;

    info!(
        "Merged {} + {} records into {} shards",
        left.total_entries(),
        right.total_entries(),
        merged.len()
    );

    Ok(written)
}
