use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{info, warn};

use ivshard_core::models::Region;

use crate::shards::{ShardMap, write_entry};

pub fn run_extract(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .context("A path to an input file is required.")?;

    let region = matches
        .get_one::<String>("region")
        .context("A region is required.")?;
    let region: Region = region
        .parse()
        .with_context(|| format!("Invalid region: {region}"))?;

    let presorted = matches.get_flag("presorted");

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    write_extract(input, &region, presorted, &mut writer)?;
    writer.flush()?;

    Ok(())
}

/// Write the records of `input` overlapping `region`, in key order.
pub fn write_extract<W: Write>(
    input: &str,
    region: &Region,
    presorted: bool,
    writer: &mut W,
) -> Result<usize> {
    let shards = ShardMap::load(input, presorted)?;

    let Some(shard) = shards.get(&region.chr) else {
        warn!("No records on {} in {}", region.chr, input);
        return Ok(0);
    };

    let window = shard.filter_by_interval(&region.span());
    for entry in window.get_all() {
        write_entry(writer, &region.chr, entry)?;
    }

    info!(
        "Extracted {} records overlapping {}:{}-{}",
        window.len(),
        region.chr,
        region.start,
        region.end
    );

    Ok(window.len())
}
