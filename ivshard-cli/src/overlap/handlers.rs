use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use ivshard_core::models::{Interval, Region};
use ivshard_core::utils::{get_dynamic_reader_w_stdin, is_header_line};

use crate::config::OverlapConfig;
use crate::shards::{ShardMap, write_entry};

#[derive(Debug, PartialEq)]
pub struct OverlapOptions {
    pub query: String,
    pub universe: String,
    pub presorted: bool,
    pub min_width: Option<u32>,
}

impl OverlapOptions {
    /// Resolve options from the command line, falling back to the config file.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let config = match matches.get_one::<String>("config") {
            Some(path) => OverlapConfig::try_from(Path::new(path))
                .with_context(|| format!("Failed to read config file {path}"))?,
            None => OverlapConfig::default(),
        };

        let query = matches
            .get_one::<String>("query")
            .cloned()
            .context("A path to a query file is required.")?;

        let universe = matches
            .get_one::<String>("universe")
            .cloned()
            .or(config.universe)
            .context("A path to a universe file is required, on the command line or in the config.")?;

        let presorted = matches.get_flag("presorted") || config.presorted.unwrap_or(false);
        let min_width = matches.get_one::<u32>("min_width").copied().or(config.min_width);

        Ok(OverlapOptions {
            query,
            universe,
            presorted,
            min_width,
        })
    }
}

pub fn run_overlap(matches: &ArgMatches) -> Result<()> {
    let options = OverlapOptions::from_matches(matches)?;

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    write_overlaps(&options, &mut writer)?;
    writer.flush()?;

    Ok(())
}

/// Stream the query file against a sharded universe, writing every hit.
pub fn write_overlaps<W: Write>(options: &OverlapOptions, writer: &mut W) -> Result<usize> {
    let mut universe = ShardMap::load(&options.universe, options.presorted)?;

    if let Some(min_width) = options.min_width {
        universe = universe.map_shards(|shard| shard.filter(|key, _| key.width() >= min_width));
        info!(
            "Kept {} universe records at least {} wide",
            universe.total_entries(),
            min_width
        );
    }

    let reader = get_dynamic_reader_w_stdin(&options.query)?;
    let mut hits = 0;

    for line in reader.lines() {
        let line = line?;
        if is_header_line(&line) {
            continue;
        }
        let region = Region::from_bed_line(&line)
            .with_context(|| format!("Failed to parse query line: {line}"))?;

        // Skip if chromosome not in universe
        if let Some(shard) = universe.get(&region.chr) {
            for entry in shard.get(&region.span()) {
                write_entry(writer, &region.chr, entry)?;
                hits += 1;
            }
        }
    }

    info!("Found {} overlaps", hits);

    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::overlap::cli::create_overlap_cli;

    fn options(min_width: Option<u32>) -> OverlapOptions {
        OverlapOptions {
            query: "../tests/data/query.bed".to_string(),
            universe: "../tests/data/universe.bed".to_string(),
            presorted: true,
            min_width,
        }
    }

    #[rstest]
    fn test_write_overlaps() {
        let mut out = Vec::new();
        let hits = write_overlaps(&options(None), &mut out).unwrap();

        assert_eq!(hits, 5);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "chr1\t0\t10\ta\nchr1\t5\t15\tb\nchr1\t20\t25\tc\n\
             chr2\t100\t200\tg\nchr2\t150\t160\th\n"
        );
    }

    #[rstest]
    fn test_write_overlaps_min_width() {
        let mut out = Vec::new();
        let hits = write_overlaps(&options(Some(20)), &mut out).unwrap();

        assert_eq!(hits, 1);
        assert_eq!(String::from_utf8(out).unwrap(), "chr2\t100\t200\tg\n");
    }

    #[rstest]
    fn test_options_from_config() {
        let matches = create_overlap_cli().get_matches_from([
            "overlap",
            "-q",
            "../tests/data/query.bed",
            "-c",
            "../tests/data/overlap.toml",
        ]);
        let resolved = OverlapOptions::from_matches(&matches).unwrap();
        assert_eq!(resolved, options(Some(20)));
    }

    #[rstest]
    fn test_flags_override_config() {
        let matches = create_overlap_cli().get_matches_from([
            "overlap",
            "-q",
            "../tests/data/query.bed",
            "-u",
            "../tests/data/other.bed",
            "-c",
            "../tests/data/overlap.toml",
            "--min-width",
            "5",
        ]);
        let resolved = OverlapOptions::from_matches(&matches).unwrap();
        assert_eq!(resolved.universe, "../tests/data/other.bed");
        assert_eq!(resolved.min_width, Some(5));
        assert_eq!(resolved.presorted, true);
    }

    #[rstest]
    fn test_missing_universe() {
        let matches =
            create_overlap_cli().get_matches_from(["overlap", "-q", "../tests/data/query.bed"]);
        assert_eq!(OverlapOptions::from_matches(&matches).is_err(), true);
    }
}
