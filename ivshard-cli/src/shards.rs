use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use fxhash::FxHashMap as HashMap;
use indicatif::ProgressBar;
use log::{debug, info};
use rayon::prelude::*;

use ivshard_core::models::{Entry, Region, Span};
use ivshard_core::utils::read_regions;
use ivshard_index::Partition;

pub type ShardKey = Span<u32>;
pub type ShardEntry = Entry<ShardKey, Option<String>>;
pub type Shard = Partition<ShardKey, Option<String>>;

/// One collection of BED records, routed into one [`Shard`] per contig.
#[derive(Debug, Default, Clone)]
pub struct ShardMap {
    shards: HashMap<String, Shard>,
}

impl ShardMap {
    ///
    /// Route regions into shards by contig.
    ///
    /// # Arguments
    /// - regions: records in file order
    /// - presorted: whether the records are already sorted by start within each contig
    ///
    pub fn from_regions(regions: Vec<Region>, presorted: bool) -> Self {
        let mut entries_by_chr: HashMap<String, Vec<ShardEntry>> = HashMap::default();

        for region in regions {
            let key = region.span();
            entries_by_chr
                .entry(region.chr)
                .or_default()
                .push(Entry::new(key, region.rest));
        }

        let shards = entries_by_chr
            .into_iter()
            .map(|(chr, entries)| (chr, Partition::build(entries, presorted)))
            .collect();

        ShardMap { shards }
    }

    /// Read a BED-like file (or stdin, for `-`) into shards.
    pub fn load(path: &str, presorted: bool) -> Result<Self> {
        let pb = ProgressBar::new_spinner();
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Loading {path}"));

        let regions = read_regions(path)?;
        let shards = Self::from_regions(regions, presorted);

        pb.finish_and_clear();
        info!(
            "Loaded {} records from {} into {} shards",
            shards.total_entries(),
            path,
            shards.len()
        );

        Ok(shards)
    }

    pub fn get(&self, chr: &str) -> Option<&Shard> {
        self.shards.get(chr)
    }

    /// Contig names in lexicographic order.
    pub fn contigs(&self) -> Vec<&str> {
        let mut contigs: Vec<&str> = self.shards.keys().map(String::as_str).collect();
        contigs.sort_unstable();
        contigs
    }

    /// Number of shards.
    pub fn len(&self) -> usize {
        self.shards.len()
    }

    pub fn total_entries(&self) -> usize {
        self.shards.values().map(Partition::len).sum()
    }

    /// Derive a new shard map by applying `f` to every shard.
    pub fn map_shards<F>(&self, f: F) -> Self
    where
        F: Fn(&Shard) -> Shard + Sync,
    {
        let shards = self
            .shards
            .par_iter()
            .map(|(chr, shard)| (chr.clone(), f(shard)))
            .collect();
        ShardMap { shards }
    }

    /// Merge two shard maps contig by contig. Contigs are merged in parallel; each
    /// merge reads two immutable shards and produces a new one.
    pub fn merge(&self, other: &Self) -> Self {
        let mut contigs: Vec<&String> = self.shards.keys().chain(other.shards.keys()).collect();
        contigs.sort_unstable();
        contigs.dedup();

        let shards = contigs
            .into_par_iter()
            .map(|chr| {
                let merged = match (self.shards.get(chr), other.shards.get(chr)) {
                    (Some(a), Some(b)) => a.merge_partitions(b),
                    (Some(shard), None) | (None, Some(shard)) => shard.clone(),
                    (None, None) => Shard::default(),
                };
                debug!("Merged shard {} into {} entries", chr, merged.len());
                (chr.clone(), merged)
            })
            .collect();

        ShardMap { shards }
    }

    /// Write every record, contigs in lexicographic order and records in key order.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<usize> {
        let mut written = 0;
        for chr in self.contigs() {
            if let Some(shard) = self.shards.get(chr) {
                for entry in shard.get_all() {
                    write_entry(writer, chr, entry)?;
                    written += 1;
                }
            }
        }
        Ok(written)
    }
}

/// Write one record as a BED line.
pub fn write_entry<W: Write>(writer: &mut W, chr: &str, entry: &ShardEntry) -> std::io::Result<()> {
    match &entry.val {
        Some(rest) => writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            chr, entry.key.start, entry.key.end, rest
        ),
        None => writeln!(writer, "{}\t{}\t{}", chr, entry.key.start, entry.key.end),
    }
}
