use clap::{Command, arg};

pub const MERGE_CMD: &str = "merge";

pub fn create_merge_cli() -> Command {
    Command::new(MERGE_CMD)
        .about("Merge two BED files shard by shard, keeping duplicates")
        .arg_required_else_help(true)
        .arg(arg!(-a <a> "The first BED file").required(true))
        .arg(arg!(-b <b> "The second BED file").required(true))
        .arg(arg!(-o --output <output> "Where to write the merged records (default: stdout)"))
        .arg(arg!(--presorted "Both inputs are already sorted by start within each contig"))
        .arg(arg!(--tag "Append the source (a or b) to each record"))
}
