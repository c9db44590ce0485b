use clap::{Command, arg};

pub const EXTRACT_CMD: &str = "extract";

pub fn create_extract_cli() -> Command {
    Command::new(EXTRACT_CMD)
        .about("Write the records of a BED file overlapping one region")
        .arg_required_else_help(true)
        .arg(arg!(-i --input <input> "The BED file, or - for stdin").required(true))
        .arg(arg!(-r --region <region> "The region, as chr:start-end").required(true))
        .arg(arg!(--presorted "The input is already sorted by start within each contig"))
}
