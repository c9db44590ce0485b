use clap::{Arg, Command, arg, value_parser};

pub const OVERLAP_CMD: &str = "overlap";

pub fn create_overlap_cli() -> Command {
    Command::new(OVERLAP_CMD)
        .about("Report every universe record overlapping each query record")
        .arg_required_else_help(true)
        .arg(arg!(-q --query <query> "The query BED file, or - for stdin").required(true))
        .arg(arg!(-u --universe <universe> "The universe BED file to index"))
        .arg(arg!(-c --config <config> "A TOML file with defaults for this command"))
        .arg(arg!(--presorted "The universe is already sorted by start within each contig"))
        .arg(
            Arg::new("min_width")
                .long("min-width")
                .value_name("min_width")
                .value_parser(value_parser!(u32))
                .help("Drop universe records narrower than this before querying"),
        )
}
