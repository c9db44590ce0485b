mod config;
mod extract;
mod merge;
mod overlap;
mod shards;

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::LevelFilter;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "ivshard";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Build, query and merge per-contig interval shards from BED-like files.")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Log more detail to stderr (-v debug, -vv trace)"),
        )
        .subcommand(overlap::cli::create_overlap_cli())
        .subcommand(merge::cli::create_merge_cli())
        .subcommand(extract::cli::create_extract_cli())
}

fn init_logging(matches: &ArgMatches) -> Result<()> {
    let level = match matches.get_count("verbose") {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    simple_logger::SimpleLogger::new().with_level(level).init()?;
    Ok(())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(&matches)?;

    match matches.subcommand() {
        //
        // OVERLAP
        //
        Some((overlap::cli::OVERLAP_CMD, matches)) => {
            overlap::handlers::run_overlap(matches)?;
        }

        //
        // MERGE
        //
        Some((merge::cli::MERGE_CMD, matches)) => {
            merge::handlers::run_merge(matches)?;
        }

        //
        // EXTRACT
        //
        Some((extract::cli::EXTRACT_CMD, matches)) => {
            extract::handlers::run_extract(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_parser_is_valid() {
        build_parser().debug_assert();
    }

    #[rstest]
    fn test_verbose_is_global() {
        let matches = build_parser().get_matches_from([
            "ivshard",
            "extract",
            "-i",
            "-",
            "-r",
            "chr1:1-2",
            "-vv",
        ]);
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, extract::cli::EXTRACT_CMD);
        assert_eq!(sub.get_count("verbose"), 2);
    }
}
