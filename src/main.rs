mod model;
use model::*;
mod process;

use abst_fs::{self as fs, AbstPath};

use anyhow::Result;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Print the tree of a directory (or of a saved tree), or what is in the first
/// one and not in the following ones
#[derive(Parser, Debug)]
#[clap(version, about)]
struct Args {
    /// Directories or saved trees. Use `: PATH` after an operand to work on
    /// its subtree at PATH instead
    #[clap(value_name = "FD", required = true)]
    operands: Vec<String>,

    /// Print without colors
    #[clap(short, long)]
    monochrome: bool,

    /// Save the resulting tree to FILENAME instead of printing it
    #[clap(short, long, value_name = "FILENAME")]
    serialize: Option<String>,

    /// Toggle the display of directory totals
    #[clap(short, long)]
    total: bool,

    /// Leave out entries whose relative path matches REGEX
    #[clap(short, long, value_name = "REGEX", action = clap::ArgAction::Append)]
    exclude: Vec<String>,

    /// Log more, repeat for even more
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Set fake home directory
    #[clap(short = 'H', long)]
    home_dir: Option<String>,
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env("FDSUB_LOG").unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();
    init_logging(args.verbose);

    let home_dir = match args.home_dir {
        Some(val) => Some(AbstPath::from(val)),
        None => fs::home_dir()
            .map_err(|err| warn!("no home directory, using default config: {err}"))
            .ok(),
    };
    let config = match home_dir {
        Some(home_dir) => Config::load(&home_dir)?,
        None => Config::default(),
    };
    let settings = Settings::resolve(
        &config,
        &Flags {
            monochrome: args.monochrome,
            total: args.total,
            exclude: args.exclude,
            serialize: args.serialize,
        },
    )?;

    print!("{}", process::run(&args.operands, &settings)?);
    Ok(())
}
