use std::path::PathBuf;

use clap::{Parser, Subcommand};

use keeling_io::OutputFormat;

/// Keeling daily CO2 feature, anomaly and forecast pipeline.
#[derive(Parser)]
#[command(
    name = "keeling",
    version,
    about = "Daily CO2 feature, anomaly and forecast pipeline"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Run every stage and write the six output tables.
    Run(RunArgs),
    /// Load and normalise the input only, then report what was read.
    Check(CheckArgs),
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "keeling.toml")]
    pub config: PathBuf,

    /// Override input CSV path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override output directory from config.
    #[arg(short, long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Override output format from config (csv or parquet).
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Override forecast sampling seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Arguments for the `check` subcommand.
#[derive(clap::Args)]
pub struct CheckArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "keeling.toml")]
    pub config: PathBuf,

    /// Override input CSV path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_overrides() {
        let cli = Cli::parse_from([
            "keeling", "-vv", "run", "--input", "co2.csv", "--output-dir", "out", "--format",
            "parquet", "--seed", "7",
        ]);
        assert_eq!(cli.verbose, 2);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.config, PathBuf::from("keeling.toml"));
        assert_eq!(args.input, Some(PathBuf::from("co2.csv")));
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert_eq!(args.format, Some(OutputFormat::Parquet));
        assert_eq!(args.seed, Some(7));
    }

    #[test]
    fn parses_check() {
        let cli = Cli::parse_from(["keeling", "check", "-c", "other.toml"]);
        let Command::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.config, PathBuf::from("other.toml"));
        assert!(args.input.is_none());
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Cli::try_parse_from(["keeling", "run", "--format", "xlsx"]).is_err());
    }
}
