//! Run command: the full feature, anomaly and forecast pipeline.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use keeling_io::read_series;
use keeling_pipeline::{DirectorySink, run_pipeline};

use crate::cli::RunArgs;
use crate::config::KeelingConfig;
use crate::convert;

/// Applies command-line overrides on top of the file configuration.
fn apply_overrides(config: &mut KeelingConfig, args: &RunArgs) {
    if let Some(ref input) = args.input {
        config.io.input = Some(input.clone());
    }
    if let Some(ref dir) = args.output_dir {
        config.io.output_dir = Some(dir.clone());
    }
    if let Some(format) = args.format {
        config.io.format = format.to_string();
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
}

/// Run every stage and write the output tables.
pub fn run(args: RunArgs) -> Result<()> {
    let _cmd = info_span!("run").entered();

    // 1. Load config and apply CLI overrides
    let mut config = KeelingConfig::from_file(&args.config)?;
    apply_overrides(&mut config, &args);

    // 2. Resolve paths
    let input = config.io.input.as_ref().ok_or_else(|| {
        anyhow::anyhow!("no input path: set [io].input in config or use --input")
    })?;
    let output_dir = config.io.output_dir.as_ref().ok_or_else(|| {
        anyhow::anyhow!("no output directory: set [io].output_dir in config or use --output-dir")
    })?;

    // 3. Build crate configs from TOML
    let reader_cfg = convert::build_reader_config(&config.io)?;
    let writer_cfg = convert::build_writer_config(&config.io)?;
    let pipeline_cfg = convert::build_pipeline_config(&config)?;

    // 4. Load and normalise the series
    info!(path = %input.display(), "reading daily series");
    let series = read_series(input, &reader_cfg)
        .with_context(|| format!("failed to read CSV: {}", input.display()))?;
    info!(
        n = series.len(),
        first = %series.first_date(),
        last = %series.last_date(),
        "series loaded"
    );

    // 5. Run stages, writing each table as it completes
    let sink = DirectorySink::new(output_dir, writer_cfg);
    let summary = run_pipeline(&series, &pipeline_cfg, &sink).with_context(|| {
        format!("pipeline failed writing to {}", output_dir.display())
    })?;

    for table in &summary.tables {
        info!(table = %table.name, rows = table.rows, "output");
    }
    info!(
        yearly = summary.yearly_anomalies,
        rolling = summary.rolling_anomalies,
        known = summary.known_events,
        "anomalies"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use keeling_io::OutputFormat;

    fn args() -> RunArgs {
        RunArgs {
            config: PathBuf::from("keeling.toml"),
            input: None,
            output_dir: None,
            format: None,
            seed: None,
        }
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = KeelingConfig::default();
        config.io.input = Some(PathBuf::from("from_file.csv"));
        let a = RunArgs {
            input: Some(PathBuf::from("cli.csv")),
            output_dir: Some(PathBuf::from("out")),
            format: Some(OutputFormat::Parquet),
            seed: Some(3),
            ..args()
        };
        apply_overrides(&mut config, &a);
        assert_eq!(config.io.input, Some(PathBuf::from("cli.csv")));
        assert_eq!(config.io.output_dir, Some(PathBuf::from("out")));
        assert_eq!(config.io.format, "parquet");
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn absent_overrides_keep_file_values() {
        let mut config = KeelingConfig::default();
        config.seed = Some(11);
        apply_overrides(&mut config, &args());
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.io.format, "csv");
    }
}
