//! Check command: load and normalise the input without running any stage.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use keeling_io::read_series;

use crate::cli::CheckArgs;
use crate::config::KeelingConfig;
use crate::convert;

/// Read the configured input and report its size and date range.
pub fn run(args: CheckArgs) -> Result<()> {
    let _cmd = info_span!("check").entered();
    let mut config = KeelingConfig::from_file(&args.config)?;
    if let Some(input) = args.input {
        config.io.input = Some(input);
    }

    let input = config.io.input.as_ref().ok_or_else(|| {
        anyhow::anyhow!("no input path: set [io].input in config or use --input")
    })?;
    let reader_cfg = convert::build_reader_config(&config.io)?;

    info!(path = %input.display(), "reading daily series");
    let series = read_series(input, &reader_cfg)
        .with_context(|| format!("failed to read CSV: {}", input.display()))?;

    println!(
        "{}: {} observations from {} to {}",
        input.display(),
        series.len(),
        series.first_date(),
        series.last_date()
    );
    Ok(())
}
