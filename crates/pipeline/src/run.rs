//! Stage sequencing for one pipeline run.

use keeling_anomaly::{AnomalyFrame, detect_anomalies};
use keeling_calendar::CalendarDate;
use keeling_features::{YearlyAggregate, derive_daily, monthly_aggregates, yearly_aggregates};
use keeling_forecast::{PiecewiseTrendModel, forecast};
use keeling_io::{Series, Table};
use keeling_loess::{LoessError, Smoother, smooth_per_year, smooth_series};
use tracing::{info, info_span};

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::sink::TableSink;
use crate::tables::{self, AnomalySource};

/// Row count of one written table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub name: String,
    pub rows: usize,
}

/// What a completed run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Tables in the order they were written.
    pub tables: Vec<TableSummary>,
    pub yearly_anomalies: usize,
    pub rolling_anomalies: usize,
    pub known_events: usize,
}

impl PipelineSummary {
    fn emit(&mut self, sink: &dyn TableSink, table: &Table) -> Result<(), PipelineError> {
        sink.write(table).map_err(|source| PipelineError::Write {
            table: table.name().to_string(),
            source,
        })?;
        self.tables.push(TableSummary {
            name: table.name().to_string(),
            rows: table.num_rows(),
        });
        Ok(())
    }

    fn record_anomalies(&mut self, frame: &AnomalyFrame) {
        self.yearly_anomalies = frame.yearly.count();
        self.rolling_anomalies = frame.rolling.count();
        self.known_events = frame.annotations.iter().filter(|a| a.is_known_event).count();
    }
}

/// Runs every stage over `series` and hands the six tables to `sink`.
///
/// The forecast is fitted on one rayon task while features, smoothing and
/// anomaly detection run on another; smoothing and detection are split
/// again. Each table is written as soon as its inputs are ready, and the
/// forecast table goes last, so a forecast failure leaves the other five
/// tables in place.
///
/// # Errors
///
/// Returns [`PipelineError`] naming the first stage that failed. When both
/// branches fail, the non-forecast error wins.
pub fn run_pipeline(
    series: &Series,
    config: &PipelineConfig,
    sink: &dyn TableSink,
) -> Result<PipelineSummary, PipelineError> {
    let _span = info_span!("pipeline", rows = series.len()).entered();
    if series.is_empty() {
        return Err(PipelineError::EmptySeries);
    }
    config.validate()?;

    let model = PiecewiseTrendModel::new(config.forecast().model().clone());
    let (forecast_result, analysis) = rayon::join(
        || forecast(&model, series.dates(), series.values(), config.forecast()),
        || analyse(series, config, sink),
    );

    let mut summary = analysis?;
    let points = forecast_result?;
    summary.emit(sink, &tables::forecast_table(&points))?;

    info!(
        tables = summary.tables.len(),
        rolling_anomalies = summary.rolling_anomalies,
        known_events = summary.known_events,
        "pipeline complete"
    );
    Ok(summary)
}

/// Everything except the forecast.
fn analyse(
    series: &Series,
    config: &PipelineConfig,
    sink: &dyn TableSink,
) -> Result<PipelineSummary, PipelineError> {
    let dates = series.dates();
    let values = series.values();

    let daily = derive_daily(dates, values, config.features())?;
    let months = monthly_aggregates(dates, values)?;
    let years = yearly_aggregates(dates, values)?;
    info!(months = months.len(), years = years.len(), "features derived");

    let (smoothed, frame) = rayon::join(
        || smooth(dates, values, &years, config.smoothing()),
        || detect_anomalies(dates, values, config.anomaly()),
    );
    let (loess_daily, loess_yearly) = smoothed?;

    let mut summary = PipelineSummary::default();
    summary.emit(
        sink,
        &tables::daily_features_table(
            dates,
            series.decimal_years(),
            values,
            &daily,
            &loess_daily,
            config.features(),
        ),
    )?;
    summary.emit(sink, &tables::monthly_table(&months))?;
    summary.emit(sink, &tables::yearly_table(&years, &loess_yearly))?;

    let frame = frame?;
    let source = AnomalySource {
        dates,
        values,
        calendar: &daily.calendar,
        frame: &frame,
    };
    summary.emit(sink, &source.anomalies_table())?;
    summary.emit(sink, &source.tooltips_table())?;
    summary.record_anomalies(&frame);

    Ok(summary)
}

/// Per-year daily fit and the fit over yearly growth.
fn smooth(
    dates: &[CalendarDate],
    values: &[f64],
    years: &[YearlyAggregate],
    smoother: &dyn Smoother,
) -> Result<(Vec<f64>, Vec<Option<f64>>), LoessError> {
    let daily = smooth_per_year(dates, values, smoother)?;
    let x: Vec<f64> = years.iter().map(|y| f64::from(y.year)).collect();
    let growth: Vec<Option<f64>> = years.iter().map(|y| y.pct_change).collect();
    let yearly = smooth_series(&x, &growth, smoother)?;
    Ok((daily, yearly))
}
