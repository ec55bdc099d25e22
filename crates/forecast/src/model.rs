//! Model-agnostic forecast interface.

use keeling_calendar::CalendarDate;

use crate::error::ForecastError;

/// One forecast row. Values are in the units of the input series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastPoint {
    pub date: CalendarDate,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
    pub trend: f64,
    pub trend_lower: f64,
    pub trend_upper: f64,
    /// Additive yearly seasonal term (0 when the model has none).
    pub yearly: f64,
}

/// An additive trend plus seasonality model that can be fitted to a daily
/// history and evaluated at arbitrary dates.
pub trait TrendSeasonalModel {
    /// Fits `values` observed on strictly increasing `dates` and predicts at
    /// every date in `targets`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InsufficientData`] when the history is too
    /// short and [`ForecastError::ModelFit`] when fitting fails.
    fn fit_predict(
        &self,
        dates: &[CalendarDate],
        values: &[f64],
        targets: &[CalendarDate],
    ) -> Result<Vec<ForecastPoint>, ForecastError>;
}
