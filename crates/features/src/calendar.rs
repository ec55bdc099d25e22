//! Per-row calendar features.

use keeling_calendar::{CalendarDate, Season, cyclical_encoding};

/// Calendar fields and cyclical encodings of one observation date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarFeatures {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    /// Leap-aware day of year, 1..=366.
    pub day_of_year: u16,
    pub season: Season,
    /// `sin(2π·doy/365)`.
    pub sin_day: f64,
    /// `cos(2π·doy/365)`.
    pub cos_day: f64,
}

impl CalendarFeatures {
    /// Derives the calendar features of `date`.
    pub fn from_date(date: CalendarDate) -> Self {
        let doy = date.doy();
        let (sin_day, cos_day) = cyclical_encoding(doy);
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            day_of_year: doy.get(),
            season: date.season(),
            sin_day,
            cos_day,
        }
    }
}

/// Derives calendar features for every date, in order.
pub fn calendar_features(dates: &[CalendarDate]) -> Vec<CalendarFeatures> {
    dates.iter().copied().map(CalendarFeatures::from_date).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fields_from_date() {
        let f = CalendarFeatures::from_date(CalendarDate::new(2020, 3, 1).unwrap());
        assert_eq!(f.year, 2020);
        assert_eq!(f.month, 3);
        assert_eq!(f.day, 1);
        assert_eq!(f.day_of_year, 61);
        assert_eq!(f.season, Season::Spring);
    }

    #[test]
    fn encodings_on_unit_circle() {
        let start = CalendarDate::new(2019, 12, 1).unwrap();
        let dates = keeling_calendar::daily_sequence(start, 800).unwrap();
        for f in calendar_features(&dates) {
            assert_relative_eq!(f.sin_day.powi(2) + f.cos_day.powi(2), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn december_is_winter() {
        let f = CalendarFeatures::from_date(CalendarDate::new(2001, 12, 31).unwrap());
        assert_eq!(f.season, Season::Winter);
        assert_eq!(f.day_of_year, 365);
    }
}
