//! Static event table for explaining rolling-signal anomalies.

use std::ops::RangeInclusive;

use keeling_calendar::CalendarDate;

/// One catalogued event: a year, an inclusive month range and its text.
#[derive(Debug, Clone)]
pub struct EventRule {
    pub year: i32,
    pub months: RangeInclusive<u8>,
    pub explanation: &'static str,
    pub is_known_event: bool,
}

impl EventRule {
    /// Returns `true` when `date` falls inside this rule's year and months.
    pub fn matches(&self, date: CalendarDate) -> bool {
        date.year() == self.year && self.months.contains(&date.month())
    }
}

/// Catalogued events, checked in order; the first match wins.
pub const EVENT_RULES: &[EventRule] = &[
    EventRule {
        year: 1998,
        months: 3..=5,
        explanation: "El Niño 1997-98 with widespread biomass burning",
        is_known_event: true,
    },
    EventRule {
        year: 1983,
        months: 1..=3,
        explanation: "El Niño 1982-83 following the El Chichón eruption",
        is_known_event: true,
    },
    EventRule {
        year: 2016,
        months: 3..=5,
        explanation: "El Niño 2015-16",
        is_known_event: true,
    },
    EventRule {
        year: 2020,
        months: 4..=6,
        explanation: "COVID-19 era shifts in emissions and atmospheric transport",
        is_known_event: true,
    },
    EventRule {
        year: 2005,
        months: 7..=8,
        explanation: "Amazon drought",
        is_known_event: true,
    },
    EventRule {
        year: 2010,
        months: 7..=9,
        explanation: "Russian wildfires and heatwave",
        is_known_event: true,
    },
    EventRule {
        year: 2003,
        months: 6..=8,
        explanation: "European heatwave",
        is_known_event: true,
    },
];

/// Explanation given to flagged rows that match no catalogued event.
pub const GENERIC_EXPLANATION: &str =
    "Deviation from the ten-year rolling baseline with no catalogued event";

/// Explanation attached to one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotation {
    pub explanation: &'static str,
    pub is_known_event: bool,
}

/// Annotates a row given whether its rolling signal is flagged.
///
/// Unflagged rows get an empty explanation.
pub fn annotate(date: CalendarDate, flagged: bool) -> Annotation {
    if !flagged {
        return Annotation {
            explanation: "",
            is_known_event: false,
        };
    }
    EVENT_RULES
        .iter()
        .find(|rule| rule.matches(date))
        .map_or(
            Annotation {
                explanation: GENERIC_EXPLANATION,
                is_known_event: false,
            },
            |rule| Annotation {
                explanation: rule.explanation,
                is_known_event: rule.is_known_event,
            },
        )
}
