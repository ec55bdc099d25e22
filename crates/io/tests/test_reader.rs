//! Integration tests for reading and normalising daily CSV input.

use std::io::Write;

use keeling_calendar::CalendarDate;
use keeling_io::{IoError, ReaderConfig, read_series, read_series_from_reader};

const HEADER: &str = "year,month,day,decimal,value\n";

fn read_str(body: &str) -> Result<keeling_io::Series, IoError> {
    read_series_from_reader(format!("{HEADER}{body}").as_bytes(), &ReaderConfig::default())
}

#[test]
fn reads_well_formed_input() {
    let series = read_str(
        "2020,1,1,2020.0014,413.61\n\
         2020,1,2,2020.0041,413.52\n\
         2020,1,4,2020.0096,413.80\n",
    )
    .expect("valid input");

    assert_eq!(series.len(), 3);
    assert_eq!(series.values(), &[413.61, 413.52, 413.80]);
    assert_eq!(series.decimal_years()[2], 2020.0096);
    assert_eq!(series.last_date(), CalendarDate::new(2020, 1, 4).unwrap());
}

#[test]
fn comments_and_padding_are_ignored() {
    let series = read_str(
        "# station: mlo\n\
         2020, 1, 1, 2020.0014, 413.61\n",
    )
    .expect("valid input");
    assert_eq!(series.len(), 1);
}

#[test]
fn output_is_strictly_increasing_for_shuffled_input() {
    let series = read_str(
        "2021,3,1,2021.16,417.0\n\
         2020,12,31,2020.99,414.0\n\
         2021,1,15,2021.04,415.5\n",
    )
    .expect("valid input");
    assert!(series.dates().windows(2).all(|w| w[0] < w[1]));
    assert_eq!(series.values(), &[414.0, 415.5, 417.0]);
}

#[test]
fn duplicate_dates_are_rejected() {
    let err = read_str(
        "2020,1,1,2020.0,413.0\n\
         2020,1,2,2020.0,413.1\n\
         2020,1,1,2020.0,413.2\n",
    )
    .unwrap_err();
    assert!(matches!(
        err,
        IoError::DuplicateObservation {
            first_row: 1,
            second_row: 3,
            ..
        }
    ));
}

#[test]
fn invalid_calendar_date_is_rejected() {
    let err = read_str("2021,2,29,2021.16,415.0\n").unwrap_err();
    assert!(matches!(
        err,
        IoError::MalformedDate {
            row: 1,
            year: 2021,
            month: 2,
            day: 29
        }
    ));
}

#[test]
fn unparseable_value_reports_row_and_column() {
    let err = read_str(
        "2020,1,1,2020.0,413.0\n\
         2020,1,2,2020.0,abc\n",
    )
    .unwrap_err();
    match err {
        IoError::Parse { row, column, value } => {
            assert_eq!(row, 2);
            assert_eq!(column, "value");
            assert_eq!(value, "abc");
        }
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn missing_column_is_reported() {
    let err = read_series_from_reader(
        "year,month,day,value\n2020,1,1,413.0\n".as_bytes(),
        &ReaderConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, IoError::MissingColumn { name } if name == "decimal"));
}

#[test]
fn header_only_is_empty_input() {
    assert!(matches!(read_str("").unwrap_err(), IoError::EmptyInput));
}

#[test]
fn non_finite_values_are_collected() {
    let err = read_str(
        "2020,1,1,2020.0,NaN\n\
         2020,1,2,2020.0,413.0\n\
         2020,1,3,2020.0,inf\n",
    )
    .unwrap_err();
    assert!(matches!(err, IoError::Validation { count: 2, .. }));
}

#[test]
fn custom_column_names() {
    let config = ReaderConfig::default()
        .with_year_column("yr")
        .with_month_column("mo")
        .with_day_column("dy")
        .with_decimal_column("frac")
        .with_value_column("co2");
    let series = read_series_from_reader("co2,yr,mo,dy,frac\n420.1,2024,2,29,2024.16\n".as_bytes(), &config)
        .expect("valid input");
    assert_eq!(series.first_date(), CalendarDate::new(2024, 2, 29).unwrap());
    assert_eq!(series.values(), &[420.1]);
}

#[test]
fn read_from_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("co2.csv");
    let mut file = std::fs::File::create(&path).expect("create file");
    write!(file, "{HEADER}2019,6,1,2019.41,414.9\n").expect("write file");
    drop(file);

    let series = read_series(&path, &ReaderConfig::default()).expect("read file");
    assert_eq!(series.len(), 1);
}

#[test]
fn missing_file_is_reported() {
    let err = read_series(
        std::path::Path::new("/nonexistent/co2.csv"),
        &ReaderConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, IoError::FileNotFound { .. }));
}
