//! Main analysis pipeline for the bikeshare explorer.
//!
//! Load → derive → filter → report, returning an [`Analysis`] ready for the
//! UI layer. Every call re-reads the city file; nothing is cached.

use std::path::Path;

use bikeshare_core::error::Result;
use bikeshare_core::models::{Dataset, FilterSpec, Schema};
use tracing::debug;

use crate::filter::apply_spec;
use crate::reader::load_city;
use crate::reporters::TripReport;

// ── Public types ──────────────────────────────────────────────────────────────

/// What the reporters produced for one filter request.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The filters matched no trips; reporters were not run.
    NoRecords,
    Report(Box<TripReport>),
}

/// The complete output of [`analyze`].
#[derive(Debug, Clone)]
pub struct Analysis {
    pub spec: FilterSpec,
    /// Original columns of the city file, for raw display.
    pub schema: Schema,
    /// Trips that passed the filters, in file order.
    pub dataset: Dataset,
    /// Number of trips in the city file before filtering.
    pub loaded_trips: usize,
    pub outcome: Outcome,
}

impl Analysis {
    pub fn report(&self) -> Option<&TripReport> {
        match &self.outcome {
            Outcome::Report(report) => Some(report),
            Outcome::NoRecords => None,
        }
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full pipeline for `spec` against the files in `data_dir`.
///
/// 1. Load the city's trips and derive month / weekday / start hour.
/// 2. Filter by month and weekday.
/// 3. Run the four reporters unless the filtered dataset is empty.
pub fn analyze(data_dir: &Path, spec: &FilterSpec) -> Result<Analysis> {
    // ── Step 1: Load ──────────────────────────────────────────────────────────
    let loaded = load_city(data_dir, spec.city)?;
    let loaded_trips = loaded.dataset.len();

    // ── Step 2: Filter ────────────────────────────────────────────────────────
    let dataset = apply_spec(loaded.dataset, spec);

    // ── Step 3: Report ────────────────────────────────────────────────────────
    let outcome = if dataset.is_empty() {
        debug!("No trips matched {}", spec);
        Outcome::NoRecords
    } else {
        let report = TripReport::compute(
            &dataset,
            loaded.schema.has_gender,
            loaded.schema.has_birth_year,
        )?;
        Outcome::Report(Box::new(report))
    };

    Ok(Analysis {
        spec: *spec,
        schema: loaded.schema,
        dataset,
        loaded_trips,
        outcome,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::error::{BikeshareError, DataLoadError};
    use bikeshare_core::time_utils::{MONTH_NAMES, WEEKDAY_NAMES};
    use chrono::Month;
    use std::io::Write;
    use tempfile::TempDir;

    const CHICAGO_ROWS: &[&str] = &[
        ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year",
        "1,2017-01-02 08:00:00,2017-01-02 08:10:00,600,Canal St & Madison St,Clinton St & Washington Blvd,Subscriber,Male,1985.0",
        "2,2017-03-06 17:05:00,2017-03-06 17:20:00,900,Streeter Dr & Grand Ave,Lake Shore Dr & Monroe St,Customer,,",
        "3,2017-03-07 17:40:00,2017-03-07 17:45:00,300,Canal St & Madison St,Clinton St & Washington Blvd,Subscriber,Female,1990.0",
        "4,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0",
        "5,2017-03-13 07:55:00,2017-03-13 08:05:00,600,Canal St & Madison St,Clinton St & Washington Blvd,Subscriber,Male,1985.0",
        "6,2017-05-20 12:00:00,2017-05-20 12:30:00,1800,Streeter Dr & Grand Ave,Theater on the Lake,Customer,,",
    ];

    const WASHINGTON_ROWS: &[&str] = &[
        ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type",
        "1,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber",
        "2,2017-03-11 10:34:11,2017-03-11 10:56:47,1355.0,Lincoln Memorial,Jefferson Memorial,Customer",
    ];

    const BLANK_STATION_ROWS: &[&str] = &[
        ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type",
        "1,2017-03-11 10:34:11,2017-03-11 10:56:47,1355.0,,,Customer",
        "2,2017-03-12 10:34:11,2017-03-12 10:56:47,600.0,,,Customer",
        "3,2017-03-13 10:34:11,2017-03-13 10:56:47,300.0,Lincoln Memorial,Jefferson Memorial,Subscriber",
    ];

    fn data_dir(files: &[(&str, &[&str])]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, lines) in files {
            let mut file = std::fs::File::create(dir.path().join(name)).unwrap();
            for line in *lines {
                writeln!(file, "{}", line).unwrap();
            }
        }
        dir
    }

    fn spec(city: &str, month: &str, day: &str) -> FilterSpec {
        FilterSpec::parse(city, month, day).unwrap()
    }

    #[test]
    fn test_analyze_all_all_keeps_every_row() {
        let dir = data_dir(&[("chicago.csv", CHICAGO_ROWS)]);
        let analysis = analyze(dir.path(), &spec("chicago", "all", "all")).unwrap();

        assert_eq!(analysis.loaded_trips, CHICAGO_ROWS.len() - 1);
        assert_eq!(analysis.dataset.len(), CHICAGO_ROWS.len() - 1);
        let report = analysis.report().unwrap();
        assert_eq!(report.trips, 6);
        let trip = report.stations.stats.most_common_trip.as_ref().unwrap();
        assert_eq!(
            trip.to_string(),
            "Canal St & Madison St -> Clinton St & Washington Blvd"
        );
    }

    #[test]
    fn test_analyze_month_filter_matches_start_month_count() {
        let dir = data_dir(&[("chicago.csv", CHICAGO_ROWS)]);
        let all = analyze(dir.path(), &spec("chicago", "all", "all")).unwrap();
        let march_rows = all
            .dataset
            .iter()
            .filter(|t| t.start_time.format("%m").to_string() == "03")
            .count();

        let march = analyze(dir.path(), &spec("chicago", "march", "all")).unwrap();
        assert_eq!(march.dataset.len(), march_rows);
        assert_eq!(march.dataset.len(), 3);
        assert!(march.dataset.iter().all(|t| t.month == Month::March));
    }

    #[test]
    fn test_analyze_derived_names_are_canonical() {
        let dir = data_dir(&[
            ("chicago.csv", CHICAGO_ROWS),
            ("washington.csv", WASHINGTON_ROWS),
        ]);
        for city in ["chicago", "washington"] {
            let analysis = analyze(dir.path(), &spec(city, "all", "all")).unwrap();
            for trip in analysis.dataset.iter() {
                assert!(MONTH_NAMES.contains(&trip.month_name()));
                assert!(WEEKDAY_NAMES.contains(&trip.weekday_name()));
                assert!(trip.start_hour < 24);
            }
        }
    }

    #[test]
    fn test_analyze_no_records_skips_reporters() {
        let dir = data_dir(&[("chicago.csv", CHICAGO_ROWS)]);
        let analysis = analyze(dir.path(), &spec("chicago", "december", "all")).unwrap();

        assert!(matches!(analysis.outcome, Outcome::NoRecords));
        assert!(analysis.report().is_none());
        assert!(analysis.dataset.is_empty());
        assert_eq!(analysis.schema.columns.len(), 9);
    }

    #[test]
    fn test_analyze_washington_flags_missing_demographics() {
        let dir = data_dir(&[("washington.csv", WASHINGTON_ROWS)]);
        let analysis = analyze(dir.path(), &spec("washington", "all", "all")).unwrap();

        let users = &analysis.report().unwrap().users.stats;
        assert_eq!(users.user_types.len(), 2);
        assert!(users.genders.is_absent());
        assert!(users.birth_years.is_absent());
    }

    #[test]
    fn test_analyze_blank_stations_never_win() {
        let dir = data_dir(&[("washington.csv", BLANK_STATION_ROWS)]);
        let analysis = analyze(dir.path(), &spec("washington", "all", "all")).unwrap();

        let stations = &analysis.report().unwrap().stations.stats;
        assert_eq!(
            stations.most_common_start_station.as_deref(),
            Some("Lincoln Memorial")
        );
        assert_eq!(
            stations.most_common_end_station.as_deref(),
            Some("Jefferson Memorial")
        );
        assert_eq!(
            stations.most_common_trip.as_ref().unwrap().to_string(),
            "Lincoln Memorial -> Jefferson Memorial"
        );
    }

    #[test]
    fn test_analyze_missing_file_propagates_data_load_error() {
        let dir = data_dir(&[]);
        let err = analyze(dir.path(), &spec("new york city", "all", "all")).unwrap_err();
        assert!(matches!(
            err,
            BikeshareError::DataLoad(DataLoadError::SourceNotFound(_))
        ));
    }

    #[test]
    fn test_analyze_rereads_file_each_call() {
        let dir = data_dir(&[("washington.csv", WASHINGTON_ROWS)]);
        let first = analyze(dir.path(), &spec("washington", "all", "all")).unwrap();
        assert_eq!(first.dataset.len(), 2);

        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(dir.path().join("washington.csv"))
            .unwrap();
        writeln!(
            file,
            "3,2017-04-01 09:00:00,2017-04-01 09:10:00,600.0,Lincoln Memorial,Jefferson Memorial,Customer"
        )
        .unwrap();
        drop(file);

        let second = analyze(dir.path(), &spec("washington", "all", "all")).unwrap();
        assert_eq!(second.dataset.len(), 3);
    }
}
