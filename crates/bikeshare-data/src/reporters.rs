//! The four trip reports: travel times, stations, durations and users.
//!
//! Each reporter reads a `&Dataset` and never mutates it. "Most frequent"
//! values break ties by first appearance in row order.

use std::fmt;
use std::time::{Duration, Instant};

use bikeshare_core::calculations::{most_frequent, value_counts, FrequencyTable};
use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::Dataset;
use bikeshare_core::time_utils::serde_names;
use chrono::{Month, Weekday};
use serde::Serialize;

// ── TimeStats ─────────────────────────────────────────────────────────────────

/// Most frequent month, weekday and start hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    #[serde(serialize_with = "serde_names::month")]
    pub most_common_month: Month,
    #[serde(serialize_with = "serde_names::weekday")]
    pub most_common_weekday: Weekday,
    pub most_common_start_hour: u32,
}

/// Compute [`TimeStats`] from the derived keys.
pub fn time_stats(dataset: &Dataset) -> Result<TimeStats> {
    let empty = || BikeshareError::EmptyDataset("travel time");
    Ok(TimeStats {
        most_common_month: most_frequent(dataset.iter().map(|t| t.month)).ok_or_else(empty)?,
        most_common_weekday: most_frequent(dataset.iter().map(|t| t.weekday))
            .ok_or_else(empty)?,
        most_common_start_hour: most_frequent(dataset.iter().map(|t| t.start_hour))
            .ok_or_else(empty)?,
    })
}

// ── StationStats ──────────────────────────────────────────────────────────────

/// A start → end station pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Itinerary {
    pub start: String,
    pub end: String,
}

impl Itinerary {
    pub const SEPARATOR: &'static str = " -> ";
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.start, Self::SEPARATOR, self.end)
    }
}

/// Most popular start station, end station and trip.
///
/// Blank station cells are ignored, so a field is `None` only when every
/// selected trip left that column empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub most_common_start_station: Option<String>,
    pub most_common_end_station: Option<String>,
    pub most_common_trip: Option<Itinerary>,
    /// How many times `most_common_trip` was ridden.
    pub most_common_trip_count: usize,
}

/// Compute [`StationStats`]. Trips are counted as `(start, end)` pairs, so
/// two trips only match when both stations match. A trip with either end
/// blank is left out of the pair count.
pub fn station_stats(dataset: &Dataset) -> Result<StationStats> {
    if dataset.is_empty() {
        return Err(BikeshareError::EmptyDataset("station"));
    }

    let trips: FrequencyTable<(&str, &str)> = dataset
        .iter()
        .filter_map(|t| Some((recorded(&t.start_station)?, recorded(&t.end_station)?)))
        .collect();
    let (most_common_trip, most_common_trip_count) = match trips.mode() {
        Some(((start, end), count)) => (
            Some(Itinerary {
                start: start.to_string(),
                end: end.to_string(),
            }),
            count,
        ),
        None => (None, 0),
    };

    Ok(StationStats {
        most_common_start_station: most_frequent(
            dataset.iter().filter_map(|t| recorded(&t.start_station)),
        )
        .map(str::to_string),
        most_common_end_station: most_frequent(
            dataset.iter().filter_map(|t| recorded(&t.end_station)),
        )
        .map(str::to_string),
        most_common_trip,
        most_common_trip_count,
    })
}

/// A station cell, unless it was left blank.
fn recorded(station: &str) -> Option<&str> {
    (!station.is_empty()).then_some(station)
}

// ── DurationStats ─────────────────────────────────────────────────────────────

/// Total and mean trip duration, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub total_seconds: f64,
    pub mean_seconds: f64,
    pub trips: usize,
}

/// Compute [`DurationStats`]. The mean is undefined for an empty dataset.
pub fn duration_stats(dataset: &Dataset) -> Result<DurationStats> {
    if dataset.is_empty() {
        return Err(BikeshareError::EmptyDataset("trip duration"));
    }
    let total_seconds: f64 = dataset.iter().map(|t| t.trip_duration).sum();
    let trips = dataset.len();
    Ok(DurationStats {
        total_seconds,
        mean_seconds: total_seconds / trips as f64,
        trips,
    })
}

// ── UserStats ─────────────────────────────────────────────────────────────────

/// Outcome for a column some cities do not publish.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum ColumnReport<T> {
    /// The city's file has no such column.
    Absent,
    /// The column exists but every selected trip left it blank.
    NoValues,
    Present(T),
}

impl<T> ColumnReport<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, ColumnReport::Absent)
    }
}

/// Earliest, most recent and most common year of birth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

/// Rider breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    /// Every user type with its count, most frequent first.
    pub user_types: Vec<(String, usize)>,
    pub genders: ColumnReport<Vec<(String, usize)>>,
    pub birth_years: ColumnReport<BirthYearStats>,
}

/// Compute [`UserStats`].
///
/// `has_gender` / `has_birth_year` come from the file's schema; when false
/// the matching section is [`ColumnReport::Absent`] rather than an error.
pub fn user_stats(dataset: &Dataset, has_gender: bool, has_birth_year: bool) -> Result<UserStats> {
    if dataset.is_empty() {
        return Err(BikeshareError::EmptyDataset("user"));
    }

    let user_types = owned_counts(value_counts(
        dataset.iter().filter_map(|t| t.user_type.as_deref()),
    ));

    let genders = if has_gender {
        let counts = owned_counts(value_counts(
            dataset.iter().filter_map(|t| t.gender.as_deref()),
        ));
        if counts.is_empty() {
            ColumnReport::NoValues
        } else {
            ColumnReport::Present(counts)
        }
    } else {
        ColumnReport::Absent
    };

    let birth_years = if has_birth_year {
        birth_year_stats(dataset)
            .map(ColumnReport::Present)
            .unwrap_or(ColumnReport::NoValues)
    } else {
        ColumnReport::Absent
    };

    Ok(UserStats {
        user_types,
        genders,
        birth_years,
    })
}

fn birth_year_stats(dataset: &Dataset) -> Option<BirthYearStats> {
    let years = || dataset.iter().filter_map(|t| t.birth_year);
    Some(BirthYearStats {
        earliest: years().min()?,
        most_recent: years().max()?,
        most_common: most_frequent(years())?,
    })
}

fn owned_counts(counts: Vec<(&str, usize)>) -> Vec<(String, usize)> {
    counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect()
}

// ── TripReport ────────────────────────────────────────────────────────────────

/// A computed section together with how long it took.
#[derive(Debug, Clone, Serialize)]
pub struct Timed<T> {
    #[serde(flatten)]
    pub stats: T,
    #[serde(rename = "elapsed_seconds", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    /// Run `f`, recording its wall-clock time.
    pub fn measure(f: impl FnOnce() -> Result<T>) -> Result<Self> {
        let started = Instant::now();
        let stats = f()?;
        Ok(Self {
            stats,
            elapsed: started.elapsed(),
        })
    }
}

fn serialize_secs<S>(d: &Duration, s: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    s.serialize_f64(d.as_secs_f64())
}

/// All four reports for one filtered dataset.
#[derive(Debug, Clone, Serialize)]
pub struct TripReport {
    pub trips: usize,
    pub time: Timed<TimeStats>,
    pub stations: Timed<StationStats>,
    pub durations: Timed<DurationStats>,
    pub users: Timed<UserStats>,
}

impl TripReport {
    /// Run every reporter over `dataset`.
    pub fn compute(dataset: &Dataset, has_gender: bool, has_birth_year: bool) -> Result<Self> {
        Ok(Self {
            trips: dataset.len(),
            time: Timed::measure(|| time_stats(dataset))?,
            stations: Timed::measure(|| station_stats(dataset))?,
            durations: Timed::measure(|| duration_stats(dataset))?,
            users: Timed::measure(|| user_stats(dataset, has_gender, has_birth_year))?,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
