use std::fmt;
use std::str::FromStr;

use chrono::{Month, NaiveDateTime, Weekday};

use crate::error::InvalidFilterError;
use crate::time_utils::{self, month_name, weekday_name};

// ── City ──────────────────────────────────────────────────────────────────────

/// The cities with trip data available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// Every supported city, in prompt order.
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// The identifier users type, e.g. `"new york city"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// File name of this city's trip data inside the data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Whether this city's published files carry `Gender` / `Birth Year`.
    pub fn has_demographics(&self) -> bool {
        !matches!(self, City::Washington)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for City {
    type Err = InvalidFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        City::ALL
            .into_iter()
            .find(|c| c.as_str() == lowered)
            .ok_or_else(|| InvalidFilterError::City(s.to_string()))
    }
}

// ── Filters ───────────────────────────────────────────────────────────────────

/// Month predicate: `"all"` or one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    Only(Month),
}

impl MonthFilter {
    pub fn matches(&self, month: Month) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Only(m) => *m == month,
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("all"),
            MonthFilter::Only(m) => f.write_str(month_name(*m)),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = InvalidFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(MonthFilter::All);
        }
        time_utils::parse_month_name(s)
            .map(MonthFilter::Only)
            .ok_or_else(|| InvalidFilterError::Month(s.to_string()))
    }
}

/// Weekday predicate: `"all"` or one day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayFilter {
    #[default]
    All,
    Only(Weekday),
}

impl DayFilter {
    pub fn matches(&self, weekday: Weekday) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Only(d) => *d == weekday,
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("all"),
            DayFilter::Only(d) => f.write_str(weekday_name(*d)),
        }
    }
}

impl FromStr for DayFilter {
    type Err = InvalidFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(DayFilter::All);
        }
        time_utils::parse_weekday_name(s)
            .map(DayFilter::Only)
            .ok_or_else(|| InvalidFilterError::Weekday(s.to_string()))
    }
}

/// One validated request: which city, and which month / weekday to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl FilterSpec {
    /// Validate raw user text into a [`FilterSpec`].
    pub fn parse(city: &str, month: &str, day: &str) -> Result<Self, InvalidFilterError> {
        Ok(Self {
            city: city.parse()?,
            month: month.parse()?,
            day: day.parse()?,
        })
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "city={}, month={}, day={}", self.city, self.month, self.day)
    }
}

// ── Trip records ──────────────────────────────────────────────────────────────

/// A single trip read from a city file, with its derived keys.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// Trip length in seconds.
    pub trip_duration: f64,
    pub start_station: String,
    pub end_station: String,
    /// `None` when the cell is blank.
    pub user_type: Option<String>,
    /// `None` when the cell is blank or the city has no `Gender` column.
    pub gender: Option<String>,
    /// `None` when the cell is blank or the city has no `Birth Year` column.
    pub birth_year: Option<i32>,
    /// Derived from `start_time` at load.
    pub month: Month,
    /// Derived from `start_time` at load.
    pub weekday: Weekday,
    /// Derived from `start_time` at load (0–23).
    pub start_hour: u32,
    /// Raw cell values in original column order, for raw display.
    pub raw: Vec<String>,
}

impl TripRecord {
    /// Lowercase month name of the trip start.
    pub fn month_name(&self) -> &'static str {
        month_name(self.month)
    }

    /// Lowercase weekday name of the trip start.
    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.weekday)
    }
}

/// Original header of a city file, plus which optional columns it has.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    /// Header names in file order. Derived keys never appear here.
    pub columns: Vec<String>,
    pub has_gender: bool,
    pub has_birth_year: bool,
}

/// An ordered table of trips belonging to one city.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    records: Vec<TripRecord>,
}

impl Dataset {
    pub fn new(records: Vec<TripRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TripRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<TripRecord> {
        self.records
    }
}

impl FromIterator<TripRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = TripRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a TripRecord;
    type IntoIter = std::slice::Iter<'a, TripRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// A freshly loaded city: its dataset together with the file's schema.
#[derive(Debug, Clone)]
pub struct LoadedCity {
    pub city: City,
    pub schema: Schema,
    pub dataset: Dataset,
}
