//! CSV discovery and loading for the bikeshare explorer.
//!
//! Reads one city's trip file into a [`Dataset`], deriving month, weekday and
//! start hour from every trip's start time, and returns it together with the
//! file's original [`Schema`].

use std::io::Read;
use std::path::{Path, PathBuf};

use bikeshare_core::error::DataLoadError;
use bikeshare_core::models::{City, Dataset, LoadedCity, Schema, TripRecord};
use bikeshare_core::time_utils::{hour_of, month_of, parse_trip_timestamp, weekday_of};
use tracing::{debug, warn};

// ── Column names ──────────────────────────────────────────────────────────────

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

/// Columns every city file must carry.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    START_TIME,
    END_TIME,
    TRIP_DURATION,
    START_STATION,
    END_STATION,
    USER_TYPE,
];

// ── Public API ────────────────────────────────────────────────────────────────

/// Location of `city`'s trip file inside `data_dir`.
pub fn source_path(data_dir: &Path, city: City) -> PathBuf {
    data_dir.join(city.file_name())
}

/// Load a city by its user-facing identifier (e.g. `"new york city"`).
pub fn load_city_by_name(data_dir: &Path, name: &str) -> Result<LoadedCity, DataLoadError> {
    let city: City = name
        .parse()
        .map_err(|_| DataLoadError::UnknownCity(name.to_string()))?;
    load_city(data_dir, city)
}

/// Read and parse `city`'s trip file from `data_dir`.
pub fn load_city(data_dir: &Path, city: City) -> Result<LoadedCity, DataLoadError> {
    let path = source_path(data_dir, city);
    if !path.exists() {
        return Err(DataLoadError::SourceNotFound(path));
    }

    let file = std::fs::File::open(&path).map_err(|source| DataLoadError::FileRead {
        path: path.clone(),
        source,
    })?;

    let started = std::time::Instant::now();
    let loaded = load_from_reader(file, city, &path)?;
    debug!(
        "Loaded {} trips for {} from {} in {:.3}s",
        loaded.dataset.len(),
        city,
        path.display(),
        started.elapsed().as_secs_f64()
    );
    Ok(loaded)
}

/// Parse trip CSV text from any reader.
///
/// `path` is used only to label errors.
pub fn load_from_reader<R: Read>(
    reader: R,
    city: City,
    path: &Path,
) -> Result<LoadedCity, DataLoadError> {
    let csv_error = |source: csv::Error| DataLoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(csv_error)?.clone();
    let columns = ColumnIndex::resolve(&headers, path)?;
    let schema = Schema {
        columns: headers.iter().map(str::to_string).collect(),
        has_gender: columns.gender.is_some(),
        has_birth_year: columns.birth_year.is_some(),
    };

    if city.has_demographics() && !(schema.has_gender && schema.has_birth_year) {
        warn!(
            "{} is expected to carry Gender and Birth Year columns but {} does not",
            city,
            path.display()
        );
    }

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result.map_err(csv_error)?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let record = columns
            .parse_row(&row)
            .map_err(|reason| DataLoadError::MalformedRow {
                path: path.to_path_buf(),
                line,
                reason,
            })?;
        records.push(record);
    }

    Ok(LoadedCity {
        city,
        schema,
        dataset: Dataset::new(records),
    })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Header positions of the columns the loader understands.
#[derive(Debug)]
struct ColumnIndex {
    start_time: usize,
    end_time: usize,
    trip_duration: usize,
    start_station: usize,
    end_station: usize,
    user_type: usize,
    gender: Option<usize>,
    birth_year: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord, path: &Path) -> Result<Self, DataLoadError> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| DataLoadError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })
        };

        Ok(Self {
            start_time: require(START_TIME)?,
            end_time: require(END_TIME)?,
            trip_duration: require(TRIP_DURATION)?,
            start_station: require(START_STATION)?,
            end_station: require(END_STATION)?,
            user_type: require(USER_TYPE)?,
            gender: find(GENDER),
            birth_year: find(BIRTH_YEAR),
        })
    }

    /// Build a [`TripRecord`] from one CSV row, or describe why it is invalid.
    fn parse_row(&self, row: &csv::StringRecord) -> Result<TripRecord, String> {
        let cell = |idx: usize| row.get(idx).unwrap_or("");

        let start_time = parse_trip_timestamp(cell(self.start_time))
            .ok_or_else(|| format!("invalid {} \"{}\"", START_TIME, cell(self.start_time)))?;
        let end_time = parse_trip_timestamp(cell(self.end_time))
            .ok_or_else(|| format!("invalid {} \"{}\"", END_TIME, cell(self.end_time)))?;

        let trip_duration = cell(self.trip_duration)
            .parse::<f64>()
            .ok()
            .filter(|d| d.is_finite())
            .ok_or_else(|| {
                format!(
                    "invalid {} \"{}\"",
                    TRIP_DURATION,
                    cell(self.trip_duration)
                )
            })?;

        let birth_year = match self.birth_year.map(cell) {
            Some(raw) => parse_birth_year(raw)
                .map_err(|_| format!("invalid {} \"{}\"", BIRTH_YEAR, raw))?,
            None => None,
        };

        Ok(TripRecord {
            start_time,
            end_time,
            trip_duration,
            start_station: cell(self.start_station).to_string(),
            end_station: cell(self.end_station).to_string(),
            user_type: non_blank(cell(self.user_type)),
            gender: self.gender.map(cell).and_then(non_blank),
            birth_year,
            month: month_of(&start_time),
            weekday: weekday_of(&start_time),
            start_hour: hour_of(&start_time),
            raw: row.iter().map(str::to_string).collect(),
        })
    }
}

/// `None` for blank cells.
fn non_blank(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Birth years are written either as `1989` or `1989.0`; blank means unknown.
fn parse_birth_year(s: &str) -> Result<Option<i32>, ()> {
    if s.is_empty() {
        return Ok(None);
    }
    if let Ok(year) = s.parse::<i32>() {
        return Ok(Some(year));
    }
    match s.parse::<f64>() {
        Ok(year) if year.is_finite() && year.fract() == 0.0 => Ok(Some(year as i32)),
        _ => Err(()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
