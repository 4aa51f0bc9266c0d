use chrono::{Datelike, Month, NaiveDateTime, Timelike, Weekday};

// ── Calendar names ────────────────────────────────────────────────────────────

/// Lowercase full month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Lowercase full weekday names, Monday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Lowercase full name of `month`, e.g. `"march"`.
pub fn month_name(month: Month) -> &'static str {
    MONTH_NAMES[month.number_from_month() as usize - 1]
}

/// Lowercase full name of `weekday`, e.g. `"monday"`.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAY_NAMES[weekday.num_days_from_monday() as usize]
}

/// Parse a month name, accepting it only when formatting the parsed month
/// back yields the same lowercase text.
///
/// Abbreviations such as `"jan"` parse in chrono but fail the round trip.
///
/// ```
/// use bikeshare_core::time_utils::parse_month_name;
/// use chrono::Month;
///
/// assert_eq!(parse_month_name("March"), Some(Month::March));
/// assert_eq!(parse_month_name("mar"), None);
/// assert_eq!(parse_month_name("smarch"), None);
/// ```
pub fn parse_month_name(s: &str) -> Option<Month> {
    let lowered = s.trim().to_lowercase();
    let month = lowered.parse::<Month>().ok()?;
    (month_name(month) == lowered).then_some(month)
}

/// Parse a weekday name with the same round-trip rule as
/// [`parse_month_name`].
pub fn parse_weekday_name(s: &str) -> Option<Weekday> {
    let lowered = s.trim().to_lowercase();
    let weekday = lowered.parse::<Weekday>().ok()?;
    (weekday_name(weekday) == lowered).then_some(weekday)
}

// ── Timestamp parsing ─────────────────────────────────────────────────────────

/// Formats accepted for the `Start Time` / `End Time` columns.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a trip timestamp. The files carry local wall-clock times with no
/// offset, so the result is naive.
///
/// Returns `None` for empty strings or unrecognised formats.
pub fn parse_trip_timestamp(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
}

// ── Derived keys ──────────────────────────────────────────────────────────────

/// Calendar month of a timestamp.
pub fn month_of(ts: &NaiveDateTime) -> Month {
    MONTHS[ts.month0() as usize]
}

/// Day of week of a timestamp.
pub fn weekday_of(ts: &NaiveDateTime) -> Weekday {
    ts.weekday()
}

/// Hour-of-day (0–23) of a timestamp.
pub fn hour_of(ts: &NaiveDateTime) -> u32 {
    ts.hour()
}

/// Serde helpers that write months and weekdays as lowercase names.
pub mod serde_names {
    use chrono::{Month, Weekday};
    use serde::Serializer;

    pub fn month<S: Serializer>(month: &Month, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(super::month_name(*month))
    }

    pub fn weekday<S: Serializer>(weekday: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(super::weekday_name(*weekday))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
