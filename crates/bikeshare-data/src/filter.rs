//! Month / weekday filtering over a loaded [`Dataset`].

use bikeshare_core::models::{DayFilter, Dataset, FilterSpec, MonthFilter, TripRecord};
use tracing::debug;

/// Keep only the trips whose derived month and weekday satisfy both filters.
///
/// Row order is preserved. An empty result is a normal outcome.
pub fn filter_dataset(dataset: Dataset, month: MonthFilter, day: DayFilter) -> Dataset {
    if month == MonthFilter::All && day == DayFilter::All {
        return dataset;
    }

    let before = dataset.len();
    let filtered: Dataset = dataset
        .into_records()
        .into_iter()
        .filter(|trip| matches(trip, month, day))
        .collect();

    debug!(
        "Filter month={} day={} kept {} of {} trips",
        month,
        day,
        filtered.len(),
        before
    );
    filtered
}

/// Apply the month and weekday parts of `spec`.
pub fn apply_spec(dataset: Dataset, spec: &FilterSpec) -> Dataset {
    filter_dataset(dataset, spec.month, spec.day)
}

/// Whether a single trip passes both filters.
pub fn matches(trip: &TripRecord, month: MonthFilter, day: DayFilter) -> bool {
    month.matches(trip.month) && day.matches(trip.weekday)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
