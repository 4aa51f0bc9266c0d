//! Plain-text rendering of the four trip reports.
//!
//! Every section has the same frame: a blank line, the heading, a blank line,
//! the values, the time the computation took and a 40-column rule.

use bikeshare_core::formatting::{format_count, format_duration, format_number};
use bikeshare_core::time_utils::{month_name, weekday_name};
use bikeshare_data::reporters::{
    ColumnReport, DurationStats, StationStats, Timed, TimeStats, TripReport, UserStats,
};
use comfy_table::{Cell, CellAlignment};

use crate::table_view::{borderless_table, emphasised, table_lines};
use crate::themes::Theme;

pub const GREETING: &str = "Hello! Let's explore some US bikeshare data!";
pub const NO_RECORDS: &str = "Your specified filters yielded no records";

/// Shown for a station value when every selected trip left it blank.
const NOT_RECORDED: &str = "not recorded";

/// The 40-column `-` rule printed between sections.
pub fn separator() -> String {
    "-".repeat(40)
}

// ── Sections ──────────────────────────────────────────────────────────────────

pub fn render_time_stats(section: &Timed<TimeStats>, theme: &Theme) -> Vec<String> {
    let stats = &section.stats;
    framed(
        "Calculating The Most Frequent Times of Travel...",
        vec![
            field(theme, "Most Common Month", month_name(stats.most_common_month)),
            field(theme, "Most Common Weekday", weekday_name(stats.most_common_weekday)),
            field(
                theme,
                "Most Common Start Hour",
                &stats.most_common_start_hour.to_string(),
            ),
        ],
        section,
        theme,
    )
}

pub fn render_station_stats(section: &Timed<StationStats>, theme: &Theme) -> Vec<String> {
    let stats = &section.stats;
    let trip = match &stats.most_common_trip {
        Some(trip) => format!(
            "{} ({} trips)",
            trip,
            format_count(stats.most_common_trip_count)
        ),
        None => NOT_RECORDED.to_string(),
    };
    let start = stats.most_common_start_station.as_deref();
    let end = stats.most_common_end_station.as_deref();
    framed(
        "Calculating The Most Popular Stations and Trip...",
        vec![
            field(
                theme,
                "Most Commonly Used Start Station",
                start.unwrap_or(NOT_RECORDED),
            ),
            field(
                theme,
                "Most Commonly Used End Station",
                end.unwrap_or(NOT_RECORDED),
            ),
            field(theme, "Most Frequent Combination Trip", &trip),
        ],
        section,
        theme,
    )
}

pub fn render_duration_stats(section: &Timed<DurationStats>, theme: &Theme) -> Vec<String> {
    let stats = &section.stats;
    let total = format!(
        "{} seconds ({})",
        format_number(stats.total_seconds, 0),
        format_duration(stats.total_seconds)
    );
    let mean = format!(
        "{} seconds ({})",
        format_number(stats.mean_seconds, 2),
        format_duration(stats.mean_seconds)
    );
    framed(
        "Calculating Trip Duration...",
        vec![
            field(theme, "Total travel time", &total),
            field(theme, "Mean travel time", &mean),
        ],
        section,
        theme,
    )
}

pub fn render_user_stats(section: &Timed<UserStats>, theme: &Theme) -> Vec<String> {
    let stats = &section.stats;
    let mut body = vec![theme.paint(theme.label, "User Type Counts:")];
    body.extend(render_counts(&stats.user_types, theme));
    body.push(String::new());

    match &stats.genders {
        ColumnReport::Present(counts) => {
            body.push(theme.paint(theme.label, "Gender Counts:"));
            body.extend(render_counts(counts, theme));
            body.push(String::new());
        }
        ColumnReport::NoValues => body.push(theme.paint(
            theme.warning,
            "No gender recorded for the selected trips",
        )),
        ColumnReport::Absent => {
            body.push(theme.paint(theme.warning, "No gender info for this city"))
        }
    }

    match &stats.birth_years {
        ColumnReport::Present(years) => {
            body.push(field(theme, "Earliest Birth Year is", &years.earliest.to_string()));
            body.push(field(
                theme,
                "Most Recent Birth Year is",
                &years.most_recent.to_string(),
            ));
            body.push(field(
                theme,
                "Most Common Birth Year is",
                &years.most_common.to_string(),
            ));
        }
        ColumnReport::NoValues => body.push(theme.paint(
            theme.warning,
            "No birth year recorded for the selected trips",
        )),
        ColumnReport::Absent => {
            body.push(theme.paint(theme.warning, "No birthyear info for this city"))
        }
    }

    framed("Calculating User Stats...", body, section, theme)
}

/// All four sections, in the order they are printed.
pub fn render_report(report: &TripReport, theme: &Theme) -> String {
    let mut lines = render_time_stats(&report.time, theme);
    lines.extend(render_station_stats(&report.stations, theme));
    lines.extend(render_duration_stats(&report.durations, theme));
    lines.extend(render_user_stats(&report.users, theme));
    lines.join("\n")
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn field(theme: &Theme, label: &str, value: &str) -> String {
    format!(
        "{} {}",
        theme.paint(theme.label, &format!("{}:", label)),
        theme.paint(theme.value, value)
    )
}

/// Value / count pairs with counts right-aligned in one column.
fn render_counts(counts: &[(String, usize)], theme: &Theme) -> Vec<String> {
    let mut table = borderless_table(theme);
    for (name, count) in counts {
        table.add_row(vec![
            Cell::new(name),
            emphasised(Cell::new(format_count(*count)), theme),
        ]);
    }
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table_lines(&table)
        .into_iter()
        .map(|line| format!(" {}", line))
        .collect()
}

fn framed<T>(heading: &str, body: Vec<String>, section: &Timed<T>, theme: &Theme) -> Vec<String> {
    let mut lines = Vec::with_capacity(body.len() + 6);
    lines.push(String::new());
    lines.push(theme.paint(theme.heading, heading));
    lines.push(String::new());
    lines.extend(body);
    lines.push(String::new());
    lines.push(theme.paint(
        theme.dim,
        &format!("This took {:.6} seconds.", section.elapsed.as_secs_f64()),
    ));
    lines.push(separator());
    lines
}

// ── Tests ─────────────────────────────────────────────────────────────────────
