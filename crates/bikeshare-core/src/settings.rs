use clap::Parser;
use std::path::PathBuf;

use crate::error::InvalidFilterError;
use crate::models::{City, DayFilter, FilterSpec, MonthFilter};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Explore US bikeshare trip data
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bikeshare",
    about = "Explore US bikeshare trip data",
    version
)]
pub struct Settings {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, env = "BIKESHARE_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// City to analyse; skips the interactive prompts
    #[arg(long, ignore_case = true, value_parser = ["chicago", "new york city", "washington"])]
    pub city: Option<String>,

    /// Month filter used with --city
    #[arg(long, default_value = "all")]
    pub month: String,

    /// Weekday filter used with --city
    #[arg(long, default_value = "all")]
    pub day: String,

    /// Raw records shown per page (1-100)
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u16).range(1..=100))]
    pub page_size: u16,

    /// Print the report as JSON (requires --city)
    #[arg(long, requires = "city")]
    pub json: bool,

    /// Disable coloured headings
    #[arg(long)]
    pub no_color: bool,

    /// Logging level
    #[arg(
        long,
        default_value = "WARNING",
        value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"]
    )]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::load_from(std::env::args_os())
    }

    /// Same as [`Settings::load`] but with an explicit argument list.
    pub fn load_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// The one-shot filter request, when `--city` was given.
    ///
    /// Returns `Ok(None)` in interactive mode.
    pub fn filter_spec(&self) -> Result<Option<FilterSpec>, InvalidFilterError> {
        let Some(city) = self.city.as_deref() else {
            return Ok(None);
        };
        Ok(Some(FilterSpec {
            city: city.parse::<City>()?,
            month: self.month.parse::<MonthFilter>()?,
            day: self.day.parse::<DayFilter>()?,
        }))
    }

    /// Page size as a `usize`.
    pub fn page_size(&self) -> usize {
        usize::from(self.page_size)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Month, Weekday};

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::load_from(["bikeshare"]);

        assert_eq!(settings.data_dir, PathBuf::from("."));
        assert!(settings.city.is_none());
        assert_eq!(settings.month, "all");
        assert_eq!(settings.day, "all");
        assert_eq!(settings.page_size(), 5);
        assert!(!settings.json);
        assert!(!settings.no_color);
        assert_eq!(settings.log_level, "WARNING");
        assert!(settings.log_file.is_none());
        assert!(!settings.debug);
    }

    #[test]
    fn test_settings_debug_overrides_log_level() {
        let settings = Settings::load_from(["bikeshare", "--debug"]);
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_settings_one_shot_filter_spec() {
        let settings = Settings::load_from([
            "bikeshare",
            "--city",
            "new york city",
            "--month",
            "February",
            "--day",
            "tuesday",
        ]);
        let spec = settings.filter_spec().unwrap().unwrap();
        assert_eq!(spec.city, City::NewYorkCity);
        assert_eq!(spec.month, MonthFilter::Only(Month::February));
        assert_eq!(spec.day, DayFilter::Only(Weekday::Tue));
    }

    #[test]
    fn test_settings_interactive_has_no_filter_spec() {
        let settings = Settings::load_from(["bikeshare", "--data-dir", "/srv/bikeshare"]);
        assert_eq!(settings.filter_spec().unwrap(), None);
        assert_eq!(settings.data_dir, PathBuf::from("/srv/bikeshare"));
    }

    #[test]
    fn test_settings_invalid_month_rejected_by_filter_spec() {
        let settings = Settings::load_from(["bikeshare", "--city", "chicago", "--month", "jan"]);
        assert_eq!(
            settings.filter_spec().unwrap_err(),
            InvalidFilterError::Month("jan".to_string())
        );
    }

    #[test]
    fn test_settings_rejects_unknown_city() {
        let result = Settings::try_parse_from(["bikeshare", "--city", "boston"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_page_size_range() {
        assert!(Settings::try_parse_from(["bikeshare", "--page-size", "0"]).is_err());
        assert!(Settings::try_parse_from(["bikeshare", "--page-size", "101"]).is_err());
        let settings = Settings::load_from(["bikeshare", "--page-size", "10"]);
        assert_eq!(settings.page_size(), 10);
    }

    #[test]
    fn test_settings_json_requires_city() {
        assert!(Settings::try_parse_from(["bikeshare", "--json"]).is_err());
        assert!(Settings::try_parse_from(["bikeshare", "--json", "--city", "chicago"]).is_ok());
    }

    #[test]
    fn test_settings_log_file() {
        let settings = Settings::load_from(["bikeshare", "--log-file", "/tmp/bikeshare.log"]);
        assert_eq!(
            settings.log_file,
            Some(PathBuf::from("/tmp/bikeshare.log"))
        );
    }
}
