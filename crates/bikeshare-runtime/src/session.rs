//! The interactive explore loop and its one-shot counterpart.
//!
//! Each iteration asks for a city, month and weekday, runs the analysis,
//! prints the four reports, offers raw rows page by page and finally asks
//! whether to start over. End of input at any prompt ends the session.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{City, DayFilter, FilterSpec, MonthFilter};
use bikeshare_data::analysis::{analyze, Analysis, Outcome};
use bikeshare_ui::report_view::{render_report, separator, GREETING, NO_RECORDS};
use bikeshare_ui::table_view::render_rows;
use bikeshare_ui::themes::Theme;
use serde_json::json;
use tracing::{debug, error, info};

use crate::pager::RowPager;
use crate::prompt::Prompter;

const CITY_HINT: &str = r#"(Possible options "Chicago", "New York City" or "Washington")"#;
const ALL_HINT: &str = r#"or "all" for no filter"#;
const RESTART_PROMPT: &str = "\nWould you like to restart? Enter yes or no.\n";

fn display_prompt(page_size: usize) -> String {
    format!(
        "\nWould you like to display {} records of the data? Enter yes or no.\n",
        page_size
    )
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Interactive session over any line reader and writer.
pub struct Session<R, W> {
    prompter: Prompter<R, W>,
    data_dir: PathBuf,
    page_size: usize,
    theme: Theme,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(
        input: R,
        output: W,
        data_dir: impl Into<PathBuf>,
        page_size: usize,
        theme: Theme,
    ) -> Self {
        Self {
            prompter: Prompter::new(input, output),
            data_dir: data_dir.into(),
            page_size: page_size.max(1),
            theme,
        }
    }

    /// Run until the user declines to restart or input ends.
    ///
    /// Returns the number of iterations that got as far as the analysis.
    /// Data-load failures are reported and count as an iteration; any other
    /// error aborts the session.
    pub fn run(&mut self) -> Result<usize> {
        let mut iterations = 0;
        loop {
            self.prompter.say(GREETING)?;
            let Some(spec) = self.get_filters()? else {
                debug!("Input ended before filters were complete");
                break;
            };
            self.prompter.say(&separator())?;

            iterations += 1;
            match analyze(&self.data_dir, &spec) {
                Ok(analysis) => self.present(&analysis)?,
                Err(BikeshareError::DataLoad(e)) => {
                    error!("Failed to load {}: {}", spec.city, e);
                    let line = self.theme.paint(self.theme.error, &e.to_string());
                    self.prompter.say(&line)?;
                }
                Err(e) => return Err(e),
            }

            if !self.prompter.confirm(RESTART_PROMPT)? {
                break;
            }
        }
        info!("Session ended after {} iteration(s)", iterations);
        Ok(iterations)
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    // ── Private implementation ────────────────────────────────────────────

    /// Ask for city, month and weekday. `None` when input ends.
    fn get_filters(&mut self) -> Result<Option<FilterSpec>> {
        let Some(city) = self
            .prompter
            .ask_until_valid("city", CITY_HINT, |s| s.parse::<City>())?
        else {
            return Ok(None);
        };
        let Some(month) = self
            .prompter
            .ask_until_valid("month name", ALL_HINT, |s| s.parse::<MonthFilter>())?
        else {
            return Ok(None);
        };
        let Some(day) = self
            .prompter
            .ask_until_valid("week day", ALL_HINT, |s| s.parse::<DayFilter>())?
        else {
            return Ok(None);
        };
        Ok(Some(FilterSpec { city, month, day }))
    }

    fn present(&mut self, analysis: &Analysis) -> Result<()> {
        match &analysis.outcome {
            Outcome::NoRecords => {
                let line = self.theme.paint(self.theme.warning, NO_RECORDS);
                self.prompter.say(&line)?;
            }
            Outcome::Report(report) => {
                let text = render_report(report, &self.theme);
                self.prompter.say(&text)?;
                self.display_rows(analysis)?;
            }
        }
        Ok(())
    }

    /// Offer the filtered rows a page at a time while any remain.
    fn display_rows(&mut self, analysis: &Analysis) -> Result<()> {
        let mut pager = RowPager::new(analysis.dataset.records(), self.page_size);
        let question = display_prompt(pager.page_size());
        while !pager.is_exhausted() {
            if !self.prompter.confirm(&question)? {
                break;
            }
            if let Some(page) = pager.next() {
                let table = render_rows(&analysis.schema, page, &self.theme);
                self.prompter.say(&table)?;
            }
        }
        debug!("{} row(s) left undisplayed", pager.remaining());
        Ok(())
    }
}

// ── One-shot mode ─────────────────────────────────────────────────────────────

/// Analyse one request and write the result to `out`, as text or JSON.
///
/// No prompts and no raw rows. Load errors are returned to the caller.
pub fn run_once<W: Write>(
    data_dir: &Path,
    spec: &FilterSpec,
    as_json: bool,
    theme: &Theme,
    out: &mut W,
) -> Result<()> {
    let analysis = analyze(data_dir, spec)?;

    if as_json {
        let applied = &analysis.spec;
        let value = json!({
            "filters": {
                "city": applied.city.as_str(),
                "month": applied.month.to_string(),
                "day": applied.day.to_string(),
            },
            "loaded_trips": analysis.loaded_trips,
            "matched_trips": analysis.dataset.len(),
            "report": analysis.report(),
        });
        serde_json::to_writer_pretty(&mut *out, &value)?;
        writeln!(out)?;
        return Ok(());
    }

    match analysis.report() {
        Some(report) => writeln!(out, "{}", render_report(report, theme))?,
        None => writeln!(out, "{}", theme.paint(theme.warning, NO_RECORDS))?,
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    const WASHINGTON_ROWS: &[&str] = &[
        ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type",
        "1,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber",
        "2,2017-03-11 10:34:11,2017-03-11 10:56:47,1355.0,Lincoln Memorial,Jefferson Memorial,Customer",
        "3,2017-03-15 17:01:00,2017-03-15 17:11:00,600.0,Lincoln Memorial,Jefferson Memorial,Subscriber",
        "4,2017-03-18 09:00:00,2017-03-18 09:05:00,300.0,Lincoln Memorial,15th & K St NW,Subscriber",
        "5,2017-03-25 12:00:00,2017-03-25 12:20:00,1200.0,14th & Belmont St NW,Lincoln Memorial,Customer",
        "6,2017-04-01 07:30:00,2017-04-01 07:40:00,600.0,Lincoln Memorial,Jefferson Memorial,Subscriber",
        "7,2017-04-02 08:00:00,2017-04-02 08:10:00,600.0,15th & K St NW,Lincoln Memorial,Subscriber",
    ];

    fn data_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let body = WASHINGTON_ROWS.join("\n") + "\n";
        std::fs::write(dir.path().join("washington.csv"), body).unwrap();
        dir
    }

    fn run_session(dir: &TempDir, input: &str, page_size: usize) -> (usize, String) {
        let mut session = Session::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            dir.path(),
            page_size,
            Theme::plain(),
        );
        let iterations = session.run().unwrap();
        let out = String::from_utf8(session.into_output()).unwrap();
        (iterations, out)
    }

    // ── Session ───────────────────────────────────────────────────────────────

    #[test]
    fn test_session_single_iteration() {
        let dir = data_dir();
        let (iterations, out) = run_session(&dir, "washington\nall\nall\nno\nno\n", 5);

        assert_eq!(iterations, 1);
        assert!(out.starts_with(GREETING));
        assert!(out.contains("Calculating The Most Frequent Times of Travel..."));
        assert!(out.contains("Calculating User Stats..."));
        assert!(out.contains("No gender info for this city"));
        assert!(out.contains("Would you like to display 5 records of the data? Enter yes or no."));
        assert!(out.contains("Would you like to restart? Enter yes or no."));
        assert!(!out.contains("Trip Duration  "));
    }

    #[test]
    fn test_session_reprompts_invalid_input() {
        let dir = data_dir();
        let input = "boston\nwashington\nmarc\nmarch\nsat\nsaturday\nno\nno\n";
        let (iterations, out) = run_session(&dir, input, 5);

        assert_eq!(iterations, 1);
        assert_eq!(out.matches("Invalid city input ..").count(), 1);
        assert_eq!(out.matches("Invalid month name input ..").count(), 1);
        assert_eq!(out.matches("Invalid week day input ..").count(), 1);
        assert!(out.contains(
            "Please enter city (Possible options \"Chicago\", \"New York City\" or \"Washington\"): "
        ));
        assert!(out.contains("Please enter month name or \"all\" for no filter: "));
        assert!(out.contains("Please enter week day or \"all\" for no filter: "));
    }

    #[test]
    fn test_session_pages_until_rows_run_out() {
        let dir = data_dir();
        // 7 rows at 3 per page: three pages, then no further display prompt.
        let (_, out) = run_session(&dir, "washington\nall\nall\nyes\nyes\nyes\nno\n", 3);

        let question = "Would you like to display 3 records of the data? Enter yes or no.";
        assert_eq!(out.matches(question).count(), 3);
        assert_eq!(out.matches("Start Time").count(), 3);
        let last_row = out
            .lines()
            .find(|l| l.contains("2017-04-02 08:00:00"))
            .unwrap();
        assert!(last_row.trim_start().starts_with("7 "));
    }

    #[test]
    fn test_session_no_records_skips_display() {
        let dir = data_dir();
        let (_, out) = run_session(&dir, "washington\ndecember\nall\nno\n", 5);

        assert!(out.contains(NO_RECORDS));
        assert!(!out.contains("Calculating"));
        assert!(!out.contains("Would you like to display"));
        assert!(out.contains("Would you like to restart?"));
    }

    #[test]
    fn test_session_restart_runs_again() {
        let dir = data_dir();
        let input = "washington\nmarch\nall\nno\nyes\nwashington\napril\nsunday\nno\nno\n";
        let (iterations, out) = run_session(&dir, input, 5);

        assert_eq!(iterations, 2);
        assert_eq!(out.matches(GREETING).count(), 2);
    }

    #[test]
    fn test_session_missing_file_goes_to_restart_prompt() {
        let dir = data_dir();
        let (iterations, out) = run_session(&dir, "chicago\nall\nall\nno\n", 5);

        assert_eq!(iterations, 1);
        assert!(out.contains("Data file not found"));
        assert!(out.contains("Would you like to restart?"));
    }

    #[test]
    fn test_session_eof_mid_filters_ends_cleanly() {
        let dir = data_dir();
        let (iterations, out) = run_session(&dir, "washington\n", 5);

        assert_eq!(iterations, 0);
        assert!(!out.contains("Calculating"));
    }

    // ── run_once ──────────────────────────────────────────────────────────────

    #[test]
    fn test_run_once_text() {
        let dir = data_dir();
        let spec = FilterSpec::parse("washington", "march", "all").unwrap();
        let mut out = Vec::new();
        run_once(dir.path(), &spec, false, &Theme::plain(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Most Common Month: march"));
        assert!(!text.contains("Would you like"));
    }

    #[test]
    fn test_run_once_json() {
        let dir = data_dir();
        let spec = FilterSpec::parse("washington", "march", "all").unwrap();
        let mut out = Vec::new();
        run_once(dir.path(), &spec, true, &Theme::plain(), &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["filters"]["city"], "washington");
        assert_eq!(value["filters"]["month"], "march");
        assert_eq!(value["loaded_trips"], 7);
        assert_eq!(value["matched_trips"], 4);
        assert_eq!(value["report"]["time"]["most_common_month"], "march");
        assert_eq!(value["report"]["users"]["genders"]["status"], "absent");
    }

    #[test]
    fn test_run_once_json_no_records_has_null_report() {
        let dir = data_dir();
        let spec = FilterSpec::parse("washington", "december", "all").unwrap();
        let mut out = Vec::new();
        run_once(dir.path(), &spec, true, &Theme::plain(), &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert!(value["report"].is_null());
        assert_eq!(value["matched_trips"], 0);
    }

    #[test]
    fn test_run_once_missing_file_is_error() {
        let dir = data_dir();
        let spec = FilterSpec::parse("chicago", "all", "all").unwrap();
        let mut out = Vec::new();
        let err = run_once(dir.path(), &spec, false, &Theme::plain(), &mut out).unwrap_err();
        assert!(matches!(err, BikeshareError::DataLoad(_)));
    }
}
