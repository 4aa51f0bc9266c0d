//! Line-oriented prompts over any reader / writer pair.
//!
//! End of input is reported as `None` so the session can wind down cleanly
//! instead of spinning on an exhausted stdin.

use std::io::{self, BufRead, Write};

use tracing::debug;

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write `text` followed by a newline.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Show `question` and read one line, trimmed and lowercased.
    ///
    /// Returns `Ok(None)` at end of input.
    pub fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("Input closed while waiting for an answer");
            return Ok(None);
        }
        Ok(Some(line.trim().to_lowercase()))
    }

    /// Keep asking for `input_name` until `parse` accepts the answer.
    ///
    /// Each rejection prints `Invalid <input_name> input ..`.
    pub fn ask_until_valid<T, E>(
        &mut self,
        input_name: &str,
        hint: &str,
        parse: impl Fn(&str) -> Result<T, E>,
    ) -> io::Result<Option<T>> {
        let question = format!("Please enter {} {}: ", input_name, hint);
        loop {
            let Some(answer) = self.ask(&question)? else {
                return Ok(None);
            };
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(_) => {
                    debug!("Rejected {} input {:?}", input_name, answer);
                    self.say(&format!("Invalid {} input ..", input_name))?;
                }
            }
        }
    }

    /// Ask a yes/no question. Only `yes` counts as yes; end of input is no.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        Ok(self.ask(question)?.as_deref() == Some("yes"))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
