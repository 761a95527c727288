// src/search/session.rs

use std::io::{BufRead, Write};

use crate::db::PropertyStore;
use crate::domain::property::PropertyRecord;
use crate::errors::AppResult;
use crate::output::{OutputFormat, ResultRenderer};
use crate::search::collector::collect_filters;
use crate::search::query::{build_query, RawFilter};
use crate::search::{prompt, read_line};

pub const WELCOME: &str = "Welcome to the property CLI!";
pub const REPEAT_PROMPT: &str = "Do you want to perform another search? (Y/N): ";
pub const REPEAT_GUIDANCE: &str = "You have to type Y or N (lowercase is accepted).";
pub const FAREWELL: &str = "Goodbye!";

#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub format: OutputFormat,
    /// Echo each built query before running it.
    pub show_query: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            show_query: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Prompting,
    AskingRepeat,
}

/// Answer to the repeat question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatAnswer {
    Another,
    Stop,
}

impl RepeatAnswer {
    /// `Y`/`N`, case-insensitive. Anything else is `None`.
    pub fn parse(answer: &str) -> Option<Self> {
        match answer.trim() {
            a if a.eq_ignore_ascii_case("y") => Some(RepeatAnswer::Another),
            a if a.eq_ignore_ascii_case("n") => Some(RepeatAnswer::Stop),
            _ => None,
        }
    }
}

/// Drives prompt → query → render cycles until the user says no.
pub struct Session<'a, R, W> {
    store: &'a dyn PropertyStore,
    input: R,
    output: W,
    options: SessionOptions,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(store: &'a dyn PropertyStore, input: R, output: W, options: SessionOptions) -> Self {
        Self {
            store,
            input,
            output,
            options,
        }
    }

    /// Runs the session to completion and returns how many searches ran.
    ///
    /// A failed search is reported and the user is asked whether to go on.
    /// Only fatal errors (see `AppError::is_fatal`) are returned.
    pub fn run(&mut self) -> AppResult<usize> {
        let mut searches = 0;
        let mut state = SessionState::Prompting;

        loop {
            state = match state {
                SessionState::Prompting => {
                    writeln!(self.output, "{WELCOME}")?;
                    let Some(filters) = collect_filters(&mut self.input, &mut self.output)? else {
                        break;
                    };

                    if let Err(e) = self.search(&filters) {
                        if e.is_fatal() {
                            return Err(e);
                        }
                        tracing::warn!(error = %e, "search failed");
                        writeln!(self.output, "Search failed: {e}")?;
                    }
                    searches += 1;
                    SessionState::AskingRepeat
                }
                SessionState::AskingRepeat => match self.ask_repeat()? {
                    RepeatAnswer::Another => SessionState::Prompting,
                    RepeatAnswer::Stop => break,
                },
            };
        }

        writeln!(self.output, "{FAREWELL}")?;
        Ok(searches)
    }

    /// Builds, runs and renders one search. Returns the number of rows shown.
    fn search(&mut self, filters: &[RawFilter]) -> AppResult<usize> {
        let query = build_query(filters)?;
        if self.options.show_query {
            writeln!(self.output, "{query}")?;
        }

        let mut renderer = ResultRenderer::new(self.options.format);
        let rows = self
            .store
            .for_each_property(&query, &mut |record: PropertyRecord| renderer.push(&record))?;
        renderer.finish(&mut self.output)?;

        tracing::info!(rows, "search completed");
        Ok(rows)
    }

    /// Asks whether to search again. One invalid answer earns a single
    /// re-read. If that is invalid too, anything other than `N` continues.
    /// End of input counts as `N`.
    fn ask_repeat(&mut self) -> AppResult<RepeatAnswer> {
        prompt(&mut self.output, REPEAT_PROMPT)?;
        let Some(first) = read_line(&mut self.input)? else {
            return Ok(RepeatAnswer::Stop);
        };
        if let Some(answer) = RepeatAnswer::parse(&first) {
            return Ok(answer);
        }

        writeln!(self.output, "{REPEAT_GUIDANCE}")?;
        let Some(second) = read_line(&mut self.input)? else {
            return Ok(RepeatAnswer::Stop);
        };
        Ok(RepeatAnswer::parse(&second).unwrap_or(RepeatAnswer::Another))
    }
}
