//! Main loop: a menu dispatching to the journal actions
//!
//! The session owns the log, every action receives it from there.

use chrono::NaiveDate;
use std::io::{self, BufRead, Write};

use crate::cli::{
    args::Config,
    plot::Plotter,
    prompt::{self, Prompter},
    table::Table,
};
use crate::lib::{entry::Log, summary::Calendar};
use crate::load::{self, error};

/// States of the menu loop, `Exit` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    ShowMenu,
    AddEntry,
    ViewLog,
    PlotTrend,
    Exit,
}

const MENU: &str = "\
Mental Health Journal
  1. Add entry
  2. View log
  3. Plot stress trend
  4. Exit";

impl State {
    /// Parse the answer to the menu
    pub fn from_choice(answer: &str) -> Result<Self, String> {
        let choice = answer.trim();
        match choice.parse::<u8>() {
            Ok(1) => Ok(State::AddEntry),
            Ok(2) => Ok(State::ViewLog),
            Ok(3) => Ok(State::PlotTrend),
            Ok(4) => Ok(State::Exit),
            _ => Err(format!(
                "Invalid choice '{}'. Please enter a number from 1 to 4.",
                choice
            )),
        }
    }
}

pub struct Session<R, W> {
    prompter: Prompter<R, W>,
    log: Log,
    config: Config,
    today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

impl<R, W> Session<R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(input: R, output: W, log: Log, config: Config) -> Self {
        Self {
            prompter: Prompter::new(input, output),
            log,
            config,
            today: local_today,
        }
    }

    /// Replace the clock used to date new entries
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn log(&self) -> &Log {
        &self.log
    }

    /// Run until the user exits or input is closed
    pub fn run(&mut self) -> io::Result<()> {
        let mut state = State::ShowMenu;
        loop {
            tracing::debug!(?state, "menu transition");
            state = match state {
                State::ShowMenu => self.show_menu()?,
                State::AddEntry => {
                    self.add_entry()?;
                    State::ShowMenu
                }
                State::ViewLog => {
                    self.view_log()?;
                    State::ShowMenu
                }
                State::PlotTrend => {
                    self.plot_trend()?;
                    State::ShowMenu
                }
                State::Exit => break,
            };
        }
        writeln!(self.prompter.output(), "Goodbye!")
    }

    fn show_menu(&mut self) -> io::Result<State> {
        writeln!(self.prompter.output(), "\n{}", MENU)?;
        let answer = match self.prompter.try_ask("Choose an option (1-4): ")? {
            Some(answer) => answer,
            None => {
                writeln!(self.prompter.output())?;
                return Ok(State::Exit);
            }
        };
        match State::from_choice(&answer) {
            Ok(state) => Ok(state),
            Err(msg) => {
                writeln!(self.prompter.output(), "{}", msg)?;
                Ok(State::ShowMenu)
            }
        }
    }

    fn add_entry(&mut self) -> io::Result<()> {
        let entry = match prompt::build_entry(&mut self.prompter, (self.today)()) {
            Ok(entry) => entry,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                writeln!(self.prompter.output(), "\nInput closed, entry discarded.")?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        self.log.push(entry);
        match load::save(&self.config.journal, &self.log) {
            Ok(()) => writeln!(self.prompter.output(), "Entry saved."),
            Err(e) => {
                tracing::warn!(error = %e, "could not save journal");
                let mut errs = error::Record::new();
                errs.warning("Entry not saved")
                    .text(format!("Could not write '{}': {}", self.config.journal, e))
                    .hint("the entry is kept in memory and saved again with the next one");
                write!(self.prompter.output(), "{}", errs)
            }
        }
    }

    fn view_log(&mut self) -> io::Result<()> {
        write!(self.prompter.output(), "{}", Table::from(&self.log))
    }

    fn plot_trend(&mut self) -> io::Result<()> {
        let calendar = match Calendar::weekly(&self.log) {
            Ok(calendar) => calendar,
            Err(insufficient) => {
                return writeln!(self.prompter.output(), "{}", insufficient);
            }
        };
        let out = self.prompter.output();
        writeln!(out, "Weekly average stress:")?;
        for sum in calendar.contents() {
            let mean = match sum.mean() {
                Some(mean) => format!("{:.2}", mean),
                None => String::from("-"),
            };
            writeln!(
                out,
                "  {}  {:>4}  ({} entr{})",
                sum.week(),
                mean,
                sum.entries(),
                if sum.entries() == 1 { "y" } else { "ies" },
            )?;
        }
        match Plotter::from(&calendar).save(&self.config.chart) {
            Ok(()) => writeln!(out, "Chart saved to '{}'.", self.config.chart),
            Err(e) => {
                tracing::warn!(error = %e, "could not render chart");
                let mut errs = error::Record::new();
                errs.warning("Chart not rendered")
                    .text(format!("Could not write '{}': {}", self.config.chart, e))
                    .hint("choose another location with --chart");
                write!(out, "{}", errs)
            }
        }
    }
}
