//! Diagnostics for the journal file
//!
//! Each `Report` is a labelled list of parts: excerpts of the file (laid out
//! by pest), plain notes and hints. A `Record` gathers the reports of one
//! load and decides whether the journal can be used.
//!
//! ```txt
//! --> Warning: Inconsistent weekday
//!  |     --> mental_health_log.csv:2:12
//!  |      |
//!  |    2 | 2024-03-05,Monday,March,Calm,,2,
//!  |      |            ^----^
//!  |      |
//!  |      = provided here
//!  |  2024-03-05 is in Tuesday, not Monday
//!  |      ? hint: the weekday is recomputed from the date
//! ```

use std::fmt;

use crate::load::parse::Rule;

/// File name and the span of that file a report points to
pub type Loc<'i> = (&'i str, pest::Span<'i>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    /// the entries read are still usable
    Warning,
    /// the journal must not be used, nor overwritten
    Error,
}

impl Severity {
    fn color(self) -> &'static str {
        match self {
            Severity::Warning => YELLOW,
            Severity::Error => RED,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

#[derive(Debug)]
enum Part {
    Excerpt(pest::error::Error<Rule>),
    Note(String),
    Hint(String),
}

/// One diagnostic, built by chaining `span`, `text` and `hint`
///
/// Messages are expected to fit on a single line.
#[must_use]
#[derive(Debug)]
pub struct Report {
    severity: Severity,
    label: String,
    parts: Vec<Part>,
}

/// Every report emitted while loading or saving a journal
#[must_use]
#[derive(Debug, Default)]
pub struct Record {
    reports: Vec<Report>,
}

impl Report {
    fn new(severity: Severity, label: String) -> Self {
        Self {
            severity,
            label,
            parts: Vec::new(),
        }
    }

    /// Attach a syntax error produced by the grammar
    pub fn failure(&mut self, err: pest::error::Error<Rule>) -> &mut Self {
        self.parts.push(Part::Excerpt(err.renamed_rules(describe_rule)));
        self
    }

    /// Show the excerpt at `loc`, annotated with `msg`
    pub fn span<S>(&mut self, loc: &Loc, msg: S) -> &mut Self
    where
        S: ToString,
    {
        let variant = pest::error::ErrorVariant::CustomError {
            message: msg.to_string(),
        };
        let excerpt = pest::error::Error::new_from_span(variant, loc.1.clone()).with_path(loc.0);
        self.parts.push(Part::Excerpt(excerpt));
        self
    }

    pub fn text<S>(&mut self, msg: S) -> &mut Self
    where
        S: ToString,
    {
        self.parts.push(Part::Note(msg.to_string()));
        self
    }

    pub fn hint<S>(&mut self, msg: S) -> &mut Self
    where
        S: ToString,
    {
        self.parts.push(Part::Hint(msg.to_string()));
        self
    }
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, severity: Severity, label: String) -> &mut Report {
        self.reports.push(Report::new(severity, label));
        let last = self.reports.len() - 1;
        &mut self.reports[last]
    }

    /// Start a report that makes the journal unusable
    pub fn error<S>(&mut self, label: S) -> &mut Report
    where
        S: ToString,
    {
        self.push(Severity::Error, label.to_string())
    }

    /// Start a report that leaves the entries usable
    pub fn warning<S>(&mut self, label: S) -> &mut Report
    where
        S: ToString,
    {
        self.push(Severity::Warning, label.to_string())
    }

    fn count(&self, severity: Severity) -> usize {
        self.reports
            .iter()
            .filter(|report| report.severity == severity)
            .count()
    }

    pub fn is_fatal(&self) -> bool {
        self.count_errors() > 0
    }

    pub fn count_errors(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn count_warnings(&self) -> usize {
        self.count(Severity::Warning)
    }
}

const RED: &str = "\x1b[0;91;1m";
const YELLOW: &str = "\x1b[0;93;1m";
const BLUE: &str = "\x1b[0;96;1m";
const WHITE: &str = "\x1b[0;1m";
const NONE: &str = "\x1b[0m";

/// Reports beyond this number are only counted
const SHOWN: usize = 10;

/// Left margin of an excerpt
///
/// Pest indents the `-->` arrow less than the `|` gutter below it. Spaces are
/// consumed from `pad` until the arrow is met, what remains is then used to
/// shift the following lines.
struct Margin {
    pad: String,
    found: bool,
}

impl Margin {
    fn new() -> Self {
        Self {
            pad: String::from("   "),
            found: false,
        }
    }

    fn write_line(&mut self, f: &mut fmt::Formatter<'_>, color: &str, line: &str) -> fmt::Result {
        let shift = if self.found { self.pad.as_str() } else { "" };
        write!(f, " {}|{}  {}", color, shift, BLUE)?;
        for c in line.chars() {
            match c {
                '-' if !self.found => {
                    self.found = true;
                    write!(f, "{}-", self.pad)?;
                }
                ' ' if !self.found => {
                    self.pad.pop();
                    write!(f, " ")?;
                }
                '|' | '=' => write!(f, "{}{}", c, NONE)?,
                '^' => write!(f, "{}^", color)?,
                // visible line ending
                '␊' => (),
                _ => write!(f, "{}", c)?,
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color = self.severity.color();
        writeln!(
            f,
            "{}--> {}:{} {}{}",
            color,
            self.severity.title(),
            WHITE,
            self.label,
            NONE
        )?;
        for part in &self.parts {
            match part {
                Part::Excerpt(err) => {
                    let mut margin = Margin::new();
                    for line in err.to_string().lines() {
                        margin.write_line(f, color, line)?;
                    }
                }
                Part::Note(txt) => writeln!(f, " {}|  {}{}{}", color, WHITE, txt, NONE)?,
                Part::Hint(txt) => {
                    writeln!(f, " {}|      {}? hint: {}{}", color, BLUE, NONE, txt)?
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Record {
    /// Only the reports of the highest severity are shown
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reports.is_empty() {
            return Ok(());
        }
        let severity = if self.is_fatal() {
            Severity::Error
        } else {
            Severity::Warning
        };
        let color = severity.color();
        let count = self.count(severity);
        for report in self
            .reports
            .iter()
            .filter(|report| report.severity == severity)
            .take(SHOWN)
        {
            writeln!(f, "{}", report)?;
        }
        if count > SHOWN {
            writeln!(f, "{} And {} more.", color, count - SHOWN)?;
        }
        let (status, noun) = match severity {
            Severity::Error => ("Fatal", "error"),
            Severity::Warning => ("Nonfatal", "warning"),
        };
        writeln!(
            f,
            "{}{}: {}{} {}{} emitted{}",
            color,
            status,
            WHITE,
            count,
            noun,
            if count > 1 { "s" } else { "" },
            NONE
        )
    }
}

fn describe_rule(r: &Rule) -> String {
    String::from(match r {
        Rule::EOI => "end of file",
        Rule::bare => "an unquoted field",
        Rule::quoted => "a quoted field (\"...\")",
        Rule::header => "the header line",
        Rule::record => "a line of comma-separated fields",
        Rule::journal => "a header followed by entries",
        #[allow(unreachable_patterns)]
        _ => "a field",
    })
}
