//! Line-based interaction with the user
//!
//! Input and output are injected so that whole sessions can be replayed
//! from a buffer.

use chrono::NaiveDate;
use std::io::{self, BufRead, Write};

use crate::lib::{
    date,
    entry::{Entry, Mood, StressLevel},
};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

fn closed() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "input closed")
}

impl<R, W> Prompter<R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Next line without its terminator, `None` at end of input
    ///
    /// Bytes that are not valid UTF-8 become `U+FFFD`, the answer is then
    /// rejected by whoever parses it.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        let mut line = String::from_utf8_lossy(&bytes).into_owned();
        let len = line.trim_end_matches(|c: char| c == '\n' || c == '\r').len();
        line.truncate(len);
        Ok(Some(line))
    }

    /// Show `question` and read the answer as is, `None` at end of input
    pub fn try_ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Same as `try_ask`, for answers that cannot be skipped
    ///
    /// End of input is reported as `ErrorKind::UnexpectedEof`.
    pub fn ask(&mut self, question: &str) -> io::Result<String> {
        self.try_ask(question)?.ok_or_else(closed)
    }

    /// Ask again until `parse` accepts the answer
    ///
    /// The message of each rejection is shown before asking again.
    pub fn ask_until<T, F>(&mut self, question: &str, mut parse: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Result<T, String>,
    {
        loop {
            let answer = self.ask(question)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(msg) => writeln!(self.output, "{}", msg)?,
            }
        }
    }
}

/// Interactively fill in the entry for `today`
///
/// The entry is not saved. Mood and stress level are asked for until valid,
/// so the result always satisfies the invariants of `Entry`.
pub fn build_entry<R, W>(prompter: &mut Prompter<R, W>, today: NaiveDate) -> io::Result<Entry>
where
    R: BufRead,
    W: Write,
{
    writeln!(
        prompter.output(),
        "New entry for {}, {} {}",
        date::weekday_name(today),
        today.format(date::DATE_FORMAT),
        date::month_name(today),
    )?;
    writeln!(prompter.output(), "Moods: {}", Mood::listing())?;
    let mood = prompter.ask_until("Overall mood: ", |answer| {
        answer.trim().parse::<Mood>().map_err(|()| {
            format!(
                "'{}' is not a valid mood. Please choose one of: {}",
                answer.trim(),
                Mood::listing()
            )
        })
    })?;
    let emotions = prompter.ask("Specific emotions (comma-separated): ")?;
    let stress = prompter.ask_until(
        &format!(
            "Stress level ({}-{}): ",
            StressLevel::MIN,
            StressLevel::MAX
        ),
        |answer| {
            answer.parse::<StressLevel>().map_err(|e| {
                format!(
                    "Invalid stress level: {}. Please enter a whole number from {} to {}.",
                    e,
                    StressLevel::MIN,
                    StressLevel::MAX
                )
            })
        },
    )?;
    let notes = prompter.ask("Notes: ")?;
    tracing::debug!(%mood, stress = stress.value(), "entry built");
    Ok(Entry::new(today, mood, emotions, Some(stress), notes))
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn shown(p: &Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8_lossy(&p.output).into_owned()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn lines() {
        let mut p = prompter("first\r\nsecond\nlast");
        assert_eq!(p.read_line().unwrap().as_deref(), Some("first"));
        assert_eq!(p.read_line().unwrap().as_deref(), Some("second"));
        assert_eq!(p.read_line().unwrap().as_deref(), Some("last"));
        assert_eq!(p.read_line().unwrap(), None);
        assert_eq!(p.ask("more? ").unwrap_err().kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn invalid_utf8() {
        let mut p = Prompter::new(Cursor::new(vec![b'o', 0xff, b'k', b'\n']), Vec::new());
        assert_eq!(p.read_line().unwrap().as_deref(), Some("o\u{FFFD}k"));
        assert_eq!(p.read_line().unwrap(), None);
    }

    #[test]
    fn retry_until_valid() {
        let mut p = prompter("x\n12\n7\n");
        let n = p
            .ask_until("n: ", |s| match s.parse::<u8>() {
                Ok(n) if n < 10 => Ok(n),
                _ => Err(format!("bad {}", s)),
            })
            .unwrap();
        assert_eq!(n, 7);
        assert_eq!(shown(&p), "n: bad x\nn: bad 12\nn: ");
    }

    #[test]
    fn full_entry() {
        let mut p = prompter("Calm\nrested, content\n2\nWent for a walk\n");
        let entry = build_entry(&mut p, today()).unwrap();
        assert_eq!(
            entry,
            Entry::new(
                today(),
                Mood::Calm,
                "rested, content".to_string(),
                StressLevel::new(2),
                "Went for a walk".to_string(),
            )
        );
        assert!(shown(&p).starts_with("New entry for Tuesday, 2024-03-05 March\n"));
    }

    #[test]
    fn mood_is_asked_again() {
        let mut p = prompter("happy\nJoyful\nHappy\n\n3\n\n");
        let entry = build_entry(&mut p, today()).unwrap();
        assert_eq!(entry.mood, Mood::Happy);
        let out = shown(&p);
        assert!(out.contains("'happy' is not a valid mood"));
        assert!(out.contains("'Joyful' is not a valid mood"));
        assert_eq!(out.matches("Overall mood: ").count(), 3);
    }

    #[test]
    fn stress_is_asked_again() {
        let mut p = prompter("Tired\n\nabc\n0\n6\n2.5\n5\nlong day\n");
        let entry = build_entry(&mut p, today()).unwrap();
        assert_eq!(entry.stress, StressLevel::new(5));
        assert_eq!(entry.notes, "long day");
        assert_eq!(shown(&p).matches("Invalid stress level").count(), 4);
    }

    #[test]
    fn end_of_input_aborts() {
        let mut p = prompter("Sad\nlonely\n");
        let err = build_entry(&mut p, today()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
