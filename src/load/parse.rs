//! Convert the contents of a journal file into a list of entries

use chrono::NaiveDate;
use pest::Parser;
use pest_derive::*;

/// Wrapper around Pest's `Pair`
type Pair<'i> = pest::iterators::Pair<'i, Rule>;
/// Wrapper around Pest's `Pairs`
type Pairs<'i> = pest::iterators::Pairs<'i, Rule>;

use crate::lib::{
    date,
    entry::{Entry, Log, Mood, StressLevel, COLUMNS},
};
use crate::load::error;

/// Pest-generated parser
#[derive(Parser)]
#[grammar = "load/journal.pest"]
pub struct JournalParser;

/// Get the entries described by `contents`, read from file `path`
///
/// The return value may be non-empty even if some errors (including fatal ones) occured,
/// it then contains the entries that were read correctly.
///
/// Caller should determine the success of this function not through its return value
/// but by querying `errs` (e.g. by checking `errs.is_fatal()`)
pub fn extract(path: &str, errs: &mut error::Record, contents: &str) -> Log {
    match JournalParser::parse(Rule::journal, contents) {
        Ok(pairs) => validate(path, errs, pairs),
        Err(e) => {
            errs.error("Parsing failure").failure(e.with_path(path));
            Vec::new()
        }
    }
}

/// Check the header then every record
///
/// Records are validated independently so that all errors in the file
/// are reported at once.
pub fn validate<'i>(path: &'i str, errs: &mut error::Record, pairs: Pairs<'i>) -> Log {
    let mut log = Vec::new();
    for pair in pairs.flat_map(|journal| journal.into_inner()) {
        match pair.as_rule() {
            Rule::header => {
                if !validate_header(path, errs, pair) {
                    // columns would be misinterpreted
                    return log;
                }
            }
            Rule::record => {
                if let Some(entry) = validate_record(path, errs, pair) {
                    log.push(entry);
                }
            }
            Rule::EOI => break,
            _ => unreachable!(),
        }
    }
    log
}

fn validate_header(path: &str, errs: &mut error::Record, pair: Pair) -> bool {
    let loc = (path, pair.as_span());
    let names = pair.into_inner().map(|f| read_text(&f)).collect::<Vec<_>>();
    if names.iter().map(String::as_str).eq(COLUMNS.iter().copied()) {
        true
    } else {
        errs.error("Unexpected columns")
            .span(&loc, "header of the journal")
            .text(format!("Expected exactly '{}'", COLUMNS.join(",")))
            .hint("this file was not written by moodlog or has been edited by hand");
        false
    }
}

fn validate_record(path: &str, errs: &mut error::Record, pair: Pair) -> Option<Entry> {
    let loc = (path, pair.as_span());
    let fields = pair.into_inner().collect::<Vec<_>>();
    if fields.len() != COLUMNS.len() {
        errs.error("Wrong number of fields")
            .span(&loc, format!("{} fields found", fields.len()))
            .text(format!("Each entry must have exactly {} fields", COLUMNS.len()))
            .hint("fields that contain a comma must be quoted");
        return None;
    }
    let date = read_date(path, errs, &fields[0]);
    if let Some(date) = date {
        check_derived(path, errs, &fields[1], "weekday", date::weekday_name(date), date);
        check_derived(path, errs, &fields[2], "month", date::month_name(date), date);
    }
    let mood = read_mood(path, errs, &fields[3]);
    let stress = read_stress(path, errs, &fields[5]);
    Some(Entry::new(
        date?,
        mood?,
        read_text(&fields[4]),
        stress?,
        read_text(&fields[6]),
    ))
}

/// Contents of a field, without the quotes
///
/// Grammar ensures this cannot fail
fn read_text(pair: &Pair) -> String {
    let s = pair.as_str();
    match pair.as_rule() {
        Rule::bare => s.to_string(),
        Rule::quoted => s[1..s.len() - 1].replace("\"\"", "\""),
        _ => unreachable!(),
    }
}

fn read_date(path: &str, errs: &mut error::Record, pair: &Pair) -> Option<NaiveDate> {
    let loc = (path, pair.as_span());
    let text = read_text(pair);
    match NaiveDate::parse_from_str(&text, date::DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            errs.error("Invalid date")
                .span(&loc, "provided here")
                .text(format!("'{}' is not a valid date: {}", text, e))
                .hint("dates are written YYYY-MM-DD");
            None
        }
    }
}

/// Weekday and month are stored redundantly, the date is authoritative
fn check_derived(
    path: &str,
    errs: &mut error::Record,
    pair: &Pair,
    what: &str,
    expected: &str,
    date: NaiveDate,
) {
    let found = read_text(pair);
    if found != expected {
        let loc = (path, pair.as_span());
        errs.warning(format!("Inconsistent {}", what))
            .span(&loc, "provided here")
            .text(format!(
                "{} is in {}, not {}",
                date.format(date::DATE_FORMAT),
                expected,
                found
            ))
            .hint(format!("the {} is recomputed from the date", what));
    }
}

fn read_mood(path: &str, errs: &mut error::Record, pair: &Pair) -> Option<Mood> {
    let loc = (path, pair.as_span());
    let text = read_text(pair);
    match text.parse::<Mood>() {
        Ok(mood) => Some(mood),
        Err(()) => {
            errs.error("Invalid mood")
                .span(&loc, "provided here")
                .text(format!("'{}' is not a known mood", text))
                .hint(format!("use one of {}", Mood::listing()));
            None
        }
    }
}

/// Outer `None` on error, inner `None` for an empty field
///
/// Tabular tools write integers as `3.0` as soon as one value is missing,
/// those are accepted too.
fn read_stress(
    path: &str,
    errs: &mut error::Record,
    pair: &Pair,
) -> Option<Option<StressLevel>> {
    let loc = (path, pair.as_span());
    let text = read_text(pair);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(None);
    }
    let integral = trimmed.strip_suffix(".0").unwrap_or(trimmed);
    match integral.parse::<StressLevel>() {
        Ok(stress) => Some(Some(stress)),
        Err(e) => {
            errs.error("Invalid stress level")
                .span(&loc, "provided here")
                .text(e.to_string())
                .hint(format!(
                    "use an integer between {} and {} or leave empty",
                    StressLevel::MIN,
                    StressLevel::MAX
                ));
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const HEADER: &str = "Date,DayOfWeek,Month,OverallMood,SpecificEmotions,StressLevel,Notes\n";

    fn read(body: &str) -> (Log, error::Record) {
        let contents = format!("{}{}", HEADER, body);
        let mut errs = error::Record::new();
        let log = extract("test.csv", &mut errs, &contents);
        (log, errs)
    }

    macro_rules! dt {
        ( $y:tt - $m:tt - $d:tt ) => {
            NaiveDate::from_ymd_opt($y, $m, $d).unwrap()
        };
    }

    #[test]
    fn header_only() {
        let (log, errs) = read("");
        assert!(log.is_empty());
        assert!(!errs.is_fatal());
        assert_eq!(errs.count_warnings(), 0);
    }

    #[test]
    fn plain_entries() {
        let (log, errs) = read(
            "2024-03-05,Tuesday,March,Calm,rested,2,Went for a walk\n\
             2024-03-06,Wednesday,March,Anxious,,,\n",
        );
        assert!(!errs.is_fatal(), "{}", errs);
        assert_eq!(
            log,
            vec![
                Entry::new(
                    dt!(2024-3-5),
                    Mood::Calm,
                    "rested".to_string(),
                    StressLevel::new(2),
                    "Went for a walk".to_string(),
                ),
                Entry::new(dt!(2024-3-6), Mood::Anxious, String::new(), None, String::new()),
            ]
        );
    }

    #[test]
    fn quoted_fields() {
        let (log, errs) = read(
            "2024-03-05,Tuesday,March,Happy,\"joy, relief\",1,\"said \"\"finally\"\"\nand slept\"\r\n",
        );
        assert!(!errs.is_fatal(), "{}", errs);
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].emotions, "joy, relief");
        assert_eq!(log[0].notes, "said \"finally\"\nand slept");
    }

    #[test]
    fn float_stress_and_no_final_newline() {
        let (log, errs) = read("2024-03-05,Tuesday,March,Tired,,4.0,");
        assert!(!errs.is_fatal(), "{}", errs);
        assert_eq!(log[0].stress, StressLevel::new(4));
    }

    #[test]
    fn blank_lines_ignored() {
        let (log, errs) = read(
            "2024-03-05,Tuesday,March,Calm,,2,\n\
             \n\
             \r\n\
             2024-03-06,Wednesday,March,Sad,,4,\n\
             \n",
        );
        assert!(!errs.is_fatal(), "{}", errs);
        assert_eq!(errs.count_warnings(), 0);
        assert_eq!(log.len(), 2);
        assert_eq!(log[1].date, dt!(2024-3-6));
    }

    #[test]
    fn wrong_header() {
        let mut errs = error::Record::new();
        let log = extract(
            "test.csv",
            &mut errs,
            "Date,Mood,Stress\n2024-03-05,Calm,2\n",
        );
        assert!(log.is_empty());
        assert!(errs.is_fatal());
        assert_eq!(errs.count_errors(), 1);
        assert!(format!("{}", errs).contains("Unexpected columns"));
    }

    #[test]
    fn invalid_fields() {
        let (log, errs) = read(
            "2024-13-05,Tuesday,March,Calm,,2,\n\
             2024-03-05,Tuesday,March,calm,,2,\n\
             2024-03-05,Tuesday,March,Calm,,9,\n\
             2024-03-05,Tuesday,March,Calm,,x,\n\
             2024-03-05,Tuesday,March,Calm,2,\n\
             2024-03-05,Tuesday,March,Calm,,3,ok\n",
        );
        assert!(errs.is_fatal());
        assert_eq!(errs.count_errors(), 5);
        assert_eq!(log.len(), 1);
        let shown = format!("{}", errs);
        assert!(shown.contains("Invalid date"));
        assert!(shown.contains("Invalid mood"));
        assert!(shown.contains("Invalid stress level"));
        assert!(shown.contains("Wrong number of fields"));
    }

    #[test]
    fn unterminated_quote() {
        let (_, errs) = read("2024-03-05,Tuesday,March,Calm,\"oops,2,\n");
        assert!(errs.is_fatal());
        assert!(format!("{}", errs).contains("Parsing failure"));
    }

    #[test]
    fn inconsistent_names_warn() {
        let (log, errs) = read("2024-03-05,Monday,May,Calm,,2,\n");
        assert!(!errs.is_fatal());
        assert_eq!(errs.count_warnings(), 2);
        assert_eq!(log[0].day_of_week(), "Tuesday");
        assert_eq!(log[0].month(), "March");
    }
}
