use chrono::NaiveDate;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::{fmt, str::FromStr};

use crate::lib::date::{self, WeekKey};

/// Column names of the journal, in file order
pub const COLUMNS: [&str; 7] = [
    "Date",
    "DayOfWeek",
    "Month",
    "OverallMood",
    "SpecificEmotions",
    "StressLevel",
    "Notes",
];

/// All entries of the journal, in insertion order
pub type Log = Vec<Entry>;

/// One daily record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub date: NaiveDate,
    pub mood: Mood,
    /// comma-separated tags, kept as written
    pub emotions: String,
    pub stress: Option<StressLevel>,
    pub notes: String,
}

impl Entry {
    pub fn new(
        date: NaiveDate,
        mood: Mood,
        emotions: String,
        stress: Option<StressLevel>,
        notes: String,
    ) -> Self {
        Self {
            date,
            mood,
            emotions,
            stress,
            notes,
        }
    }

    pub fn day_of_week(&self) -> &'static str {
        date::weekday_name(self.date)
    }

    pub fn month(&self) -> &'static str {
        date::month_name(self.date)
    }

    pub fn week(&self) -> WeekKey {
        WeekKey::of(self.date)
    }

    /// Textual value of each column, same order as `COLUMNS`
    pub fn columns(&self) -> [String; 7] {
        [
            self.date.format(date::DATE_FORMAT).to_string(),
            self.day_of_week().to_string(),
            self.month().to_string(),
            self.mood.to_string(),
            self.emotions.clone(),
            self.stress.map(|s| s.to_string()).unwrap_or_default(),
            self.notes.clone(),
        ]
    }
}

/// Overall mood of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum Mood {
    Happy = 0,
    Neutral,
    Sad,
    Anxious,
    Angry,
    Calm,
    Energetic,
    Tired,
    Excited,
    Relaxed,
    Stressed,
    Overwhelmed,
}

impl Mood {
    pub const COUNT: usize = 12;

    /// Every mood in declaration order
    pub fn all() -> impl Iterator<Item = Mood> {
        (0..Self::COUNT).filter_map(Self::from_usize)
    }

    /// `"Happy, Neutral, ..."`, for prompts and error messages
    pub fn listing() -> String {
        Self::all()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Case-sensitive: `"Happy"` is a mood, `"happy"` is not
impl FromStr for Mood {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        use Mood::*;
        Ok(match s {
            "Happy" => Happy,
            "Neutral" => Neutral,
            "Sad" => Sad,
            "Anxious" => Anxious,
            "Angry" => Angry,
            "Calm" => Calm,
            "Energetic" => Energetic,
            "Tired" => Tired,
            "Excited" => Excited,
            "Relaxed" => Relaxed,
            "Stressed" => Stressed,
            "Overwhelmed" => Overwhelmed,
            _ => return Err(()),
        })
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Self-reported stress, 1 (low) to 5 (high)
///
/// Cannot be constructed outside of that range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StressLevel(u8);

impl StressLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Some(Self(level))
        } else {
            None
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for StressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ways in which a stress level read from user input can be wrong
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StressError {
    /// not an integer at all
    NotANumber(String),
    /// integer outside of 1..=5
    OutOfRange(i64),
}

impl FromStr for StressLevel {
    type Err = StressError;

    fn from_str(s: &str) -> Result<Self, StressError> {
        let n = s
            .trim()
            .parse::<i64>()
            .map_err(|_| StressError::NotANumber(s.trim().to_string()))?;
        u8::try_from(n)
            .ok()
            .and_then(Self::new)
            .ok_or(StressError::OutOfRange(n))
    }
}

impl fmt::Display for StressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use StressError::*;
        match self {
            NotANumber(s) => write!(f, "'{}' is not a number", s),
            OutOfRange(n) => write!(
                f,
                "{} is not in the range {} ..= {}",
                n,
                StressLevel::MIN,
                StressLevel::MAX
            ),
        }
    }
}
