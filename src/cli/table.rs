use std::fmt;

use crate::lib::entry::{Entry, COLUMNS};

/// Shown instead of a table when there is nothing to display
pub const PLACEHOLDER: &str = "No entries yet.";

/// Box-drawn view of the journal, one line per entry
pub struct Table<'d> {
    data: &'d [Entry],
}

struct BoxFmt {
    width: usize,
    text: String,
}

struct ColFmt {
    width: usize,
    label: BoxFmt,
    boxes: Vec<BoxFmt>,
}

struct GridFmt {
    labels: ColFmt,
    columns: Vec<ColFmt>,
}

impl<'d> Table<'d> {
    pub fn from(data: &'d [Entry]) -> Self {
        Self { data }
    }

    fn to_formatter(&self) -> GridFmt {
        let cols = COLUMNS
            .iter()
            .map(|name| ColFmt::with_label(BoxFmt::from(name.to_string())))
            .collect::<Vec<_>>();
        let mut grid = GridFmt::with_columns(cols);
        for (idx, entry) in self.data.iter().enumerate() {
            grid.push_line(
                BoxFmt::from(format!("{}", idx)),
                entry.columns().into_iter().map(BoxFmt::cell).collect(),
            );
        }
        grid
    }
}

impl BoxFmt {
    fn from(text: String) -> Self {
        let width = text.chars().count();
        Self { text, width }
    }

    /// Free text is shown on a single line
    fn cell(text: String) -> Self {
        let breaks = |c: char| c == '\n' || c == '\r';
        if text.contains(breaks) {
            let lines = text
                .split(breaks)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>();
            Self::from(lines.join(" / "))
        } else {
            Self::from(text)
        }
    }
}

impl ColFmt {
    fn with_label(label: BoxFmt) -> Self {
        Self {
            width: label.width,
            label,
            boxes: Vec::new(),
        }
    }

    fn push(&mut self, b: BoxFmt) {
        self.width = self.width.max(b.width);
        self.boxes.push(b);
    }
}

impl GridFmt {
    fn with_columns(columns: Vec<ColFmt>) -> Self {
        Self {
            labels: ColFmt::with_label(BoxFmt::from(String::new())),
            columns,
        }
    }

    fn push_line(&mut self, label: BoxFmt, boxes: Vec<BoxFmt>) {
        self.labels.push(label);
        for (i, b) in boxes.into_iter().enumerate() {
            self.columns[i].push(b);
        }
    }
}

impl fmt::Display for Table<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.data.is_empty() {
            writeln!(f, "{}", PLACEHOLDER)
        } else {
            write!(f, "{}", self.to_formatter())
        }
    }
}

impl fmt::Display for GridFmt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // upper border
        write!(f, "{}", ULCORNER)?;
        self.labels.hline(f)?;
        for c in &self.columns {
            write!(f, "{}", LOJOIN)?;
            c.hline(f)?;
        }
        writeln!(f, "{}", URCORNER)?;
        // title line
        write!(f, "{}", VLINE)?;
        self.labels.write_label(f)?;
        for c in &self.columns {
            write!(f, "{}", VLINE)?;
            c.write_label(f)?;
        }
        writeln!(f, "{}", VLINE)?;
        // separator
        write!(f, "{}", RTJOIN)?;
        self.labels.hline(f)?;
        for c in &self.columns {
            write!(f, "{}", CROSS)?;
            c.hline(f)?;
        }
        writeln!(f, "{}", LTJOIN)?;

        // main block
        for idx in 0..self.labels.len() {
            write!(f, "{}", VLINE)?;
            self.labels.write_item(f, idx, true)?;
            for c in &self.columns {
                write!(f, "{}", VLINE)?;
                c.write_item(f, idx, false)?;
            }
            writeln!(f, "{}", VLINE)?;
        }
        // lower border
        write!(f, "{}", DLCORNER)?;
        self.labels.hline(f)?;
        for c in &self.columns {
            write!(f, "{}", HIJOIN)?;
            c.hline(f)?;
        }
        writeln!(f, "{}", DRCORNER)?;
        Ok(())
    }
}

impl ColFmt {
    fn write_label(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.label.write(f, self.width, false)
    }

    fn write_item(&self, f: &mut fmt::Formatter, idx: usize, right: bool) -> fmt::Result {
        self.boxes[idx].write(f, self.width, right)
    }

    fn len(&self) -> usize {
        self.boxes.len()
    }

    fn hline(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", HLINE.repeat(self.width + 2))
    }
}

const HLINE: &str = "─";
const VLINE: &str = "│";
const ULCORNER: &str = "┌";
const URCORNER: &str = "┐";
const DLCORNER: &str = "└";
const DRCORNER: &str = "┘";
const LTJOIN: &str = "┤";
const RTJOIN: &str = "├";
const HIJOIN: &str = "┴";
const LOJOIN: &str = "┬";
const CROSS: &str = "┼";

impl BoxFmt {
    fn write(&self, f: &mut fmt::Formatter, width: usize, right: bool) -> fmt::Result {
        let padding = " ".repeat(width.saturating_sub(self.width));
        if right {
            write!(f, " {}{} ", padding, self.text)
        } else {
            write!(f, " {}{} ", self.text, padding)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::entry::{Mood, StressLevel};
    use chrono::NaiveDate;

    #[test]
    fn empty_placeholder() {
        assert_eq!(format!("{}", Table::from(&[])), "No entries yet.\n");
    }

    #[test]
    fn grid() {
        let log = vec![
            Entry::new(
                NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                Mood::Calm,
                "rested, content".to_string(),
                StressLevel::new(2),
                "Went for a walk\nthen café".to_string(),
            ),
            Entry::new(
                NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(),
                Mood::Sad,
                String::new(),
                None,
                String::new(),
            ),
        ];
        let shown = format!("{}", Table::from(&log));
        let lines = shown.lines().collect::<Vec<_>>();
        // borders, title, separator, one line per entry
        assert_eq!(lines.len(), 6);
        assert!(lines[1].contains("│ Date       │ DayOfWeek │"));
        assert!(lines[3].starts_with("│ 0 │ 2024-03-05 │ Tuesday   │ March │ Calm "));
        assert!(lines[3].contains("Went for a walk / then café"));
        assert!(lines[4].starts_with("│ 1 │ 2024-03-06 │ Wednesday │ March │ Sad "));
        // every line has the same display width
        let width = lines[0].chars().count();
        for line in &lines {
            assert_eq!(line.chars().count(), width, "{}", line);
        }
    }
}
