//! Persistence of the journal: reading, validating and rewriting the file

pub mod error;
pub mod parse;
pub mod write;

pub use write::save;

use crate::lib::entry::Log;

/// Read and validate the journal stored at `path`
///
/// A missing file is a journal with no entries yet.
/// Returns `None` if any fatal error was recorded, in which case
/// the file must not be overwritten.
pub fn read_entries(path: &str, errs: &mut error::Record) -> Option<Log> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path, "no journal yet, starting empty");
            return Some(Vec::new());
        }
        Err(e) => {
            errs.error("Unreadable journal")
                .text(format!("Could not read '{}': {}", path, e))
                .hint("check the permissions and encoding of the file");
            return None;
        }
    };
    if contents.trim().is_empty() {
        return Some(Vec::new());
    }
    let log = parse::extract(path, errs, &contents);
    if errs.is_fatal() {
        None
    } else {
        tracing::info!(path, entries = log.len(), "journal loaded");
        Some(log)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn scratch(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("moodlog-{}-{}.csv", name, std::process::id()))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn missing_file_is_empty() {
        let path = scratch("missing");
        let _ = std::fs::remove_file(&path);
        let mut errs = error::Record::new();
        assert_eq!(read_entries(&path, &mut errs), Some(Vec::new()));
        assert!(!errs.is_fatal());
    }

    #[test]
    fn blank_file_is_empty() {
        let path = scratch("blank");
        std::fs::write(&path, "\n").unwrap();
        let mut errs = error::Record::new();
        assert_eq!(read_entries(&path, &mut errs), Some(Vec::new()));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn corrupt_file_is_fatal() {
        let path = scratch("corrupt");
        std::fs::write(&path, "Date,Mood\n2024-03-05,Calm\n").unwrap();
        let mut errs = error::Record::new();
        assert_eq!(read_entries(&path, &mut errs), None);
        assert!(errs.is_fatal());
        std::fs::remove_file(&path).unwrap();
    }
}
