//! Serialize the journal back to its comma-separated form

use std::{
    borrow::Cow,
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};

use crate::lib::entry::{Entry, COLUMNS};

/// Quote a field if it would otherwise be misread
fn escape(field: &str) -> Cow<str> {
    if field.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn push_line<'a, I>(out: &mut String, fields: I)
where
    I: IntoIterator<Item = &'a str>,
{
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape(field));
    }
    out.push('\n');
}

/// Full contents of the journal file, header included
pub fn to_csv(log: &[Entry]) -> String {
    let mut out = String::new();
    push_line(&mut out, COLUMNS);
    for entry in log {
        let columns = entry.columns();
        push_line(&mut out, columns.iter().map(String::as_str));
    }
    out
}

/// Sibling file that receives the contents before being renamed
fn staging_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("journal"));
    name.push(".tmp");
    target.with_file_name(name)
}

/// Overwrite `path` with the whole log
///
/// Contents are first written next to the destination, then moved over it,
/// so that the previous version survives an interrupted write.
pub fn save(path: &str, log: &[Entry]) -> io::Result<()> {
    let target = Path::new(path);
    let staging = staging_path(target);
    let written = fs::write(&staging, to_csv(log)).and_then(|()| fs::rename(&staging, target));
    if let Err(e) = written {
        let _ = fs::remove_file(&staging);
        return Err(e);
    }
    tracing::info!(path, entries = log.len(), "journal saved");
    Ok(())
}
