//! Archive file format: one entry per line.
//!
//! ```text
//! key|v1,v2,...,vn
//! ```
//!
//! Lines are `\n`-terminated and appear in the snapshot's entry order. Reading
//! is lenient: a line that is not UTF-8, has no `|`, an empty key, or no
//! parseable value is skipped, and a value token that is not an integer is
//! dropped from its line.
//!
//! A key containing `|` cannot be represented; such entries are left out of
//! the file with a warning.

use std::io::{self, BufRead, Write};

use crunch_common::Value;
use crunch_kernel::Entry;

const KEY_DELIMITER: &str = "|";
const VALUE_DELIMITER: &str = ",";

/// Write entries in archive format, leaving out keys that contain `|`.
pub fn write_entries<'a, W, I>(mut writer: W, entries: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Entry>,
{
    for entry in entries {
        if !is_archivable(entry.key()) {
            tracing::warn!(key = entry.key(), "key contains '|', not archived");
            continue;
        }
        writer.write_all(format_line(entry).as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Read every well-formed line. Only I/O failures are errors.
pub fn read_entries<R: BufRead>(mut reader: R) -> io::Result<Vec<Entry>> {
    let mut entries = Vec::new();
    let mut buf = Vec::new();
    let mut number = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        number += 1;
        let Ok(line) = std::str::from_utf8(trim_newline(&buf)) else {
            tracing::warn!(line = number, "skipping archive line that is not UTF-8");
            continue;
        };
        match parse_line(line) {
            Some(entry) => entries.push(entry),
            None => tracing::warn!(line = number, "skipping malformed archive line"),
        }
    }
    Ok(entries)
}

/// Whether `key` survives a write/read cycle.
fn is_archivable(key: &str) -> bool {
    !key.contains(KEY_DELIMITER)
}

fn trim_newline(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Format one entry without the trailing newline.
pub fn format_line(entry: &Entry) -> String {
    let values: Vec<String> = entry.values().iter().map(Value::to_string).collect();
    format!("{}{KEY_DELIMITER}{}", entry.key(), values.join(VALUE_DELIMITER))
}

/// Parse one line, or `None` when it has to be skipped.
///
/// Only the field between the first and second `|` is read as the value list.
pub fn parse_line(line: &str) -> Option<Entry> {
    let mut fields = line.split(KEY_DELIMITER);
    let key = fields.next().filter(|k| !k.is_empty())?;
    let raw = fields.next()?;
    let values: Vec<Value> = raw
        .split(VALUE_DELIMITER)
        .filter_map(|token| token.parse().ok())
        .collect();
    if values.is_empty() {
        return None;
    }
    Some(Entry::new(key, &values))
}
