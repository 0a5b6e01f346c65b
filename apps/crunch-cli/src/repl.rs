use std::io::{self, BufRead, Write};

use crunch_persist::Store;

use crate::command::{self, Command, ParseError};
use crate::render;

const HELP: &str = "\
BYE   clear database and exit
HELP  display this help message

LIST KEYS       displays all keys in current state
LIST ENTRIES    displays all entries in current state
LIST SNAPSHOTS  displays all snapshots in the database

GET <key>    displays entry values
DEL <key>    deletes entry from current state
PURGE <key>  deletes entry from current state and snapshots

SET <key> <value ...>     sets entry values
PUSH <key> <value ...>    pushes values to the front
APPEND <key> <value ...>  appends values to the back

PICK <key> <index>   displays value at index
PLUCK <key> <index>  displays and removes value at index
POP <key>            displays and removes the front value

DROP <id>      deletes snapshot
ROLLBACK <id>  restores to snapshot and deletes it and newer snapshots
CHECKOUT <id>  replaces current state with a copy of snapshot
SNAPSHOT       saves the current state as a snapshot

ARCHIVE <id> <filename> saves snapshot to file
RESTORE <filename> loads snapshot from file

MIN <key>  displays minimum value
MAX <key>  displays maximum value
SUM <key>  displays sum of values
LEN <key>  displays number of values

REV <key>   reverses order of values
UNIQ <key>  removes repeated adjacent values
SORT <key>  sorts values in ascending order

DIFF <key> <key ...>      displays set difference of values in keys
INTER <key> <key ...>     displays set intersection of values in keys
UNION <key> <key ...>     displays set union of values in keys
CARTPROD <key> <key ...>  displays cartesian product of values in keys";

/// Whether the session continues after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Line-oriented shell around a [`Store`].
///
/// Owns the store for the whole session and writes every result to `out`.
pub struct Repl<W: Write> {
    store: Store,
    out: W,
    prompt: Option<String>,
}

impl<W: Write> Repl<W> {
    /// `prompt` of `None` runs silently, for scripts.
    pub fn new(store: Store, out: W, prompt: Option<String>) -> Self {
        Self { store, out, prompt }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Consume the shell, returning the writer.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Read commands until `BYE` or end of input.
    ///
    /// A line that is not UTF-8 is answered like any other invalid command.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> io::Result<()> {
        let mut buf = Vec::new();
        self.write_prompt()?;
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let raw = buf.strip_suffix(b"\n").unwrap_or(&buf);
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            let flow = match std::str::from_utf8(raw) {
                Ok(line) => self.handle_line(line)?,
                Err(e) => {
                    tracing::debug!(error = %e, "rejected undecodable line");
                    writeln!(self.out, "{}", ParseError::Invalid)?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                return Ok(());
            }
            if self.prompt.is_some() {
                writeln!(self.out)?;
            }
            self.write_prompt()?;
        }
        tracing::debug!("end of input");
        Ok(())
    }

    /// Parse and execute one line.
    pub fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        match command::parse(line) {
            Ok(Some(cmd)) => self.execute(cmd),
            Ok(None) => Ok(Flow::Continue),
            Err(e) => {
                tracing::debug!(line, error = %e, "rejected");
                writeln!(self.out, "{e}")?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Run one command against the store and print its result.
    pub fn execute(&mut self, cmd: Command) -> io::Result<Flow> {
        tracing::debug!(?cmd, "execute");
        let store = &mut self.store;
        let line = match cmd {
            Command::Bye => {
                writeln!(self.out, "bye")?;
                return Ok(Flow::Exit);
            }
            Command::Help => HELP.to_string(),

            Command::ListKeys => {
                if store.entries().is_empty() {
                    "no keys".to_string()
                } else {
                    store.entries().keys().collect::<Vec<_>>().join("\n")
                }
            }
            Command::ListEntries => {
                if store.entries().is_empty() {
                    "no entries".to_string()
                } else {
                    store
                        .entries()
                        .iter()
                        .map(|e| format!("{} {}", e.key(), render::sequence(e.values())))
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            }
            Command::ListSnapshots => {
                if store.snapshots().is_empty() {
                    "no snapshots".to_string()
                } else {
                    render::snapshot_ids(store.snapshots())
                }
            }

            Command::Get(key) => outcome(store.get(&key).map(|v| render::sequence(&v))),
            Command::Del(key) => outcome(store.del(&key).map(|()| ok())),
            Command::Purge(key) => {
                store.purge(&key);
                ok()
            }
            Command::Set(key, values) => {
                store.set(&key, &values);
                ok()
            }
            Command::Push(key, values) => outcome(store.push(&key, &values).map(|()| ok())),
            Command::Append(key, values) => outcome(store.append(&key, &values).map(|()| ok())),

            Command::Pick(key, index) => outcome(store.pick(&key, index).map(|v| v.to_string())),
            Command::Pluck(key, index) => {
                outcome(store.pluck(&key, index).map(|v| v.to_string()))
            }
            Command::Pop(key) => outcome(store.pop(&key).map(|v| v.to_string())),

            Command::Drop(id) => outcome(store.drop_snapshot(id).map(|()| ok())),
            Command::Rollback(id) => outcome(store.rollback(id).map(|()| ok())),
            Command::Checkout(id) => outcome(store.checkout(id).map(|()| ok())),
            Command::Snapshot => format!("saved as snapshot {}", store.snapshot()),
            Command::Archive(id, path) => outcome(store.archive(id, &path).map(|()| ok())),
            Command::Restore(path) => outcome(store.restore(&path).map(|_| ok())),

            Command::Min(key) => outcome(store.min(&key).map(render::scalar)),
            Command::Max(key) => outcome(store.max(&key).map(render::scalar)),
            Command::Sum(key) => outcome(store.sum(&key).map(render::scalar)),
            Command::Len(key) => outcome(store.len(&key).map(|n| n.to_string())),
            Command::Rev(key) => outcome(store.rev(&key).map(|()| ok())),
            Command::Uniq(key) => outcome(store.uniq(&key).map(|()| ok())),
            Command::Sort(key) => outcome(store.sort(&key).map(|()| ok())),

            Command::Diff(keys) => outcome(store.diff(&keys).map(|v| render::sequence(&v))),
            Command::Inter(keys) => outcome(store.inter(&keys).map(|v| render::sequence(&v))),
            Command::Union(keys) => outcome(store.union(&keys).map(|v| render::sequence(&v))),
            Command::Cartprod(keys) => outcome(store.cartprod(&keys).map(|r| render::rows(&r))),
        };
        writeln!(self.out, "{line}")?;
        Ok(Flow::Continue)
    }

    fn write_prompt(&mut self) -> io::Result<()> {
        if let Some(prompt) = &self.prompt {
            write!(self.out, "{prompt}")?;
            self.out.flush()?;
        }
        Ok(())
    }
}

fn ok() -> String {
    "ok".to_string()
}

fn outcome(result: Result<String, crunch_persist::StoreError>) -> String {
    result.unwrap_or_else(|e| {
        tracing::debug!(error = %e, "command failed");
        render::error(&e)
    })
}
