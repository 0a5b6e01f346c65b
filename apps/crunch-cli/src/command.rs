//! Turning one input line into a typed [`Command`].

use std::path::PathBuf;

use crunch_common::{SnapshotId, Value};

/// A parsed shell command with typed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Bye,
    Help,
    ListKeys,
    ListEntries,
    ListSnapshots,
    Get(String),
    Del(String),
    Purge(String),
    Set(String, Vec<Value>),
    Push(String, Vec<Value>),
    Append(String, Vec<Value>),
    Pick(String, i64),
    Pluck(String, i64),
    Pop(String),
    Drop(SnapshotId),
    Rollback(SnapshotId),
    Checkout(SnapshotId),
    Snapshot,
    Archive(SnapshotId, PathBuf),
    Restore(PathBuf),
    Min(String),
    Max(String),
    Sum(String),
    Len(String),
    Rev(String),
    Uniq(String),
    Sort(String),
    Diff(Vec<String>),
    Inter(Vec<String>),
    Union(Vec<String>),
    Cartprod(Vec<String>),
}

/// Why a line could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid command")]
    Invalid,
    #[error("id is not a valid number")]
    BadId,
}

/// Parse one line. Blank lines parse to `None`.
///
/// Command names are case-insensitive; keys and file names are taken as typed.
pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((name, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let command = match (name.to_ascii_lowercase().as_str(), args) {
        ("bye", []) => Command::Bye,
        ("help", []) => Command::Help,
        ("list", [what]) => match what.to_ascii_lowercase().as_str() {
            "keys" => Command::ListKeys,
            "entries" => Command::ListEntries,
            "snapshots" => Command::ListSnapshots,
            _ => return Err(ParseError::Invalid),
        },

        ("get", [key]) => Command::Get(key.to_string()),
        ("del", [key]) => Command::Del(key.to_string()),
        ("purge", [key]) => Command::Purge(key.to_string()),
        ("pop", [key]) => Command::Pop(key.to_string()),
        ("min", [key]) => Command::Min(key.to_string()),
        ("max", [key]) => Command::Max(key.to_string()),
        ("sum", [key]) => Command::Sum(key.to_string()),
        ("len", [key]) => Command::Len(key.to_string()),
        ("rev", [key]) => Command::Rev(key.to_string()),
        ("uniq", [key]) => Command::Uniq(key.to_string()),
        ("sort", [key]) => Command::Sort(key.to_string()),

        ("set", [key, values @ ..]) if !values.is_empty() => {
            Command::Set(key.to_string(), parse_values(values))
        }
        ("push", [key, values @ ..]) if !values.is_empty() => {
            Command::Push(key.to_string(), parse_values(values))
        }
        ("append", [key, values @ ..]) if !values.is_empty() => {
            Command::Append(key.to_string(), parse_values(values))
        }

        ("pick", [key, index]) => Command::Pick(key.to_string(), parse_index(index)?),
        ("pluck", [key, index]) => Command::Pluck(key.to_string(), parse_index(index)?),

        ("snapshot", []) => Command::Snapshot,
        ("drop", [id]) => Command::Drop(parse_id(id)?),
        ("rollback", [id]) => Command::Rollback(parse_id(id)?),
        ("checkout", [id]) => Command::Checkout(parse_id(id)?),
        ("archive", [id, file]) => Command::Archive(parse_id(id)?, PathBuf::from(*file)),
        ("restore", [file]) => Command::Restore(PathBuf::from(*file)),

        ("diff", keys) if keys.len() >= 2 => Command::Diff(owned(keys)),
        ("inter", keys) if keys.len() >= 2 => Command::Inter(owned(keys)),
        ("union", keys) if keys.len() >= 2 => Command::Union(owned(keys)),
        ("cartprod", keys) if keys.len() >= 2 => Command::Cartprod(owned(keys)),

        _ => return Err(ParseError::Invalid),
    };
    Ok(Some(command))
}

/// Integer tokens in order; anything that is not an integer is dropped.
fn parse_values(tokens: &[&str]) -> Vec<Value> {
    tokens.iter().filter_map(|t| t.parse().ok()).collect()
}

fn parse_index(token: &str) -> Result<i64, ParseError> {
    token.parse().map_err(|_| ParseError::Invalid)
}

fn parse_id(token: &str) -> Result<SnapshotId, ParseError> {
    let raw: i64 = token.parse().map_err(|_| ParseError::BadId)?;
    // Ids start at 1; a negative id can never match, and neither can 0.
    Ok(SnapshotId(u64::try_from(raw).unwrap_or(0)))
}

fn owned(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}
