use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Monotonic request number; the first accepted request is `1`.
pub type RequestSeq = u64;

/// Identifier as published by the endpoint. Numbers and strings are both seen in the wild.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value)
    }
}

impl From<i32> for RecordId {
    fn from(value: i32) -> Self {
        RecordId::Number(i64::from(value))
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

/// One entry of the remote list. Only `id` and `name` are interpreted; every
/// other field is carried through untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }
}

/// Opaque, human-readable failure description stored in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub message: String,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeKind {
    Success(Vec<Record>),
    Failure(ErrorInfo),
}

/// Terminal result of one fetch, tagged with the request it answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub seq: RequestSeq,
    pub kind: OutcomeKind,
}

impl FetchOutcome {
    pub fn success(seq: RequestSeq, records: Vec<Record>) -> Self {
        Self {
            seq,
            kind: OutcomeKind::Success(records),
        }
    }

    pub fn failure(seq: RequestSeq, error: ErrorInfo) -> Self {
        Self {
            seq,
            kind: OutcomeKind::Failure(error),
        }
    }
}
