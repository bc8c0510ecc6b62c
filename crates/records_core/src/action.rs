use crate::{ErrorInfo, Record, RequestSeq, StateSnapshot};

/// Actions applied to the snapshot. Each carries the request it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAction {
    RequestAccepted { seq: RequestSeq },
    RequestSucceeded { seq: RequestSeq, records: Vec<Record> },
    RequestFailed { seq: RequestSeq, error: ErrorInfo },
}

impl StoreAction {
    pub fn seq(&self) -> RequestSeq {
        match self {
            StoreAction::RequestAccepted { seq }
            | StoreAction::RequestSucceeded { seq, .. }
            | StoreAction::RequestFailed { seq, .. } => *seq,
        }
    }
}

/// Pure reducer. Previously loaded data stays visible while reloading and after a failure.
pub fn reduce(snapshot: &StateSnapshot, action: &StoreAction) -> StateSnapshot {
    match action {
        StoreAction::RequestAccepted { .. } => StateSnapshot {
            data: snapshot.data.clone(),
            loading: true,
            error: None,
        },
        StoreAction::RequestSucceeded { records, .. } => StateSnapshot {
            data: records.clone(),
            loading: false,
            error: None,
        },
        StoreAction::RequestFailed { error, .. } => StateSnapshot {
            data: snapshot.data.clone(),
            loading: false,
            error: Some(error.clone()),
        },
    }
}
