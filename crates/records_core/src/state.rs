use crate::coordinator::{Accepted, RequestCoordinator, Resolution};
use crate::view_model::{AppViewModel, FetchControlView, FetchStatus, RecordListView, RecordRow};
use crate::{reduce, ErrorInfo, Record, RequestSeq, StoreAction};

/// Everything the UI reads, always replaced as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StateSnapshot {
    pub data: Vec<Record>,
    pub loading: bool,
    pub error: Option<ErrorInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreStats {
    pub accepted_count: u64,
    pub applied_count: u64,
    pub last_applied: Option<RequestSeq>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    snapshot: StateSnapshot,
    coordinator: RequestCoordinator,
    stats: StoreStats,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &StateSnapshot {
        &self.snapshot
    }

    pub fn coordinator(&self) -> &RequestCoordinator {
        &self.coordinator
    }

    pub fn stats(&self) -> StoreStats {
        self.stats
    }

    pub fn view(&self) -> AppViewModel {
        let status = if self.snapshot.loading {
            FetchStatus::Loading
        } else if let Some(error) = &self.snapshot.error {
            FetchStatus::Failed {
                message: error.message.clone(),
            }
        } else if self.stats.applied_count > 0 {
            FetchStatus::Loaded {
                count: self.snapshot.data.len(),
            }
        } else {
            FetchStatus::Idle
        };
        let label = if self.stats.accepted_count == 0 {
            "Fetch"
        } else {
            "Reload"
        };

        AppViewModel {
            control: FetchControlView {
                label: label.to_string(),
                status,
            },
            list: RecordListView {
                rows: self
                    .snapshot
                    .data
                    .iter()
                    .map(|record| RecordRow {
                        id: record.id.to_string(),
                        name: record.name.clone(),
                    })
                    .collect(),
            },
            dirty: self.dirty,
        }
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn accept_request(&mut self) -> Accepted {
        let accepted = self.coordinator.accept();
        self.stats.accepted_count += 1;
        self.apply(&StoreAction::RequestAccepted { seq: accepted.seq });
        accepted
    }

    pub(crate) fn resolve(&mut self, seq: RequestSeq) -> Resolution {
        self.coordinator.resolve(seq)
    }

    pub(crate) fn apply_outcome(&mut self, action: StoreAction) {
        self.stats.applied_count += 1;
        self.stats.last_applied = Some(action.seq());
        self.apply(&action);
    }

    fn apply(&mut self, action: &StoreAction) {
        self.snapshot = reduce(&self.snapshot, action);
        self.dirty = true;
    }
}
