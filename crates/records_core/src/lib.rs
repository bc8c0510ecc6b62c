//! Records core: pure state machine, latest-wins request policy and view-model helpers.
mod action;
mod coordinator;
mod effect;
mod msg;
mod record;
mod state;
mod store;
mod update;
mod view_model;

pub use action::{reduce, StoreAction};
pub use coordinator::{Accepted, CoordinatorState, RequestCoordinator, Resolution};
pub use effect::Effect;
pub use msg::Msg;
pub use record::{ErrorInfo, FetchOutcome, OutcomeKind, Record, RecordId, RequestSeq};
pub use state::{AppState, StateSnapshot, StoreStats};
pub use store::Store;
pub use update::update;
pub use view_model::{AppViewModel, FetchControlView, FetchStatus, RecordListView, RecordRow};
