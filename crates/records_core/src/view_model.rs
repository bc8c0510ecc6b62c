#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Loaded {
        count: usize,
    },
    Failed {
        message: String,
    },
}

/// The trigger control. It stays enabled while loading; pressing it again supersedes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchControlView {
    pub label: String,
    pub status: FetchStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRow {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordListView {
    pub rows: Vec<RecordRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub control: FetchControlView,
    pub list: RecordListView,
    pub dirty: bool,
}
