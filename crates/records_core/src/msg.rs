#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User asked for the list to be (re)loaded.
    FetchRequested,
    /// Engine finished a fetch, successfully or not.
    FetchResolved(crate::FetchOutcome),
    /// Fallback for placeholder wiring.
    NoOp,
}
