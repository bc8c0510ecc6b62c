#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartFetch { seq: crate::RequestSeq },
    CancelFetch { seq: crate::RequestSeq },
}
