use crate::RequestSeq;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinatorState {
    #[default]
    Idle,
    InFlight(RequestSeq),
}

/// Result of accepting a new request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accepted {
    pub seq: RequestSeq,
    /// Outstanding request that the new one replaces, if any.
    pub superseded: Option<RequestSeq>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The outcome answers the latest request and must be applied.
    Apply,
    /// A newer request was issued; drop the outcome without reporting.
    Superseded,
    /// Never issued, or already applied.
    Unknown,
}

/// Latest-wins bookkeeping: a monotonic counter plus a compare-on-resolution guard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestCoordinator {
    last_issued: RequestSeq,
    state: CoordinatorState,
}

impl RequestCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    pub fn last_issued(&self) -> RequestSeq {
        self.last_issued
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.state, CoordinatorState::InFlight(_))
    }

    pub fn accept(&mut self) -> Accepted {
        let superseded = match self.state {
            CoordinatorState::InFlight(previous) => Some(previous),
            CoordinatorState::Idle => None,
        };
        self.last_issued += 1;
        self.state = CoordinatorState::InFlight(self.last_issued);
        Accepted {
            seq: self.last_issued,
            superseded,
        }
    }

    pub fn resolve(&mut self, seq: RequestSeq) -> Resolution {
        if seq == 0 || seq > self.last_issued {
            return Resolution::Unknown;
        }
        match self.state {
            CoordinatorState::InFlight(current) if current == seq => {
                self.state = CoordinatorState::Idle;
                Resolution::Apply
            }
            _ if seq < self.last_issued => Resolution::Superseded,
            // Idle and seq == last_issued: the outcome was already applied.
            _ => Resolution::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_from_idle_has_nothing_to_supersede() {
        let mut coordinator = RequestCoordinator::new();
        let accepted = coordinator.accept();
        assert_eq!(accepted, Accepted { seq: 1, superseded: None });
        assert_eq!(coordinator.state(), CoordinatorState::InFlight(1));
    }

    #[test]
    fn accept_while_in_flight_supersedes_previous() {
        let mut coordinator = RequestCoordinator::new();
        coordinator.accept();
        let accepted = coordinator.accept();
        assert_eq!(accepted, Accepted { seq: 2, superseded: Some(1) });
        assert_eq!(coordinator.state(), CoordinatorState::InFlight(2));
    }

    #[test]
    fn stale_resolution_leaves_state_untouched() {
        let mut coordinator = RequestCoordinator::new();
        coordinator.accept();
        coordinator.accept();
        assert_eq!(coordinator.resolve(1), Resolution::Superseded);
        assert_eq!(coordinator.state(), CoordinatorState::InFlight(2));
        assert_eq!(coordinator.resolve(2), Resolution::Apply);
        assert_eq!(coordinator.state(), CoordinatorState::Idle);
    }

    #[test]
    fn duplicate_and_future_resolutions_are_unknown() {
        let mut coordinator = RequestCoordinator::new();
        assert_eq!(coordinator.resolve(1), Resolution::Unknown);
        coordinator.accept();
        assert_eq!(coordinator.resolve(2), Resolution::Unknown);
        assert_eq!(coordinator.resolve(1), Resolution::Apply);
        assert_eq!(coordinator.resolve(1), Resolution::Unknown);
    }
}
