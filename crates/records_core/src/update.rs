use crate::coordinator::Resolution;
use crate::{AppState, Effect, FetchOutcome, Msg, OutcomeKind, StoreAction};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FetchRequested => {
            let accepted = state.accept_request();
            let mut effects = Vec::with_capacity(2);
            if let Some(previous) = accepted.superseded {
                effects.push(Effect::CancelFetch { seq: previous });
            }
            effects.push(Effect::StartFetch { seq: accepted.seq });
            effects
        }
        Msg::FetchResolved(outcome) => {
            // Superseded and unknown outcomes are dropped without touching the snapshot.
            if state.resolve(outcome.seq) == Resolution::Apply {
                state.apply_outcome(into_action(outcome));
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn into_action(outcome: FetchOutcome) -> StoreAction {
    let seq = outcome.seq;
    match outcome.kind {
        OutcomeKind::Success(records) => StoreAction::RequestSucceeded { seq, records },
        OutcomeKind::Failure(error) => StoreAction::RequestFailed { seq, error },
    }
}
