use proptest::prelude::*;

use records_core::{
    update, AppState, ErrorInfo, FetchOutcome, Msg, Record, RequestSeq, Resolution,
    RequestCoordinator,
};

fn outcome_for(seq: RequestSeq, fail: bool) -> FetchOutcome {
    if fail {
        FetchOutcome::failure(seq, ErrorInfo::new(format!("request {seq} failed")))
    } else {
        FetchOutcome::success(seq, vec![Record::new(seq as i64, format!("from {seq}"))])
    }
}

/// Builds N requests issued back-to-back and a shuffled resolution order.
fn burst_strategy() -> impl Strategy<Value = (Vec<bool>, Vec<usize>)> {
    (1usize..12).prop_flat_map(|n| {
        (
            prop::collection::vec(any::<bool>(), n),
            Just((0..n).collect::<Vec<_>>()).prop_shuffle(),
        )
    })
}

#[derive(Debug, Clone)]
enum Step {
    Request,
    Resolve { back: u8, fail: bool },
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Request),
        (0u8..4, any::<bool>()).prop_map(|(back, fail)| Step::Resolve { back, fail }),
    ]
}

proptest! {
    #[test]
    fn final_state_reflects_only_the_highest_request((fails, order) in burst_strategy()) {
        let n = fails.len();
        let mut state = AppState::new();
        let mut accepted_effects = 0;
        for _ in 0..n {
            let (next, effects) = update(state, Msg::FetchRequested);
            accepted_effects += effects
                .iter()
                .filter(|e| matches!(e, records_core::Effect::StartFetch { .. }))
                .count();
            state = next;
        }
        prop_assert_eq!(accepted_effects, n);
        prop_assert_eq!(state.stats().accepted_count, n as u64);

        for index in order {
            let seq = index as RequestSeq + 1;
            let (next, _) = update(state, Msg::FetchResolved(outcome_for(seq, fails[index])));
            state = next;
        }

        let latest = n as RequestSeq;
        let expected = outcome_for(latest, fails[n - 1]);
        let snapshot = state.snapshot();
        prop_assert!(!snapshot.loading);
        match expected.kind {
            records_core::OutcomeKind::Success(records) => {
                prop_assert_eq!(&snapshot.data, &records);
                prop_assert_eq!(&snapshot.error, &None);
            }
            records_core::OutcomeKind::Failure(error) => {
                prop_assert!(snapshot.data.is_empty());
                prop_assert_eq!(snapshot.error.as_ref(), Some(&error));
            }
        }
        prop_assert_eq!(state.stats().applied_count, 1);
        prop_assert_eq!(state.stats().last_applied, Some(latest));
    }

    #[test]
    fn interleaved_steps_apply_in_increasing_order(steps in prop::collection::vec(step_strategy(), 1..80)) {
        let mut state = AppState::new();
        let mut requests = 0u64;
        let mut applied = Vec::new();

        for step in steps {
            match step {
                Step::Request => {
                    requests += 1;
                    let (next, _) = update(state, Msg::FetchRequested);
                    state = next;
                }
                Step::Resolve { back, fail } => {
                    let issued = state.coordinator().last_issued();
                    if issued == 0 {
                        continue;
                    }
                    let seq = issued.saturating_sub(u64::from(back)).max(1);
                    let before = state.stats().applied_count;
                    let (next, _) = update(state, Msg::FetchResolved(outcome_for(seq, fail)));
                    state = next;
                    if state.stats().applied_count > before {
                        applied.push(seq);
                    }
                }
            }

            // loading is true iff a request is outstanding.
            prop_assert_eq!(state.snapshot().loading, state.coordinator().is_in_flight());
        }

        prop_assert!(applied.len() as u64 <= requests);
        prop_assert!(applied.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert_eq!(state.stats().applied_count, applied.len() as u64);
    }

    #[test]
    fn only_the_current_number_is_ever_applied(resolutions in prop::collection::vec(1u64..20, 0..40)) {
        let mut coordinator = RequestCoordinator::new();
        for _ in 0..10 {
            coordinator.accept();
        }
        let mut applied = 0;
        for seq in resolutions {
            if coordinator.resolve(seq) == Resolution::Apply {
                prop_assert_eq!(seq, 10);
                applied += 1;
            }
        }
        prop_assert!(applied <= 1);
    }
}
