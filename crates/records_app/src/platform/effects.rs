use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use fetch_logging::{fetch_debug, fetch_info};
use records_core::{Effect, Msg};
use records_engine::{outcome_from_event, EngineConfig, EngineEvent, EngineHandle};

use super::app::AppEvent;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: EngineConfig, event_tx: mpsc::Sender<AppEvent>) -> Self {
        fetch_info!("Using endpoint {}", config.endpoint);
        let engine = EngineHandle::new(config);
        let runner = Self { engine };
        runner.spawn_event_loop(event_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartFetch { seq } => self.engine.start(seq),
                Effect::CancelFetch { seq } => self.engine.cancel(seq),
            }
        }
    }

    fn spawn_event_loop(&self, event_tx: mpsc::Sender<AppEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            let Some(event) = engine.recv_timeout(Duration::from_millis(100)) else {
                continue;
            };
            if let EngineEvent::Superseded { seq } = &event {
                fetch_debug!("Request #{} superseded", seq);
            }
            if let Some(outcome) = outcome_from_event(event) {
                if event_tx
                    .send(AppEvent::Dispatch(Msg::FetchResolved(outcome)))
                    .is_err()
                {
                    break;
                }
            }
        });
    }
}
