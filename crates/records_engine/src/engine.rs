use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use fetch_logging::{fetch_debug, fetch_error, fetch_info, fetch_warn};
use records_core::{FetchOutcome, Record, RequestSeq};
use tokio_util::sync::CancellationToken;

use crate::decode::decode_records;
use crate::fetch::{Fetcher, ReqwestFetcher};
use crate::{EngineConfig, EngineEvent, FailureKind, FetchError};

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Start { seq: RequestSeq },
    Cancel { seq: RequestSeq },
}

/// Handle to the fetch worker. Only the most recently started fetch may
/// report a completion; older ones are cancelled when a newer one starts.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Self {
        let fetcher = Arc::new(ReqwestFetcher::new(config.settings));
        Self::with_fetcher(config.endpoint, fetcher)
    }

    pub fn with_fetcher(endpoint: impl Into<String>, fetcher: Arc<dyn Fetcher>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let sink: Arc<dyn EventSink> = Arc::new(ChannelEventSink::new(event_tx));
        let endpoint: Arc<str> = Arc::from(endpoint.into());

        let spawned = thread::Builder::new()
            .name("records-engine".to_string())
            .spawn(move || run_worker(cmd_rx, endpoint, fetcher, sink));
        if let Err(err) = spawned {
            fetch_error!("Failed to spawn engine worker: {}", err);
        }

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn start(&self, seq: RequestSeq) {
        let _ = self.cmd_tx.send(EngineCommand::Start { seq });
    }

    pub fn cancel(&self, seq: RequestSeq) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { seq });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}

/// Maps a completion event to the outcome the store understands.
pub fn outcome_from_event(event: EngineEvent) -> Option<FetchOutcome> {
    match event {
        EngineEvent::FetchCompleted { seq, result } => Some(match result {
            Ok(records) => FetchOutcome::success(seq, records),
            Err(err) => FetchOutcome::failure(seq, err.to_error_info()),
        }),
        EngineEvent::FetchStarted { .. } | EngineEvent::Superseded { .. } => None,
    }
}

fn run_worker(
    cmd_rx: mpsc::Receiver<EngineCommand>,
    endpoint: Arc<str>,
    fetcher: Arc<dyn Fetcher>,
    sink: Arc<dyn EventSink>,
) {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            fetch_error!("Failed to start engine runtime: {}", err);
            return;
        }
    };

    let latest = Arc::new(AtomicU64::new(0));
    let mut in_flight: BTreeMap<RequestSeq, CancellationToken> = BTreeMap::new();

    while let Ok(command) = cmd_rx.recv() {
        // Finished tasks cancel their own token on exit.
        in_flight.retain(|_, token| !token.is_cancelled());

        match command {
            EngineCommand::Start { seq } => {
                let older: Vec<RequestSeq> = in_flight.range(..seq).map(|(s, _)| *s).collect();
                for previous in older {
                    if let Some(token) = in_flight.remove(&previous) {
                        supersede(previous, &token, sink.as_ref());
                    }
                }
                if latest.fetch_max(seq, Ordering::AcqRel) > seq {
                    fetch_warn!("Ignoring start of #{} after a newer request", seq);
                    continue;
                }

                let token = CancellationToken::new();
                in_flight.insert(seq, token.clone());
                fetch_info!("Fetch #{} started endpoint={}", seq, endpoint);
                sink.emit(EngineEvent::FetchStarted { seq });

                runtime.spawn(run_fetch(
                    seq,
                    endpoint.clone(),
                    fetcher.clone(),
                    token,
                    latest.clone(),
                    sink.clone(),
                ));
            }
            EngineCommand::Cancel { seq } => {
                if let Some(token) = in_flight.remove(&seq) {
                    supersede(seq, &token, sink.as_ref());
                }
            }
        }
    }

    for token in in_flight.values() {
        token.cancel();
    }
    fetch_debug!("Engine worker stopped");
}

fn supersede(seq: RequestSeq, token: &CancellationToken, sink: &dyn EventSink) {
    if token.is_cancelled() {
        return;
    }
    token.cancel();
    fetch_debug!("Fetch #{} superseded", seq);
    sink.emit(EngineEvent::Superseded { seq });
}

async fn run_fetch(
    seq: RequestSeq,
    endpoint: Arc<str>,
    fetcher: Arc<dyn Fetcher>,
    token: CancellationToken,
    latest: Arc<AtomicU64>,
    sink: Arc<dyn EventSink>,
) {
    let _done = token.clone().drop_guard();

    let result = tokio::select! {
        _ = token.cancelled() => {
            fetch_debug!("Fetch #{} cancelled before completion", seq);
            return;
        }
        result = fetch_records(fetcher.as_ref(), &endpoint) => result,
    };

    if latest.load(Ordering::Acquire) != seq {
        fetch_debug!("Dropping result of superseded fetch #{}", seq);
        return;
    }

    match &result {
        Ok(records) => fetch_info!("Fetch #{} succeeded records={}", seq, records.len()),
        Err(err) => fetch_warn!("Fetch #{} failed: {}", seq, err),
    }
    sink.emit(EngineEvent::FetchCompleted { seq, result });
}

async fn fetch_records(fetcher: &dyn Fetcher, url: &str) -> Result<Vec<Record>, FetchError> {
    let output = fetcher.fetch(url).await?;
    fetch_debug!(
        "Received {} bytes status={} content_type={:?}",
        output.metadata.byte_len,
        output.metadata.status,
        output.metadata.content_type
    );
    decode_records(&output.bytes).map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
}
