//! Records engine: HTTP fetching, decoding and the latest-wins fetch worker.
mod config;
mod decode;
mod engine;
mod fetch;
mod types;

pub use config::{ConfigError, EngineConfig, DEFAULT_ENDPOINT, ENDPOINT_VAR, TIMEOUT_VAR};
pub use decode::{decode_records, DecodeError};
pub use engine::{outcome_from_event, ChannelEventSink, EngineHandle, EventSink};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use types::{EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput};
