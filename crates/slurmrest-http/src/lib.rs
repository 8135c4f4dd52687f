//! HTTP transport for slurmrest, backed by reqwest.

pub mod metrics;
pub mod transport;

pub use metrics::{MetricsSnapshot, TransportMetrics};
pub use transport::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, HttpTransport, HttpTransportBuilder};
