//! Client for the Slurm REST API (slurmrestd), v0.0.40 through v0.0.44.
//!
//! [`SlurmClient`] selects or detects an API version and exposes that
//! version's managers behind the version-independent traits from
//! `slurmrest-core`. Operations a version cannot perform fail with
//! `UnsupportedOperation` before anything is sent.

pub mod client;
pub mod config;
pub mod factory;
pub mod watch;

pub use client::{ClientError, SlurmClient};
pub use config::{ClientConfig, ConfigError};
pub use factory::{adapter_for, detect_version};
pub use watch::{
    JobEvent, JobWatcher, NodeEvent, NodeWatcher, PartitionEvent, PartitionWatcher, WatchConfig,
    WatchEvent,
};

pub use slurmrest_core::{
    ApiVersion, Capabilities, Capability, Error, ErrorKind, RequestContext, Result,
};
pub use slurmrest_http::{HttpTransport, MetricsSnapshot};
pub use slurmrest_types as types;
