//! Records from endpoints that are not tied to one entity: ping, diag,
//! licenses, shares, instances and reconfigure.

use crate::list::{ListFilter, Page};
use crate::matches_any;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Controller ping results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PingReport {
    pub controllers: Vec<ControllerPing>,
}

impl PingReport {
    /// True when at least one controller answered.
    pub fn is_healthy(&self) -> bool {
        self.controllers.iter().any(|c| c.responding)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControllerPing {
    pub hostname: String,
    pub responding: bool,
    /// "primary", "backup1", ...
    pub mode: String,
    /// Microseconds.
    pub latency: u64,
}

/// slurmctld scheduler statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub server_thread_count: u32,
    pub agent_queue_size: u32,
    pub jobs_submitted: u32,
    pub jobs_started: u32,
    pub jobs_completed: u32,
    pub jobs_canceled: u32,
    pub jobs_failed: u32,
    pub jobs_pending: u32,
    pub jobs_running: u32,
    /// Microseconds.
    pub schedule_cycle_last: u64,
    pub schedule_cycle_mean: u64,
    pub bf_cycle_last: u64,
    pub bf_backfilled_jobs: u32,
    pub req_time: Option<DateTime<Utc>>,
}

/// slurmdbd RPC statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DbDiagnostics {
    pub time_start: Option<DateTime<Utc>>,
    pub rollups: u32,
    pub rpcs: Vec<RpcStat>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcStat {
    pub rpc: String,
    pub count: u64,
    /// Microseconds.
    pub time_total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    pub total: u32,
    pub used: u32,
    pub free: u32,
    pub reserved: u32,
    pub remote: bool,
}

/// One row of the fair-share tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShareRecord {
    pub id: u32,
    pub cluster: String,
    /// Account or user name.
    pub name: String,
    pub parent: String,
    pub partition: String,
    pub shares: u64,
    pub shares_normalized: f64,
    pub usage: u64,
    pub effective_usage: f64,
    pub fairshare: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShareListOptions {
    pub accounts: Vec<String>,
    pub users: Vec<String>,
    pub limit: usize,
    pub offset: usize,
}

impl ListFilter<ShareRecord> for ShareListOptions {
    fn matches(&self, share: &ShareRecord) -> bool {
        (self.accounts.is_empty() && self.users.is_empty())
            || self.accounts.iter().any(|a| *a == share.name || *a == share.parent)
            || self.users.iter().any(|u| *u == share.name)
    }

    fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

/// Cloud/dynamic node instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub cluster: String,
    pub instance_id: String,
    pub instance_type: String,
    pub node_name: String,
    pub extra: String,
    pub time_start: Option<DateTime<Utc>>,
    pub time_end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstanceListOptions {
    pub clusters: Vec<String>,
    pub node_names: Vec<String>,
    pub instance_types: Vec<String>,
    pub limit: usize,
    pub offset: usize,
}

impl ListFilter<Instance> for InstanceListOptions {
    fn matches(&self, instance: &Instance) -> bool {
        matches_any(&self.clusters, &instance.cluster)
            && matches_any(&self.node_names, &instance.node_name)
            && matches_any(&self.instance_types, &instance.instance_type)
    }

    fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconfigureResponse {
    pub warnings: Vec<String>,
}
