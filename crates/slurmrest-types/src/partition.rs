//! Partitions.

use crate::list::{ListFilter, Page};
use crate::matches_any;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartitionState {
    Up,
    Down,
    Drain,
    Inactive,
    #[serde(untagged)]
    Unknown(String),
}

impl Default for PartitionState {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl PartitionState {
    /// Map the primary (first) element of the wire state array.
    pub fn from_wire(flags: &[String]) -> Self {
        let Some(primary) = flags.first() else {
            return Self::Unknown(String::new());
        };
        match primary.to_ascii_uppercase().as_str() {
            "UP" => Self::Up,
            "DOWN" => Self::Down,
            "DRAIN" => Self::Drain,
            "INACTIVE" => Self::Inactive,
            _ => Self::Unknown(primary.clone()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Drain => "DRAIN",
            Self::Inactive => "INACTIVE",
            Self::Unknown(s) => s,
        }
    }
}

impl fmt::Display for PartitionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A partition. Limits are plain numbers; 0 means unset or unlimited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    pub name: String,
    pub state: PartitionState,
    pub state_flags: Vec<String>,

    pub total_nodes: u32,
    pub node_list: String,
    pub total_cpus: u32,

    pub max_nodes: u32,
    pub min_nodes: u32,
    pub max_cpus_per_node: u32,
    /// MB.
    pub max_memory_per_node: u64,
    pub max_memory_per_cpu: u64,
    pub default_memory_per_cpu: u64,
    pub default_memory_per_node: u64,

    /// Minutes.
    pub default_time: u32,
    pub max_time: u32,

    pub priority_tier: u32,
    pub priority_job_factor: u32,

    /// QoS attached to the partition itself.
    pub qos: String,
    pub allowed_qos: Vec<String>,
    pub denied_qos: Vec<String>,
    pub allowed_accounts: Vec<String>,
    pub denied_accounts: Vec<String>,
    pub allowed_groups: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionListOptions {
    pub names: Vec<String>,
    pub states: Vec<PartitionState>,
    pub limit: usize,
    pub offset: usize,
}

impl ListFilter<Partition> for PartitionListOptions {
    fn matches(&self, partition: &Partition) -> bool {
        matches_any(&self.names, &partition.name)
            && (self.states.is_empty() || self.states.contains(&partition.state))
    }

    fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

/// Partition definition. slurmrestd exposes no partition write endpoints;
/// the type exists so callers get a typed `UnsupportedOperation`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionCreate {
    pub name: String,
    pub nodes: Option<String>,
    pub max_time: Option<u32>,
    pub default_time: Option<u32>,
    pub allowed_accounts: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionUpdate {
    pub state: Option<String>,
    pub nodes: Option<String>,
    pub max_time: Option<u32>,
    pub default_time: Option<u32>,
    pub allowed_accounts: Option<Vec<String>>,
}
