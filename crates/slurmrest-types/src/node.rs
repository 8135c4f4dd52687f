//! Compute nodes.

use crate::list::{ListFilter, Page};
use crate::{matches_any, matches_overlap};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Base state of a node. Modifiers such as DRAIN or COMPLETING stay in
/// [`Node::state_flags`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeState {
    Idle,
    Allocated,
    Mixed,
    Down,
    Error,
    Future,
    #[serde(untagged)]
    Unknown(String),
}

impl Default for NodeState {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl NodeState {
    /// Map the primary (first) element of the wire state array.
    pub fn from_wire(flags: &[String]) -> Self {
        let Some(primary) = flags.first() else {
            return Self::Unknown(String::new());
        };
        match primary.to_ascii_uppercase().as_str() {
            "IDLE" => Self::Idle,
            "ALLOCATED" | "ALLOC" => Self::Allocated,
            "MIXED" | "MIX" => Self::Mixed,
            "DOWN" => Self::Down,
            "ERROR" => Self::Error,
            "FUTURE" => Self::Future,
            _ => Self::Unknown(primary.clone()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Idle => "IDLE",
            Self::Allocated => "ALLOCATED",
            Self::Mixed => "MIXED",
            Self::Down => "DOWN",
            Self::Error => "ERROR",
            Self::Future => "FUTURE",
            Self::Unknown(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        Self::from_wire(&[s.to_string()])
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compute node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub hostname: String,
    pub address: String,
    pub architecture: String,
    pub operating_system: String,

    /// Primary state, the first element of `state_flags`.
    pub state: NodeState,
    pub state_flags: Vec<String>,
    pub reason: String,

    pub cpus: u32,
    pub alloc_cpus: u32,
    /// MB.
    pub real_memory: u64,
    pub alloc_memory: u64,
    pub free_memory: u64,
    pub weight: u32,

    pub features: Vec<String>,
    pub active_features: Vec<String>,
    /// Opaque GRES strings, e.g. "gpu:a100:4".
    pub gres: String,
    pub gres_used: String,
    pub partitions: Vec<String>,
    pub comment: String,

    pub boot_time: Option<DateTime<Utc>>,
    pub last_busy: Option<DateTime<Utc>>,
}

impl Node {
    pub fn has_flag(&self, flag: &str) -> bool {
        self.state_flags.iter().any(|f| f.eq_ignore_ascii_case(flag))
    }

    pub fn is_drained(&self) -> bool {
        self.has_flag("DRAIN")
    }

    pub fn idle_cpus(&self) -> u32 {
        self.cpus.saturating_sub(self.alloc_cpus)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeListOptions {
    pub names: Vec<String>,
    pub states: Vec<NodeState>,
    pub partitions: Vec<String>,
    pub features: Vec<String>,
    pub limit: usize,
    pub offset: usize,
}

impl ListFilter<Node> for NodeListOptions {
    fn matches(&self, node: &Node) -> bool {
        matches_any(&self.names, &node.name)
            && (self.states.is_empty() || self.states.contains(&node.state))
            && matches_overlap(&self.partitions, &node.partitions)
            && matches_overlap(&self.features, &node.features)
    }

    fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

/// Fields to change on a node. `state` takes wire values such as
/// "DRAIN", "RESUME" or "DOWN".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeUpdate {
    pub state: Option<Vec<String>>,
    pub reason: Option<String>,
    pub features: Option<Vec<String>>,
    pub active_features: Option<Vec<String>>,
    pub weight: Option<u32>,
    pub comment: Option<String>,
}

impl NodeUpdate {
    pub fn drain(reason: impl Into<String>) -> Self {
        Self {
            state: Some(vec!["DRAIN".to_string()]),
            reason: Some(reason.into()),
            ..Default::default()
        }
    }

    pub fn resume() -> Self {
        Self {
            state: Some(vec!["RESUME".to_string()]),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_state_primary() {
        let flags = vec!["IDLE".to_string(), "DRAIN".to_string()];
        assert_eq!(NodeState::from_wire(&flags), NodeState::Idle);
        assert_eq!(
            NodeState::from_wire(&["PLANNED".to_string()]),
            NodeState::Unknown("PLANNED".to_string())
        );
        assert_eq!(NodeState::from_wire(&[]), NodeState::default());
    }

    #[test]
    fn test_node_flags() {
        let node = Node {
            state: NodeState::Idle,
            state_flags: vec!["IDLE".to_string(), "DRAIN".to_string()],
            cpus: 64,
            alloc_cpus: 16,
            ..Default::default()
        };
        assert!(node.is_drained());
        assert!(!node.has_flag("COMPLETING"));
        assert_eq!(node.idle_cpus(), 48);
    }

    #[test]
    fn test_list_options_matches() {
        let node = Node {
            name: "cn01".to_string(),
            state: NodeState::Mixed,
            partitions: vec!["compute".to_string(), "debug".to_string()],
            features: vec!["avx512".to_string()],
            ..Default::default()
        };
        let opts = NodeListOptions {
            partitions: vec!["debug".to_string()],
            states: vec![NodeState::Mixed],
            ..Default::default()
        };
        assert!(opts.matches(&node));

        let opts = NodeListOptions {
            features: vec!["gpu".to_string()],
            ..Default::default()
        };
        assert!(!opts.matches(&node));
    }

    #[test]
    fn test_drain_update() {
        let update = NodeUpdate::drain("bad dimm");
        assert_eq!(update.state, Some(vec!["DRAIN".to_string()]));
        assert_eq!(update.reason.as_deref(), Some("bad dimm"));
        assert!(NodeUpdate::default().is_empty());
    }
}
