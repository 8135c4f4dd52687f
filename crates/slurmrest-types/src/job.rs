//! Jobs.

use crate::list::{ListFilter, Page};
use crate::matches_any;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slurmrest_parsers::{HostlistError, expand_hostlist};
use std::collections::BTreeMap;
use std::fmt;

/// Scheduling state of a job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobState {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
    Timeout,
    Suspended,
    Requeued,
    Held,
    /// Wire value with no canonical mapping.
    #[serde(untagged)]
    Unknown(String),
}

impl Default for JobState {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl JobState {
    /// Map a wire state array plus state reason.
    ///
    /// The first element is the primary state. A pending job held by the
    /// user or an admin is reported as `Held`.
    pub fn from_wire(flags: &[String], reason: &str) -> Self {
        let Some(primary) = flags.first() else {
            return Self::Unknown(String::new());
        };
        let has = |flag: &str| flags.iter().any(|f| f.eq_ignore_ascii_case(flag));

        match primary.to_ascii_uppercase().as_str() {
            "PENDING" if reason.starts_with("JobHeld") || has("REQUEUE_HOLD") => Self::Held,
            "PENDING" if has("REQUEUED") => Self::Requeued,
            "PENDING" => Self::Pending,
            "RUNNING" | "COMPLETING" | "CONFIGURING" | "RESIZING" | "SIGNALING"
            | "STAGE_OUT" => Self::Running,
            "COMPLETED" => Self::Completed,
            "FAILED" | "NODE_FAIL" | "BOOT_FAIL" | "OUT_OF_MEMORY" => Self::Failed,
            "CANCELLED" | "PREEMPTED" | "REVOKED" => Self::Cancelled,
            "TIMEOUT" | "DEADLINE" => Self::Timeout,
            "SUSPENDED" | "STOPPED" => Self::Suspended,
            "REQUEUED" | "REQUEUE_FED" => Self::Requeued,
            "REQUEUE_HOLD" | "SPECIAL_EXIT" => Self::Held,
            _ => Self::Unknown(primary.clone()),
        }
    }

    /// Canonical upper-case name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
            Self::Timeout => "TIMEOUT",
            Self::Suspended => "SUSPENDED",
            Self::Requeued => "REQUEUED",
            Self::Held => "HELD",
            Self::Unknown(s) => s,
        }
    }

    /// Wire state array for a state with no recorded flags.
    pub fn to_wire(&self) -> Vec<String> {
        match self {
            Self::Held => vec!["PENDING".to_string()],
            Self::Unknown(s) if s.is_empty() => Vec::new(),
            other => vec![other.as_str().to_string()],
        }
    }

    /// Check if this state is terminal (job finished).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Failed | Self::Cancelled | Self::Timeout
        )
    }

    /// Parse a user-supplied state name (CLI filters).
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "HELD" => Self::Held,
            other => Self::from_wire(&[other.to_string()], ""),
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A job as reported by the controller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub job_id: u32,
    pub name: String,
    pub user_id: u32,
    pub user_name: String,
    pub group_id: u32,

    pub state: JobState,
    /// Full wire state set; `state` is derived from its first element.
    pub state_flags: Vec<String>,
    pub state_reason: String,

    pub partition: String,
    /// Hostlist expression of allocated nodes.
    pub node_list: String,
    pub cpus: u32,
    pub node_count: u32,
    /// Memory per node in MB.
    pub memory_per_node: u64,

    pub submit_time: Option<DateTime<Utc>>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// Minutes, 0 when unset or unlimited.
    pub time_limit: u32,

    pub account: String,
    pub qos: String,
    pub priority: u32,

    pub command: String,
    pub working_directory: String,
    pub standard_input: String,
    pub standard_output: String,
    pub standard_error: String,
    pub exit_code: i32,
    pub comment: String,

    pub array_job_id: u32,
    pub array_task_id: Option<u32>,
}

impl Job {
    /// Expanded host names of `node_list`.
    pub fn nodes(&self) -> Result<Vec<String>, HostlistError> {
        expand_hostlist(&self.node_list)
    }
}

/// Filters for listing jobs. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobListOptions {
    pub job_ids: Vec<u32>,
    pub names: Vec<String>,
    pub users: Vec<String>,
    pub accounts: Vec<String>,
    pub partitions: Vec<String>,
    pub states: Vec<JobState>,
    pub limit: usize,
    pub offset: usize,
}

impl ListFilter<Job> for JobListOptions {
    fn matches(&self, job: &Job) -> bool {
        (self.job_ids.is_empty() || self.job_ids.contains(&job.job_id))
            && matches_any(&self.names, &job.name)
            && matches_any(&self.users, &job.user_name)
            && matches_any(&self.accounts, &job.account)
            && matches_any(&self.partitions, &job.partition)
            && (self.states.is_empty() || self.states.contains(&job.state))
    }

    fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

/// Batch job submission. Only `script` is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobSubmission {
    pub script: String,
    pub name: Option<String>,
    pub partition: Option<String>,
    pub account: Option<String>,
    pub qos: Option<String>,
    /// Minutes.
    pub time_limit: Option<u32>,
    pub nodes: Option<u32>,
    pub tasks: Option<u32>,
    pub cpus_per_task: Option<u32>,
    /// MB per node.
    pub memory_per_node: Option<u64>,
    pub working_directory: Option<String>,
    pub standard_input: Option<String>,
    pub standard_output: Option<String>,
    pub standard_error: Option<String>,
    pub comment: Option<String>,
    pub array: Option<String>,
    pub dependency: Option<String>,
    pub environment: BTreeMap<String, String>,
}

impl JobSubmission {
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            ..Default::default()
        }
    }

    /// Environment in `KEY=value` form. slurmrestd rejects a submission
    /// without an environment, so PATH is filled in when missing.
    pub fn environment_list(&self) -> Vec<String> {
        environment_list(&self.environment)
    }
}

fn environment_list(environment: &BTreeMap<String, String>) -> Vec<String> {
    let mut env: Vec<String> = environment
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect();
    if !environment.contains_key("PATH") {
        env.insert(0, "PATH=/usr/bin:/bin".to_string());
    }
    env
}

/// Result of a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSubmitResponse {
    pub job_id: u32,
    pub step_id: String,
    pub user_message: String,
    pub warnings: Vec<String>,
}

/// Fields to change on a queued or running job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobUpdate {
    pub name: Option<String>,
    pub partition: Option<String>,
    pub account: Option<String>,
    pub qos: Option<String>,
    /// Minutes.
    pub time_limit: Option<u32>,
    pub priority: Option<u32>,
    pub nice: Option<i32>,
    pub comment: Option<String>,
    pub hold: Option<bool>,
}

impl JobUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Interactive allocation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobAllocation {
    pub name: Option<String>,
    pub partition: Option<String>,
    pub account: Option<String>,
    pub qos: Option<String>,
    pub time_limit: Option<u32>,
    pub nodes: Option<u32>,
    pub tasks: Option<u32>,
    pub cpus_per_task: Option<u32>,
    pub memory_per_node: Option<u64>,
    pub environment: BTreeMap<String, String>,
}

impl JobAllocation {
    /// True when the request names at least one resource to allocate.
    pub fn requests_resources(&self) -> bool {
        self.nodes.is_some_and(|n| n > 0)
            || self.tasks.is_some_and(|n| n > 0)
            || self.cpus_per_task.is_some_and(|n| n > 0)
            || self.memory_per_node.is_some_and(|n| n > 0)
    }

    pub fn environment_list(&self) -> Vec<String> {
        environment_list(&self.environment)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobAllocateResponse {
    pub job_id: u32,
    pub user_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_state_from_wire() {
        assert_eq!(JobState::from_wire(&flags(&["PENDING"]), ""), JobState::Pending);
        assert_eq!(JobState::from_wire(&flags(&["RUNNING"]), ""), JobState::Running);
        assert_eq!(
            JobState::from_wire(&flags(&["COMPLETING"]), ""),
            JobState::Running
        );
        assert_eq!(
            JobState::from_wire(&flags(&["NODE_FAIL"]), ""),
            JobState::Failed
        );
        assert_eq!(
            JobState::from_wire(&flags(&["OUT_OF_MEMORY"]), ""),
            JobState::Failed
        );
        assert_eq!(
            JobState::from_wire(&flags(&["DEADLINE"]), ""),
            JobState::Timeout
        );
        assert_eq!(
            JobState::from_wire(&flags(&["PREEMPTED"]), ""),
            JobState::Cancelled
        );
    }

    #[test]
    fn test_state_held_and_requeued() {
        assert_eq!(
            JobState::from_wire(&flags(&["PENDING"]), "JobHeldUser"),
            JobState::Held
        );
        assert_eq!(
            JobState::from_wire(&flags(&["PENDING", "REQUEUED"]), "BeginTime"),
            JobState::Requeued
        );
        assert_eq!(
            JobState::from_wire(&flags(&["REQUEUE_HOLD"]), ""),
            JobState::Held
        );
    }

    #[test]
    fn test_state_unknown_never_fails() {
        assert_eq!(
            JobState::from_wire(&flags(&["WIBBLE"]), ""),
            JobState::Unknown("WIBBLE".to_string())
        );
        assert_eq!(
            JobState::from_wire(&[], ""),
            JobState::Unknown(String::new())
        );
    }

    #[test]
    fn test_state_serde() {
        assert_eq!(
            serde_json::to_string(&JobState::Running).unwrap(),
            "\"Running\""
        );
        assert_eq!(
            serde_json::to_string(&JobState::Unknown("WIBBLE".to_string())).unwrap(),
            "\"WIBBLE\""
        );
        let back: JobState = serde_json::from_str("\"WIBBLE\"").unwrap();
        assert_eq!(back, JobState::Unknown("WIBBLE".to_string()));
    }

    #[test]
    fn test_state_parse() {
        assert_eq!(JobState::parse("running"), JobState::Running);
        assert_eq!(JobState::parse("held"), JobState::Held);
    }

    #[test]
    fn test_is_terminal() {
        assert!(JobState::Completed.is_terminal());
        assert!(JobState::Timeout.is_terminal());
        assert!(!JobState::Running.is_terminal());
        assert!(!JobState::Held.is_terminal());
    }

    #[test]
    fn test_list_options_matches() {
        let job = Job {
            job_id: 7,
            name: "align".to_string(),
            account: "genomics".to_string(),
            state: JobState::Running,
            ..Default::default()
        };

        assert!(JobListOptions::default().matches(&job));
        assert!(
            JobListOptions {
                states: vec![JobState::Running],
                accounts: vec!["genomics".to_string()],
                ..Default::default()
            }
            .matches(&job)
        );
        assert!(
            !JobListOptions {
                job_ids: vec![8],
                ..Default::default()
            }
            .matches(&job)
        );
    }

    #[test]
    fn test_environment_list_adds_path() {
        let mut submission = JobSubmission::new("#!/bin/bash\necho hi");
        submission
            .environment
            .insert("FOO".to_string(), "bar".to_string());
        assert_eq!(
            submission.environment_list(),
            vec!["PATH=/usr/bin:/bin", "FOO=bar"]
        );

        submission
            .environment
            .insert("PATH".to_string(), "/opt/bin".to_string());
        assert_eq!(
            submission.environment_list(),
            vec!["FOO=bar", "PATH=/opt/bin"]
        );
    }

    #[test]
    fn test_allocation_requests_resources() {
        assert!(!JobAllocation::default().requests_resources());
        assert!(
            JobAllocation {
                tasks: Some(4),
                ..Default::default()
            }
            .requests_resources()
        );
        assert!(
            !JobAllocation {
                nodes: Some(0),
                ..Default::default()
            }
            .requests_resources()
        );
    }

    #[test]
    fn test_job_nodes() {
        let job = Job {
            node_list: "cn[1-2]".to_string(),
            ..Default::default()
        };
        assert_eq!(job.nodes().unwrap(), vec!["cn1", "cn2"]);
    }

    #[test]
    fn test_job_update_is_empty() {
        assert!(JobUpdate::default().is_empty());
        assert!(
            !JobUpdate {
                hold: Some(true),
                ..Default::default()
            }
            .is_empty()
        );
    }
}
