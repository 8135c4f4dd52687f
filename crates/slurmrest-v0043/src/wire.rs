//! v0.0.43 wire shapes.
//!
//! Only the fields the converters read or write are modelled; unknown keys
//! are ignored on decode. Every field is optional because slurmrestd omits
//! what it does not know.

use serde::{Deserialize, Serialize};
use slurmrest_parsers::NoVal;

pub type NoValU32 = NoVal<u32>;
pub type NoValU64 = NoVal<u64>;
pub type NoValI32 = NoVal<i32>;
pub type NoValI64 = NoVal<i64>;
pub type NoValF64 = NoVal<f64>;

// ---------------------------------------------------------------- jobs

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_state: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpus: Option<NoValU32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_count: Option<NoValU32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_per_node: Option<NoValU64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit_time: Option<NoValI64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NoValI64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NoValI64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<NoValU32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qos: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<NoValU32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_working_directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_input: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<ExitCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_job_id: Option<NoValU32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_task_id: Option<NoValU32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExitCode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_code: Option<NoValI32>,
}

/// `job_desc_msg`: submission, update and allocation bodies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDescMsg {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qos: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<NoValU32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_nodes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpus_per_task: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_per_node: Option<NoValU64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_working_directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_input: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<NoValU32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nice: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_switches: Option<NoValU32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobSubmitReq {
    pub job: JobDescMsg,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobSubmitResp {
    pub job_id: Option<u32>,
    pub step_id: Option<String>,
    pub job_submit_user_msg: Option<String>,
    pub result: Option<JobSubmitResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobSubmitResult {
    pub job_id: Option<u32>,
    pub step_id: Option<String>,
    pub error_code: Option<i32>,
    pub job_submit_user_msg: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobAllocReq {
    pub job: JobDescMsg,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobAllocResp {
    pub job_id: Option<u32>,
    pub job_submit_user_msg: Option<String>,
}

// --------------------------------------------------------------- nodes

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpus: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alloc_cpus: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub real_memory: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alloc_memory: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_mem: Option<NoValU64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gres: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gres_used: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot_time: Option<NoValI64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_busy: Option<NoValI64>,
}

/// `update_node_msg`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateNodeMsg {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features_act: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<NoValU32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

// ---------------------------------------------------------- partitions

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<PartitionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<PartitionNodes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpus: Option<PartitionCpus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximums: Option<PartitionMaximums>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimums: Option<PartitionMinimums>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<PartitionDefaults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<PartitionPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qos: Option<PartitionQos>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounts: Option<PartitionAccounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<PartitionGroups>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionNodes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configured: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionCpus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionMaximums {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<NoValU32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpus_per_node: Option<NoValU32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition_memory_per_node: Option<NoValU64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition_memory_per_cpu: Option<NoValU64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<NoValU32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionMinimums {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionDefaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition_memory_per_cpu: Option<NoValU64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition_memory_per_node: Option<NoValU64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<NoValU32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionPriority {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_factor: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionQos {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deny: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionAccounts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deny: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionGroups {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed: Option<String>,
}

// ------------------------------------------------------------ accounts

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountRec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinators: Option<Vec<Coord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associations: Option<Vec<AssocShort>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssocShort {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
}

// --------------------------------------------------------------- users

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<UserDefault>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administrator_level: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associations: Option<Vec<AssocShort>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinators: Option<Vec<Coord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wckeys: Option<Vec<WcKeyRec>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserDefault {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wckey: Option<String>,
}

// ----------------------------------------------------------------- qos

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QosRec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<NoValU32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_factor: Option<NoValF64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_threshold: Option<NoValF64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preempt: Option<QosPreempt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits: Option<QosLimitsWire>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QosPreempt {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exempt_time: Option<NoValU32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QosLimitsWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grace_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<QosMax>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<QosMin>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QosMax {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<QosMaxJobs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tres: Option<QosMaxTres>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wall_clock: Option<QosWallClock>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QosMaxJobs {
    /// Running jobs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_jobs: Option<QosActiveJobs>,
    /// Submitted jobs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per: Option<PerUserAccount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QosActiveJobs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per: Option<PerUserAccount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerUserAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<NoValU32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<NoValU32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QosMaxTres {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per: Option<QosTresPer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QosTresPer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<Vec<TresWire>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Vec<TresWire>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<Vec<TresWire>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QosWallClock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per: Option<QosWallPer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QosWallPer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<NoValU32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QosMin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_threshold: Option<NoValU32>,
}

// -------------------------------------------------------- reservations

/// Read shape: user/account/group lists arrive comma-joined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservationInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NoValI64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NoValI64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_list: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub burst_buffer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub licenses: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tres: Option<String>,
}

/// `reservation_desc_msg`: the write shape takes real arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservationDescMsg {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NoValI64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NoValI64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<NoValU32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_list: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_count: Option<NoValU32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core_count: Option<NoValU32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounts: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub licenses: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub burst_buffer: Option<String>,
}

// -------------------------------------------------------- associations

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssocRec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<AssocDefault>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qos: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares_raw: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<NoValU32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<AssocMax>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssocDefault {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qos: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssocMax {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<AssocMaxJobs>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssocMaxJobs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per: Option<AssocMaxJobsPer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssocMaxJobsPer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<NoValU32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted: Option<NoValU32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wall_clock: Option<NoValU32>,
}

// ---------------------------------------------------- clusters / wckeys

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterRec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller: Option<ClusterController>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpc_version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_plugin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tres: Option<Vec<TresWire>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associations: Option<ClusterAssociations>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterController {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterAssociations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<AssocShort>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WcKeyRec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<Vec<String>>,
}

// ----------------------------------------------------------------- tres

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TresWire {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
}

// ----------------------------------------------------------- standalone

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerPingWire {
    pub hostname: Option<String>,
    pub pinged: Option<String>,
    pub responding: Option<bool>,
    pub latency: Option<u64>,
    pub mode: Option<String>,
    pub primary: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagResp {
    pub statistics: DiagStatistics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagStatistics {
    pub server_thread_count: Option<u32>,
    pub agent_queue_size: Option<u32>,
    pub jobs_submitted: Option<u32>,
    pub jobs_started: Option<u32>,
    pub jobs_completed: Option<u32>,
    pub jobs_canceled: Option<u32>,
    pub jobs_failed: Option<u32>,
    pub jobs_pending: Option<u32>,
    pub jobs_running: Option<u32>,
    pub schedule_cycle_last: Option<u64>,
    pub schedule_cycle_mean: Option<u64>,
    pub bf_cycle_last: Option<u64>,
    pub bf_backfilled_jobs: Option<u32>,
    pub req_time: Option<NoValI64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbDiagResp {
    pub statistics: DbDiagStatistics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbDiagStatistics {
    pub time_start: Option<i64>,
    pub rollups: Vec<serde_json::Value>,
    #[serde(rename = "RPCs")]
    pub rpcs: Vec<DbRpcWire>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbRpcWire {
    pub rpc: Option<String>,
    pub count: Option<u64>,
    pub time: Option<DbRpcTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbRpcTime {
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LicenseWire {
    #[serde(rename = "LicenseName")]
    pub name: Option<String>,
    #[serde(rename = "Total")]
    pub total: Option<u32>,
    #[serde(rename = "Used")]
    pub used: Option<u32>,
    #[serde(rename = "Free")]
    pub free: Option<u32>,
    #[serde(rename = "Reserved")]
    pub reserved: Option<u32>,
    #[serde(rename = "Remote")]
    pub remote: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharesResp {
    pub shares: SharesList,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharesList {
    pub shares: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareWire {
    pub id: Option<u32>,
    pub cluster: Option<String>,
    pub name: Option<String>,
    pub parent: Option<String>,
    pub partition: Option<String>,
    pub shares: Option<NoValU64>,
    pub shares_normalized: Option<NoValF64>,
    pub usage: Option<u64>,
    pub effective_usage: Option<NoValF64>,
    pub fairshare: Option<ShareFairshare>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareFairshare {
    pub factor: Option<NoValF64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceWire {
    pub cluster: Option<String>,
    pub extra: Option<String>,
    pub instance_id: Option<String>,
    pub instance_type: Option<String>,
    pub node_name: Option<String>,
    pub time: Option<InstanceTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceTime {
    pub time_start: Option<i64>,
    pub time_end: Option<i64>,
}
