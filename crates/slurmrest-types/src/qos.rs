//! Quality of service.

use crate::list::{ListFilter, Page};
use crate::matches_any;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Qos {
    pub name: String,
    pub id: u32,
    pub description: String,
    pub priority: u32,
    pub usage_factor: f64,
    pub usage_threshold: f64,
    pub flags: Vec<String>,
    pub preempt_mode: Vec<String>,
    pub preempt_list: Vec<String>,
    /// Seconds.
    pub preempt_exempt_time: u32,
    pub limits: QosLimits,
}

/// Limits are sparse: most versions populate only a subset, and every
/// field stays at zero (or empty) when the backend omits it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QosLimits {
    /// Seconds.
    pub grace_time: u32,
    pub max_jobs_per_user: u32,
    pub max_jobs_per_account: u32,
    pub max_submit_jobs_per_user: u32,
    pub max_submit_jobs_per_account: u32,
    /// Minutes.
    pub max_wall_per_job: u32,
    /// TRES strings such as "cpu=64,gres/gpu=4".
    pub max_tres_per_job: String,
    pub max_tres_per_user: String,
    pub max_tres_per_node: String,
    pub min_priority_threshold: u32,
}

impl QosLimits {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QosListOptions {
    pub names: Vec<String>,
    pub ids: Vec<u32>,
    pub with_deleted: bool,
    pub limit: usize,
    pub offset: usize,
}

impl ListFilter<Qos> for QosListOptions {
    fn matches(&self, qos: &Qos) -> bool {
        matches_any(&self.names, &qos.name) && (self.ids.is_empty() || self.ids.contains(&qos.id))
    }

    fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QosCreate {
    pub name: String,
    pub description: Option<String>,
    pub priority: Option<u32>,
    pub usage_factor: Option<f64>,
    pub flags: Option<Vec<String>>,
    pub preempt_mode: Option<Vec<String>>,
    pub preempt_list: Option<Vec<String>>,
    pub limits: Option<QosLimits>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QosUpdate {
    pub description: Option<String>,
    pub priority: Option<u32>,
    pub usage_factor: Option<f64>,
    pub flags: Option<Vec<String>>,
    pub preempt_mode: Option<Vec<String>>,
    pub preempt_list: Option<Vec<String>>,
    pub limits: Option<QosLimits>,
}
