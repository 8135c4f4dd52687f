//! Clusters registered in slurmdbd.

use crate::association::AssociationRef;
use crate::list::{ListFilter, Page};
use crate::matches_any;
use crate::tres::Tres;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub name: String,
    pub controller_host: String,
    pub controller_port: u32,
    /// Hostlist expression.
    pub nodes: String,
    pub rpc_version: u32,
    pub select_plugin: String,
    pub tres: Vec<Tres>,
    pub root_association: Option<AssociationRef>,
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterListOptions {
    pub names: Vec<String>,
    pub limit: usize,
    pub offset: usize,
}

impl ListFilter<Cluster> for ClusterListOptions {
    fn matches(&self, cluster: &Cluster) -> bool {
        matches_any(&self.names, &cluster.name)
    }

    fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterCreate {
    pub name: String,
    pub controller_host: Option<String>,
    pub controller_port: Option<u32>,
    pub rpc_version: Option<u32>,
    pub select_plugin: Option<String>,
    pub flags: Option<Vec<String>>,
}

/// Fields to change on an existing cluster; `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterUpdate {
    pub controller_host: Option<String>,
    pub controller_port: Option<u32>,
    pub rpc_version: Option<u32>,
    pub flags: Option<Vec<String>>,
}
