//! Associations: the account/user/cluster/partition join with limits.

use crate::list::{ListFilter, Page};
use crate::matches_any;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Composite identity of an association. An empty `user` is the account's
/// own association; an empty `partition` applies to every partition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssociationKey {
    pub account: String,
    pub user: String,
    pub cluster: String,
    pub partition: String,
}

impl AssociationKey {
    pub fn new(
        account: impl Into<String>,
        user: impl Into<String>,
        cluster: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            user: user.into(),
            cluster: cluster.into(),
            partition: String::new(),
        }
    }

    pub fn with_partition(mut self, partition: impl Into<String>) -> Self {
        self.partition = partition.into();
        self
    }
}

impl fmt::Display for AssociationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "account={} user={} cluster={}",
            self.account, self.user, self.cluster
        )?;
        if !self.partition.is_empty() {
            write!(f, " partition={}", self.partition)?;
        }
        Ok(())
    }
}

/// Short reference to an association as embedded in users and clusters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationRef {
    pub account: String,
    pub cluster: String,
    pub partition: String,
    pub user: String,
    pub id: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Association {
    pub key: AssociationKey,
    pub id: u32,
    pub parent_account: String,
    pub is_default: bool,
    pub default_qos: String,
    pub qos: Vec<String>,
    pub shares_raw: u32,
    pub priority: u32,
    pub max_jobs: u32,
    pub max_submit_jobs: u32,
    /// Minutes.
    pub max_wall_per_job: u32,
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssociationListOptions {
    pub accounts: Vec<String>,
    pub users: Vec<String>,
    pub clusters: Vec<String>,
    pub partitions: Vec<String>,
    pub limit: usize,
    pub offset: usize,
}

impl ListFilter<Association> for AssociationListOptions {
    fn matches(&self, assoc: &Association) -> bool {
        matches_any(&self.accounts, &assoc.key.account)
            && matches_any(&self.users, &assoc.key.user)
            && matches_any(&self.clusters, &assoc.key.cluster)
            && matches_any(&self.partitions, &assoc.key.partition)
    }

    fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssociationCreate {
    pub key: AssociationKey,
    pub parent_account: Option<String>,
    pub is_default: Option<bool>,
    pub default_qos: Option<String>,
    pub qos: Option<Vec<String>>,
    pub shares_raw: Option<u32>,
    pub priority: Option<u32>,
    pub max_jobs: Option<u32>,
    pub max_submit_jobs: Option<u32>,
    pub max_wall_per_job: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssociationUpdate {
    pub is_default: Option<bool>,
    pub default_qos: Option<String>,
    pub qos: Option<Vec<String>>,
    pub shares_raw: Option<u32>,
    pub priority: Option<u32>,
    pub max_jobs: Option<u32>,
    pub max_submit_jobs: Option<u32>,
    pub max_wall_per_job: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display() {
        let key = AssociationKey::new("lab", "alice", "hpc");
        assert_eq!(key.to_string(), "account=lab user=alice cluster=hpc");
        let key = key.with_partition("gpu");
        assert_eq!(
            key.to_string(),
            "account=lab user=alice cluster=hpc partition=gpu"
        );
    }

    #[test]
    fn test_list_options_matches() {
        let assoc = Association {
            key: AssociationKey::new("lab", "alice", "hpc"),
            ..Default::default()
        };
        assert!(
            AssociationListOptions {
                users: vec!["alice".to_string()],
                ..Default::default()
            }
            .matches(&assoc)
        );
        assert!(
            !AssociationListOptions {
                clusters: vec!["other".to_string()],
                ..Default::default()
            }
            .matches(&assoc)
        );
    }
}
