//! Workload characterization keys.

use crate::list::{ListFilter, Page};
use crate::matches_any;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WcKey {
    pub id: u32,
    pub name: String,
    pub user: String,
    pub cluster: String,
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WcKeyListOptions {
    pub names: Vec<String>,
    pub users: Vec<String>,
    pub clusters: Vec<String>,
    pub limit: usize,
    pub offset: usize,
}

impl ListFilter<WcKey> for WcKeyListOptions {
    fn matches(&self, wckey: &WcKey) -> bool {
        matches_any(&self.names, &wckey.name)
            && matches_any(&self.users, &wckey.user)
            && matches_any(&self.clusters, &wckey.cluster)
    }

    fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WcKeyCreate {
    pub name: String,
    pub user: String,
    pub cluster: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WcKeyUpdate {
    pub name: Option<String>,
}
