//! Accounting accounts.

use crate::association::AssociationRef;
use crate::list::{ListFilter, Page};
use crate::matches_any;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub description: String,
    pub organization: String,
    pub coordinators: Vec<String>,
    pub flags: Vec<String>,
    /// Populated only when the response embeds associations.
    pub associations: Vec<AssociationRef>,
}

impl Account {
    /// Distinct clusters the embedded associations span, in first-seen order.
    pub fn clusters(&self) -> Vec<String> {
        let mut clusters: Vec<String> = Vec::new();
        for assoc in &self.associations {
            if !assoc.cluster.is_empty() && !clusters.contains(&assoc.cluster) {
                clusters.push(assoc.cluster.clone());
            }
        }
        clusters
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountListOptions {
    pub names: Vec<String>,
    pub organizations: Vec<String>,
    pub with_associations: bool,
    pub with_deleted: bool,
    pub limit: usize,
    pub offset: usize,
}

impl ListFilter<Account> for AccountListOptions {
    fn matches(&self, account: &Account) -> bool {
        matches_any(&self.names, &account.name)
            && matches_any(&self.organizations, &account.organization)
    }

    fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountCreate {
    pub name: String,
    pub description: Option<String>,
    pub organization: Option<String>,
    pub coordinators: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountUpdate {
    pub description: Option<String>,
    pub organization: Option<String>,
    pub coordinators: Option<Vec<String>>,
}
