//! Accounting users.

use crate::association::AssociationRef;
use crate::list::{ListFilter, Page};
use crate::matches_any;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdminLevel {
    #[default]
    None,
    Operator,
    Administrator,
    #[serde(untagged)]
    Unknown(String),
}

impl AdminLevel {
    /// Wire values arrive as a one-element array in newer versions.
    pub fn from_wire(levels: &[String]) -> Self {
        match levels.first().map(|s| s.to_ascii_lowercase()).as_deref() {
            None | Some("none") | Some("") => Self::None,
            Some("operator") => Self::Operator,
            Some("administrator") | Some("admin") => Self::Administrator,
            Some(_) => Self::Unknown(levels[0].clone()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "None",
            Self::Operator => "Operator",
            Self::Administrator => "Administrator",
            Self::Unknown(s) => s,
        }
    }
}

impl fmt::Display for AdminLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub default_account: String,
    pub default_wckey: String,
    pub admin_level: AdminLevel,
    pub associations: Vec<AssociationRef>,
    /// Accounts this user coordinates.
    pub coordinator_of: Vec<String>,
    pub wckeys: Vec<String>,
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserListOptions {
    pub names: Vec<String>,
    pub default_accounts: Vec<String>,
    pub admin_levels: Vec<AdminLevel>,
    pub with_associations: bool,
    pub with_deleted: bool,
    pub limit: usize,
    pub offset: usize,
}

impl ListFilter<User> for UserListOptions {
    fn matches(&self, user: &User) -> bool {
        matches_any(&self.names, &user.name)
            && matches_any(&self.default_accounts, &user.default_account)
            && (self.admin_levels.is_empty() || self.admin_levels.contains(&user.admin_level))
    }

    fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub default_account: Option<String>,
    pub default_wckey: Option<String>,
    pub admin_level: Option<AdminLevel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserUpdate {
    pub default_account: Option<String>,
    pub default_wckey: Option<String>,
    pub admin_level: Option<AdminLevel>,
}
