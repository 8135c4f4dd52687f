//! Accounts.

use super::text;
use crate::wire::{AccountRec, AssocShort, Coord};
use slurmrest_core::{ConversionError, Converter, require_name};
use slurmrest_parsers::{clean_list, present, present_list};
use slurmrest_types::{Account, AccountCreate, AccountUpdate, AssociationRef};

pub struct AccountConverter;

pub(crate) fn coordinators(coords: Option<&Vec<Coord>>) -> Vec<String> {
    coords
        .map(|c| {
            c.iter()
                .filter(|c| !c.name.is_empty())
                .map(|c| c.name.clone())
                .collect()
        })
        .unwrap_or_default()
}

pub(crate) fn coordinators_to_wire(names: &[String]) -> Option<Vec<Coord>> {
    if names.is_empty() {
        return None;
    }
    Some(
        names
            .iter()
            .map(|name| Coord {
                name: name.clone(),
                direct: None,
            })
            .collect(),
    )
}

pub(crate) fn association_ref(a: &AssocShort) -> AssociationRef {
    AssociationRef {
        account: text(a.account.as_ref()),
        cluster: text(a.cluster.as_ref()),
        partition: text(a.partition.as_ref()),
        user: text(a.user.as_ref()),
        id: a.id.unwrap_or_default(),
    }
}

pub(crate) fn association_ref_to_wire(a: &AssociationRef) -> AssocShort {
    AssocShort {
        account: present(&a.account),
        cluster: present(&a.cluster),
        partition: present(&a.partition),
        user: present(&a.user),
        id: Some(a.id).filter(|id| *id != 0),
    }
}

pub(crate) fn association_refs(list: Option<&Vec<AssocShort>>) -> Vec<AssociationRef> {
    list.map(|l| l.iter().map(association_ref).collect())
        .unwrap_or_default()
}

pub(crate) fn association_refs_to_wire(list: &[AssociationRef]) -> Option<Vec<AssocShort>> {
    if list.is_empty() {
        None
    } else {
        Some(list.iter().map(association_ref_to_wire).collect())
    }
}

impl Converter for AccountConverter {
    type Wire = AccountRec;
    type Domain = Account;

    fn to_common(&self, w: &AccountRec) -> Result<Account, ConversionError> {
        Ok(Account {
            name: require_name("account", "name", w.name.as_ref())?,
            description: text(w.description.as_ref()),
            organization: text(w.organization.as_ref()),
            coordinators: coordinators(w.coordinators.as_ref()),
            flags: clean_list(w.flags.as_ref()),
            associations: association_refs(w.associations.as_ref()),
        })
    }

    fn to_wire(&self, a: &Account) -> AccountRec {
        AccountRec {
            name: present(&a.name),
            description: present(&a.description),
            organization: present(&a.organization),
            coordinators: coordinators_to_wire(&a.coordinators),
            flags: present_list(&a.flags),
            associations: association_refs_to_wire(&a.associations),
        }
    }
}

pub fn account_create(account: &AccountCreate) -> AccountRec {
    AccountRec {
        name: Some(account.name.clone()),
        description: account.description.clone(),
        organization: account.organization.clone(),
        coordinators: account
            .coordinators
            .as_deref()
            .and_then(coordinators_to_wire),
        ..Default::default()
    }
}

pub fn account_update(name: &str, update: &AccountUpdate) -> AccountRec {
    AccountRec {
        name: Some(name.to_string()),
        description: update.description.clone(),
        organization: update.organization.clone(),
        coordinators: update.coordinators.as_deref().and_then(coordinators_to_wire),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> AccountRec {
        serde_json::from_value(json!({
            "name": "genomics",
            "description": "genomics lab",
            "organization": "biology",
            "coordinators": [{"name": "alice", "direct": true}],
            "flags": [],
            "associations": [
                {"account": "genomics", "cluster": "alpha", "user": "", "id": 3},
                {"account": "genomics", "cluster": "beta", "user": "bob", "id": 9}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_to_common() {
        let account = AccountConverter.to_common(&sample()).unwrap();
        assert_eq!(account.coordinators, vec!["alice"]);
        assert_eq!(account.associations.len(), 2);
        assert_eq!(account.clusters(), vec!["alpha", "beta"]);
    }

    #[test]
    fn test_round_trip() {
        let account = AccountConverter.to_common(&sample()).unwrap();
        let wire = AccountConverter.to_wire(&account);
        assert_eq!(wire.flags, None);
        assert_eq!(AccountConverter.to_common(&wire).unwrap(), account);
    }

    #[test]
    fn test_create_body() {
        let body = serde_json::to_value(account_create(&AccountCreate {
            name: "physics".to_string(),
            description: Some("physics dept".to_string()),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(body, json!({"name": "physics", "description": "physics dept"}));
    }
}
