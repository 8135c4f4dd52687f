//! Users.

use super::account::{
    association_refs, association_refs_to_wire, coordinators, coordinators_to_wire,
};
use super::text;
use crate::wire::{UserDefault, UserRec, WcKeyRec};
use slurmrest_core::{ConversionError, Converter, require_name};
use slurmrest_parsers::{clean_list, present, present_list};
use slurmrest_types::{AdminLevel, User, UserCreate, UserUpdate};

pub struct UserConverter;

fn admin_level_to_wire(level: &AdminLevel) -> Option<Vec<String>> {
    match level {
        AdminLevel::None => None,
        other => Some(vec![other.as_str().to_string()]),
    }
}

fn defaults(account: Option<&String>, wckey: Option<&String>) -> Option<UserDefault> {
    if account.is_none() && wckey.is_none() {
        return None;
    }
    Some(UserDefault {
        account: account.cloned(),
        wckey: wckey.cloned(),
    })
}

impl Converter for UserConverter {
    type Wire = UserRec;
    type Domain = User;

    fn to_common(&self, w: &UserRec) -> Result<User, ConversionError> {
        let default = w.default.clone().unwrap_or_default();
        Ok(User {
            name: require_name("user", "name", w.name.as_ref())?,
            default_account: text(default.account.as_ref()),
            default_wckey: text(default.wckey.as_ref()),
            admin_level: AdminLevel::from_wire(&clean_list(w.administrator_level.as_ref())),
            associations: association_refs(w.associations.as_ref()),
            coordinator_of: coordinators(w.coordinators.as_ref()),
            wckeys: w
                .wckeys
                .as_ref()
                .map(|keys| keys.iter().filter_map(|k| k.name.clone()).collect())
                .unwrap_or_default(),
            flags: clean_list(w.flags.as_ref()),
        })
    }

    fn to_wire(&self, u: &User) -> UserRec {
        UserRec {
            name: present(&u.name),
            default: defaults(
                present(&u.default_account).as_ref(),
                present(&u.default_wckey).as_ref(),
            ),
            administrator_level: admin_level_to_wire(&u.admin_level),
            associations: association_refs_to_wire(&u.associations),
            coordinators: coordinators_to_wire(&u.coordinator_of),
            wckeys: present_list(&u.wckeys).map(|keys| {
                keys.into_iter()
                    .map(|name| WcKeyRec {
                        name: Some(name),
                        user: present(&u.name),
                        ..Default::default()
                    })
                    .collect()
            }),
            flags: present_list(&u.flags),
        }
    }
}

pub fn user_create(user: &UserCreate) -> UserRec {
    UserRec {
        name: Some(user.name.clone()),
        default: defaults(user.default_account.as_ref(), user.default_wckey.as_ref()),
        administrator_level: user.admin_level.as_ref().map(|l| vec![l.as_str().to_string()]),
        ..Default::default()
    }
}

pub fn user_update(name: &str, update: &UserUpdate) -> UserRec {
    UserRec {
        name: Some(name.to_string()),
        default: defaults(update.default_account.as_ref(), update.default_wckey.as_ref()),
        administrator_level: update
            .admin_level
            .as_ref()
            .map(|l| vec![l.as_str().to_string()]),
        ..Default::default()
    }
}
