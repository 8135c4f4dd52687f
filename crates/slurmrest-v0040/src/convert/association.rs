//! Associations.

use super::{nonzero, text};
use crate::wire::{AssocDefault, AssocMax, AssocMaxJobs, AssocMaxJobsPer, AssocRec};
use slurmrest_core::{ConversionError, Converter, require_name};
use slurmrest_parsers::{NoVal, clean_list, noval_or_zero, present, present_list};
use slurmrest_types::{Association, AssociationCreate, AssociationKey};

pub struct AssociationConverter;

fn max_to_wire(
    count: Option<u32>,
    submitted: Option<u32>,
    wall_clock: Option<u32>,
) -> Option<AssocMax> {
    if count.is_none() && submitted.is_none() && wall_clock.is_none() {
        return None;
    }
    Some(AssocMax {
        jobs: Some(AssocMaxJobs {
            per: Some(AssocMaxJobsPer {
                count: NoVal::from_option(count),
                submitted: NoVal::from_option(submitted),
                wall_clock: NoVal::from_option(wall_clock),
            }),
        }),
    })
}

fn key_fields(key: &AssociationKey) -> AssocRec {
    AssocRec {
        account: present(&key.account),
        user: present(&key.user),
        cluster: present(&key.cluster),
        partition: present(&key.partition),
        ..Default::default()
    }
}

impl Converter for AssociationConverter {
    type Wire = AssocRec;
    type Domain = Association;

    fn to_common(&self, w: &AssocRec) -> Result<Association, ConversionError> {
        let per = w
            .max
            .as_ref()
            .and_then(|m| m.jobs.as_ref())
            .and_then(|j| j.per.clone())
            .unwrap_or_default();

        Ok(Association {
            key: AssociationKey {
                account: require_name("association", "account", w.account.as_ref())?,
                user: text(w.user.as_ref()),
                cluster: text(w.cluster.as_ref()),
                partition: text(w.partition.as_ref()),
            },
            id: w.id.unwrap_or_default(),
            parent_account: text(w.parent_account.as_ref()),
            is_default: w.is_default.unwrap_or_default(),
            default_qos: w
                .default
                .as_ref()
                .and_then(|d| d.qos.clone())
                .unwrap_or_default(),
            qos: clean_list(w.qos.as_ref()),
            shares_raw: w.shares_raw.unwrap_or_default(),
            priority: noval_or_zero(w.priority.as_ref()),
            max_jobs: noval_or_zero(per.count.as_ref()),
            max_submit_jobs: noval_or_zero(per.submitted.as_ref()),
            max_wall_per_job: noval_or_zero(per.wall_clock.as_ref()),
            flags: clean_list(w.flags.as_ref()),
        })
    }

    fn to_wire(&self, a: &Association) -> AssocRec {
        AssocRec {
            id: nonzero(a.id),
            parent_account: present(&a.parent_account),
            is_default: Some(a.is_default).filter(|d| *d),
            default: present(&a.default_qos).map(|qos| AssocDefault { qos: Some(qos) }),
            qos: present_list(&a.qos),
            shares_raw: nonzero(a.shares_raw),
            priority: NoVal::present(a.priority),
            max: max_to_wire(
                nonzero(a.max_jobs),
                nonzero(a.max_submit_jobs),
                nonzero(a.max_wall_per_job),
            ),
            flags: present_list(&a.flags),
            ..key_fields(&a.key)
        }
    }
}

pub fn association_create(a: &AssociationCreate) -> AssocRec {
    AssocRec {
        parent_account: a.parent_account.clone(),
        is_default: a.is_default,
        default: a.default_qos.clone().map(|qos| AssocDefault { qos: Some(qos) }),
        qos: a.qos.clone(),
        shares_raw: a.shares_raw,
        priority: NoVal::from_option(a.priority),
        max: max_to_wire(a.max_jobs, a.max_submit_jobs, a.max_wall_per_job),
        ..key_fields(&a.key)
    }
}

/// Query parameters selecting one association.
pub(crate) fn key_query(key: &AssociationKey) -> Vec<(&'static str, String)> {
    [
        ("account", &key.account),
        ("user", &key.user),
        ("cluster", &key.cluster),
        ("partition", &key.partition),
    ]
    .into_iter()
    .filter(|(_, v)| !v.is_empty())
    .map(|(k, v)| (k, v.clone()))
    .collect()
}
