//! QoS and its nested limits tree.

use super::text;
use crate::wire::{
    PerUserAccount, QosActiveJobs, QosLimitsWire, QosMax, QosMaxJobs, QosMaxTres, QosMin,
    QosPreempt, QosRec, QosTresPer, QosWallClock, QosWallPer, TresWire,
};
use slurmrest_core::{ConversionError, Converter, require_name};
use slurmrest_parsers::{NoVal, clean_list, noval_or_zero, present, present_list};
use slurmrest_types::{Qos, QosCreate, QosLimits, QosUpdate, Tres, format_tres, parse_tres};

pub struct QosConverter;

pub(crate) fn tres_string(list: Option<&Vec<TresWire>>) -> String {
    let tres: Vec<Tres> = list
        .map(|l| {
            l.iter()
                .filter(|t| !t.kind.is_empty())
                .map(|t| Tres {
                    kind: t.kind.clone(),
                    name: text(t.name.as_ref()),
                    id: t.id.unwrap_or_default(),
                    count: t.count.unwrap_or_default(),
                })
                .collect()
        })
        .unwrap_or_default();
    format_tres(&tres)
}

/// Unparseable strings are rejected by request validation before this runs.
pub(crate) fn tres_list(s: &str) -> Option<Vec<TresWire>> {
    let tres = parse_tres(s).ok().filter(|t| !t.is_empty())?;
    Some(
        tres.into_iter()
            .map(|t| TresWire {
                kind: t.kind,
                name: present(&t.name),
                id: None,
                count: Some(t.count),
            })
            .collect(),
    )
}

fn limits_to_common(w: Option<&QosLimitsWire>) -> QosLimits {
    let Some(w) = w else {
        return QosLimits::default();
    };
    let max = w.max.clone().unwrap_or_default();
    let jobs = max.jobs.unwrap_or_default();
    let running = jobs.active_jobs.and_then(|a| a.per).unwrap_or_default();
    let submitted = jobs.per.unwrap_or_default();
    let tres = max.tres.and_then(|t| t.per).unwrap_or_default();

    QosLimits {
        grace_time: w.grace_time.unwrap_or_default(),
        max_jobs_per_user: noval_or_zero(running.user.as_ref()),
        max_jobs_per_account: noval_or_zero(running.account.as_ref()),
        max_submit_jobs_per_user: noval_or_zero(submitted.user.as_ref()),
        max_submit_jobs_per_account: noval_or_zero(submitted.account.as_ref()),
        max_wall_per_job: noval_or_zero(
            max.wall_clock
                .and_then(|c| c.per)
                .and_then(|p| p.job)
                .as_ref(),
        ),
        max_tres_per_job: tres_string(tres.job.as_ref()),
        max_tres_per_user: tres_string(tres.user.as_ref()),
        max_tres_per_node: tres_string(tres.node.as_ref()),
        min_priority_threshold: noval_or_zero(
            w.min.as_ref().and_then(|m| m.priority_threshold.as_ref()),
        ),
    }
}

/// `None` for a wire object with nothing set, so it is left out of the
/// request instead of being sent as `{}`.
fn non_empty<T: Default + PartialEq>(value: T) -> Option<T> {
    Some(value).filter(|v| *v != T::default())
}

fn limits_to_wire(l: &QosLimits) -> Option<QosLimitsWire> {
    if l.is_empty() {
        return None;
    }
    let per = |user: u32, account: u32| {
        non_empty(PerUserAccount {
            user: NoVal::present(user),
            account: NoVal::present(account),
        })
    };
    let jobs = non_empty(QosMaxJobs {
        active_jobs: non_empty(QosActiveJobs {
            per: per(l.max_jobs_per_user, l.max_jobs_per_account),
        }),
        per: per(l.max_submit_jobs_per_user, l.max_submit_jobs_per_account),
    });
    let tres = non_empty(QosMaxTres {
        per: non_empty(QosTresPer {
            job: tres_list(&l.max_tres_per_job),
            user: tres_list(&l.max_tres_per_user),
            node: tres_list(&l.max_tres_per_node),
        }),
    });
    let wall_clock = non_empty(QosWallClock {
        per: non_empty(QosWallPer {
            job: NoVal::present(l.max_wall_per_job),
        }),
    });
    non_empty(QosLimitsWire {
        grace_time: Some(l.grace_time).filter(|g| *g != 0),
        max: non_empty(QosMax {
            jobs,
            tres,
            wall_clock,
        }),
        min: non_empty(QosMin {
            priority_threshold: NoVal::present(l.min_priority_threshold),
        }),
    })
}

impl Converter for QosConverter {
    type Wire = QosRec;
    type Domain = Qos;

    fn to_common(&self, w: &QosRec) -> Result<Qos, ConversionError> {
        let preempt = w.preempt.clone().unwrap_or_default();
        Ok(Qos {
            name: require_name("qos", "name", w.name.as_ref())?,
            id: w.id.unwrap_or_default(),
            description: text(w.description.as_ref()),
            priority: noval_or_zero(w.priority.as_ref()),
            usage_factor: noval_or_zero(w.usage_factor.as_ref()),
            usage_threshold: noval_or_zero(w.usage_threshold.as_ref()),
            flags: clean_list(w.flags.as_ref()),
            preempt_mode: clean_list(preempt.mode.as_ref()),
            preempt_list: clean_list(preempt.list.as_ref()),
            preempt_exempt_time: noval_or_zero(preempt.exempt_time.as_ref()),
            limits: limits_to_common(w.limits.as_ref()),
        })
    }

    fn to_wire(&self, q: &Qos) -> QosRec {
        QosRec {
            name: present(&q.name),
            id: Some(q.id).filter(|id| *id != 0),
            description: present(&q.description),
            priority: NoVal::present(q.priority),
            usage_factor: NoVal::present(q.usage_factor),
            usage_threshold: NoVal::present(q.usage_threshold),
            flags: present_list(&q.flags),
            preempt: non_empty(QosPreempt {
                mode: present_list(&q.preempt_mode),
                list: present_list(&q.preempt_list),
                exempt_time: NoVal::present(q.preempt_exempt_time),
            }),
            limits: limits_to_wire(&q.limits),
        }
    }
}

pub fn qos_create(qos: &QosCreate) -> QosRec {
    QosRec {
        name: Some(qos.name.clone()),
        description: qos.description.clone(),
        priority: NoVal::from_option(qos.priority),
        usage_factor: NoVal::from_option(qos.usage_factor),
        flags: qos.flags.clone(),
        preempt: preempt(qos.preempt_mode.as_ref(), qos.preempt_list.as_ref()),
        limits: qos.limits.as_ref().and_then(limits_to_wire),
        ..Default::default()
    }
}

pub fn qos_update(name: &str, update: &QosUpdate) -> QosRec {
    QosRec {
        name: Some(name.to_string()),
        description: update.description.clone(),
        priority: NoVal::from_option(update.priority),
        usage_factor: NoVal::from_option(update.usage_factor),
        flags: update.flags.clone(),
        preempt: preempt(update.preempt_mode.as_ref(), update.preempt_list.as_ref()),
        limits: update.limits.as_ref().and_then(limits_to_wire),
        ..Default::default()
    }
}

fn preempt(mode: Option<&Vec<String>>, list: Option<&Vec<String>>) -> Option<QosPreempt> {
    if mode.is_none() && list.is_none() {
        return None;
    }
    Some(QosPreempt {
        mode: mode.cloned(),
        list: list.cloned(),
        exempt_time: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> QosRec {
        serde_json::from_value(json!({
            "name": "high",
            "id": 3,
            "description": "high priority",
            "priority": {"set": true, "infinite": false, "number": 1000},
            "usage_factor": {"set": true, "infinite": false, "number": 2.0},
            "flags": ["DENY_LIMIT"],
            "preempt": {"mode": ["REQUEUE"], "list": ["normal"], "exempt_time": {"set": true, "infinite": false, "number": 300}},
            "limits": {
                "grace_time": 60,
                "max": {
                    "jobs": {
                        "active_jobs": {"per": {"user": {"set": true, "infinite": false, "number": 10}}},
                        "per": {"account": {"set": true, "infinite": false, "number": 500}}
                    },
                    "tres": {"per": {"job": [{"type": "cpu", "count": 64}, {"type": "gres", "name": "gpu", "count": 4}]}},
                    "wall_clock": {"per": {"job": {"set": true, "infinite": false, "number": 1440}}}
                },
                "min": {"priority_threshold": {"set": false, "infinite": true, "number": 0}}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_limits_mapping() {
        let qos = QosConverter.to_common(&sample()).unwrap();
        assert_eq!(qos.priority, 1000);
        assert_eq!(qos.usage_factor, 2.0);
        assert_eq!(qos.preempt_exempt_time, 300);
        let l = &qos.limits;
        assert_eq!(l.grace_time, 60);
        assert_eq!(l.max_jobs_per_user, 10);
        assert_eq!(l.max_jobs_per_account, 0);
        assert_eq!(l.max_submit_jobs_per_account, 500);
        assert_eq!(l.max_wall_per_job, 1440);
        assert_eq!(l.max_tres_per_job, "cpu=64,gres/gpu=4");
        assert_eq!(l.max_tres_per_user, "");
        assert_eq!(l.min_priority_threshold, 0);
    }

    #[test]
    fn test_absent_limits_are_zero() {
        let qos = QosConverter
            .to_common(&QosRec {
                name: Some("normal".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert!(qos.limits.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let qos = QosConverter.to_common(&sample()).unwrap();
        let wire = QosConverter.to_wire(&qos);
        let tres = wire
            .limits
            .as_ref()
            .and_then(|l| l.max.as_ref())
            .and_then(|m| m.tres.as_ref())
            .and_then(|t| t.per.as_ref())
            .and_then(|p| p.job.clone())
            .unwrap();
        assert_eq!(tres[1].kind, "gres");
        assert_eq!(tres[1].name.as_deref(), Some("gpu"));
        assert_eq!(QosConverter.to_common(&wire).unwrap(), qos);
    }

    #[test]
    fn test_create_body_omits_absent_fields() {
        let body = serde_json::to_value(qos_create(&QosCreate {
            name: "debug".to_string(),
            priority: Some(5),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(
            body,
            json!({"name": "debug", "priority": {"set": true, "infinite": false, "number": 5}})
        );
    }

    #[test]
    fn test_limits_body_omits_empty_branches() {
        let body = serde_json::to_value(qos_create(&QosCreate {
            name: "debug".to_string(),
            limits: Some(QosLimits {
                max_jobs_per_user: 10,
                ..Default::default()
            }),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(
            body["limits"],
            json!({"max": {"jobs": {"active_jobs": {"per": {
                "user": {"set": true, "infinite": false, "number": 10}
            }}}}})
        );

        let body = serde_json::to_value(qos_create(&QosCreate {
            name: "debug".to_string(),
            limits: Some(QosLimits {
                max_tres_per_node: "cpu=8".to_string(),
                grace_time: 60,
                ..Default::default()
            }),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(
            body["limits"],
            json!({
                "grace_time": 60,
                "max": {"tres": {"per": {"node": [{"type": "cpu", "count": 8}]}}}
            })
        );
    }

    #[test]
    fn test_grace_time_alone() {
        let limits = QosLimits {
            grace_time: 300,
            ..Default::default()
        };
        let wire = limits_to_wire(&limits).unwrap();
        assert_eq!(serde_json::to_value(wire).unwrap(), json!({"grace_time": 300}));
    }

    #[test]
    fn test_to_wire_skips_empty_preempt() {
        let qos = Qos {
            name: "normal".to_string(),
            ..Default::default()
        };
        let wire = QosConverter.to_wire(&qos);
        assert_eq!(wire.preempt, None);
        assert_eq!(wire.limits, None);
    }
}
