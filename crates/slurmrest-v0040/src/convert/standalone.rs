//! Standalone endpoint records: ping, diag, licenses, shares and TRES.

use super::{nonzero, text, timestamp};
use crate::wire::{
    ControllerPingWire, DbDiagStatistics, DiagStatistics, LicenseWire, ShareFairshare, ShareWire,
    TresWire,
};
use slurmrest_core::{ConversionError, Converter, require_name};
use slurmrest_parsers::{NoVal, from_unix, noval_or_zero, present};
use slurmrest_types::{
    ControllerPing, DbDiagnostics, Diagnostics, License, RpcStat, ShareRecord, Tres,
};

pub struct PingConverter;

impl Converter for PingConverter {
    type Wire = ControllerPingWire;
    type Domain = ControllerPing;

    fn to_common(&self, w: &ControllerPingWire) -> Result<ControllerPing, ConversionError> {
        let responding = w
            .responding
            .unwrap_or_else(|| w.pinged.as_deref() == Some("UP"));
        Ok(ControllerPing {
            hostname: require_name("controller", "hostname", w.hostname.as_ref())?,
            responding,
            mode: text(w.mode.as_ref()),
            latency: w.latency.unwrap_or_default(),
        })
    }

    fn to_wire(&self, p: &ControllerPing) -> ControllerPingWire {
        ControllerPingWire {
            hostname: present(&p.hostname),
            pinged: Some(if p.responding { "UP" } else { "DOWN" }.to_string()),
            responding: Some(p.responding),
            latency: nonzero(p.latency),
            mode: present(&p.mode),
            primary: Some(p.mode == "primary"),
        }
    }
}

pub struct TresConverter;

impl Converter for TresConverter {
    type Wire = TresWire;
    type Domain = Tres;

    fn to_common(&self, w: &TresWire) -> Result<Tres, ConversionError> {
        if w.kind.is_empty() {
            return Err(ConversionError::MissingIdentity {
                entity: "tres",
                field: "type",
            });
        }
        Ok(Tres {
            kind: w.kind.clone(),
            name: text(w.name.as_ref()),
            id: w.id.unwrap_or_default(),
            count: w.count.unwrap_or_default(),
        })
    }

    fn to_wire(&self, t: &Tres) -> TresWire {
        TresWire {
            kind: t.kind.clone(),
            name: present(&t.name),
            id: nonzero(t.id),
            count: nonzero(t.count),
        }
    }
}

pub struct LicenseConverter;

impl Converter for LicenseConverter {
    type Wire = LicenseWire;
    type Domain = License;

    fn to_common(&self, w: &LicenseWire) -> Result<License, ConversionError> {
        Ok(License {
            name: require_name("license", "LicenseName", w.name.as_ref())?,
            total: w.total.unwrap_or_default(),
            used: w.used.unwrap_or_default(),
            free: w.free.unwrap_or_default(),
            reserved: w.reserved.unwrap_or_default(),
            remote: w.remote.unwrap_or_default(),
        })
    }

    fn to_wire(&self, l: &License) -> LicenseWire {
        LicenseWire {
            name: present(&l.name),
            total: nonzero(l.total),
            used: nonzero(l.used),
            free: nonzero(l.free),
            reserved: nonzero(l.reserved),
            remote: Some(l.remote).filter(|r| *r),
        }
    }
}

pub struct ShareConverter;

impl Converter for ShareConverter {
    type Wire = ShareWire;
    type Domain = ShareRecord;

    fn to_common(&self, w: &ShareWire) -> Result<ShareRecord, ConversionError> {
        Ok(ShareRecord {
            id: w.id.unwrap_or_default(),
            cluster: text(w.cluster.as_ref()),
            name: require_name("share", "name", w.name.as_ref())?,
            parent: text(w.parent.as_ref()),
            partition: text(w.partition.as_ref()),
            shares: noval_or_zero(w.shares.as_ref()),
            shares_normalized: noval_or_zero(w.shares_normalized.as_ref()),
            usage: w.usage.unwrap_or_default(),
            effective_usage: noval_or_zero(w.effective_usage.as_ref()),
            fairshare: noval_or_zero(w.fairshare.as_ref().and_then(|f| f.factor.as_ref())),
        })
    }

    fn to_wire(&self, s: &ShareRecord) -> ShareWire {
        ShareWire {
            id: nonzero(s.id),
            cluster: present(&s.cluster),
            name: present(&s.name),
            parent: present(&s.parent),
            partition: present(&s.partition),
            shares: NoVal::present(s.shares),
            shares_normalized: NoVal::present(s.shares_normalized),
            usage: nonzero(s.usage),
            effective_usage: NoVal::present(s.effective_usage),
            fairshare: NoVal::present(s.fairshare).map(|factor| ShareFairshare {
                factor: Some(factor),
            }),
        }
    }
}

pub fn diagnostics(s: &DiagStatistics) -> Diagnostics {
    Diagnostics {
        server_thread_count: s.server_thread_count.unwrap_or_default(),
        agent_queue_size: s.agent_queue_size.unwrap_or_default(),
        jobs_submitted: s.jobs_submitted.unwrap_or_default(),
        jobs_started: s.jobs_started.unwrap_or_default(),
        jobs_completed: s.jobs_completed.unwrap_or_default(),
        jobs_canceled: s.jobs_canceled.unwrap_or_default(),
        jobs_failed: s.jobs_failed.unwrap_or_default(),
        jobs_pending: s.jobs_pending.unwrap_or_default(),
        jobs_running: s.jobs_running.unwrap_or_default(),
        schedule_cycle_last: s.schedule_cycle_last.unwrap_or_default(),
        schedule_cycle_mean: s.schedule_cycle_mean.unwrap_or_default(),
        bf_cycle_last: s.bf_cycle_last.unwrap_or_default(),
        bf_backfilled_jobs: s.bf_backfilled_jobs.unwrap_or_default(),
        req_time: timestamp(s.req_time.as_ref()),
    }
}

pub fn db_diagnostics(s: &DbDiagStatistics) -> DbDiagnostics {
    DbDiagnostics {
        time_start: s.time_start.and_then(from_unix),
        rollups: u32::try_from(s.rollups.len()).unwrap_or(u32::MAX),
        rpcs: s
            .rpcs
            .iter()
            .map(|r| RpcStat {
                rpc: text(r.rpc.as_ref()),
                count: r.count.unwrap_or_default(),
                time_total: r.time.as_ref().and_then(|t| t.total).unwrap_or_default(),
            })
            .collect(),
    }
}
