//! Reservations. Reads carry comma-joined user/account/group lists; the
//! write body takes arrays.

use super::{nonzero, text, timestamp, timestamp_to_wire};
use crate::wire::{ReservationDescMsg, ReservationInfo};
use slurmrest_core::{ConversionError, Converter, require_name};
use slurmrest_parsers::{NoVal, clean_list, join_csv, present, present_list, split_csv};
use slurmrest_types::{Reservation, ReservationCreate, ReservationUpdate};

pub struct ReservationConverter;

fn csv(value: Option<&String>) -> Vec<String> {
    value.map(|v| split_csv(v)).unwrap_or_default()
}

impl Converter for ReservationConverter {
    type Wire = ReservationInfo;
    type Domain = Reservation;

    fn to_common(&self, w: &ReservationInfo) -> Result<Reservation, ConversionError> {
        Ok(Reservation {
            name: require_name("reservation", "name", w.name.as_ref())?,
            start_time: timestamp(w.start_time.as_ref()),
            end_time: timestamp(w.end_time.as_ref()),
            node_list: text(w.node_list.as_ref()),
            node_count: w.node_count.unwrap_or_default(),
            core_count: w.core_count.unwrap_or_default(),
            partition: text(w.partition.as_ref()),
            users: csv(w.users.as_ref()),
            accounts: csv(w.accounts.as_ref()),
            groups: csv(w.groups.as_ref()),
            flags: clean_list(w.flags.as_ref()),
            features: text(w.features.as_ref()),
            burst_buffer: text(w.burst_buffer.as_ref()),
            licenses: text(w.licenses.as_ref()),
            tres: text(w.tres.as_ref()),
        })
    }

    fn to_wire(&self, r: &Reservation) -> ReservationInfo {
        ReservationInfo {
            name: present(&r.name),
            start_time: timestamp_to_wire(r.start_time),
            end_time: timestamp_to_wire(r.end_time),
            node_list: present(&r.node_list),
            node_count: nonzero(r.node_count),
            core_count: nonzero(r.core_count),
            partition: present(&r.partition),
            users: join_csv(&r.users),
            accounts: join_csv(&r.accounts),
            groups: join_csv(&r.groups),
            flags: present_list(&r.flags),
            features: present(&r.features),
            burst_buffer: present(&r.burst_buffer),
            licenses: present(&r.licenses),
            tres: present(&r.tres),
        }
    }
}

pub fn reservation_create(r: &ReservationCreate) -> ReservationDescMsg {
    ReservationDescMsg {
        name: Some(r.name.clone()),
        start_time: timestamp_to_wire(r.start_time),
        end_time: timestamp_to_wire(r.end_time),
        duration: if r.end_time.is_some() {
            None
        } else {
            NoVal::from_option(r.duration)
        },
        node_list: r.node_list.clone(),
        node_count: NoVal::from_option(r.node_count),
        core_count: NoVal::from_option(r.core_count),
        partition: r.partition.clone(),
        users: r.users.clone(),
        accounts: r.accounts.clone(),
        groups: r.groups.clone(),
        flags: r.flags.clone(),
        features: r.features.clone(),
        licenses: r.licenses.clone(),
        burst_buffer: r.burst_buffer.clone(),
    }
}

pub fn reservation_update(name: &str, u: &ReservationUpdate) -> ReservationDescMsg {
    ReservationDescMsg {
        name: Some(name.to_string()),
        start_time: timestamp_to_wire(u.start_time),
        end_time: timestamp_to_wire(u.end_time),
        duration: if u.end_time.is_some() {
            None
        } else {
            NoVal::from_option(u.duration)
        },
        node_list: u.node_list.clone(),
        node_count: NoVal::from_option(u.node_count),
        users: u.users.clone(),
        accounts: u.accounts.clone(),
        flags: u.flags.clone(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn sample() -> ReservationInfo {
        serde_json::from_value(json!({
            "name": "maint",
            "start_time": {"set": true, "infinite": false, "number": 1700000000},
            "end_time": {"set": true, "infinite": false, "number": 1700007200},
            "node_list": "cn[01-10]",
            "node_count": 10,
            "partition": "compute",
            "users": "root,ops",
            "accounts": "",
            "flags": ["MAINT", "IGNORE_JOBS"]
        }))
        .unwrap()
    }

    #[test]
    fn test_to_common() {
        let r = ReservationConverter.to_common(&sample()).unwrap();
        assert_eq!(r.users, vec!["root", "ops"]);
        assert!(r.accounts.is_empty());
        assert_eq!(r.duration(), Some(chrono::Duration::hours(2)));
        assert_eq!(r.flags, vec!["MAINT", "IGNORE_JOBS"]);
    }

    #[test]
    fn test_round_trip() {
        let r = ReservationConverter.to_common(&sample()).unwrap();
        let wire = ReservationConverter.to_wire(&r);
        assert_eq!(wire.users.as_deref(), Some("root,ops"));
        assert_eq!(wire.accounts, None);
        assert_eq!(ReservationConverter.to_common(&wire).unwrap(), r);
    }

    #[test]
    fn test_create_end_time_wins_over_duration() {
        let body = serde_json::to_value(reservation_create(&ReservationCreate {
            name: "maint".to_string(),
            start_time: Utc.timestamp_opt(1_700_000_000, 0).single(),
            end_time: Utc.timestamp_opt(1_700_003_600, 0).single(),
            duration: Some(30),
            users: Some(vec!["root".to_string()]),
            ..Default::default()
        }))
        .unwrap();
        assert!(body.get("duration").is_none());
        assert_eq!(body["users"], json!(["root"]));
        assert_eq!(body["end_time"]["number"], 1_700_003_600);
    }
}
