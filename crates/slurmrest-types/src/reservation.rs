//! Advance reservations.

use crate::list::{ListFilter, Page};
use crate::{matches_any, matches_overlap};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub name: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub node_list: String,
    pub node_count: u32,
    pub core_count: u32,
    pub partition: String,
    pub users: Vec<String>,
    pub accounts: Vec<String>,
    pub groups: Vec<String>,
    pub flags: Vec<String>,
    pub features: String,
    pub burst_buffer: String,
    pub licenses: String,
    pub tres: String,
}

impl Reservation {
    /// Length of the reservation window when both ends are known.
    pub fn duration(&self) -> Option<chrono::Duration> {
        Some(self.end_time? - self.start_time?)
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => start <= now && now < end,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservationListOptions {
    pub names: Vec<String>,
    pub users: Vec<String>,
    pub accounts: Vec<String>,
    pub partitions: Vec<String>,
    pub limit: usize,
    pub offset: usize,
}

impl ListFilter<Reservation> for ReservationListOptions {
    fn matches(&self, resv: &Reservation) -> bool {
        matches_any(&self.names, &resv.name)
            && matches_overlap(&self.users, &resv.users)
            && matches_overlap(&self.accounts, &resv.accounts)
            && matches_any(&self.partitions, &resv.partition)
    }

    fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

/// New reservation. `end_time` wins over `duration` when both are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub name: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// Minutes.
    pub duration: Option<u32>,
    pub node_list: Option<String>,
    pub node_count: Option<u32>,
    pub core_count: Option<u32>,
    pub partition: Option<String>,
    pub users: Option<Vec<String>>,
    pub accounts: Option<Vec<String>>,
    pub groups: Option<Vec<String>>,
    pub flags: Option<Vec<String>>,
    pub features: Option<String>,
    pub licenses: Option<String>,
    pub burst_buffer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservationUpdate {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration: Option<u32>,
    pub node_list: Option<String>,
    pub node_count: Option<u32>,
    pub users: Option<Vec<String>>,
    pub accounts: Option<Vec<String>>,
    pub flags: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_duration() {
        let resv = Reservation {
            start_time: Utc.timestamp_opt(1_700_000_000, 0).single(),
            end_time: Utc.timestamp_opt(1_700_003_600, 0).single(),
            ..Default::default()
        };
        assert_eq!(resv.duration(), Some(chrono::Duration::hours(1)));
        assert!(Reservation::default().duration().is_none());
    }

    #[test]
    fn test_is_active() {
        let resv = Reservation {
            start_time: Utc.timestamp_opt(100, 0).single(),
            end_time: Utc.timestamp_opt(200, 0).single(),
            ..Default::default()
        };
        let inside = Utc.timestamp_opt(150, 0).single().unwrap();
        let after = Utc.timestamp_opt(200, 0).single().unwrap();
        assert!(resv.is_active(inside));
        assert!(!resv.is_active(after));
    }

    #[test]
    fn test_list_options_matches() {
        let resv = Reservation {
            name: "maint".to_string(),
            users: vec!["root".to_string(), "ops".to_string()],
            ..Default::default()
        };
        assert!(
            ReservationListOptions {
                users: vec!["ops".to_string()],
                ..Default::default()
            }
            .matches(&resv)
        );
        assert!(
            !ReservationListOptions {
                accounts: vec!["lab".to_string()],
                ..Default::default()
            }
            .matches(&resv)
        );
    }
}
