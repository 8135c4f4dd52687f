//! Wire/domain converters for v0.0.40, one unit struct per entity, plus
//! the request builders for create and update bodies.

mod account;
mod association;
mod cluster;
mod job;
mod node;
mod partition;
mod reservation;
mod standalone;
mod user;
mod wckey;

pub use account::{AccountConverter, account_create, account_update};
pub use association::{AssociationConverter, association_create};
pub(crate) use association::key_query;
pub use cluster::{ClusterConverter, cluster_create};
pub use job::{JobConverter, submit_request, submit_response};
pub use node::{NodeConverter, node_update};
pub use partition::PartitionConverter;
pub use reservation::ReservationConverter;
pub use standalone::{
    LicenseConverter, PingConverter, ShareConverter, TresConverter, db_diagnostics, diagnostics,
};
pub use user::{UserConverter, user_create};
pub use wckey::{WcKeyConverter, wckey_create};

use crate::wire::NoValI64;
use chrono::{DateTime, Utc};
use slurmrest_parsers::{NoVal, from_unix, noval_or_zero, to_unix};

/// Owned copy of an optional wire string, empty when absent.
pub(crate) fn text(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

pub(crate) fn timestamp(wire: Option<&NoValI64>) -> Option<DateTime<Utc>> {
    from_unix(noval_or_zero(wire))
}

pub(crate) fn timestamp_to_wire(ts: Option<DateTime<Utc>>) -> Option<NoValI64> {
    to_unix(ts).and_then(NoVal::present)
}

/// Zero is "unset" for plain wire integers too.
pub(crate) fn nonzero<T: Copy + Default + PartialEq>(value: T) -> Option<T> {
    Some(value).filter(|v| *v != T::default())
}
