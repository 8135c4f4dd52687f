//! Wire/domain converters for v0.0.42, one unit struct per entity, plus
//! the request builders for create and update bodies.

mod account;
mod association;
mod job;
mod node;
mod partition;
mod qos;
mod reservation;
mod standalone;
mod user;

pub use account::{AccountConverter, account_create, account_update};
pub use association::{AssociationConverter, association_create, association_update};
pub(crate) use association::key_query;
pub use job::{
    JobConverter, allocate_request, allocate_response, submit_request, submit_response,
    update_request,
};
pub use node::{NodeConverter, node_update};
pub use partition::PartitionConverter;
pub use qos::{QosConverter, qos_create, qos_update};
pub use reservation::ReservationConverter;
pub use standalone::{
    LicenseConverter, PingConverter, ShareConverter, TresConverter, db_diagnostics, diagnostics,
};
pub use user::{UserConverter, user_create, user_update};

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
