//! Version-independent Slurm domain model.
//!
//! Every backend version converts its wire payloads into these types. They
//! are fresh projections of remote state built per call; nothing here is
//! cached or mutated by the client.

pub mod account;
pub mod association;
pub mod cluster;
pub mod job;
pub mod list;
pub mod node;
pub mod partition;
pub mod qos;
pub mod reservation;
pub mod standalone;
pub mod tres;
pub mod user;
pub mod wckey;

pub use account::{Account, AccountCreate, AccountListOptions, AccountUpdate};
pub use association::{
    Association, AssociationCreate, AssociationKey, AssociationListOptions, AssociationRef,
    AssociationUpdate,
};
pub use cluster::{Cluster, ClusterCreate, ClusterListOptions, ClusterUpdate};
pub use job::{
    Job, JobAllocateResponse, JobAllocation, JobListOptions, JobState, JobSubmission,
    JobSubmitResponse, JobUpdate,
};
pub use list::{CreateResponse, ListFilter, ListResult, Page};
pub use node::{Node, NodeListOptions, NodeState, NodeUpdate};
pub use partition::{
    Partition, PartitionCreate, PartitionListOptions, PartitionState, PartitionUpdate,
};
pub use qos::{Qos, QosCreate, QosLimits, QosListOptions, QosUpdate};
pub use reservation::{
    Reservation, ReservationCreate, ReservationListOptions, ReservationUpdate,
};
pub use standalone::{
    ControllerPing, DbDiagnostics, Diagnostics, Instance, InstanceListOptions, License,
    PingReport, ReconfigureResponse, RpcStat, ShareListOptions, ShareRecord,
};
pub use tres::{Tres, TresParseError, format_tres, parse_tres};
pub use user::{AdminLevel, User, UserCreate, UserListOptions, UserUpdate};
pub use wckey::{WcKey, WcKeyCreate, WcKeyListOptions, WcKeyUpdate};

/// True when `wanted` is empty or contains `value`.
pub(crate) fn matches_any(wanted: &[String], value: &str) -> bool {
    wanted.is_empty() || wanted.iter().any(|w| w == value)
}

/// True when `wanted` is empty or shares an element with `values`.
pub(crate) fn matches_overlap(wanted: &[String], values: &[String]) -> bool {
    wanted.is_empty() || wanted.iter().any(|w| values.contains(w))
}
