//! Resource adapters for v0.0.40 and the facade that bundles them.

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

pub use account::AccountAdapter;
pub use association::AssociationAdapter;
pub use cluster::ClusterAdapter;
pub use job::JobAdapter;
pub use node::NodeAdapter;
pub use partition::PartitionAdapter;
pub use reservation::ReservationAdapter;
pub use standalone::StandaloneAdapter;
pub use user::UserAdapter;
pub use wckey::WcKeyAdapter;

use crate::{CAPABILITIES, VERSION};
use slurmrest_core::{
    AccountManager, AdapterBase, ApiVersion, AssociationManager, Capabilities, ClusterManager,
    JobManager, NodeManager, PartitionManager, QosManager, ReservationManager, StandaloneManager,
    Transport, UserManager, VersionAdapter, WcKeyManager,
};
use std::sync::Arc;

pub(crate) fn base(resource: &'static str, transport: Option<Arc<dyn Transport>>) -> AdapterBase {
    AdapterBase::new(VERSION, resource, &CAPABILITIES, transport)
}

/// Every v0.0.40 manager behind one [`VersionAdapter`].
#[derive(Debug)]
pub struct Adapter {
    jobs: JobAdapter,
    nodes: NodeAdapter,
    partitions: PartitionAdapter,
    accounts: AccountAdapter,
    users: UserAdapter,
    reservations: ReservationAdapter,
    associations: AssociationAdapter,
    clusters: ClusterAdapter,
    wckeys: WcKeyAdapter,
    standalone: StandaloneAdapter,
}

impl Adapter {
    /// `None` builds an adapter whose every call fails with
    /// `ClientNotInitialized`.
    pub fn new(transport: Option<Arc<dyn Transport>>) -> Self {
        Self {
            jobs: JobAdapter::new(transport.clone()),
            nodes: NodeAdapter::new(transport.clone()),
            partitions: PartitionAdapter::new(transport.clone()),
            accounts: AccountAdapter::new(transport.clone()),
            users: UserAdapter::new(transport.clone()),
            reservations: ReservationAdapter::new(transport.clone()),
            associations: AssociationAdapter::new(transport.clone()),
            clusters: ClusterAdapter::new(transport.clone()),
            wckeys: WcKeyAdapter::new(transport.clone()),
            standalone: StandaloneAdapter::new(transport),
        }
    }
}

impl VersionAdapter for Adapter {
    fn version(&self) -> ApiVersion {
        VERSION
    }

    fn capabilities(&self) -> &'static Capabilities {
        &CAPABILITIES
    }

    fn jobs(&self) -> Option<&dyn JobManager> {
        Some(&self.jobs)
    }

    fn nodes(&self) -> Option<&dyn NodeManager> {
        Some(&self.nodes)
    }

    fn partitions(&self) -> Option<&dyn PartitionManager> {
        Some(&self.partitions)
    }

    fn accounts(&self) -> Option<&dyn AccountManager> {
        Some(&self.accounts)
    }

    fn users(&self) -> Option<&dyn UserManager> {
        Some(&self.users)
    }

    fn qos(&self) -> Option<&dyn QosManager> {
        None
    }

    fn reservations(&self) -> Option<&dyn ReservationManager> {
        Some(&self.reservations)
    }

    fn associations(&self) -> Option<&dyn AssociationManager> {
        Some(&self.associations)
    }

    fn clusters(&self) -> Option<&dyn ClusterManager> {
        Some(&self.clusters)
    }

    fn wckeys(&self) -> Option<&dyn WcKeyManager> {
        Some(&self.wckeys)
    }

    fn standalone(&self) -> &dyn StandaloneManager {
        &self.standalone
    }
}
