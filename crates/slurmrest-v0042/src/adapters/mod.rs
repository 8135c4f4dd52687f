//! Resource adapters for v0.0.42 and the facade that bundles them.

mod account;
mod association;
mod job;
mod node;
mod partition;
mod qos;
mod reservation;
mod standalone;
mod user;

pub use account::AccountAdapter;
pub use association::AssociationAdapter;
pub use job::JobAdapter;
pub use node::NodeAdapter;
pub use partition::PartitionAdapter;
pub use qos::QosAdapter;
pub use reservation::ReservationAdapter;
pub use standalone::StandaloneAdapter;
pub use user::UserAdapter;

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

/// Every v0.0.42 manager behind one [`VersionAdapter`].
#[derive(Debug)]
pub struct Adapter {
    jobs: JobAdapter,
    nodes: NodeAdapter,
    partitions: PartitionAdapter,
    accounts: AccountAdapter,
    users: UserAdapter,
    qos: QosAdapter,
    reservations: ReservationAdapter,
    associations: AssociationAdapter,
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
            qos: QosAdapter::new(transport.clone()),
            reservations: ReservationAdapter::new(transport.clone()),
            associations: AssociationAdapter::new(transport.clone()),
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
        Some(&self.qos)
    }

    fn reservations(&self) -> Option<&dyn ReservationManager> {
        Some(&self.reservations)
    }

    fn associations(&self) -> Option<&dyn AssociationManager> {
        Some(&self.associations)
    }

    fn clusters(&self) -> Option<&dyn ClusterManager> {
        None
    }

    fn wckeys(&self) -> Option<&dyn WcKeyManager> {
        None
    }

    fn standalone(&self) -> &dyn StandaloneManager {
        &self.standalone
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slurmrest_core::{ErrorKind, RequestContext};

    #[test]
    fn test_facade_hides_dropped_resources() {
        let adapter = Adapter::new(None);
        assert_eq!(adapter.version().to_string(), "v0.0.42");
        assert!(adapter.clusters().is_none());
        assert!(adapter.wckeys().is_none());
        assert!(adapter.qos().is_some());
        assert!(adapter.capabilities().features.ping_database);
    }

    #[tokio::test]
    async fn test_node_delete_unsupported() {
        let mock = slurmrest_core::mock::MockTransport::new().shared();
        let adapter = Adapter::new(Some(mock.clone()));
        let err = adapter
            .nodes()
            .unwrap()
            .delete(&RequestContext::new(), "cn01")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
        assert_eq!(mock.request_count(), 0);
    }
}
