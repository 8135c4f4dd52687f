//! The per-version facade.

use crate::capabilities::Capabilities;
use crate::managers::{
    AccountManager, AssociationManager, ClusterManager, JobManager, NodeManager,
    PartitionManager, QosManager, ReservationManager, StandaloneManager, UserManager,
    WcKeyManager,
};
use crate::version::ApiVersion;

/// Aggregates every manager for one backend version.
///
/// Getters return `None` when the version has no such resource at all;
/// check for it or consult [`VersionAdapter::capabilities`] first.
pub trait VersionAdapter: Send + Sync {
    fn version(&self) -> ApiVersion;

    fn capabilities(&self) -> &'static Capabilities;

    fn jobs(&self) -> Option<&dyn JobManager>;

    fn nodes(&self) -> Option<&dyn NodeManager>;

    fn partitions(&self) -> Option<&dyn PartitionManager>;

    fn accounts(&self) -> Option<&dyn AccountManager>;

    fn users(&self) -> Option<&dyn UserManager>;

    fn qos(&self) -> Option<&dyn QosManager>;

    fn reservations(&self) -> Option<&dyn ReservationManager>;

    fn associations(&self) -> Option<&dyn AssociationManager>;

    fn clusters(&self) -> Option<&dyn ClusterManager>;

    fn wckeys(&self) -> Option<&dyn WcKeyManager>;

    fn standalone(&self) -> &dyn StandaloneManager;
}
