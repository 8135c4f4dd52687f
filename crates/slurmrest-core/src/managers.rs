//! Per-entity manager traits, identical across backend versions.
//!
//! Every method validates the context first, then the transport, then the
//! version's capability table. Unsupported calls return
//! `UnsupportedOperation`; list calls skip malformed records.

use crate::context::RequestContext;
use crate::error::Result;
use async_trait::async_trait;
use slurmrest_types::{
    Account, AccountCreate, AccountListOptions, AccountUpdate, Association, AssociationCreate,
    AssociationKey, AssociationListOptions, AssociationUpdate, Cluster, ClusterCreate,
    ClusterListOptions, ClusterUpdate, CreateResponse, DbDiagnostics, Diagnostics, Instance,
    InstanceListOptions,
    Job, JobAllocateResponse, JobAllocation, JobListOptions, JobSubmission, JobSubmitResponse,
    JobUpdate, License, ListResult, Node, NodeListOptions, NodeUpdate, Partition, PartitionCreate,
    PartitionListOptions, PartitionUpdate, PingReport, Qos, QosCreate, QosListOptions, QosUpdate,
    ReconfigureResponse, Reservation, ReservationCreate, ReservationListOptions,
    ReservationUpdate, ShareListOptions, ShareRecord, Tres, User, UserCreate, UserListOptions,
    UserUpdate, WcKey, WcKeyCreate, WcKeyListOptions, WcKeyUpdate,
};

#[async_trait]
pub trait JobManager: Send + Sync {
    async fn list(&self, ctx: &RequestContext, opts: &JobListOptions) -> Result<ListResult<Job>>;

    async fn get(&self, ctx: &RequestContext, job_id: u32) -> Result<Job>;

    async fn submit(&self, ctx: &RequestContext, job: &JobSubmission)
    -> Result<JobSubmitResponse>;

    async fn update(&self, ctx: &RequestContext, job_id: u32, update: &JobUpdate) -> Result<()>;

    async fn cancel(&self, ctx: &RequestContext, job_id: u32) -> Result<()>;

    async fn hold(&self, ctx: &RequestContext, job_id: u32) -> Result<()>;

    async fn release(&self, ctx: &RequestContext, job_id: u32) -> Result<()>;

    /// Send a signal by name ("SIGUSR1") or number ("10").
    async fn signal(&self, ctx: &RequestContext, job_id: u32, signal: &str) -> Result<()>;

    async fn notify(&self, ctx: &RequestContext, job_id: u32, message: &str) -> Result<()>;

    async fn requeue(&self, ctx: &RequestContext, job_id: u32) -> Result<()>;

    async fn allocate(
        &self,
        ctx: &RequestContext,
        request: &JobAllocation,
    ) -> Result<JobAllocateResponse>;
}

#[async_trait]
pub trait NodeManager: Send + Sync {
    async fn list(&self, ctx: &RequestContext, opts: &NodeListOptions)
    -> Result<ListResult<Node>>;

    async fn get(&self, ctx: &RequestContext, name: &str) -> Result<Node>;

    async fn update(&self, ctx: &RequestContext, name: &str, update: &NodeUpdate) -> Result<()>;

    async fn delete(&self, ctx: &RequestContext, name: &str) -> Result<()>;

    async fn drain(&self, ctx: &RequestContext, name: &str, reason: &str) -> Result<()>;

    async fn resume(&self, ctx: &RequestContext, name: &str) -> Result<()>;
}

#[async_trait]
pub trait PartitionManager: Send + Sync {
    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &PartitionListOptions,
    ) -> Result<ListResult<Partition>>;

    async fn get(&self, ctx: &RequestContext, name: &str) -> Result<Partition>;

    async fn create(
        &self,
        ctx: &RequestContext,
        partition: &PartitionCreate,
    ) -> Result<CreateResponse>;

    async fn update(
        &self,
        ctx: &RequestContext,
        name: &str,
        update: &PartitionUpdate,
    ) -> Result<()>;

    async fn delete(&self, ctx: &RequestContext, name: &str) -> Result<()>;
}

#[async_trait]
pub trait AccountManager: Send + Sync {
    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &AccountListOptions,
    ) -> Result<ListResult<Account>>;

    async fn get(&self, ctx: &RequestContext, name: &str) -> Result<Account>;

    async fn create(&self, ctx: &RequestContext, account: &AccountCreate)
    -> Result<CreateResponse>;

    async fn update(&self, ctx: &RequestContext, name: &str, update: &AccountUpdate)
    -> Result<()>;

    async fn delete(&self, ctx: &RequestContext, name: &str) -> Result<()>;
}

#[async_trait]
pub trait UserManager: Send + Sync {
    async fn list(&self, ctx: &RequestContext, opts: &UserListOptions)
    -> Result<ListResult<User>>;

    async fn get(&self, ctx: &RequestContext, name: &str) -> Result<User>;

    async fn create(&self, ctx: &RequestContext, user: &UserCreate) -> Result<CreateResponse>;

    async fn update(&self, ctx: &RequestContext, name: &str, update: &UserUpdate) -> Result<()>;

    async fn delete(&self, ctx: &RequestContext, name: &str) -> Result<()>;
}

#[async_trait]
pub trait QosManager: Send + Sync {
    async fn list(&self, ctx: &RequestContext, opts: &QosListOptions) -> Result<ListResult<Qos>>;

    async fn get(&self, ctx: &RequestContext, name: &str) -> Result<Qos>;

    async fn create(&self, ctx: &RequestContext, qos: &QosCreate) -> Result<CreateResponse>;

    async fn update(&self, ctx: &RequestContext, name: &str, update: &QosUpdate) -> Result<()>;

    async fn delete(&self, ctx: &RequestContext, name: &str) -> Result<()>;
}

#[async_trait]
pub trait ReservationManager: Send + Sync {
    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &ReservationListOptions,
    ) -> Result<ListResult<Reservation>>;

    async fn get(&self, ctx: &RequestContext, name: &str) -> Result<Reservation>;

    async fn create(
        &self,
        ctx: &RequestContext,
        reservation: &ReservationCreate,
    ) -> Result<CreateResponse>;

    async fn update(
        &self,
        ctx: &RequestContext,
        name: &str,
        update: &ReservationUpdate,
    ) -> Result<()>;

    async fn delete(&self, ctx: &RequestContext, name: &str) -> Result<()>;
}

#[async_trait]
pub trait AssociationManager: Send + Sync {
    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &AssociationListOptions,
    ) -> Result<ListResult<Association>>;

    async fn get(&self, ctx: &RequestContext, key: &AssociationKey) -> Result<Association>;

    async fn create(
        &self,
        ctx: &RequestContext,
        association: &AssociationCreate,
    ) -> Result<CreateResponse>;

    async fn update(
        &self,
        ctx: &RequestContext,
        key: &AssociationKey,
        update: &AssociationUpdate,
    ) -> Result<()>;

    async fn delete(&self, ctx: &RequestContext, key: &AssociationKey) -> Result<()>;
}

#[async_trait]
pub trait ClusterManager: Send + Sync {
    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &ClusterListOptions,
    ) -> Result<ListResult<Cluster>>;

    async fn get(&self, ctx: &RequestContext, name: &str) -> Result<Cluster>;

    async fn create(&self, ctx: &RequestContext, cluster: &ClusterCreate)
    -> Result<CreateResponse>;

    /// No version exposes a cluster update endpoint; adapters refuse it.
    async fn update(&self, ctx: &RequestContext, name: &str, update: &ClusterUpdate)
    -> Result<()>;

    async fn delete(&self, ctx: &RequestContext, name: &str) -> Result<()>;
}

#[async_trait]
pub trait WcKeyManager: Send + Sync {
    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &WcKeyListOptions,
    ) -> Result<ListResult<WcKey>>;

    async fn get(&self, ctx: &RequestContext, id: &str) -> Result<WcKey>;

    async fn create(&self, ctx: &RequestContext, wckey: &WcKeyCreate) -> Result<CreateResponse>;

    async fn update(&self, ctx: &RequestContext, id: &str, update: &WcKeyUpdate) -> Result<()>;

    async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<()>;
}

/// Endpoints that do not belong to a single entity.
#[async_trait]
pub trait StandaloneManager: Send + Sync {
    async fn ping(&self, ctx: &RequestContext) -> Result<PingReport>;

    async fn ping_database(&self, ctx: &RequestContext) -> Result<PingReport>;

    async fn diagnostics(&self, ctx: &RequestContext) -> Result<Diagnostics>;

    async fn db_diagnostics(&self, ctx: &RequestContext) -> Result<DbDiagnostics>;

    async fn licenses(&self, ctx: &RequestContext) -> Result<Vec<License>>;

    async fn shares(
        &self,
        ctx: &RequestContext,
        opts: &ShareListOptions,
    ) -> Result<ListResult<ShareRecord>>;

    async fn tres(&self, ctx: &RequestContext) -> Result<Vec<Tres>>;

    async fn create_tres(&self, ctx: &RequestContext, tres: &[Tres]) -> Result<()>;

    async fn instances(
        &self,
        ctx: &RequestContext,
        opts: &InstanceListOptions,
    ) -> Result<ListResult<Instance>>;

    async fn reconfigure(&self, ctx: &RequestContext) -> Result<ReconfigureResponse>;
}
