//! slurmrestd v0.0.43 backend (Slurm 25.05 / 25.11).
//!
//! The most complete dialect: typed arrays for every list field, native job
//! filters on `GET /jobs`, reservation CRUD and cluster/wckey writes.

pub mod adapters;
pub mod convert;
pub mod wire;

pub use adapters::Adapter;

use slurmrest_core::{
    ApiVersion, Capabilities, EntityWrites, FeatureSupport, JobSupport, NodeSupport,
    ResourceSupport, WriteSupport,
};

pub const VERSION: ApiVersion = ApiVersion::V0_0_43;

pub static CAPABILITIES: Capabilities = Capabilities {
    version: "v0.0.43",
    resources: ResourceSupport {
        jobs: true,
        nodes: true,
        partitions: true,
        accounts: true,
        users: true,
        qos: true,
        reservations: true,
        associations: true,
        clusters: true,
        wckeys: true,
    },
    writes: WriteSupport {
        partitions: EntityWrites::NONE,
        accounts: EntityWrites::ALL,
        users: EntityWrites::ALL,
        qos: EntityWrites::ALL,
        reservations: EntityWrites::ALL,
        associations: EntityWrites::ALL,
        clusters: EntityWrites::CREATE_DELETE,
        wckeys: EntityWrites::CREATE_DELETE,
    },
    jobs: JobSupport {
        submit: true,
        update: true,
        cancel: true,
        hold: true,
        release: true,
        signal: true,
        notify: true,
        requeue: true,
        allocate: true,
    },
    nodes: NodeSupport {
        update: true,
        delete: true,
        drain: true,
        resume: true,
    },
    features: FeatureSupport {
        watch: true,
        diagnostics: true,
        db_diagnostics: true,
        licenses: true,
        shares: true,
        tres: true,
        tres_create: true,
        instances: true,
        reconfigure: true,
        ping_database: true,
    },
};
