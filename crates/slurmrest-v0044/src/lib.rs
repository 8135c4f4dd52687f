//! slurmrestd v0.0.44 backend (Slurm 25.11).
//!
//! Same typed-array dialect as v0.0.43, but slurmdbd no longer exposes
//! clusters or wckeys, node writes are limited to drain/resume, and
//! `GET /jobs` takes no filters.

pub mod adapters;
pub mod convert;
pub mod wire;

pub use adapters::Adapter;

use slurmrest_core::{
    ApiVersion, Capabilities, EntityWrites, FeatureSupport, JobSupport, NodeSupport,
    ResourceSupport, WriteSupport,
};

pub const VERSION: ApiVersion = ApiVersion::V0_0_44;

pub static CAPABILITIES: Capabilities = Capabilities {
    version: "v0.0.44",
    resources: ResourceSupport {
        jobs: true,
        nodes: true,
        partitions: true,
        accounts: true,
        users: true,
        qos: true,
        reservations: true,
        associations: true,
        clusters: false,
        wckeys: false,
    },
    writes: WriteSupport {
        partitions: EntityWrites::NONE,
        accounts: EntityWrites::ALL,
        users: EntityWrites::ALL,
        qos: EntityWrites::ALL,
        reservations: EntityWrites::ALL,
        associations: EntityWrites::ALL,
        clusters: EntityWrites::NONE,
        wckeys: EntityWrites::NONE,
    },
    jobs: JobSupport {
        submit: true,
        update: true,
        cancel: true,
        hold: true,
        release: true,
        signal: false,
        notify: true,
        requeue: true,
        allocate: true,
    },
    nodes: NodeSupport {
        update: false,
        delete: false,
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
        tres_create: false,
        instances: false,
        reconfigure: false,
        ping_database: true,
    },
};
