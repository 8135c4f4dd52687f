//! slurmrestd v0.0.42 backend (Slurm 24.11 / 25.05).
//!
//! Typed arrays for every list field and the full job action set, but
//! reservations can only be deleted, nodes cannot be deleted and slurmdbd
//! exposes no clusters, wckeys or instances.

pub mod adapters;
pub mod convert;
pub mod wire;

pub use adapters::Adapter;

use slurmrest_core::{
    ApiVersion, Capabilities, EntityWrites, FeatureSupport, JobSupport, NodeSupport,
    ResourceSupport, WriteSupport,
};

pub const VERSION: ApiVersion = ApiVersion::V0_0_42;

pub static CAPABILITIES: Capabilities = Capabilities {
    version: "v0.0.42",
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
        reservations: EntityWrites::DELETE_ONLY,
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
        signal: true,
        notify: false,
        requeue: true,
        allocate: true,
    },
    nodes: NodeSupport {
        update: true,
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
