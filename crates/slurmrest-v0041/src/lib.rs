//! slurmrestd v0.0.41 backend (Slurm 24.05 / 24.11).
//!
//! Submit takes the script beside the job description, jobs can be updated,
//! held and released but not signalled, requeued or allocated, and
//! reservations are read-only. slurmdbd exposes no clusters or wckeys.

pub mod adapters;
pub mod convert;
pub mod wire;

pub use adapters::Adapter;

use slurmrest_core::{
    ApiVersion, Capabilities, EntityWrites, FeatureSupport, JobSupport, NodeSupport,
    ResourceSupport, WriteSupport,
};

pub const VERSION: ApiVersion = ApiVersion::V0_0_41;

pub static CAPABILITIES: Capabilities = Capabilities {
    version: "v0.0.41",
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
        reservations: EntityWrites::NONE,
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
        notify: false,
        requeue: false,
        allocate: false,
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
