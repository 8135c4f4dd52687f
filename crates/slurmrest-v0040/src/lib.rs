//! slurmrestd v0.0.40 backend (Slurm 23.11 / 24.05).
//!
//! The oldest supported dialect. Submit takes the script beside the job
//! description, node feature lists are comma-joined strings, QoS is absent,
//! jobs cannot be modified once submitted and associations can only be
//! created.

pub mod adapters;
pub mod convert;
pub mod wire;

pub use adapters::Adapter;

use slurmrest_core::{
    ApiVersion, Capabilities, EntityWrites, FeatureSupport, JobSupport, NodeSupport,
    ResourceSupport, WriteSupport,
};

pub const VERSION: ApiVersion = ApiVersion::V0_0_40;

pub static CAPABILITIES: Capabilities = Capabilities {
    version: "v0.0.40",
    resources: ResourceSupport {
        jobs: true,
        nodes: true,
        partitions: true,
        accounts: true,
        users: true,
        qos: false,
        reservations: true,
        associations: true,
        clusters: true,
        wckeys: true,
    },
    writes: WriteSupport {
        partitions: EntityWrites::NONE,
        accounts: EntityWrites::ALL,
        users: EntityWrites {
            create: true,
            update: false,
            delete: true,
        },
        qos: EntityWrites::NONE,
        reservations: EntityWrites::NONE,
        associations: EntityWrites {
            create: true,
            update: false,
            delete: false,
        },
        clusters: EntityWrites::CREATE_DELETE,
        wckeys: EntityWrites::CREATE_DELETE,
    },
    jobs: JobSupport {
        submit: true,
        update: false,
        cancel: true,
        hold: false,
        release: false,
        signal: true,
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
        watch: false,
        diagnostics: true,
        db_diagnostics: true,
        licenses: true,
        shares: true,
        tres: true,
        tres_create: false,
        instances: false,
        reconfigure: false,
        ping_database: false,
    },
};
