//! Static capability tables.
//!
//! Each version crate declares one `static Capabilities`. Adapters consult
//! the same table before every optional call, so a `false` flag always
//! surfaces as `UnsupportedOperation`.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Resource {
    Jobs,
    Nodes,
    Partitions,
    Accounts,
    Users,
    Qos,
    Reservations,
    Associations,
    Clusters,
    WcKeys,
}

impl Resource {
    pub const ALL: [Resource; 10] = [
        Resource::Jobs,
        Resource::Nodes,
        Resource::Partitions,
        Resource::Accounts,
        Resource::Users,
        Resource::Qos,
        Resource::Reservations,
        Resource::Associations,
        Resource::Clusters,
        Resource::WcKeys,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jobs => "jobs",
            Self::Nodes => "nodes",
            Self::Partitions => "partitions",
            Self::Accounts => "accounts",
            Self::Users => "users",
            Self::Qos => "qos",
            Self::Reservations => "reservations",
            Self::Associations => "associations",
            Self::Clusters => "clusters",
            Self::WcKeys => "wckeys",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum JobAction {
    Submit,
    Update,
    Cancel,
    Hold,
    Release,
    Signal,
    Notify,
    Requeue,
    Allocate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeAction {
    Update,
    Delete,
    Drain,
    Resume,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Feature {
    Watch,
    Diagnostics,
    DbDiagnostics,
    Licenses,
    Shares,
    Tres,
    TresCreate,
    Instances,
    Reconfigure,
    PingDatabase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WriteOp {
    Create,
    Update,
    Delete,
}

/// One flag in a capability table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Capability {
    Resource(Resource),
    Write(Resource, WriteOp),
    Job(JobAction),
    Node(NodeAction),
    Feature(Feature),
}

impl Capability {
    /// Suggested workaround named in `UnsupportedOperation` errors.
    pub fn alternative(&self) -> Option<&'static str> {
        match self {
            Self::Write(Resource::Partitions, _) => {
                Some("partitions are defined in slurm.conf; edit it and reconfigure")
            }
            Self::Write(Resource::Users, WriteOp::Update) => Some("use association updates"),
            Self::Write(Resource::Associations, WriteOp::Create) => {
                Some("create the association with the account or user instead")
            }
            Self::Write(Resource::Reservations, WriteOp::Update) => {
                Some("delete and recreate the reservation")
            }
            Self::Write(Resource::Clusters | Resource::WcKeys, WriteOp::Update) => {
                Some("delete and recreate it")
            }
            Self::Job(JobAction::Notify) => Some("update the job comment instead"),
            Self::Job(JobAction::Hold) | Self::Job(JobAction::Release) => {
                Some("update the job priority instead")
            }
            Self::Job(JobAction::Signal) => Some("use cancel to stop the job"),
            Self::Node(NodeAction::Update) => Some("use scontrol update on the controller"),
            _ => None,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resource(r) => write!(f, "{}", r.as_str()),
            Self::Write(r, op) => write!(f, "{}.{:?}", r.as_str(), op),
            Self::Job(a) => write!(f, "jobs.{:?}", a),
            Self::Node(a) => write!(f, "nodes.{:?}", a),
            Self::Feature(x) => write!(f, "feature.{:?}", x),
        }
    }
}

/// Create/update/delete support for one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntityWrites {
    pub create: bool,
    pub update: bool,
    pub delete: bool,
}

impl EntityWrites {
    pub const NONE: Self = Self {
        create: false,
        update: false,
        delete: false,
    };
    pub const ALL: Self = Self {
        create: true,
        update: true,
        delete: true,
    };
    pub const CREATE_DELETE: Self = Self {
        create: true,
        update: false,
        delete: true,
    };
    pub const DELETE_ONLY: Self = Self {
        create: false,
        update: false,
        delete: true,
    };

    fn supports(&self, op: WriteOp) -> bool {
        match op {
            WriteOp::Create => self.create,
            WriteOp::Update => self.update,
            WriteOp::Delete => self.delete,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceSupport {
    pub jobs: bool,
    pub nodes: bool,
    pub partitions: bool,
    pub accounts: bool,
    pub users: bool,
    pub qos: bool,
    pub reservations: bool,
    pub associations: bool,
    pub clusters: bool,
    pub wckeys: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WriteSupport {
    pub partitions: EntityWrites,
    pub accounts: EntityWrites,
    pub users: EntityWrites,
    pub qos: EntityWrites,
    pub reservations: EntityWrites,
    pub associations: EntityWrites,
    pub clusters: EntityWrites,
    pub wckeys: EntityWrites,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JobSupport {
    pub submit: bool,
    pub update: bool,
    pub cancel: bool,
    pub hold: bool,
    pub release: bool,
    pub signal: bool,
    pub notify: bool,
    pub requeue: bool,
    pub allocate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeSupport {
    pub update: bool,
    pub delete: bool,
    pub drain: bool,
    pub resume: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureSupport {
    pub watch: bool,
    pub diagnostics: bool,
    pub db_diagnostics: bool,
    pub licenses: bool,
    pub shares: bool,
    pub tres: bool,
    pub tres_create: bool,
    pub instances: bool,
    pub reconfigure: bool,
    pub ping_database: bool,
}

/// What one backend version can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub version: &'static str,
    pub resources: ResourceSupport,
    pub writes: WriteSupport,
    pub jobs: JobSupport,
    pub nodes: NodeSupport,
    pub features: FeatureSupport,
}

impl Capabilities {
    pub fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Resource(r) => self.has_resource(r),
            Capability::Write(r, op) => {
                self.has_resource(r) && self.writes_for(r).is_some_and(|w| w.supports(op))
            }
            Capability::Job(action) => self.resources.jobs && self.job_action(action),
            Capability::Node(action) => self.resources.nodes && self.node_action(action),
            Capability::Feature(feature) => self.feature(feature),
        }
    }

    pub fn has_resource(&self, resource: Resource) -> bool {
        let r = &self.resources;
        match resource {
            Resource::Jobs => r.jobs,
            Resource::Nodes => r.nodes,
            Resource::Partitions => r.partitions,
            Resource::Accounts => r.accounts,
            Resource::Users => r.users,
            Resource::Qos => r.qos,
            Resource::Reservations => r.reservations,
            Resource::Associations => r.associations,
            Resource::Clusters => r.clusters,
            Resource::WcKeys => r.wckeys,
        }
    }

    fn writes_for(&self, resource: Resource) -> Option<&EntityWrites> {
        let w = &self.writes;
        match resource {
            Resource::Partitions => Some(&w.partitions),
            Resource::Accounts => Some(&w.accounts),
            Resource::Users => Some(&w.users),
            Resource::Qos => Some(&w.qos),
            Resource::Reservations => Some(&w.reservations),
            Resource::Associations => Some(&w.associations),
            Resource::Clusters => Some(&w.clusters),
            Resource::WcKeys => Some(&w.wckeys),
            Resource::Jobs | Resource::Nodes => None,
        }
    }

    fn job_action(&self, action: JobAction) -> bool {
        let j = &self.jobs;
        match action {
            JobAction::Submit => j.submit,
            JobAction::Update => j.update,
            JobAction::Cancel => j.cancel,
            JobAction::Hold => j.hold,
            JobAction::Release => j.release,
            JobAction::Signal => j.signal,
            JobAction::Notify => j.notify,
            JobAction::Requeue => j.requeue,
            JobAction::Allocate => j.allocate,
        }
    }

    fn node_action(&self, action: NodeAction) -> bool {
        let n = &self.nodes;
        match action {
            NodeAction::Update => n.update,
            NodeAction::Delete => n.delete,
            NodeAction::Drain => n.drain,
            NodeAction::Resume => n.resume,
        }
    }

    fn feature(&self, feature: Feature) -> bool {
        let f = &self.features;
        match feature {
            Feature::Watch => f.watch,
            Feature::Diagnostics => f.diagnostics,
            Feature::DbDiagnostics => f.db_diagnostics,
            Feature::Licenses => f.licenses,
            Feature::Shares => f.shares,
            Feature::Tres => f.tres,
            Feature::TresCreate => f.tres_create,
            Feature::Instances => f.instances,
            Feature::Reconfigure => f.reconfigure,
            Feature::PingDatabase => f.ping_database,
        }
    }

    /// Every flag in the table with its value.
    pub fn flags(&self) -> Vec<(Capability, bool)> {
        all_capabilities()
            .into_iter()
            .map(|c| (c, self.supports(c)))
            .collect()
    }

    pub fn unsupported(&self) -> Vec<Capability> {
        self.flags()
            .into_iter()
            .filter(|(_, on)| !on)
            .map(|(c, _)| c)
            .collect()
    }
}

/// Every capability the tables describe.
pub fn all_capabilities() -> Vec<Capability> {
    let mut all: Vec<Capability> = Resource::ALL.iter().map(|r| Capability::Resource(*r)).collect();

    for r in Resource::ALL {
        if matches!(r, Resource::Jobs | Resource::Nodes) {
            continue;
        }
        for op in [WriteOp::Create, WriteOp::Update, WriteOp::Delete] {
            all.push(Capability::Write(r, op));
        }
    }

    all.extend(
        [
            JobAction::Submit,
            JobAction::Update,
            JobAction::Cancel,
            JobAction::Hold,
            JobAction::Release,
            JobAction::Signal,
            JobAction::Notify,
            JobAction::Requeue,
            JobAction::Allocate,
        ]
        .map(Capability::Job),
    );
    all.extend(
        [
            NodeAction::Update,
            NodeAction::Delete,
            NodeAction::Drain,
            NodeAction::Resume,
        ]
        .map(Capability::Node),
    );
    all.extend(
        [
            Feature::Watch,
            Feature::Diagnostics,
            Feature::DbDiagnostics,
            Feature::Licenses,
            Feature::Shares,
            Feature::Tres,
            Feature::TresCreate,
            Feature::Instances,
            Feature::Reconfigure,
            Feature::PingDatabase,
        ]
        .map(Capability::Feature),
    );
    all
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: Capabilities = Capabilities {
        version: "vtest",
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
            users: EntityWrites::ALL,
            qos: EntityWrites::ALL,
            reservations: EntityWrites::DELETE_ONLY,
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
            instances: true,
            reconfigure: true,
            ping_database: true,
        },
    };

    #[test]
    fn test_supports() {
        assert!(FULL.supports(Capability::Job(JobAction::Submit)));
        assert!(!FULL.supports(Capability::Job(JobAction::Notify)));
        assert!(!FULL.supports(Capability::Node(NodeAction::Delete)));
        assert!(FULL.supports(Capability::Write(Resource::Reservations, WriteOp::Delete)));
        assert!(!FULL.supports(Capability::Write(Resource::Reservations, WriteOp::Create)));
        assert!(!FULL.supports(Capability::Feature(Feature::TresCreate)));
    }

    #[test]
    fn test_missing_resource_disables_writes() {
        assert!(!FULL.supports(Capability::Resource(Resource::Qos)));
        assert!(!FULL.supports(Capability::Write(Resource::Qos, WriteOp::Create)));
    }

    #[test]
    fn test_flags_cover_every_capability() {
        let flags = FULL.flags();
        assert_eq!(flags.len(), all_capabilities().len());
        assert!(
            FULL.unsupported()
                .contains(&Capability::Write(Resource::Partitions, WriteOp::Update))
        );
        for r in [Resource::Clusters, Resource::WcKeys] {
            assert!(FULL.unsupported().contains(&Capability::Write(r, WriteOp::Update)));
        }
    }

    #[test]
    fn test_capability_display() {
        assert_eq!(Capability::Job(JobAction::Hold).to_string(), "jobs.Hold");
        assert_eq!(
            Capability::Write(Resource::Qos, WriteOp::Create).to_string(),
            "qos.Create"
        );
    }
}
