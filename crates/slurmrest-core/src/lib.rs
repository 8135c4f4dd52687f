//! Version-independent core of the slurmrest client.
//!
//! Error taxonomy and normalization, the capability model, the manager
//! traits every backend version implements, and the adapter plumbing the
//! version crates share.

pub mod adapter;
pub mod auth;
pub mod capabilities;
pub mod context;
pub mod convert;
pub mod error;
pub mod facade;
pub mod listing;
pub mod managers;
pub mod normalize;
pub mod transport;
pub mod version;

#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use adapter::{AdapterBase, take_array, warnings};
pub use auth::{Authenticator, NoAuth, TokenAuth, USER_NAME_HEADER, USER_TOKEN_HEADER};
pub use capabilities::{
    Capabilities, Capability, EntityWrites, Feature, FeatureSupport, JobAction, JobSupport,
    NodeAction, NodeSupport, Resource, ResourceSupport, WriteOp, WriteSupport, all_capabilities,
};
pub use context::{ContextState, RequestContext};
pub use convert::{ConversionError, Converter, require_name};
pub use error::{ApiErrorDetail, Error, ErrorKind, Result, parse_error};
pub use facade::VersionAdapter;
pub use listing::convert_records;
pub use managers::{
    AccountManager, AssociationManager, ClusterManager, JobManager, NodeManager,
    PartitionManager, QosManager, ReservationManager, StandaloneManager, UserManager,
    WcKeyManager,
};
pub use normalize::{
    SlurmErrno, check_embedded_errors, enhance_message, normalize, normalize_for_version,
    slurm_errno, slurm_error_name,
};
pub use transport::{ApiRequest, ApiResponse, Method, Transport, TransportError};
pub use version::{ApiVersion, VersionParseError};
