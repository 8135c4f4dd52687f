//! The entry point: a configured facade for one API version.

use crate::config::{ClientConfig, ConfigError};
use crate::factory::{adapter_for, detect_version};
use crate::watch::{JobWatcher, NodeWatcher, PartitionWatcher, WatchConfig};
use slurmrest_core::{
    AccountManager, ApiVersion, AssociationManager, Authenticator, Capabilities, ClusterManager,
    Error, JobManager, NoAuth, NodeManager, PartitionManager, QosManager, RequestContext,
    ReservationManager, Resource, StandaloneManager, TokenAuth, Transport, TransportError,
    UserManager, VersionAdapter, WcKeyManager,
};
use slurmrest_http::{HttpTransport, MetricsSnapshot, TransportMetrics};
use slurmrest_types::{NodeListOptions, PartitionListOptions};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] Error),

    #[error("Failed to set up HTTP transport: {0}")]
    Transport(#[from] TransportError),
}

pub struct SlurmClient {
    adapter: Arc<dyn VersionAdapter>,
    metrics: Option<Arc<TransportMetrics>>,
}

impl SlurmClient {
    /// Client for a known version over any transport.
    pub fn new(version: ApiVersion, transport: Arc<dyn Transport>) -> Result<Self, ClientError> {
        Ok(Self {
            adapter: Arc::from(adapter_for(version, Some(transport))?),
            metrics: None,
        })
    }

    /// Build the HTTP transport from `config` and pick the API version,
    /// probing the server when the selector is `auto`.
    pub async fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;

        let authenticator: Arc<dyn Authenticator> = match &config.token {
            Some(token) => {
                let auth = TokenAuth::new(token.clone());
                Arc::new(match &config.user_name {
                    Some(user) => auth.with_user(user.clone()),
                    None => auth,
                })
            }
            None => Arc::new(NoAuth),
        };
        let metrics = Arc::new(TransportMetrics::new());
        let transport: Arc<dyn Transport> = Arc::new(
            HttpTransport::builder(&config.base_url)
                .timeout(config.timeout())
                .user_agent(&config.user_agent)
                .authenticator(authenticator)
                .metrics(metrics.clone())
                .build()?,
        );

        let version = if config.detects_version() {
            let ctx = RequestContext::with_timeout(config.timeout());
            detect_version(&ctx, &transport).await?
        } else {
            ApiVersion::select(&config.api_version)?
        };
        info!("Using slurmrestd API {} at {}", version, config.base_url);

        Ok(Self {
            adapter: Arc::from(adapter_for(version, Some(transport))?),
            metrics: Some(metrics),
        })
    }

    pub fn version(&self) -> ApiVersion {
        self.adapter.version()
    }

    pub fn capabilities(&self) -> &'static Capabilities {
        self.adapter.capabilities()
    }

    pub fn adapter(&self) -> &dyn VersionAdapter {
        self.adapter.as_ref()
    }

    /// HTTP counters, when the client owns its transport.
    pub fn metrics(&self) -> Option<MetricsSnapshot> {
        self.metrics.as_ref().map(|m| m.snapshot())
    }

    fn missing(&self, resource: Resource) -> Error {
        debug!(
            "API {} has no {} endpoints",
            self.version(),
            resource.as_str()
        );
        Error::UnsupportedOperation {
            operation: format!("Access{}", capitalize(resource.as_str())),
            version: self.version().to_string(),
            alternative: None,
        }
    }

    pub fn jobs(&self) -> Result<&dyn JobManager, Error> {
        self.adapter.jobs().ok_or_else(|| self.missing(Resource::Jobs))
    }

    pub fn nodes(&self) -> Result<&dyn NodeManager, Error> {
        self.adapter
            .nodes()
            .ok_or_else(|| self.missing(Resource::Nodes))
    }

    pub fn partitions(&self) -> Result<&dyn PartitionManager, Error> {
        self.adapter
            .partitions()
            .ok_or_else(|| self.missing(Resource::Partitions))
    }

    pub fn accounts(&self) -> Result<&dyn AccountManager, Error> {
        self.adapter
            .accounts()
            .ok_or_else(|| self.missing(Resource::Accounts))
    }

    pub fn users(&self) -> Result<&dyn UserManager, Error> {
        self.adapter
            .users()
            .ok_or_else(|| self.missing(Resource::Users))
    }

    pub fn qos(&self) -> Result<&dyn QosManager, Error> {
        self.adapter.qos().ok_or_else(|| self.missing(Resource::Qos))
    }

    pub fn reservations(&self) -> Result<&dyn ReservationManager, Error> {
        self.adapter
            .reservations()
            .ok_or_else(|| self.missing(Resource::Reservations))
    }

    pub fn associations(&self) -> Result<&dyn AssociationManager, Error> {
        self.adapter
            .associations()
            .ok_or_else(|| self.missing(Resource::Associations))
    }

    pub fn clusters(&self) -> Result<&dyn ClusterManager, Error> {
        self.adapter
            .clusters()
            .ok_or_else(|| self.missing(Resource::Clusters))
    }

    pub fn wckeys(&self) -> Result<&dyn WcKeyManager, Error> {
        self.adapter
            .wckeys()
            .ok_or_else(|| self.missing(Resource::WcKeys))
    }

    pub fn standalone(&self) -> &dyn StandaloneManager {
        self.adapter.standalone()
    }

    /// Job watcher sharing this client's facade. Call
    /// [`JobWatcher::start`] to run it.
    pub fn watch_jobs(
        &self,
        config: WatchConfig,
        ctx: RequestContext,
    ) -> Result<JobWatcher, Error> {
        JobWatcher::new(self.adapter.clone(), config, ctx)
    }

    pub fn watch_nodes(
        &self,
        config: WatchConfig<NodeListOptions>,
        ctx: RequestContext,
    ) -> Result<NodeWatcher, Error> {
        NodeWatcher::new(self.adapter.clone(), config, ctx)
    }

    pub fn watch_partitions(
        &self,
        config: WatchConfig<PartitionListOptions>,
        ctx: RequestContext,
    ) -> Result<PartitionWatcher, Error> {
        PartitionWatcher::new(self.adapter.clone(), config, ctx)
    }
}

impl std::fmt::Debug for SlurmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlurmClient")
            .field("version", &self.version())
            .finish_non_exhaustive()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use slurmrest_core::mock::MockTransport;
    use slurmrest_core::{ErrorKind, Method};
    use slurmrest_types::JobListOptions;

    fn client(version: ApiVersion, mock: &Arc<MockTransport>) -> SlurmClient {
        SlurmClient::new(version, mock.clone()).unwrap()
    }

    #[test]
    fn test_new_rejects_legacy() {
        let mock = MockTransport::new().shared();
        let err = SlurmClient::new(ApiVersion::V0_0_39, mock).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Api(ref e) if e.kind() == ErrorKind::NotImplemented
        ));
    }

    #[test]
    fn test_missing_resource_is_unsupported() {
        let mock = MockTransport::new().shared();
        let client = client(ApiVersion::V0_0_42, &mock);
        let err = client.clusters().err().unwrap();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
        assert!(err.to_string().contains("AccessClusters"));
        assert!(err.to_string().contains("v0.0.42"));
        assert!(client.qos().is_ok());
        assert!(client.metrics().is_none());
    }

    #[tokio::test]
    async fn test_jobs_through_client() {
        let mock = MockTransport::new()
            .on(
                Method::Get,
                "/slurm/v0.0.43/jobs",
                200,
                json!({"jobs": [{"job_id": 5, "name": "x", "job_state": ["RUNNING"]}]}),
            )
            .shared();
        let client = client(ApiVersion::V0_0_43, &mock);
        let result = client
            .jobs()
            .unwrap()
            .list(&RequestContext::new(), &JobListOptions::default())
            .await
            .unwrap();
        assert_eq!(result.items[0].job_id, 5);
        assert_eq!(client.capabilities().version, "v0.0.43");
    }

    #[test]
    fn test_watch_gated_on_version() {
        let mock = MockTransport::new().shared();
        let err = client(ApiVersion::V0_0_40, &mock)
            .watch_jobs(WatchConfig::default(), RequestContext::new())
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
        assert!(
            client(ApiVersion::V0_0_41, &mock)
                .watch_jobs(WatchConfig::default(), RequestContext::new())
                .is_ok()
        );
        assert!(
            client(ApiVersion::V0_0_41, &mock)
                .watch_nodes(WatchConfig::default(), RequestContext::new())
                .is_ok()
        );
        assert!(
            client(ApiVersion::V0_0_40, &mock)
                .watch_partitions(WatchConfig::default(), RequestContext::new())
                .is_err()
        );
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("wckeys"), "Wckeys");
        assert_eq!(capitalize(""), "");
    }
}
