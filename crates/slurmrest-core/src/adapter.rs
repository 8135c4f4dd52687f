//! Plumbing shared by every resource adapter: context and client checks,
//! capability gates, the transport call and response decoding.

use crate::capabilities::{Capabilities, Capability};
use crate::context::{ContextState, RequestContext};
use crate::convert::ConversionError;
use crate::error::{Error, Result};
use crate::listing::convert_records;
use crate::normalize::{check_embedded_errors, normalize_for_version};
use crate::transport::{ApiRequest, Transport};
use crate::version::ApiVersion;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Immutable state every resource adapter holds: which version it speaks,
/// that version's capability table, and the transport handle.
#[derive(Clone)]
pub struct AdapterBase {
    version: ApiVersion,
    resource: &'static str,
    capabilities: &'static Capabilities,
    transport: Option<Arc<dyn Transport>>,
}

impl fmt::Debug for AdapterBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterBase")
            .field("version", &self.version)
            .field("resource", &self.resource)
            .field("initialized", &self.transport.is_some())
            .finish()
    }
}

impl AdapterBase {
    pub fn new(
        version: ApiVersion,
        resource: &'static str,
        capabilities: &'static Capabilities,
        transport: Option<Arc<dyn Transport>>,
    ) -> Self {
        Self {
            version,
            resource,
            capabilities,
            transport,
        }
    }

    pub fn version(&self) -> ApiVersion {
        self.version
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    pub fn capabilities(&self) -> &'static Capabilities {
        self.capabilities
    }

    /// `/slurm/vX/<rest>` (slurmctld endpoints).
    pub fn slurm_path(&self, rest: &str) -> String {
        format!("/slurm/{}/{}", self.version, rest.trim_start_matches('/'))
    }

    /// `/slurmdb/vX/<rest>` (slurmdbd endpoints).
    pub fn slurmdb_path(&self, rest: &str) -> String {
        format!("/slurmdb/{}/{}", self.version, rest.trim_start_matches('/'))
    }

    /// `/slurm/vX/<kind>/<id>` with `id` percent-encoded as one segment.
    pub fn slurm_entity_path(&self, kind: &str, id: impl fmt::Display) -> String {
        self.slurm_path(&format!("{}/{}", kind, encode_segment(id)))
    }

    /// `/slurmdb/vX/<kind>/<id>` with `id` percent-encoded as one segment.
    pub fn slurmdb_entity_path(&self, kind: &str, id: impl fmt::Display) -> String {
        self.slurmdb_path(&format!("{}/{}", kind, encode_segment(id)))
    }

    /// `.` and `..` survive encoding and are resolved away by URL parsers,
    /// so they can never name an entity.
    pub fn check_segment(&self, operation: &str, field: &str, value: &str) -> Result<()> {
        if matches!(value.trim(), "." | "..") {
            return Err(self.invalid(
                operation,
                field,
                format!("'{}' is not a valid {}", value, field),
            ));
        }
        Ok(())
    }

    pub fn check_context(&self, ctx: &RequestContext, operation: &str) -> Result<()> {
        match ctx.state() {
            ContextState::Live => Ok(()),
            ContextState::Cancelled => Err(Error::validation(
                operation,
                "context",
                "context is required and must not be cancelled",
            )),
            ContextState::DeadlineExceeded => Err(Error::validation(
                operation,
                "context",
                "context deadline exceeded",
            )),
        }
    }

    pub fn check_client(&self, operation: &str) -> Result<&Arc<dyn Transport>> {
        self.transport
            .as_ref()
            .ok_or_else(|| Error::ClientNotInitialized {
                operation: operation.to_string(),
                version: self.version.to_string(),
            })
    }

    pub fn require(&self, capability: Capability, operation: &str) -> Result<()> {
        if self.capabilities.supports(capability) {
            Ok(())
        } else {
            Err(self.unsupported(capability, operation))
        }
    }

    pub fn unsupported(&self, capability: Capability, operation: &str) -> Error {
        Error::UnsupportedOperation {
            operation: operation.to_string(),
            version: self.version.to_string(),
            alternative: capability.alternative().map(str::to_string),
        }
    }

    /// Preconditions in order: context, client, capability.
    pub fn begin(
        &self,
        ctx: &RequestContext,
        operation: &str,
        capability: Option<Capability>,
    ) -> Result<()> {
        self.check_context(ctx, operation)?;
        self.check_client(operation)?;
        if let Some(capability) = capability {
            self.require(capability, operation)?;
        }
        Ok(())
    }

    /// Preconditions for an operation this version has no endpoint for.
    /// Context and client errors still come first.
    pub fn refuse<T>(
        &self,
        ctx: &RequestContext,
        operation: &str,
        capability: Capability,
    ) -> Result<T> {
        self.check_context(ctx, operation)?;
        self.check_client(operation)?;
        Err(self.unsupported(capability, operation))
    }

    pub fn invalid(&self, operation: &str, field: &str, message: impl Into<String>) -> Error {
        Error::validation(operation, field, message)
    }

    pub fn not_found(&self, operation: &str, id: impl fmt::Display) -> Error {
        Error::NotFound {
            operation: operation.to_string(),
            version: self.version.to_string(),
            resource: self.resource,
            id: id.to_string(),
        }
    }

    pub fn conversion_failed(&self, operation: &str, err: ConversionError) -> Error {
        Error::Decode {
            operation: operation.to_string(),
            version: self.version.to_string(),
            message: err.to_string(),
        }
    }

    /// Run one request and normalize the outcome. Returns the raw body of a
    /// successful response.
    pub async fn send(
        &self,
        ctx: &RequestContext,
        operation: &str,
        request: ApiRequest,
    ) -> Result<Vec<u8>> {
        let transport = self.check_client(operation)?;
        let version = self.version.to_string();

        debug!(
            "{} {} {} (API {})",
            operation, request.method, request.path, version
        );

        let response = tokio::select! {
            biased;
            _ = ctx.done() => {
                return Err(Error::Cancelled {
                    operation: operation.to_string(),
                    version: Some(version),
                });
            }
            result = transport.execute(ctx, request) => {
                result.map_err(|source| Error::Transport {
                    operation: operation.to_string(),
                    version: Some(version.clone()),
                    source,
                })?
            }
        };

        if let Err(e) = normalize_for_version(response.status, &response.body, operation, &version)
        {
            warn!("{} failed: {}", operation, e);
            return Err(e);
        }
        check_embedded_errors(response.status, &response.body, operation)
            .map_err(|e| e.with_version(&version))?;

        Ok(response.body)
    }

    /// [`send`](Self::send) and decode the body.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        operation: &str,
        request: ApiRequest,
    ) -> Result<T> {
        let body = self.send(ctx, operation, request).await?;
        self.decode(operation, &body)
    }

    /// Decode a success body. An empty body decodes as `{}`.
    pub fn decode<T: DeserializeOwned>(&self, operation: &str, body: &[u8]) -> Result<T> {
        let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            body
        };
        serde_json::from_slice(body).map_err(|e| Error::Decode {
            operation: operation.to_string(),
            version: self.version.to_string(),
            message: e.to_string(),
        })
    }

    /// Fetch a list response and convert the array under `key`, skipping
    /// records that fail to decode or convert.
    pub async fn fetch_records<W, D>(
        &self,
        ctx: &RequestContext,
        operation: &str,
        request: ApiRequest,
        key: &str,
        convert: impl Fn(&W) -> std::result::Result<D, ConversionError>,
    ) -> Result<Vec<D>>
    where
        W: DeserializeOwned,
    {
        let body: Value = self.fetch(ctx, operation, request).await?;
        Ok(convert_records(
            take_array(body, key),
            self.resource,
            self.version,
            convert,
        ))
    }

    /// Fetch a single-entity response (still wrapped in an array under
    /// `key`). An empty array is `ResourceNotFound`; a record that fails to
    /// decode or convert fails the call.
    pub async fn fetch_record<W, D>(
        &self,
        ctx: &RequestContext,
        operation: &str,
        request: ApiRequest,
        key: &str,
        id: impl fmt::Display,
        convert: impl Fn(&W) -> std::result::Result<D, ConversionError>,
    ) -> Result<D>
    where
        W: DeserializeOwned,
    {
        let body: Value = self.fetch(ctx, operation, request).await?;
        let Some(raw) = take_array(body, key).into_iter().next() else {
            return Err(self.not_found(operation, id));
        };
        let wire: W = serde_json::from_value(raw).map_err(|e| Error::Decode {
            operation: operation.to_string(),
            version: self.version.to_string(),
            message: e.to_string(),
        })?;
        convert(&wire).map_err(|e| self.conversion_failed(operation, e))
    }

    /// Send a request whose success body carries nothing but warnings.
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        operation: &str,
        request: ApiRequest,
    ) -> Result<Vec<String>> {
        let body: Value = self.fetch(ctx, operation, request).await?;
        Ok(warnings(&body))
    }

    /// Serialize a wire request body.
    pub fn encode<T: serde::Serialize>(&self, operation: &str, body: &T) -> Result<Value> {
        serde_json::to_value(body).map_err(|e| Error::Decode {
            operation: operation.to_string(),
            version: self.version.to_string(),
            message: e.to_string(),
        })
    }
}

fn encode_segment(id: impl fmt::Display) -> String {
    urlencoding::encode(&id.to_string()).into_owned()
}

/// Remove and return the array under `key`; anything else is empty.
pub fn take_array(mut body: Value, key: &str) -> Vec<Value> {
    match body.get_mut(key).map(Value::take) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

/// Descriptions from a response's `warnings` array.
pub fn warnings(body: &Value) -> Vec<String> {
    body.get("warnings")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|w| {
                    w.get("description")
                        .and_then(Value::as_str)
                        .or_else(|| w.as_str())
                })
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::{
        EntityWrites, FeatureSupport, JobAction, JobSupport, NodeSupport, ResourceSupport,
        WriteSupport,
    };
    use crate::error::ErrorKind;
    use crate::mock::MockTransport;
    use crate::transport::Method;
    use serde::Deserialize;
    use serde_json::json;
    use std::time::Duration;

    static CAPS: Capabilities = Capabilities {
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
            notify: false,
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

    #[derive(Debug, Deserialize)]
    struct Pong {
        pings: Vec<Value>,
    }

    fn base(transport: Option<Arc<dyn Transport>>) -> AdapterBase {
        AdapterBase::new(ApiVersion::V0_0_43, "job", &CAPS, transport)
    }

    #[test]
    fn test_paths() {
        let b = base(None);
        assert_eq!(b.slurm_path("jobs"), "/slurm/v0.0.43/jobs");
        assert_eq!(b.slurmdb_path("/qos/normal"), "/slurmdb/v0.0.43/qos/normal");
        assert_eq!(b.slurm_entity_path("job", 42), "/slurm/v0.0.43/job/42");
    }

    #[test]
    fn test_entity_path_keeps_id_in_one_segment() {
        let b = base(None);
        assert_eq!(
            b.slurmdb_entity_path("account", "x/../../v0.0.43/qos/normal"),
            "/slurmdb/v0.0.43/account/x%2F..%2F..%2Fv0.0.43%2Fqos%2Fnormal"
        );
        assert_eq!(
            b.slurmdb_entity_path("user", "alice#evil"),
            "/slurmdb/v0.0.43/user/alice%23evil"
        );
        assert_eq!(
            b.slurm_entity_path("node", "gpu 01?state=x"),
            "/slurm/v0.0.43/node/gpu%2001%3Fstate%3Dx"
        );
    }

    #[test]
    fn test_check_segment_rejects_dot_segments() {
        let b = base(None);
        for bad in [".", "..", " .. "] {
            let err = b.check_segment("GetUser", "name", bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        }
        assert!(b.check_segment("GetUser", "name", "a.b").is_ok());
        assert!(b.check_segment("GetUser", "name", "...").is_ok());
    }

    #[test]
    fn test_begin_order() {
        let ctx = RequestContext::new();
        ctx.cancel();
        let err = base(None).begin(&ctx, "ListJobs", None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);

        let err = base(None)
            .begin(&RequestContext::new(), "ListJobs", None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ClientNotInitialized);

        let mock: Arc<dyn Transport> = Arc::new(MockTransport::new());
        let err = base(Some(mock))
            .begin(
                &RequestContext::new(),
                "NotifyJob",
                Some(Capability::Job(JobAction::Notify)),
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
        assert!(err.to_string().contains("v0.0.43"));
        assert!(err.to_string().contains("job comment"));
    }

    #[test]
    fn test_refuse_keeps_precondition_order() {
        let err = base(None)
            .refuse::<()>(
                &RequestContext::new(),
                "NotifyJob",
                Capability::Job(JobAction::Notify),
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ClientNotInitialized);

        let mock: Arc<dyn Transport> = Arc::new(MockTransport::new());
        let err = base(Some(mock))
            .refuse::<()>(
                &RequestContext::new(),
                "NotifyJob",
                Capability::Job(JobAction::Notify),
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
    }

    #[tokio::test]
    async fn test_fetch_decodes() {
        let mock = Arc::new(
            MockTransport::new().on(Method::Get, "/slurm/v0.0.43/ping", 200, json!({"pings": [{}]})),
        );
        let b = base(Some(mock.clone()));
        let pong: Pong = b
            .fetch(
                &RequestContext::new(),
                "Ping",
                ApiRequest::get(b.slurm_path("ping")),
            )
            .await
            .unwrap();
        assert_eq!(pong.pings.len(), 1);
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_send_normalizes_errors() {
        let mock = Arc::new(MockTransport::new().on(
            Method::Get,
            "/slurm/v0.0.43/job/9",
            500,
            json!({"errors": [{"error_number": 2017, "error": "Invalid job id specified"}]}),
        ));
        let b = base(Some(mock));
        let err = b
            .send(
                &RequestContext::new(),
                "GetJob",
                ApiRequest::get(b.slurm_path("job/9")),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceNotFound);
        assert_eq!(err.version(), Some("v0.0.43"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_cancelled_mid_call() {
        let mock = Arc::new(
            MockTransport::new()
                .on(Method::Get, "/slurm/v0.0.43/jobs", 200, json!({"jobs": []}))
                .with_delay(Duration::from_secs(30)),
        );
        let b = base(Some(mock));
        let ctx = RequestContext::with_timeout(Duration::from_secs(1));
        let err = b
            .send(&ctx, "ListJobs", ApiRequest::get(b.slurm_path("jobs")))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cancelled);
    }

    #[derive(Debug, Deserialize)]
    struct WireJob {
        job_id: Option<u32>,
    }

    fn job_id(w: &WireJob) -> std::result::Result<u32, ConversionError> {
        w.job_id.ok_or(ConversionError::MissingIdentity {
            entity: "job",
            field: "job_id",
        })
    }

    #[tokio::test]
    async fn test_fetch_records_skips_bad_entries() {
        let mock = MockTransport::new()
            .on(
                Method::Get,
                "/slurm/v0.0.43/jobs",
                200,
                json!({"jobs": [{"job_id": 1}, {"job_id": "x"}, {}, {"job_id": 4}]}),
            )
            .shared();
        let b = base(Some(mock));
        let ids = b
            .fetch_records(
                &RequestContext::new(),
                "ListJobs",
                ApiRequest::get(b.slurm_path("jobs")),
                "jobs",
                job_id,
            )
            .await
            .unwrap();
        assert_eq!(ids, vec![1, 4]);
    }

    #[tokio::test]
    async fn test_fetch_record_empty_is_not_found() {
        let mock = MockTransport::new()
            .on(Method::Get, "/slurm/v0.0.43/job/7", 200, json!({"jobs": []}))
            .shared();
        let b = base(Some(mock));
        let err = b
            .fetch_record(
                &RequestContext::new(),
                "GetJob",
                ApiRequest::get(b.slurm_path("job/7")),
                "jobs",
                7,
                job_id,
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("'7'"));
    }

    #[tokio::test]
    async fn test_fetch_record_conversion_failure_is_fatal() {
        let mock = MockTransport::new()
            .on(Method::Get, "/slurm/v0.0.43/job/7", 200, json!({"jobs": [{}]}))
            .shared();
        let b = base(Some(mock));
        let err = b
            .fetch_record(
                &RequestContext::new(),
                "GetJob",
                ApiRequest::get(b.slurm_path("job/7")),
                "jobs",
                7,
                job_id,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn test_warnings() {
        let body = json!({"warnings": [{"description": "job is pending"}, {"description": ""}]});
        assert_eq!(warnings(&body), vec!["job is pending"]);
        assert!(warnings(&json!({})).is_empty());
    }

    #[test]
    fn test_decode_empty_body() {
        let v: Value = base(None).decode("DeleteJob", b"").unwrap();
        assert_eq!(v, json!({}));
        let err = base(None).decode::<Pong>("Ping", b"[1,2]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unknown);
    }
}
