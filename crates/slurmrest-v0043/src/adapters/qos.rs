//! QoS against `/slurmdb/v0.0.43/qos*`.

use super::base;
use crate::convert::{QosConverter, qos_create, qos_update};
use crate::wire::QosRec;
use async_trait::async_trait;
use serde_json::json;
use slurmrest_core::{
    AdapterBase, ApiRequest, Capability, Converter, QosManager, RequestContext, Resource, Result,
    Transport, WriteOp,
};
use slurmrest_types::{
    CreateResponse, ListFilter, ListResult, Qos, QosCreate, QosLimits, QosListOptions, QosUpdate,
    parse_tres,
};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct QosAdapter {
    base: AdapterBase,
}

impl QosAdapter {
    pub fn new(transport: Option<Arc<dyn Transport>>) -> Self {
        Self {
            base: base("qos", transport),
        }
    }

    fn check_name(&self, operation: &str, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(self.base.invalid(operation, "name", "qos name is required"));
        }
        self.base.check_segment(operation, "name", name)
    }

    fn check_limits(&self, operation: &str, limits: Option<&QosLimits>) -> Result<()> {
        let Some(limits) = limits else {
            return Ok(());
        };
        for (field, value) in [
            ("limits.max_tres_per_job", &limits.max_tres_per_job),
            ("limits.max_tres_per_user", &limits.max_tres_per_user),
            ("limits.max_tres_per_node", &limits.max_tres_per_node),
        ] {
            if let Err(e) = parse_tres(value) {
                return Err(self.base.invalid(operation, field, e.to_string()));
            }
        }
        Ok(())
    }

    fn qos_path(&self, name: &str) -> String {
        self.base.slurmdb_entity_path("qos", name)
    }

    async fn post_qos(
        &self,
        ctx: &RequestContext,
        operation: &str,
        record: &QosRec,
    ) -> Result<Vec<String>> {
        let record = self.base.encode(operation, record)?;
        self.base
            .execute(
                ctx,
                operation,
                ApiRequest::post(self.base.slurmdb_path("qos"), json!({ "qos": [record] })),
            )
            .await
    }
}

#[async_trait]
impl QosManager for QosAdapter {
    async fn list(&self, ctx: &RequestContext, opts: &QosListOptions) -> Result<ListResult<Qos>> {
        let op = "ListQos";
        self.base
            .begin(ctx, op, Some(Capability::Resource(Resource::Qos)))?;
        let mut request = ApiRequest::get(self.base.slurmdb_path("qos"));
        if opts.with_deleted {
            request = request.with_query("with_deleted", "true");
        }
        let qos = self
            .base
            .fetch_records(ctx, op, request, "qos", |w: &QosRec| {
                QosConverter.to_common(w)
            })
            .await?;
        Ok(opts.apply(qos))
    }

    async fn get(&self, ctx: &RequestContext, name: &str) -> Result<Qos> {
        let op = "GetQos";
        self.base
            .begin(ctx, op, Some(Capability::Resource(Resource::Qos)))?;
        self.check_name(op, name)?;
        self.base
            .fetch_record(
                ctx,
                op,
                ApiRequest::get(self.qos_path(name)),
                "qos",
                name,
                |w: &QosRec| QosConverter.to_common(w),
            )
            .await
    }

    async fn create(&self, ctx: &RequestContext, qos: &QosCreate) -> Result<CreateResponse> {
        let op = "CreateQos";
        self.base
            .begin(ctx, op, Some(Capability::Write(Resource::Qos, WriteOp::Create)))?;
        self.check_name(op, &qos.name)?;
        self.check_limits(op, qos.limits.as_ref())?;
        let warnings = self.post_qos(ctx, op, &qos_create(qos)).await?;
        Ok(CreateResponse {
            id: qos.name.clone(),
            warnings,
        })
    }

    async fn update(&self, ctx: &RequestContext, name: &str, update: &QosUpdate) -> Result<()> {
        let op = "UpdateQos";
        self.base
            .begin(ctx, op, Some(Capability::Write(Resource::Qos, WriteOp::Update)))?;
        self.check_name(op, name)?;
        if *update == QosUpdate::default() {
            return Err(self.base.invalid(op, "update", "no fields to update"));
        }
        self.check_limits(op, update.limits.as_ref())?;
        self.post_qos(ctx, op, &qos_update(name, update)).await?;
        Ok(())
    }

    async fn delete(&self, ctx: &RequestContext, name: &str) -> Result<()> {
        let op = "DeleteQos";
        self.base
            .begin(ctx, op, Some(Capability::Write(Resource::Qos, WriteOp::Delete)))?;
        self.check_name(op, name)?;
        self.base
            .execute(ctx, op, ApiRequest::delete(self.qos_path(name)))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slurmrest_core::mock::MockTransport;
    use slurmrest_core::{ErrorKind, Method};

    #[tokio::test]
    async fn test_get() {
        let mock = MockTransport::new()
            .on(
                Method::Get,
                "/slurmdb/v0.0.43/qos/normal",
                200,
                json!({"qos": [{"name": "normal", "id": 1,
                    "priority": {"set": true, "infinite": false, "number": 10}}]}),
            )
            .shared();
        let qos = QosAdapter::new(Some(mock))
            .get(&RequestContext::new(), "normal")
            .await
            .unwrap();
        assert_eq!(qos.id, 1);
        assert_eq!(qos.priority, 10);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_tres_limit() {
        let mock = MockTransport::new().shared();
        let err = QosAdapter::new(Some(mock.clone()))
            .create(
                &RequestContext::new(),
                &QosCreate {
                    name: "gpu".to_string(),
                    limits: Some(QosLimits {
                        max_tres_per_job: "cpu=lots".to_string(),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_rejects_oversized_memory_limit() {
        let mock = MockTransport::new().shared();
        let err = QosAdapter::new(Some(mock.clone()))
            .create(
                &RequestContext::new(),
                &QosCreate {
                    name: "bigmem".to_string(),
                    limits: Some(QosLimits {
                        max_tres_per_job: "mem=99999999999999T".to_string(),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert!(err.to_string().contains("max_tres_per_job"));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_posts_qos_array() {
        let mock = MockTransport::new()
            .on(Method::Post, "/slurmdb/v0.0.43/qos", 200, json!({}))
            .shared();
        QosAdapter::new(Some(mock.clone()))
            .create(
                &RequestContext::new(),
                &QosCreate {
                    name: "gpu".to_string(),
                    description: Some("GPU queue".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let body = mock.last_request().unwrap().body.unwrap();
        assert_eq!(body["qos"][0]["name"], "gpu");
        assert_eq!(body["qos"][0]["description"], "GPU queue");
    }
}
