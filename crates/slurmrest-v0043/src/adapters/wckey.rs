//! WCKeys against `/slurmdb/v0.0.43/wckey*`. Updates are refused.

use super::base;
use crate::convert::{WcKeyConverter, wckey_create};
use crate::wire::WcKeyRec;
use async_trait::async_trait;
use serde_json::json;
use slurmrest_core::{
    AdapterBase, ApiRequest, Capability, Converter, RequestContext, Resource, Result, Transport,
    WcKeyManager, WriteOp,
};
use slurmrest_types::{
    CreateResponse, ListFilter, ListResult, WcKey, WcKeyCreate, WcKeyListOptions, WcKeyUpdate,
};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct WcKeyAdapter {
    base: AdapterBase,
}

impl WcKeyAdapter {
    pub fn new(transport: Option<Arc<dyn Transport>>) -> Self {
        Self {
            base: base("wckey", transport),
        }
    }

    fn check_id(&self, operation: &str, id: &str) -> Result<()> {
        if id.trim().is_empty() {
            return Err(self.base.invalid(operation, "id", "wckey id is required"));
        }
        self.base.check_segment(operation, "id", id)
    }

    fn wckey_path(&self, id: &str) -> String {
        self.base.slurmdb_entity_path("wckey", id)
    }
}

#[async_trait]
impl WcKeyManager for WcKeyAdapter {
    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &WcKeyListOptions,
    ) -> Result<ListResult<WcKey>> {
        let op = "ListWCKeys";
        self.base
            .begin(ctx, op, Some(Capability::Resource(Resource::WcKeys)))?;
        let wckeys = self
            .base
            .fetch_records(
                ctx,
                op,
                ApiRequest::get(self.base.slurmdb_path("wckeys")),
                "wckeys",
                |w: &WcKeyRec| WcKeyConverter.to_common(w),
            )
            .await?;
        Ok(opts.apply(wckeys))
    }

    async fn get(&self, ctx: &RequestContext, id: &str) -> Result<WcKey> {
        let op = "GetWCKey";
        self.base
            .begin(ctx, op, Some(Capability::Resource(Resource::WcKeys)))?;
        self.check_id(op, id)?;
        self.base
            .fetch_record(
                ctx,
                op,
                ApiRequest::get(self.wckey_path(id)),
                "wckeys",
                id,
                |w: &WcKeyRec| WcKeyConverter.to_common(w),
            )
            .await
    }

    async fn create(&self, ctx: &RequestContext, wckey: &WcKeyCreate) -> Result<CreateResponse> {
        let op = "CreateWCKey";
        self.base.begin(
            ctx,
            op,
            Some(Capability::Write(Resource::WcKeys, WriteOp::Create)),
        )?;
        for (field, value) in [
            ("name", &wckey.name),
            ("user", &wckey.user),
            ("cluster", &wckey.cluster),
        ] {
            if value.trim().is_empty() {
                return Err(self
                    .base
                    .invalid(op, field, format!("wckey {} is required", field)));
            }
        }
        let record = self.base.encode(op, &wckey_create(wckey))?;
        let warnings = self
            .base
            .execute(
                ctx,
                op,
                ApiRequest::post(
                    self.base.slurmdb_path("wckeys"),
                    json!({ "wckeys": [record] }),
                ),
            )
            .await?;
        Ok(CreateResponse {
            id: wckey.name.clone(),
            warnings,
        })
    }

    async fn update(&self, ctx: &RequestContext, _id: &str, _update: &WcKeyUpdate) -> Result<()> {
        self.base.refuse(
            ctx,
            "UpdateWCKey",
            Capability::Write(Resource::WcKeys, WriteOp::Update),
        )
    }

    async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<()> {
        let op = "DeleteWCKey";
        self.base.begin(
            ctx,
            op,
            Some(Capability::Write(Resource::WcKeys, WriteOp::Delete)),
        )?;
        self.check_id(op, id)?;
        self.base
            .execute(ctx, op, ApiRequest::delete(self.wckey_path(id)))
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
    async fn test_list_by_user() {
        let mock = MockTransport::new()
            .on(
                Method::Get,
                "/slurmdb/v0.0.43/wckeys",
                200,
                json!({"wckeys": [
                    {"id": 1, "name": "proj-a", "user": "alice", "cluster": "hpc"},
                    {"id": 2, "name": "proj-b", "user": "bob", "cluster": "hpc"}
                ]}),
            )
            .shared();
        let result = WcKeyAdapter::new(Some(mock))
            .list(
                &RequestContext::new(),
                &WcKeyListOptions {
                    users: vec!["bob".to_string()],
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].id, 2);
    }

    #[tokio::test]
    async fn test_create_requires_user() {
        let mock = MockTransport::new().shared();
        let err = WcKeyAdapter::new(Some(mock.clone()))
            .create(
                &RequestContext::new(),
                &WcKeyCreate {
                    name: "proj-a".to_string(),
                    cluster: "hpc".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert!(err.to_string().contains("user"));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_update_refused() {
        let mock = MockTransport::new().shared();
        let err = WcKeyAdapter::new(Some(mock.clone()))
            .update(
                &RequestContext::new(),
                "proj-a",
                &WcKeyUpdate {
                    name: Some("proj-b".to_string()),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
        assert_eq!(mock.request_count(), 0);
    }
}
