//! WCKeys against `/slurmdb/v0.0.40/wckey*`. Updates are refused.

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
