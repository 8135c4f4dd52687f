//! Associations against `/slurmdb/v0.0.42/association*`, addressed by the
//! account/user/cluster/partition key rather than a path segment.

use super::base;
use crate::convert::{AssociationConverter, association_create, association_update, key_query};
use crate::wire::AssocRec;
use async_trait::async_trait;
use serde_json::json;
use slurmrest_core::{
    AdapterBase, ApiRequest, AssociationManager, Capability, Converter, RequestContext, Resource,
    Result, Transport, WriteOp,
};
use slurmrest_parsers::join_csv;
use slurmrest_types::{
    Association, AssociationCreate, AssociationKey, AssociationListOptions, AssociationUpdate,
    CreateResponse, ListFilter, ListResult,
};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AssociationAdapter {
    base: AdapterBase,
}

impl AssociationAdapter {
    pub fn new(transport: Option<Arc<dyn Transport>>) -> Self {
        Self {
            base: base("association", transport),
        }
    }

    fn check_key(&self, operation: &str, key: &AssociationKey) -> Result<()> {
        if key.account.trim().is_empty() {
            return Err(self
                .base
                .invalid(operation, "key.account", "association account is required"));
        }
        Ok(())
    }

    fn keyed(&self, request: ApiRequest, key: &AssociationKey) -> ApiRequest {
        key_query(key)
            .into_iter()
            .fold(request, |req, (k, v)| req.with_query(k, v))
    }

    async fn post_associations(
        &self,
        ctx: &RequestContext,
        operation: &str,
        record: &AssocRec,
    ) -> Result<Vec<String>> {
        let record = self.base.encode(operation, record)?;
        self.base
            .execute(
                ctx,
                operation,
                ApiRequest::post(
                    self.base.slurmdb_path("associations"),
                    json!({ "associations": [record] }),
                ),
            )
            .await
    }
}

#[async_trait]
impl AssociationManager for AssociationAdapter {
    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &AssociationListOptions,
    ) -> Result<ListResult<Association>> {
        let op = "ListAssociations";
        self.base
            .begin(ctx, op, Some(Capability::Resource(Resource::Associations)))?;
        let request = ApiRequest::get(self.base.slurmdb_path("associations"))
            .with_optional_query("account", join_csv(&opts.accounts))
            .with_optional_query("user", join_csv(&opts.users))
            .with_optional_query("cluster", join_csv(&opts.clusters))
            .with_optional_query("partition", join_csv(&opts.partitions));
        let associations = self
            .base
            .fetch_records(ctx, op, request, "associations", |w: &AssocRec| {
                AssociationConverter.to_common(w)
            })
            .await?;
        Ok(opts.apply(associations))
    }

    async fn get(&self, ctx: &RequestContext, key: &AssociationKey) -> Result<Association> {
        let op = "GetAssociation";
        self.base
            .begin(ctx, op, Some(Capability::Resource(Resource::Associations)))?;
        self.check_key(op, key)?;
        let request = self.keyed(ApiRequest::get(self.base.slurmdb_path("association")), key);
        self.base
            .fetch_record(ctx, op, request, "associations", key, |w: &AssocRec| {
                AssociationConverter.to_common(w)
            })
            .await
    }

    async fn create(
        &self,
        ctx: &RequestContext,
        association: &AssociationCreate,
    ) -> Result<CreateResponse> {
        let op = "CreateAssociation";
        self.base.begin(
            ctx,
            op,
            Some(Capability::Write(Resource::Associations, WriteOp::Create)),
        )?;
        self.check_key(op, &association.key)?;
        if association.key.cluster.trim().is_empty() {
            return Err(self
                .base
                .invalid(op, "key.cluster", "association cluster is required"));
        }
        let warnings = self
            .post_associations(ctx, op, &association_create(association))
            .await?;
        Ok(CreateResponse {
            id: association.key.to_string(),
            warnings,
        })
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        key: &AssociationKey,
        update: &AssociationUpdate,
    ) -> Result<()> {
        let op = "UpdateAssociation";
        self.base.begin(
            ctx,
            op,
            Some(Capability::Write(Resource::Associations, WriteOp::Update)),
        )?;
        self.check_key(op, key)?;
        if *update == AssociationUpdate::default() {
            return Err(self.base.invalid(op, "update", "no fields to update"));
        }
        self.post_associations(ctx, op, &association_update(key, update))
            .await?;
        Ok(())
    }

    async fn delete(&self, ctx: &RequestContext, key: &AssociationKey) -> Result<()> {
        let op = "DeleteAssociation";
        self.base.begin(
            ctx,
            op,
            Some(Capability::Write(Resource::Associations, WriteOp::Delete)),
        )?;
        self.check_key(op, key)?;
        let request = self.keyed(
            ApiRequest::delete(self.base.slurmdb_path("association")),
            key,
        );
        self.base.execute(ctx, op, request).await?;
        Ok(())
    }
}
