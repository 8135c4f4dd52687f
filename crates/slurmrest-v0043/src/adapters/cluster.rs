//! Clusters against `/slurmdb/v0.0.43/cluster*`. Updates are refused.

use super::base;
use crate::convert::{ClusterConverter, cluster_create};
use crate::wire::ClusterRec;
use async_trait::async_trait;
use serde_json::json;
use slurmrest_core::{
    AdapterBase, ApiRequest, Capability, ClusterManager, Converter, RequestContext, Resource,
    Result, Transport, WriteOp,
};
use slurmrest_types::{
    Cluster, ClusterCreate, ClusterListOptions, ClusterUpdate, CreateResponse, ListFilter,
    ListResult,
};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ClusterAdapter {
    base: AdapterBase,
}

impl ClusterAdapter {
    pub fn new(transport: Option<Arc<dyn Transport>>) -> Self {
        Self {
            base: base("cluster", transport),
        }
    }

    fn check_name(&self, operation: &str, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(self.base.invalid(operation, "name", "cluster name is required"));
        }
        self.base.check_segment(operation, "name", name)
    }

    fn cluster_path(&self, name: &str) -> String {
        self.base.slurmdb_entity_path("cluster", name)
    }
}

#[async_trait]
impl ClusterManager for ClusterAdapter {
    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &ClusterListOptions,
    ) -> Result<ListResult<Cluster>> {
        let op = "ListClusters";
        self.base
            .begin(ctx, op, Some(Capability::Resource(Resource::Clusters)))?;
        let clusters = self
            .base
            .fetch_records(
                ctx,
                op,
                ApiRequest::get(self.base.slurmdb_path("clusters")),
                "clusters",
                |w: &ClusterRec| ClusterConverter.to_common(w),
            )
            .await?;
        Ok(opts.apply(clusters))
    }

    async fn get(&self, ctx: &RequestContext, name: &str) -> Result<Cluster> {
        let op = "GetCluster";
        self.base
            .begin(ctx, op, Some(Capability::Resource(Resource::Clusters)))?;
        self.check_name(op, name)?;
        self.base
            .fetch_record(
                ctx,
                op,
                ApiRequest::get(self.cluster_path(name)),
                "clusters",
                name,
                |w: &ClusterRec| ClusterConverter.to_common(w),
            )
            .await
    }

    async fn create(
        &self,
        ctx: &RequestContext,
        cluster: &ClusterCreate,
    ) -> Result<CreateResponse> {
        let op = "CreateCluster";
        self.base.begin(
            ctx,
            op,
            Some(Capability::Write(Resource::Clusters, WriteOp::Create)),
        )?;
        self.check_name(op, &cluster.name)?;
        let record = self.base.encode(op, &cluster_create(cluster))?;
        let warnings = self
            .base
            .execute(
                ctx,
                op,
                ApiRequest::post(
                    self.base.slurmdb_path("clusters"),
                    json!({ "clusters": [record] }),
                ),
            )
            .await?;
        Ok(CreateResponse {
            id: cluster.name.clone(),
            warnings,
        })
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        _name: &str,
        _update: &ClusterUpdate,
    ) -> Result<()> {
        self.base.refuse(
            ctx,
            "UpdateCluster",
            Capability::Write(Resource::Clusters, WriteOp::Update),
        )
    }

    async fn delete(&self, ctx: &RequestContext, name: &str) -> Result<()> {
        let op = "DeleteCluster";
        self.base.begin(
            ctx,
            op,
            Some(Capability::Write(Resource::Clusters, WriteOp::Delete)),
        )?;
        self.check_name(op, name)?;
        self.base
            .execute(ctx, op, ApiRequest::delete(self.cluster_path(name)))
            .await?;
        Ok(())
    }
}
