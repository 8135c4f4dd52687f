//! Clusters against `/slurmdb/v0.0.40/cluster*`. Updates are refused.

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
                "/slurmdb/v0.0.40/cluster/hpc",
                200,
                json!({"clusters": [{
                    "name": "hpc",
                    "controller": {"host": "ctl1", "port": 6817},
                    "tres": [{"type": "cpu", "count": 512}]
                }]}),
            )
            .shared();
        let cluster = ClusterAdapter::new(Some(mock))
            .get(&RequestContext::new(), "hpc")
            .await
            .unwrap();
        assert_eq!(cluster.controller_port, 6817);
        assert_eq!(cluster.tres[0].count, 512);
    }

    #[tokio::test]
    async fn test_create() {
        let mock = MockTransport::new()
            .on(Method::Post, "/slurmdb/v0.0.40/clusters", 200, json!({}))
            .shared();
        ClusterAdapter::new(Some(mock.clone()))
            .create(
                &RequestContext::new(),
                &ClusterCreate {
                    name: "lab".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let body = mock.last_request().unwrap().body.unwrap();
        assert_eq!(body, json!({"clusters": [{"name": "lab"}]}));
    }

    #[tokio::test]
    async fn test_update_refused_without_request() {
        let mock = MockTransport::new().shared();
        let err = ClusterAdapter::new(Some(mock.clone()))
            .update(
                &RequestContext::new(),
                "lab",
                &ClusterUpdate {
                    controller_port: Some(6817),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
        assert!(err.to_string().contains("UpdateCluster"));
        assert!(err.to_string().contains("delete and recreate"));
        assert_eq!(mock.request_count(), 0);
    }
}
