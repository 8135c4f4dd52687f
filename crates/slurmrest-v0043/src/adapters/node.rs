//! Nodes against `/slurm/v0.0.43/node*`.

use super::base;
use crate::convert::{NodeConverter, node_update};
use crate::wire::NodeInfo;
use async_trait::async_trait;
use slurmrest_core::{
    AdapterBase, ApiRequest, Capability, Converter, NodeAction, NodeManager, RequestContext,
    Resource, Result, Transport,
};
use slurmrest_types::{ListFilter, ListResult, Node, NodeListOptions, NodeUpdate};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct NodeAdapter {
    base: AdapterBase,
}

impl NodeAdapter {
    pub fn new(transport: Option<Arc<dyn Transport>>) -> Self {
        Self {
            base: base("node", transport),
        }
    }

    fn check_name(&self, operation: &str, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(self.base.invalid(operation, "name", "node name is required"));
        }
        self.base.check_segment(operation, "name", name)
    }

    fn node_path(&self, name: &str) -> String {
        self.base.slurm_entity_path("node", name)
    }

    async fn post_update(
        &self,
        ctx: &RequestContext,
        operation: &str,
        name: &str,
        update: &NodeUpdate,
    ) -> Result<()> {
        let body = self.base.encode(operation, &node_update(update))?;
        self.base
            .execute(ctx, operation, ApiRequest::post(self.node_path(name), body))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl NodeManager for NodeAdapter {
    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &NodeListOptions,
    ) -> Result<ListResult<Node>> {
        let op = "ListNodes";
        self.base
            .begin(ctx, op, Some(Capability::Resource(Resource::Nodes)))?;
        let nodes = self
            .base
            .fetch_records(
                ctx,
                op,
                ApiRequest::get(self.base.slurm_path("nodes")),
                "nodes",
                |w: &NodeInfo| NodeConverter.to_common(w),
            )
            .await?;
        Ok(opts.apply(nodes))
    }

    async fn get(&self, ctx: &RequestContext, name: &str) -> Result<Node> {
        let op = "GetNode";
        self.base
            .begin(ctx, op, Some(Capability::Resource(Resource::Nodes)))?;
        self.check_name(op, name)?;
        self.base
            .fetch_record(
                ctx,
                op,
                ApiRequest::get(self.node_path(name)),
                "nodes",
                name,
                |w: &NodeInfo| NodeConverter.to_common(w),
            )
            .await
    }

    async fn update(&self, ctx: &RequestContext, name: &str, update: &NodeUpdate) -> Result<()> {
        let op = "UpdateNode";
        self.base
            .begin(ctx, op, Some(Capability::Node(NodeAction::Update)))?;
        self.check_name(op, name)?;
        if update.is_empty() {
            return Err(self.base.invalid(op, "update", "no fields to update"));
        }
        self.post_update(ctx, op, name, update).await
    }

    async fn delete(&self, ctx: &RequestContext, name: &str) -> Result<()> {
        let op = "DeleteNode";
        self.base
            .begin(ctx, op, Some(Capability::Node(NodeAction::Delete)))?;
        self.check_name(op, name)?;
        self.base
            .execute(ctx, op, ApiRequest::delete(self.node_path(name)))
            .await?;
        Ok(())
    }

    async fn drain(&self, ctx: &RequestContext, name: &str, reason: &str) -> Result<()> {
        let op = "DrainNode";
        self.base
            .begin(ctx, op, Some(Capability::Node(NodeAction::Drain)))?;
        self.check_name(op, name)?;
        if reason.trim().is_empty() {
            return Err(self.base.invalid(op, "reason", "a drain reason is required"));
        }
        self.post_update(ctx, op, name, &NodeUpdate::drain(reason)).await
    }

    async fn resume(&self, ctx: &RequestContext, name: &str) -> Result<()> {
        let op = "ResumeNode";
        self.base
            .begin(ctx, op, Some(Capability::Node(NodeAction::Resume)))?;
        self.check_name(op, name)?;
        self.post_update(ctx, op, name, &NodeUpdate::resume()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use slurmrest_core::mock::MockTransport;
    use slurmrest_core::{ErrorKind, Method};
    use slurmrest_types::NodeState;

    #[tokio::test]
    async fn test_list_filters_by_state_and_partition() {
        let mock = MockTransport::new()
            .on(
                Method::Get,
                "/slurm/v0.0.43/nodes",
                200,
                json!({"nodes": [
                    {"name": "cn01", "state": ["IDLE"], "partitions": ["compute"]},
                    {"name": "cn02", "state": ["MIXED"], "partitions": ["compute"]},
                    {"name": "gpu01", "state": ["IDLE"], "partitions": ["gpu"]},
                    {"state": ["IDLE"]}
                ]}),
            )
            .shared();
        let opts = NodeListOptions {
            states: vec![NodeState::Idle],
            partitions: vec!["compute".to_string()],
            ..Default::default()
        };
        let nodes = NodeAdapter::new(Some(mock))
            .list(&RequestContext::new(), &opts)
            .await
            .unwrap();
        assert_eq!(nodes.total, 1);
        assert_eq!(nodes.items[0].name, "cn01");
    }

    #[tokio::test]
    async fn test_get_empty_response_is_not_found() {
        let mock = MockTransport::new()
            .on(Method::Get, "/slurm/v0.0.43/node/cn99", 200, json!({"nodes": []}))
            .shared();
        let err = NodeAdapter::new(Some(mock))
            .get(&RequestContext::new(), "cn99")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceNotFound);
        assert!(err.to_string().contains("cn99"));
    }

    #[tokio::test]
    async fn test_drain_posts_state_and_reason() {
        let mock = MockTransport::new()
            .on(Method::Post, "/slurm/v0.0.43/node/cn01", 200, json!({}))
            .shared();
        NodeAdapter::new(Some(mock.clone()))
            .drain(&RequestContext::new(), "cn01", "bad dimm")
            .await
            .unwrap();
        assert_eq!(
            mock.last_request().unwrap().body,
            Some(json!({"state": ["DRAIN"], "reason": "bad dimm"}))
        );
    }

    #[tokio::test]
    async fn test_drain_requires_reason() {
        let mock = MockTransport::new().shared();
        let err = NodeAdapter::new(Some(mock.clone()))
            .drain(&RequestContext::new(), "cn01", "")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert_eq!(mock.request_count(), 0);
    }
}
