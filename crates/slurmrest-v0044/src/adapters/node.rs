//! Nodes against `/slurm/v0.0.44/node*`. Only drain and resume write.

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

    async fn update(&self, ctx: &RequestContext, _name: &str, _update: &NodeUpdate) -> Result<()> {
        self.base
            .refuse(ctx, "UpdateNode", Capability::Node(NodeAction::Update))
    }

    async fn delete(&self, ctx: &RequestContext, _name: &str) -> Result<()> {
        self.base
            .refuse(ctx, "DeleteNode", Capability::Node(NodeAction::Delete))
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
