//! Partitions against `/slurm/v0.0.43/partition*`. Writes are refused by
//! the capability table.

use super::base;
use crate::convert::PartitionConverter;
use crate::wire::PartitionInfo;
use async_trait::async_trait;
use slurmrest_core::{
    AdapterBase, ApiRequest, Capability, Converter, PartitionManager, RequestContext, Resource,
    Result, Transport, WriteOp,
};
use slurmrest_types::{
    CreateResponse, ListFilter, ListResult, Partition, PartitionCreate, PartitionListOptions,
    PartitionUpdate,
};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct PartitionAdapter {
    base: AdapterBase,
}

impl PartitionAdapter {
    pub fn new(transport: Option<Arc<dyn Transport>>) -> Self {
        Self {
            base: base("partition", transport),
        }
    }

    fn refuse_write<T>(&self, ctx: &RequestContext, operation: &str, op: WriteOp) -> Result<T> {
        self.base
            .refuse(ctx, operation, Capability::Write(Resource::Partitions, op))
    }
}

#[async_trait]
impl PartitionManager for PartitionAdapter {
    async fn list(
        &self,
        ctx: &RequestContext,
        opts: &PartitionListOptions,
    ) -> Result<ListResult<Partition>> {
        let op = "ListPartitions";
        self.base
            .begin(ctx, op, Some(Capability::Resource(Resource::Partitions)))?;
        let partitions = self
            .base
            .fetch_records(
                ctx,
                op,
                ApiRequest::get(self.base.slurm_path("partitions")),
                "partitions",
                |w: &PartitionInfo| PartitionConverter.to_common(w),
            )
            .await?;
        Ok(opts.apply(partitions))
    }

    async fn get(&self, ctx: &RequestContext, name: &str) -> Result<Partition> {
        let op = "GetPartition";
        self.base
            .begin(ctx, op, Some(Capability::Resource(Resource::Partitions)))?;
        if name.trim().is_empty() {
            return Err(self.base.invalid(op, "name", "partition name is required"));
        }
        self.base.check_segment(op, "name", name)?;
        self.base
            .fetch_record(
                ctx,
                op,
                ApiRequest::get(self.base.slurm_entity_path("partition", name)),
                "partitions",
                name,
                |w: &PartitionInfo| PartitionConverter.to_common(w),
            )
            .await
    }

    async fn create(
        &self,
        ctx: &RequestContext,
        _partition: &PartitionCreate,
    ) -> Result<CreateResponse> {
        self.refuse_write(ctx, "CreatePartition", WriteOp::Create)
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        _name: &str,
        _update: &PartitionUpdate,
    ) -> Result<()> {
        self.refuse_write(ctx, "UpdatePartition", WriteOp::Update)
    }

    async fn delete(&self, ctx: &RequestContext, _name: &str) -> Result<()> {
        self.refuse_write(ctx, "DeletePartition", WriteOp::Delete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use slurmrest_core::mock::MockTransport;
    use slurmrest_core::{ErrorKind, Method};

    #[tokio::test]
    async fn test_list() {
        let mock = MockTransport::new()
            .on(
                Method::Get,
                "/slurm/v0.0.43/partitions",
                200,
                json!({"partitions": [
                    {"name": "compute", "partition": {"state": ["UP"]}},
                    {"name": "debug", "partition": {"state": ["DOWN"]}}
                ]}),
            )
            .shared();
        let result = PartitionAdapter::new(Some(mock))
            .list(
                &RequestContext::new(),
                &PartitionListOptions {
                    names: vec!["debug".to_string()],
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].name, "debug");
    }

    #[tokio::test]
    async fn test_writes_unsupported_with_alternative() {
        let mock = MockTransport::new().shared();
        let adapter = PartitionAdapter::new(Some(mock.clone()));
        let err = adapter
            .create(&RequestContext::new(), &PartitionCreate::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
        assert!(err.to_string().contains("slurm.conf"));
        let err = adapter
            .delete(&RequestContext::new(), "debug")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
        assert_eq!(mock.request_count(), 0);
    }
}
