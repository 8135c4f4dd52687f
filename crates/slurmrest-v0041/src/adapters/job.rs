//! Jobs against `/slurm/v0.0.41/job*`. List options are applied client-side
//! and the batch script travels beside the job description on submit.

use super::base;
use crate::convert::{JobConverter, submit_request, submit_response, update_request};
use crate::wire::{JobInfo, JobSubmitResp};
use async_trait::async_trait;
use serde_json::json;
use slurmrest_core::{
    AdapterBase, ApiRequest, Capability, Converter, Error, JobAction, JobManager,
    RequestContext, Resource, Result, Transport, warnings,
};
use slurmrest_types::{
    Job, JobAllocateResponse, JobAllocation, JobListOptions, JobSubmission, JobSubmitResponse,
    JobUpdate, ListFilter, ListResult,
};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct JobAdapter {
    base: AdapterBase,
}

impl JobAdapter {
    pub fn new(transport: Option<Arc<dyn Transport>>) -> Self {
        Self {
            base: base("job", transport),
        }
    }

    fn check_id(&self, operation: &str, job_id: u32) -> Result<()> {
        if job_id == 0 {
            return Err(self.base.invalid(operation, "job_id", "job id must be positive"));
        }
        Ok(())
    }

    fn job_path(&self, job_id: u32) -> String {
        self.base.slurm_entity_path("job", job_id)
    }

    async fn post_job(
        &self,
        ctx: &RequestContext,
        operation: &str,
        job_id: u32,
        body: serde_json::Value,
    ) -> Result<()> {
        let request = ApiRequest::post(self.job_path(job_id), body);
        self.base.execute(ctx, operation, request).await?;
        Ok(())
    }
}

#[async_trait]
impl JobManager for JobAdapter {
    async fn list(&self, ctx: &RequestContext, opts: &JobListOptions) -> Result<ListResult<Job>> {
        let op = "ListJobs";
        self.base
            .begin(ctx, op, Some(Capability::Resource(Resource::Jobs)))?;
        let jobs = self
            .base
            .fetch_records(
                ctx,
                op,
                ApiRequest::get(self.base.slurm_path("jobs")),
                "jobs",
                |w: &JobInfo| JobConverter.to_common(w),
            )
            .await?;
        Ok(opts.apply(jobs))
    }

    async fn get(&self, ctx: &RequestContext, job_id: u32) -> Result<Job> {
        let op = "GetJob";
        self.base
            .begin(ctx, op, Some(Capability::Resource(Resource::Jobs)))?;
        self.check_id(op, job_id)?;
        self.base
            .fetch_record(
                ctx,
                op,
                ApiRequest::get(self.job_path(job_id)),
                "jobs",
                job_id,
                |w: &JobInfo| JobConverter.to_common(w),
            )
            .await
    }

    async fn submit(
        &self,
        ctx: &RequestContext,
        job: &JobSubmission,
    ) -> Result<JobSubmitResponse> {
        let op = "SubmitJob";
        self.base
            .begin(ctx, op, Some(Capability::Job(JobAction::Submit)))?;
        if job.script.trim().is_empty() {
            return Err(self.base.invalid(op, "script", "job script is required"));
        }
        let body = self.base.encode(op, &submit_request(job))?;
        let raw = self
            .base
            .send(ctx, op, ApiRequest::post(self.base.slurm_path("job/submit"), body))
            .await?;
        let value: serde_json::Value = self.base.decode(op, &raw)?;
        let resp: JobSubmitResp = self.base.decode(op, &raw)?;
        let out = submit_response(&resp, warnings(&value));
        if out.job_id == 0 {
            return Err(Error::Decode {
                operation: op.to_string(),
                version: self.base.version().to_string(),
                message: "submit response carried no job id".to_string(),
            });
        }
        debug!("Submitted job {}", out.job_id);
        Ok(out)
    }

    async fn update(&self, ctx: &RequestContext, job_id: u32, update: &JobUpdate) -> Result<()> {
        let op = "UpdateJob";
        self.base
            .begin(ctx, op, Some(Capability::Job(JobAction::Update)))?;
        self.check_id(op, job_id)?;
        if update.is_empty() {
            return Err(self.base.invalid(op, "update", "no fields to update"));
        }
        let body = self.base.encode(op, &update_request(update))?;
        self.post_job(ctx, op, job_id, body).await
    }

    async fn cancel(&self, ctx: &RequestContext, job_id: u32) -> Result<()> {
        let op = "CancelJob";
        self.base
            .begin(ctx, op, Some(Capability::Job(JobAction::Cancel)))?;
        self.check_id(op, job_id)?;
        self.base
            .execute(ctx, op, ApiRequest::delete(self.job_path(job_id)))
            .await?;
        Ok(())
    }

    async fn hold(&self, ctx: &RequestContext, job_id: u32) -> Result<()> {
        let op = "HoldJob";
        self.base
            .begin(ctx, op, Some(Capability::Job(JobAction::Hold)))?;
        self.check_id(op, job_id)?;
        self.post_job(ctx, op, job_id, json!({"hold": true})).await
    }

    async fn release(&self, ctx: &RequestContext, job_id: u32) -> Result<()> {
        let op = "ReleaseJob";
        self.base
            .begin(ctx, op, Some(Capability::Job(JobAction::Release)))?;
        self.check_id(op, job_id)?;
        self.post_job(ctx, op, job_id, json!({"hold": false})).await
    }

    async fn signal(&self, ctx: &RequestContext, _job_id: u32, _signal: &str) -> Result<()> {
        self.base
            .refuse(ctx, "SignalJob", Capability::Job(JobAction::Signal))
    }

    async fn notify(&self, ctx: &RequestContext, _job_id: u32, _message: &str) -> Result<()> {
        self.base
            .refuse(ctx, "NotifyJob", Capability::Job(JobAction::Notify))
    }

    async fn requeue(&self, ctx: &RequestContext, _job_id: u32) -> Result<()> {
        self.base
            .refuse(ctx, "RequeueJob", Capability::Job(JobAction::Requeue))
    }

    async fn allocate(
        &self,
        ctx: &RequestContext,
        _request: &JobAllocation,
    ) -> Result<JobAllocateResponse> {
        self.base
            .refuse(ctx, "AllocateJob", Capability::Job(JobAction::Allocate))
    }
}
