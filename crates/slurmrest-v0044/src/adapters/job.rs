//! Jobs against `/slurm/v0.0.44/job*`. `GET /jobs` takes no filters here,
//! so every list option is applied client-side.

use super::base;
use crate::convert::{
    JobConverter, allocate_request, allocate_response, submit_request, submit_response,
    update_request,
};
use crate::wire::{JobAllocResp, JobInfo, JobSubmitResp};
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

    async fn notify(&self, ctx: &RequestContext, job_id: u32, message: &str) -> Result<()> {
        let op = "NotifyJob";
        self.base
            .begin(ctx, op, Some(Capability::Job(JobAction::Notify)))?;
        self.check_id(op, job_id)?;
        if message.trim().is_empty() {
            return Err(self.base.invalid(op, "message", "message is required"));
        }
        // No notify endpoint: the message is written to the job comment.
        let update = JobUpdate {
            comment: Some(message.to_string()),
            ..Default::default()
        };
        let body = self.base.encode(op, &update_request(&update))?;
        self.post_job(ctx, op, job_id, body).await
    }

    async fn requeue(&self, ctx: &RequestContext, job_id: u32) -> Result<()> {
        let op = "RequeueJob";
        self.base
            .begin(ctx, op, Some(Capability::Job(JobAction::Requeue)))?;
        self.check_id(op, job_id)?;
        let request =
            ApiRequest::delete(self.job_path(job_id)).with_query("flags", "FEDERATION_REQUEUE");
        self.base.execute(ctx, op, request).await?;
        Ok(())
    }

    async fn allocate(
        &self,
        ctx: &RequestContext,
        request: &JobAllocation,
    ) -> Result<JobAllocateResponse> {
        let op = "AllocateJob";
        self.base
            .begin(ctx, op, Some(Capability::Job(JobAction::Allocate)))?;
        if !request.requests_resources() {
            return Err(self.base.invalid(
                op,
                "resources",
                "at least one of nodes, tasks, cpus_per_task or memory_per_node is required",
            ));
        }
        let body = self.base.encode(op, &allocate_request(request))?;
        let resp: JobAllocResp = self
            .base
            .fetch(ctx, op, ApiRequest::post(self.base.slurm_path("job/allocate"), body))
            .await?;
        Ok(allocate_response(&resp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use slurmrest_core::ErrorKind;
    use slurmrest_core::Method;
    use slurmrest_core::mock::MockTransport;
    use slurmrest_types::JobState;

    const JOBS: &str = "/slurm/v0.0.44/jobs";

    fn adapter(mock: &Arc<MockTransport>) -> JobAdapter {
        JobAdapter::new(Some(mock.clone()))
    }

    fn jobs_body() -> serde_json::Value {
        json!({"jobs": [
            {"job_id": 1, "name": "a", "account": "lab", "job_state": ["RUNNING"], "user_name": "alice"},
            {"job_id": 2, "name": "b", "account": "other", "job_state": ["PENDING"], "user_name": "bob"},
            {"job_id": 3, "name": "c", "account": "lab", "job_state": ["PENDING"], "user_name": "alice"}
        ]})
    }

    #[tokio::test]
    async fn test_list_filters_client_side() {
        let mock = MockTransport::new().on(Method::Get, JOBS, 200, jobs_body()).shared();
        let opts = JobListOptions {
            accounts: vec!["lab".to_string()],
            states: vec![JobState::Pending],
            ..Default::default()
        };
        let result = adapter(&mock).list(&RequestContext::new(), &opts).await.unwrap();

        let ids: Vec<u32> = result.items.iter().map(|j| j.job_id).collect();
        assert_eq!(ids, vec![3]);
        assert_eq!(result.total, 1);
        assert!(mock.last_request().unwrap().query.is_empty());
    }

    #[tokio::test]
    async fn test_list_paginates_after_filtering() {
        let mock = MockTransport::new().on(Method::Get, JOBS, 200, jobs_body()).shared();
        let opts = JobListOptions {
            users: vec!["alice".to_string()],
            offset: 1,
            limit: 5,
            ..Default::default()
        };
        let result = adapter(&mock).list(&RequestContext::new(), &opts).await.unwrap();
        assert_eq!(result.total, 2);
        assert_eq!(result.items[0].job_id, 3);
    }

    #[tokio::test]
    async fn test_list_skips_malformed() {
        let body = json!({"jobs": [{"job_id": 1}, {"name": "no id"}, {"job_id": "x"}, {"job_id": 4}]});
        let mock = MockTransport::new().on(Method::Get, JOBS, 200, body).shared();
        let result = adapter(&mock)
            .list(&RequestContext::new(), &JobListOptions::default())
            .await
            .unwrap();
        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_get_not_found_from_status() {
        let mock = MockTransport::new()
            .on(
                Method::Get,
                "/slurm/v0.0.44/job/99",
                404,
                json!({"errors": [{"error_number": 2017, "error": "Invalid job id specified"}]}),
            )
            .shared();
        let err = adapter(&mock).get(&RequestContext::new(), 99).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceNotFound);
        assert_eq!(err.version(), Some("v0.0.44"));
    }

    #[tokio::test]
    async fn test_get_zero_id_is_validation() {
        let mock = MockTransport::new().shared();
        let err = adapter(&mock).get(&RequestContext::new(), 0).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_submit() {
        let mock = MockTransport::new()
            .on(
                Method::Post,
                "/slurm/v0.0.44/job/submit",
                200,
                json!({"job_id": 1234, "step_id": "batch", "warnings": [{"description": "queued"}]}),
            )
            .shared();
        let resp = adapter(&mock)
            .submit(&RequestContext::new(), &JobSubmission::new("#!/bin/bash\nhostname"))
            .await
            .unwrap();
        assert_eq!(resp.job_id, 1234);
        assert_eq!(resp.warnings, vec!["queued"]);
        let body = mock.last_request().unwrap().body.unwrap();
        assert_eq!(body["job"]["environment"][0], "PATH=/usr/bin:/bin");
    }

    #[tokio::test]
    async fn test_submit_requires_script() {
        let mock = MockTransport::new().shared();
        let err = adapter(&mock)
            .submit(&RequestContext::new(), &JobSubmission::new("  "))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert!(err.to_string().contains("script"));
    }

    #[tokio::test]
    async fn test_cancelled_context_never_calls() {
        let mock = MockTransport::new().shared();
        let ctx = RequestContext::new();
        ctx.cancel();
        let err = adapter(&mock).cancel(&ctx, 5).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_requeue_uses_delete_query() {
        let mock = MockTransport::new()
            .on(Method::Delete, "/slurm/v0.0.44/job/5", 200, json!({}))
            .shared();
        adapter(&mock).requeue(&RequestContext::new(), 5).await.unwrap();
        assert_eq!(
            mock.last_request().unwrap().query_value("flags"),
            Some("FEDERATION_REQUEUE")
        );
    }

    #[tokio::test]
    async fn test_signal_unsupported() {
        let mock = MockTransport::new().shared();
        let err = adapter(&mock)
            .signal(&RequestContext::new(), 5, "SIGUSR1")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_hold_posts_flag() {
        let mock = MockTransport::new()
            .on(Method::Post, "/slurm/v0.0.44/job/5", 200, json!({}))
            .shared();
        adapter(&mock).hold(&RequestContext::new(), 5).await.unwrap();
        assert_eq!(mock.last_request().unwrap().body, Some(json!({"hold": true})));
    }

    #[tokio::test]
    async fn test_notify_writes_comment() {
        let mock = MockTransport::new()
            .on(Method::Post, "/slurm/v0.0.44/job/5", 200, json!({}))
            .shared();
        adapter(&mock)
            .notify(&RequestContext::new(), 5, "checkpoint soon")
            .await
            .unwrap();
        let request = mock.last_request().unwrap();
        assert_eq!(request.body.unwrap()["comment"], "checkpoint soon");
    }

    #[tokio::test]
    async fn test_notify_requires_message() {
        let mock = MockTransport::new().shared();
        let err = adapter(&mock)
            .notify(&RequestContext::new(), 5, "  ")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_allocate_requires_resources() {
        let mock = MockTransport::new().shared();
        let err = adapter(&mock)
            .allocate(&RequestContext::new(), &JobAllocation::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    }

    #[tokio::test]
    async fn test_allocate() {
        let mock = MockTransport::new()
            .on(
                Method::Post,
                "/slurm/v0.0.44/job/allocate",
                200,
                json!({"job_id": 88, "job_submit_user_msg": "granted"}),
            )
            .shared();
        let resp = adapter(&mock)
            .allocate(
                &RequestContext::new(),
                &JobAllocation {
                    nodes: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(resp.job_id, 88);
        assert_eq!(resp.user_message, "granted");
    }
}
