//! Jobs: `job_info` and the `job_desc_msg` request bodies.

use super::{nonzero, text, timestamp, timestamp_to_wire};
use crate::wire::{ExitCode, JobDescMsg, JobInfo, JobSubmitReq, JobSubmitResp};
use slurmrest_core::{ConversionError, Converter};
use slurmrest_parsers::{NoVal, clean_list, noval_or_zero, present, present_list};
use slurmrest_types::{Job, JobState, JobSubmission, JobSubmitResponse, JobUpdate};

pub struct JobConverter;

impl Converter for JobConverter {
    type Wire = JobInfo;
    type Domain = Job;

    fn to_common(&self, w: &JobInfo) -> Result<Job, ConversionError> {
        let job_id = w
            .job_id
            .filter(|id| *id != 0)
            .ok_or(ConversionError::MissingIdentity {
                entity: "job",
                field: "job_id",
            })?;
        let state_flags = clean_list(w.job_state.as_ref());
        let state_reason = text(w.state_reason.as_ref());

        Ok(Job {
            job_id,
            name: text(w.name.as_ref()),
            user_id: w.user_id.unwrap_or_default(),
            user_name: text(w.user_name.as_ref()),
            group_id: w.group_id.unwrap_or_default(),
            state: JobState::from_wire(&state_flags, &state_reason),
            state_flags,
            state_reason,
            partition: text(w.partition.as_ref()),
            node_list: text(w.nodes.as_ref()),
            cpus: noval_or_zero(w.cpus.as_ref()),
            node_count: noval_or_zero(w.node_count.as_ref()),
            memory_per_node: noval_or_zero(w.memory_per_node.as_ref()),
            submit_time: timestamp(w.submit_time.as_ref()),
            start_time: timestamp(w.start_time.as_ref()),
            end_time: timestamp(w.end_time.as_ref()),
            time_limit: noval_or_zero(w.time_limit.as_ref()),
            account: text(w.account.as_ref()),
            qos: text(w.qos.as_ref()),
            priority: noval_or_zero(w.priority.as_ref()),
            command: text(w.command.as_ref()),
            working_directory: text(w.current_working_directory.as_ref()),
            standard_input: text(w.standard_input.as_ref()),
            standard_output: text(w.standard_output.as_ref()),
            standard_error: text(w.standard_error.as_ref()),
            exit_code: w
                .exit_code
                .as_ref()
                .map(|e| noval_or_zero(e.return_code.as_ref()))
                .unwrap_or_default(),
            comment: text(w.comment.as_ref()),
            array_job_id: noval_or_zero(w.array_job_id.as_ref()),
            array_task_id: w
                .array_task_id
                .as_ref()
                .and_then(|n| n.decode().as_option()),
        })
    }

    fn to_wire(&self, job: &Job) -> JobInfo {
        let job_state = if job.state_flags.is_empty() {
            present_list(&job.state.to_wire())
        } else {
            present_list(&job.state_flags)
        };

        JobInfo {
            job_id: nonzero(job.job_id),
            name: present(&job.name),
            user_id: nonzero(job.user_id),
            user_name: present(&job.user_name),
            group_id: nonzero(job.group_id),
            job_state,
            state_reason: present(&job.state_reason),
            partition: present(&job.partition),
            nodes: present(&job.node_list),
            cpus: NoVal::present(job.cpus),
            node_count: NoVal::present(job.node_count),
            memory_per_node: NoVal::present(job.memory_per_node),
            submit_time: timestamp_to_wire(job.submit_time),
            start_time: timestamp_to_wire(job.start_time),
            end_time: timestamp_to_wire(job.end_time),
            time_limit: NoVal::present(job.time_limit),
            account: present(&job.account),
            qos: present(&job.qos),
            priority: NoVal::present(job.priority),
            command: present(&job.command),
            current_working_directory: present(&job.working_directory),
            standard_input: present(&job.standard_input),
            standard_output: present(&job.standard_output),
            standard_error: present(&job.standard_error),
            exit_code: NoVal::present(job.exit_code).map(|code| ExitCode {
                status: None,
                return_code: Some(code),
            }),
            comment: present(&job.comment),
            array_job_id: NoVal::present(job.array_job_id),
            array_task_id: NoVal::from_option(job.array_task_id),
        }
    }
}

pub fn submit_request(job: &JobSubmission) -> JobSubmitReq {
    JobSubmitReq {
        script: Some(job.script.clone()),
        job: JobDescMsg {
            name: job.name.clone(),
            partition: job.partition.clone(),
            account: job.account.clone(),
            qos: job.qos.clone(),
            time_limit: NoVal::from_option(job.time_limit),
            minimum_nodes: job.nodes,
            tasks: job.tasks,
            cpus_per_task: job.cpus_per_task,
            memory_per_node: NoVal::from_option(job.memory_per_node),
            current_working_directory: job.working_directory.clone(),
            standard_input: job.standard_input.clone(),
            standard_output: job.standard_output.clone(),
            standard_error: job.standard_error.clone(),
            comment: job.comment.clone(),
            array: job.array.clone(),
            dependency: job.dependency.clone(),
            environment: Some(job.environment_list()),
            ..Default::default()
        },
    }
}

/// Job id from the top level, falling back to the `result` object.
pub fn submit_response(resp: &JobSubmitResp, warnings: Vec<String>) -> JobSubmitResponse {
    let result = resp.result.clone().unwrap_or_default();
    JobSubmitResponse {
        job_id: resp.job_id.or(result.job_id).unwrap_or_default(),
        step_id: resp
            .step_id
            .clone()
            .or(result.step_id)
            .unwrap_or_default(),
        user_message: resp
            .job_submit_user_msg
            .clone()
            .or(result.job_submit_user_msg)
            .unwrap_or_default(),
        warnings,
    }
}

pub fn update_request(update: &JobUpdate) -> JobDescMsg {
    JobDescMsg {
        name: update.name.clone(),
        partition: update.partition.clone(),
        account: update.account.clone(),
        qos: update.qos.clone(),
        time_limit: NoVal::from_option(update.time_limit),
        priority: NoVal::from_option(update.priority),
        nice: update.nice,
        comment: update.comment.clone(),
        hold: update.hold,
        ..Default::default()
    }
}
