//! Jobs: `job_info` and the `job_desc_msg` request bodies.

use super::{nonzero, text, timestamp, timestamp_to_wire};
use crate::wire::{
    ExitCode, JobAllocReq, JobAllocResp, JobDescMsg, JobInfo, JobSubmitReq, JobSubmitResp,
};
use slurmrest_core::{ConversionError, Converter};
use slurmrest_parsers::{NoVal, clean_list, noval_or_zero, present, present_list};
use slurmrest_types::{
    Job, JobAllocateResponse, JobAllocation, JobState, JobSubmission, JobSubmitResponse,
    JobUpdate,
};

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
        job: JobDescMsg {
            script: Some(job.script.clone()),
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

pub fn allocate_request(alloc: &JobAllocation) -> JobAllocReq {
    JobAllocReq {
        job: JobDescMsg {
            name: alloc.name.clone(),
            partition: alloc.partition.clone(),
            account: alloc.account.clone(),
            qos: alloc.qos.clone(),
            time_limit: NoVal::from_option(alloc.time_limit),
            minimum_nodes: alloc.nodes,
            tasks: alloc.tasks,
            cpus_per_task: alloc.cpus_per_task,
            memory_per_node: NoVal::from_option(alloc.memory_per_node),
            environment: Some(alloc.environment_list()),
            ..Default::default()
        },
    }
}

pub fn allocate_response(resp: &JobAllocResp) -> JobAllocateResponse {
    JobAllocateResponse {
        job_id: resp.job_id.unwrap_or_default(),
        user_message: text(resp.job_submit_user_msg.as_ref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> JobInfo {
        serde_json::from_value(json!({
            "job_id": 4242,
            "name": "align",
            "user_id": 1001,
            "user_name": "alice",
            "group_id": 100,
            "job_state": ["RUNNING", "COMPLETING"],
            "state_reason": "None",
            "partition": "compute",
            "nodes": "cn[01-02]",
            "cpus": {"set": true, "infinite": false, "number": 32},
            "node_count": {"set": true, "infinite": false, "number": 2},
            "memory_per_node": {"set": true, "infinite": false, "number": 8192},
            "submit_time": {"set": true, "infinite": false, "number": 1700000000},
            "start_time": {"set": true, "infinite": false, "number": 1700000060},
            "end_time": {"set": false, "infinite": false, "number": 0},
            "time_limit": {"set": true, "infinite": false, "number": 120},
            "account": "genomics",
            "qos": "normal",
            "priority": {"set": true, "infinite": false, "number": 4294},
            "command": "/home/alice/align.sh",
            "current_working_directory": "/home/alice",
            "standard_output": "/home/alice/align.out",
            "exit_code": {"status": ["SUCCESS"], "return_code": {"set": true, "infinite": false, "number": 0}},
            "comment": "nightly",
            "array_job_id": {"set": true, "infinite": false, "number": 4240},
            "array_task_id": {"set": true, "infinite": false, "number": 2}
        }))
        .unwrap()
    }

    #[test]
    fn test_to_common() {
        let job = JobConverter.to_common(&sample()).unwrap();
        assert_eq!(job.job_id, 4242);
        assert_eq!(job.state, JobState::Running);
        assert_eq!(job.state_flags, vec!["RUNNING", "COMPLETING"]);
        assert_eq!(job.cpus, 32);
        assert_eq!(job.memory_per_node, 8192);
        assert_eq!(job.time_limit, 120);
        assert_eq!(job.submit_time.unwrap().timestamp(), 1_700_000_000);
        assert!(job.end_time.is_none());
        assert_eq!(job.working_directory, "/home/alice");
        assert_eq!(job.array_task_id, Some(2));
        assert_eq!(job.nodes().unwrap(), vec!["cn01", "cn02"]);
    }

    #[test]
    fn test_infinite_time_limit_collapses_to_zero() {
        let mut wire = sample();
        wire.time_limit = Some(NoVal {
            set: Some(false),
            infinite: Some(true),
            number: Some(0),
        });
        assert_eq!(JobConverter.to_common(&wire).unwrap().time_limit, 0);
    }

    #[test]
    fn test_missing_job_id_is_rejected() {
        let mut wire = sample();
        wire.job_id = None;
        assert!(JobConverter.to_common(&wire).is_err());
        wire.job_id = Some(0);
        assert!(JobConverter.to_common(&wire).is_err());
    }

    #[test]
    fn test_sparse_record_uses_zero_values() {
        let job = JobConverter
            .to_common(&JobInfo {
                job_id: Some(1),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(job.cpus, 0);
        assert_eq!(job.state, JobState::default());
        assert!(job.submit_time.is_none());
    }

    #[test]
    fn test_round_trip() {
        let job = JobConverter.to_common(&sample()).unwrap();
        let wire = JobConverter.to_wire(&job);
        assert_eq!(wire.cpus, Some(NoVal::value(32)));
        assert_eq!(wire.end_time, None);
        assert_eq!(JobConverter.to_common(&wire).unwrap(), job);
    }

    #[test]
    fn test_submit_request_shape() {
        let mut submission = JobSubmission::new("#!/bin/bash\nhostname");
        submission.partition = Some("debug".to_string());
        submission.time_limit = Some(30);
        let body = serde_json::to_value(submit_request(&submission)).unwrap();
        assert_eq!(body["job"]["script"], "#!/bin/bash\nhostname");
        assert_eq!(body["job"]["partition"], "debug");
        assert_eq!(
            body["job"]["time_limit"],
            json!({"set": true, "infinite": false, "number": 30})
        );
        assert_eq!(body["job"]["environment"], json!(["PATH=/usr/bin:/bin"]));
        assert!(body["job"].get("account").is_none());
    }

    #[test]
    fn test_submit_response_prefers_top_level() {
        let resp: JobSubmitResp = serde_json::from_value(json!({
            "job_id": 77,
            "step_id": "batch",
            "result": {"job_id": 78, "job_submit_user_msg": "queued"}
        }))
        .unwrap();
        let out = submit_response(&resp, vec!["w".to_string()]);
        assert_eq!(out.job_id, 77);
        assert_eq!(out.step_id, "batch");
        assert_eq!(out.user_message, "queued");
        assert_eq!(out.warnings, vec!["w"]);
    }

    #[test]
    fn test_update_request_only_present_fields() {
        let body = serde_json::to_value(update_request(&JobUpdate {
            comment: Some("moved".to_string()),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(body, json!({"comment": "moved"}));
    }
}
