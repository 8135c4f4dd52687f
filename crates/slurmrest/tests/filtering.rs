//! Job filters give the same ordered result whether v0.0.43 pushes them to
//! the server as query parameters or v0.0.42 applies them locally.

use rstest::rstest;
use serde_json::{Value, json};
use slurmrest::types::{JobListOptions, JobState};
use slurmrest::{ApiVersion, RequestContext};
use slurmrest_core::mock::MockTransport;
use slurmrest_core::{Method, Transport, VersionAdapter};
use std::sync::Arc;

fn jobs_body() -> Value {
    json!({"jobs": [
        {"job_id": 10, "name": "train", "user_name": "alice", "account": "lab",
         "partition": "gpu", "job_state": ["RUNNING"]},
        {"job_id": 11, "name": "eval", "user_name": "bob", "account": "lab",
         "partition": "cpu", "job_state": ["PENDING"]},
        {"job_id": 12, "name": "train", "user_name": "alice", "account": "physics",
         "partition": "gpu", "job_state": ["PENDING"], "state_reason": "JobHeldUser"},
        {"job_id": 13, "name": "sweep", "user_name": "carol", "account": "lab",
         "partition": "gpu", "job_state": ["COMPLETED"]},
        {"job_id": 14, "name": "train", "user_name": "alice", "account": "lab",
         "partition": "cpu", "job_state": ["PENDING"]},
        {"job_id": 15, "name": "eval", "user_name": "bob", "account": "physics",
         "partition": "gpu", "job_state": ["RUNNING"]}
    ]})
}

/// Both versions see the full listing; v0.0.43 additionally sends the
/// filter as query parameters, which the mock ignores like an old server.
fn adapter(version: ApiVersion) -> (Arc<MockTransport>, Arc<dyn VersionAdapter>) {
    let mock = MockTransport::new()
        .on(Method::Get, &format!("/slurm/{version}/jobs"), 200, jobs_body())
        .shared();
    let transport: Arc<dyn Transport> = mock.clone();
    let adapter = slurmrest::adapter_for(version, Some(transport)).unwrap();
    (mock, adapter.into())
}

async fn ids(adapter: &dyn VersionAdapter, opts: &JobListOptions) -> (Vec<u32>, usize) {
    let result = adapter
        .jobs()
        .unwrap()
        .list(&RequestContext::new(), opts)
        .await
        .unwrap();
    (result.items.iter().map(|j| j.job_id).collect(), result.total)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn by_user(users: &[&str]) -> JobListOptions {
    JobListOptions {
        users: strings(users),
        ..Default::default()
    }
}

fn by_state(states: Vec<JobState>) -> JobListOptions {
    JobListOptions {
        states,
        ..Default::default()
    }
}

fn combined() -> JobListOptions {
    JobListOptions {
        accounts: strings(&["lab"]),
        partitions: strings(&["gpu", "cpu"]),
        states: vec![JobState::Pending, JobState::Running],
        ..Default::default()
    }
}

#[rstest]
#[case::unfiltered(JobListOptions::default(), vec![10, 11, 12, 13, 14, 15])]
#[case::user(by_user(&["alice"]), vec![10, 12, 14])]
#[case::users(by_user(&["bob", "carol"]), vec![11, 13, 15])]
#[case::held_only(by_state(vec![JobState::Held]), vec![12])]
#[case::pending_excludes_held(by_state(vec![JobState::Pending]), vec![11, 14])]
#[case::ids(JobListOptions { job_ids: vec![15, 10, 99], ..Default::default() }, vec![10, 15])]
#[case::name(JobListOptions { names: strings(&["train"]), ..Default::default() }, vec![10, 12, 14])]
#[case::combined(combined(), vec![10, 11, 14])]
#[case::no_match(by_user(&["nobody"]), vec![])]
#[tokio::test]
async fn test_pushdown_matches_client_filter(
    #[case] opts: JobListOptions,
    #[case] expected: Vec<u32>,
) {
    let (server_mock, server) = adapter(ApiVersion::V0_0_43);
    let (client_mock, client) = adapter(ApiVersion::V0_0_42);

    let (pushed, pushed_total) = ids(server.as_ref(), &opts).await;
    let (local, local_total) = ids(client.as_ref(), &opts).await;

    assert_eq!(pushed, expected);
    assert_eq!(local, expected);
    assert_eq!(pushed_total, local_total);
    assert!(client_mock.last_request().unwrap().query.is_empty());
    if opts != JobListOptions::default() {
        assert!(!server_mock.last_request().unwrap().query.is_empty());
    }
}

#[rstest]
#[case(0, 0)]
#[case(2, 0)]
#[case(2, 1)]
#[case(1, 2)]
#[case(5, 1)]
#[case(0, 2)]
#[case(2, 3)]
#[case(3, 10)]
#[tokio::test]
async fn test_paging_slices_filtered_result(#[case] limit: usize, #[case] offset: usize) {
    for version in [ApiVersion::V0_0_42, ApiVersion::V0_0_43] {
        let (_, adapter) = adapter(version);
        let filter = combined();
        let (all, all_total) = ids(adapter.as_ref(), &filter).await;

        let paged = JobListOptions {
            limit,
            offset,
            ..filter
        };
        let (page, total) = ids(adapter.as_ref(), &paged).await;

        let start = offset.min(all.len());
        let end = if limit == 0 {
            all.len()
        } else {
            (start + limit).min(all.len())
        };
        assert_eq!(page, all[start..end], "{version} limit={limit} offset={offset}");
        assert_eq!(total, all_total, "total counts the filtered set before paging");
    }
}
