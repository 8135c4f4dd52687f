//! Background pollers that turn list snapshots into change events.

use async_trait::async_trait;
use slurmrest_core::{Capability, Error, Feature, RequestContext, Result, VersionAdapter};
use slurmrest_types::{
    JobListOptions, JobState, NodeListOptions, NodeState, PartitionListOptions, PartitionState,
};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, error};

/// What happened to one entity between two polls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent<I, S> {
    /// Not present in the previous poll.
    New { id: I, state: S },
    StateChanged { id: I, previous: S, current: S },
    /// Present in the previous poll, missing now. A job lands here once it
    /// has finished and slurmctld has purged it.
    Removed { id: I, previous: S },
}

impl<I, S> WatchEvent<I, S> {
    pub fn id(&self) -> &I {
        match self {
            Self::New { id, .. } | Self::StateChanged { id, .. } | Self::Removed { id, .. } => id,
        }
    }
}

impl<I: fmt::Display, S: fmt::Display> fmt::Display for WatchEvent<I, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New { id, state } => write!(f, "{}\tnew ({})", id, state),
            Self::StateChanged {
                id,
                previous,
                current,
            } => write!(f, "{}\t{} -> {}", id, previous, current),
            Self::Removed { id, previous } => write!(f, "{}\tremoved (was {})", id, previous),
        }
    }
}

pub type JobEvent = WatchEvent<u32, JobState>;
pub type NodeEvent = WatchEvent<String, NodeState>;
pub type PartitionEvent = WatchEvent<String, PartitionState>;

#[derive(Debug, Clone)]
pub struct WatchConfig<F = JobListOptions> {
    pub poll_interval: Duration,
    /// Entities to watch; pagination fields are ignored.
    pub filter: F,
    /// Events buffered before the watcher waits on the receiver.
    pub buffer: usize,
    pub include_new: bool,
    pub include_removed: bool,
}

impl<F: Default> Default for WatchConfig<F> {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            filter: F::default(),
            buffer: 64,
            include_new: true,
            include_removed: true,
        }
    }
}

/// One list call reduced to `(id, state)` pairs.
#[async_trait]
trait Snapshot: Send + Sync + 'static {
    type Id: Clone + Eq + Hash + Ord + fmt::Display + Send + Sync + 'static;
    type State: Clone + PartialEq + fmt::Display + Send + Sync + 'static;

    async fn snapshot(&self, ctx: &RequestContext) -> Result<Vec<(Self::Id, Self::State)>>;
}

struct Jobs {
    adapter: Arc<dyn VersionAdapter>,
    filter: JobListOptions,
}

#[async_trait]
impl Snapshot for Jobs {
    type Id = u32;
    type State = JobState;

    async fn snapshot(&self, ctx: &RequestContext) -> Result<Vec<(u32, JobState)>> {
        let Some(jobs) = self.adapter.jobs() else {
            return Ok(Vec::new());
        };
        let list = jobs.list(ctx, &self.filter).await?;
        Ok(list.items.into_iter().map(|j| (j.job_id, j.state)).collect())
    }
}

struct Nodes {
    adapter: Arc<dyn VersionAdapter>,
    filter: NodeListOptions,
}

#[async_trait]
impl Snapshot for Nodes {
    type Id = String;
    type State = NodeState;

    async fn snapshot(&self, ctx: &RequestContext) -> Result<Vec<(String, NodeState)>> {
        let Some(nodes) = self.adapter.nodes() else {
            return Ok(Vec::new());
        };
        let list = nodes.list(ctx, &self.filter).await?;
        Ok(list.items.into_iter().map(|n| (n.name, n.state)).collect())
    }
}

struct Partitions {
    adapter: Arc<dyn VersionAdapter>,
    filter: PartitionListOptions,
}

#[async_trait]
impl Snapshot for Partitions {
    type Id = String;
    type State = PartitionState;

    async fn snapshot(&self, ctx: &RequestContext) -> Result<Vec<(String, PartitionState)>> {
        let Some(partitions) = self.adapter.partitions() else {
            return Ok(Vec::new());
        };
        let list = partitions.list(ctx, &self.filter).await?;
        Ok(list.items.into_iter().map(|p| (p.name, p.state)).collect())
    }
}

/// Last known state per entity.
struct Tracker<I, S> {
    known: HashMap<I, S>,
    primed: bool,
}

impl<I: Clone + Eq + Hash + Ord, S: Clone + PartialEq> Tracker<I, S> {
    fn new() -> Self {
        Self {
            known: HashMap::new(),
            primed: false,
        }
    }

    /// Replace the known states with `snapshot` and return what changed.
    /// The first snapshot is the baseline and yields nothing.
    fn observe(
        &mut self,
        snapshot: Vec<(I, S)>,
        include_new: bool,
        include_removed: bool,
    ) -> Vec<WatchEvent<I, S>> {
        let baseline = !self.primed;
        self.primed = true;

        let mut current = HashMap::with_capacity(snapshot.len());
        let mut events = Vec::new();
        for (id, state) in snapshot {
            if current.contains_key(&id) {
                continue;
            }
            if !baseline {
                match self.known.remove(&id) {
                    Some(previous) if previous != state => events.push(WatchEvent::StateChanged {
                        id: id.clone(),
                        previous,
                        current: state.clone(),
                    }),
                    Some(_) => {}
                    None if include_new => events.push(WatchEvent::New {
                        id: id.clone(),
                        state: state.clone(),
                    }),
                    None => {}
                }
            }
            current.insert(id, state);
        }

        if !baseline && include_removed {
            let mut gone: Vec<_> = self.known.drain().collect();
            gone.sort_by(|a, b| a.0.cmp(&b.0));
            events.extend(
                gone.into_iter()
                    .map(|(id, previous)| WatchEvent::Removed { id, previous }),
            );
        }
        self.known = current;
        events
    }
}

/// Shared poll loop. Stops when its context is cancelled or the receiver
/// is dropped; a failed poll is logged and leaves the known states alone.
struct Poller<P> {
    source: P,
    what: &'static str,
    poll_interval: Duration,
    buffer: usize,
    include_new: bool,
    include_removed: bool,
    ctx: RequestContext,
}

type Started<P> = (
    JoinHandle<()>,
    mpsc::Receiver<WatchEvent<<P as Snapshot>::Id, <P as Snapshot>::State>>,
);

impl<P: Snapshot> Poller<P> {
    fn new<F>(
        adapter: &dyn VersionAdapter,
        operation: &str,
        what: &'static str,
        has_resource: bool,
        source: P,
        config: &WatchConfig<F>,
        ctx: RequestContext,
    ) -> Result<Self> {
        let capabilities = adapter.capabilities();
        if !capabilities.supports(Capability::Feature(Feature::Watch)) || !has_resource {
            return Err(Error::UnsupportedOperation {
                operation: operation.to_string(),
                version: adapter.version().to_string(),
                alternative: Some(format!("poll the {} list directly", what)),
            });
        }
        if config.poll_interval.is_zero() {
            return Err(Error::validation(
                operation,
                "poll_interval",
                "must be non-zero",
            ));
        }
        if config.buffer == 0 {
            return Err(Error::validation(operation, "buffer", "must be at least 1"));
        }
        Ok(Self {
            source,
            what,
            poll_interval: config.poll_interval,
            buffer: config.buffer,
            include_new: config.include_new,
            include_removed: config.include_removed,
            ctx,
        })
    }

    fn start(self) -> Started<P> {
        let (tx, rx) = mpsc::channel(self.buffer);
        let handle = tokio::spawn(async move {
            self.run(tx).await;
        });
        (handle, rx)
    }

    async fn run(self, tx: mpsc::Sender<WatchEvent<P::Id, P::State>>) {
        let mut tracker = Tracker::new();
        if !self.poll(&mut tracker, &tx).await {
            return;
        }

        let mut ticker = interval(self.poll_interval);
        // Skip the first tick (fires immediately)
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = self.ctx.done() => {
                    debug!("{} watcher stopped", self.what);
                    return;
                }
                _ = ticker.tick() => {
                    if !self.poll(&mut tracker, &tx).await {
                        return;
                    }
                }
            }
        }
    }

    /// One poll. Returns false once the watcher should stop.
    async fn poll(
        &self,
        tracker: &mut Tracker<P::Id, P::State>,
        tx: &mpsc::Sender<WatchEvent<P::Id, P::State>>,
    ) -> bool {
        // Each poll must finish within one interval
        let ctx = self.ctx.child(Some(self.poll_interval));
        let snapshot = match self.source.snapshot(&ctx).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                if self.ctx.is_done() {
                    return false;
                }
                error!("Error polling {}s: {}", self.what, e);
                return !tx.is_closed();
            }
        };

        for event in tracker.observe(snapshot, self.include_new, self.include_removed) {
            debug!("{} {}", self.what, event);
            if tx.send(event).await.is_err() {
                return false;
            }
        }
        !tx.is_closed()
    }
}

/// Polls the job list and reports new, changed and removed jobs.
pub struct JobWatcher {
    poller: Poller<Jobs>,
}

impl JobWatcher {
    pub fn new(
        adapter: Arc<dyn VersionAdapter>,
        config: WatchConfig<JobListOptions>,
        ctx: RequestContext,
    ) -> Result<Self> {
        let source = Jobs {
            adapter: adapter.clone(),
            filter: JobListOptions {
                limit: 0,
                offset: 0,
                ..config.filter.clone()
            },
        };
        let has_jobs = adapter.jobs().is_some();
        let poller = Poller::new(
            adapter.as_ref(),
            "WatchJobs",
            "job",
            has_jobs,
            source,
            &config,
            ctx,
        )?;
        Ok(Self { poller })
    }

    /// Start the watcher in the background.
    pub fn start(self) -> (JoinHandle<()>, mpsc::Receiver<JobEvent>) {
        self.poller.start()
    }
}

/// Polls the node list and reports new, changed and removed nodes.
pub struct NodeWatcher {
    poller: Poller<Nodes>,
}

impl NodeWatcher {
    pub fn new(
        adapter: Arc<dyn VersionAdapter>,
        config: WatchConfig<NodeListOptions>,
        ctx: RequestContext,
    ) -> Result<Self> {
        let source = Nodes {
            adapter: adapter.clone(),
            filter: NodeListOptions {
                limit: 0,
                offset: 0,
                ..config.filter.clone()
            },
        };
        let has_nodes = adapter.nodes().is_some();
        let poller = Poller::new(
            adapter.as_ref(),
            "WatchNodes",
            "node",
            has_nodes,
            source,
            &config,
            ctx,
        )?;
        Ok(Self { poller })
    }

    pub fn start(self) -> (JoinHandle<()>, mpsc::Receiver<NodeEvent>) {
        self.poller.start()
    }
}

/// Polls the partition list and reports new, changed and removed partitions.
pub struct PartitionWatcher {
    poller: Poller<Partitions>,
}

impl PartitionWatcher {
    pub fn new(
        adapter: Arc<dyn VersionAdapter>,
        config: WatchConfig<PartitionListOptions>,
        ctx: RequestContext,
    ) -> Result<Self> {
        let source = Partitions {
            adapter: adapter.clone(),
            filter: PartitionListOptions {
                limit: 0,
                offset: 0,
                ..config.filter.clone()
            },
        };
        let has_partitions = adapter.partitions().is_some();
        let poller = Poller::new(
            adapter.as_ref(),
            "WatchPartitions",
            "partition",
            has_partitions,
            source,
            &config,
            ctx,
        )?;
        Ok(Self { poller })
    }

    pub fn start(self) -> (JoinHandle<()>, mpsc::Receiver<PartitionEvent>) {
        self.poller.start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::adapter_for;
    use serde_json::json;
    use slurmrest_core::mock::MockTransport;
    use slurmrest_core::{ApiVersion, ErrorKind, Method, Transport};

    const JOBS: &str = "/slurm/v0.0.44/jobs";
    const NODES: &str = "/slurm/v0.0.44/nodes";
    const PARTITIONS: &str = "/slurm/v0.0.44/partitions";

    fn jobs(states: &[(u32, &str)]) -> serde_json::Value {
        let jobs: Vec<_> = states
            .iter()
            .map(|(id, state)| json!({"job_id": id, "name": "j", "job_state": [state]}))
            .collect();
        json!({ "jobs": jobs })
    }

    fn nodes(states: &[(&str, &str)]) -> serde_json::Value {
        let nodes: Vec<_> = states
            .iter()
            .map(|(name, state)| json!({"name": name, "state": [state]}))
            .collect();
        json!({ "nodes": nodes })
    }

    fn adapter(mock: Arc<MockTransport>, version: ApiVersion) -> Arc<dyn VersionAdapter> {
        let transport: Arc<dyn Transport> = mock;
        Arc::from(adapter_for(version, Some(transport)).unwrap())
    }

    fn config<F: Default>() -> WatchConfig<F> {
        WatchConfig {
            poll_interval: Duration::from_millis(10),
            ..Default::default()
        }
    }

    fn watcher(mock: Arc<MockTransport>, version: ApiVersion) -> Result<JobWatcher> {
        let transport: Arc<dyn Transport> = mock;
        let adapter = adapter_for(version, Some(transport))?;
        JobWatcher::new(Arc::from(adapter), config(), RequestContext::new())
    }

    #[test]
    fn test_tracker_baseline_then_diff() {
        let mut tracker = Tracker::new();
        assert!(
            tracker
                .observe(vec![(1, "PENDING"), (2, "RUNNING")], true, true)
                .is_empty()
        );
        let events = tracker.observe(vec![(1, "RUNNING"), (3, "PENDING")], true, true);
        assert_eq!(
            events,
            vec![
                WatchEvent::StateChanged {
                    id: 1,
                    previous: "PENDING",
                    current: "RUNNING",
                },
                WatchEvent::New {
                    id: 3,
                    state: "PENDING",
                },
                WatchEvent::Removed {
                    id: 2,
                    previous: "RUNNING",
                },
            ]
        );
    }

    #[test]
    fn test_tracker_exclusions() {
        let mut tracker = Tracker::new();
        tracker.observe(vec![(1, "PENDING")], false, false);
        let events = tracker.observe(vec![(2, "PENDING")], false, false);
        assert!(events.is_empty());
        // Job 2 is known now even though its arrival was not reported.
        let events = tracker.observe(vec![(2, "RUNNING")], false, false);
        assert_eq!(events.len(), 1);
        assert_eq!(*events[0].id(), 2);
    }

    #[test]
    fn test_tracker_ignores_duplicate_ids() {
        let mut tracker = Tracker::new();
        tracker.observe(vec![(1, "PENDING")], true, true);
        let events = tracker.observe(vec![(1, "PENDING"), (1, "PENDING")], true, true);
        assert!(events.is_empty());
    }

    #[test]
    fn test_event_display() {
        let event: JobEvent = WatchEvent::StateChanged {
            id: 7,
            previous: JobState::Pending,
            current: JobState::Running,
        };
        assert_eq!(event.to_string(), "7\tPENDING -> RUNNING");
        let event: NodeEvent = WatchEvent::Removed {
            id: "cn01".to_string(),
            previous: NodeState::Down,
        };
        assert_eq!(event.to_string(), "cn01\tremoved (was DOWN)");
    }

    #[tokio::test(start_paused = true)]
    async fn test_emits_job_lifecycle() {
        let mock = MockTransport::new()
            .on(Method::Get, JOBS, 200, jobs(&[(1, "PENDING"), (2, "RUNNING")]))
            .on(Method::Get, JOBS, 200, jobs(&[(1, "RUNNING"), (2, "RUNNING"), (3, "PENDING")]))
            .on(Method::Get, JOBS, 200, jobs(&[(1, "COMPLETED"), (3, "PENDING")]))
            .shared();
        let ctx = RequestContext::new();
        let watcher =
            JobWatcher::new(adapter(mock, ApiVersion::V0_0_44), config(), ctx.clone()).unwrap();
        let (handle, mut rx) = watcher.start();

        assert_eq!(
            rx.recv().await.unwrap(),
            WatchEvent::StateChanged {
                id: 1,
                previous: JobState::Pending,
                current: JobState::Running,
            }
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            WatchEvent::New {
                id: 3,
                state: JobState::Pending,
            }
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            WatchEvent::StateChanged {
                id: 1,
                previous: JobState::Running,
                current: JobState::Completed,
            }
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            WatchEvent::Removed {
                id: 2,
                previous: JobState::Running,
            }
        );

        ctx.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_survives_poll_errors() {
        let mock = MockTransport::new()
            .on(Method::Get, JOBS, 200, jobs(&[(7, "PENDING")]))
            .on(Method::Get, JOBS, 500, json!({"errors": [{"error": "busy"}]}))
            .on(Method::Get, JOBS, 200, jobs(&[(7, "RUNNING")]))
            .shared();
        let (handle, mut rx) = watcher(mock.clone(), ApiVersion::V0_0_44)
            .unwrap()
            .start();

        // The failed poll must not report job 7 as removed.
        let event = rx.recv().await.unwrap();
        assert_eq!(
            event,
            WatchEvent::StateChanged {
                id: 7,
                previous: JobState::Pending,
                current: JobState::Running,
            }
        );
        assert!(mock.request_count() >= 3);

        drop(rx);
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_node_watcher() {
        let mock = MockTransport::new()
            .on(Method::Get, NODES, 200, nodes(&[("cn01", "IDLE"), ("cn02", "IDLE")]))
            .on(Method::Get, NODES, 200, nodes(&[("cn01", "DOWN"), ("cn02", "IDLE"), ("cn03", "IDLE")]))
            .shared();
        let ctx = RequestContext::new();
        let watcher =
            NodeWatcher::new(adapter(mock, ApiVersion::V0_0_44), config(), ctx.clone()).unwrap();
        let (handle, mut rx) = watcher.start();

        assert_eq!(
            rx.recv().await.unwrap(),
            WatchEvent::StateChanged {
                id: "cn01".to_string(),
                previous: NodeState::Idle,
                current: NodeState::Down,
            }
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            WatchEvent::New {
                id: "cn03".to_string(),
                state: NodeState::Idle,
            }
        );

        ctx.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_partition_watcher_skips_new_when_excluded() {
        let mock = MockTransport::new()
            .on(
                Method::Get,
                PARTITIONS,
                200,
                json!({"partitions": [{"name": "compute", "partition": {"state": ["UP"]}}]}),
            )
            .on(
                Method::Get,
                PARTITIONS,
                200,
                json!({"partitions": [
                    {"name": "compute", "partition": {"state": ["DRAIN"]}},
                    {"name": "debug", "partition": {"state": ["UP"]}}
                ]}),
            )
            .shared();
        let ctx = RequestContext::new();
        let config = WatchConfig {
            include_new: false,
            ..config()
        };
        let watcher =
            PartitionWatcher::new(adapter(mock, ApiVersion::V0_0_44), config, ctx.clone())
                .unwrap();
        let (handle, mut rx) = watcher.start();

        assert_eq!(
            rx.recv().await.unwrap(),
            WatchEvent::StateChanged {
                id: "compute".to_string(),
                previous: PartitionState::Up,
                current: PartitionState::Drain,
            }
        );

        ctx.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_unsupported_version() {
        let mock = MockTransport::new().shared();
        let err = watcher(mock.clone(), ApiVersion::V0_0_40).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
        assert!(err.to_string().contains("v0.0.40"));

        let err = NodeWatcher::new(
            adapter(mock.clone(), ApiVersion::V0_0_40),
            config(),
            RequestContext::new(),
        )
        .err()
        .unwrap();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
        assert_eq!(mock.request_count(), 0);
    }

    #[test]
    fn test_rejects_zero_interval() {
        let adapter = adapter_for(ApiVersion::V0_0_43, None).unwrap();
        let err = JobWatcher::new(
            Arc::from(adapter),
            WatchConfig {
                poll_interval: Duration::ZERO,
                ..Default::default()
            },
            RequestContext::new(),
        )
        .err()
        .unwrap();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    }
}
