//! Per-call cancellation and deadlines.

use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Carries cancellation and an optional deadline through one call chain.
///
/// Cloning shares the cancellation token; [`RequestContext::child`] derives
/// a context that is cancelled with its parent but can be cancelled alone.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

/// Why a context can no longer be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    Live,
    Cancelled,
    DeadlineExceeded,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// Derived context; keeps the earlier of the two deadlines.
    pub fn child(&self, timeout: Option<Duration>) -> Self {
        let own = timeout.map(|t| Instant::now() + t);
        let deadline = match (self.deadline, own) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        Self {
            token: self.token.child_token(),
            deadline,
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    pub fn state(&self) -> ContextState {
        if self.token.is_cancelled() {
            ContextState::Cancelled
        } else if self.deadline.is_some_and(|d| Instant::now() >= d) {
            ContextState::DeadlineExceeded
        } else {
            ContextState::Live
        }
    }

    pub fn is_done(&self) -> bool {
        self.state() != ContextState::Live
    }

    /// Resolves once the context is cancelled or its deadline passes.
    pub async fn done(&self) {
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    _ = self.token.cancelled() => {}
                    _ = tokio::time::sleep_until(deadline) => {}
                }
            }
            None => self.token.cancelled().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_is_live() {
        let ctx = RequestContext::new();
        assert_eq!(ctx.state(), ContextState::Live);
        assert!(ctx.remaining().is_none());
    }

    #[test]
    fn test_cancel() {
        let ctx = RequestContext::new();
        let clone = ctx.clone();
        clone.cancel();
        assert_eq!(ctx.state(), ContextState::Cancelled);
    }

    #[test]
    fn test_child_cancelled_with_parent() {
        let parent = RequestContext::new();
        let child = parent.child(None);
        child.cancel();
        assert!(!parent.is_done());

        let child = parent.child(None);
        parent.cancel();
        assert!(child.is_done());
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline() {
        let ctx = RequestContext::with_timeout(Duration::from_secs(5));
        assert_eq!(ctx.state(), ContextState::Live);
        ctx.done().await;
        assert_eq!(ctx.state(), ContextState::DeadlineExceeded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_child_keeps_earlier_deadline() {
        let parent = RequestContext::with_timeout(Duration::from_secs(1));
        let child = parent.child(Some(Duration::from_secs(60)));
        assert!(child.remaining().unwrap() <= Duration::from_secs(1));
    }
}
