//! In-memory [`Transport`] for adapter tests.

use crate::context::RequestContext;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport, TransportError};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

#[derive(Debug, Clone)]
enum Reply {
    Response(ApiResponse),
    Fail(TransportError),
}

#[derive(Debug)]
struct Route {
    method: Method,
    path: String,
    /// Served front to back; the last reply repeats.
    replies: VecDeque<Reply>,
}

/// Canned responses keyed by method and path, plus a log of every request.
///
/// Registering the same route twice queues the second reply behind the
/// first. Unmatched requests get a slurmrestd-style 404.
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<ApiRequest>>,
    delay: Option<Duration>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, method: Method, path: &str, status: u16, body: Value) -> Self {
        self.push(method, path, Reply::Response(ApiResponse::json(status, &body)))
    }

    pub fn fail(self, method: Method, path: &str, error: TransportError) -> Self {
        self.push(method, path, Reply::Fail(error))
    }

    /// Sleep before answering each request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn push(self, method: Method, path: &str, reply: Reply) -> Self {
        {
            let mut routes = self.routes.lock().unwrap_or_else(PoisonError::into_inner);
            match routes
                .iter_mut()
                .find(|r| r.method == method && r.path == path)
            {
                Some(route) => route.replies.push_back(reply),
                None => routes.push(Route {
                    method,
                    path: path.to_string(),
                    replies: VecDeque::from([reply]),
                }),
            }
        }
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn reply_for(&self, request: &ApiRequest) -> Reply {
        let mut routes = self.routes.lock().unwrap_or_else(PoisonError::into_inner);
        let route = routes
            .iter_mut()
            .find(|r| r.method == request.method && r.path == request.path);

        match route {
            Some(route) if route.replies.len() > 1 => route
                .replies
                .pop_front()
                .unwrap_or_else(|| not_found(request)),
            Some(route) => route
                .replies
                .front()
                .cloned()
                .unwrap_or_else(|| not_found(request)),
            None => not_found(request),
        }
    }
}

fn not_found(request: &ApiRequest) -> Reply {
    let body = json!({
        "errors": [{
            "error_number": 9003,
            "error": format!("no mock route for {} {}", request.method, request.path),
        }]
    });
    Reply::Response(ApiResponse::json(404, &body))
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(
        &self,
        _ctx: &RequestContext,
        request: ApiRequest,
    ) -> Result<ApiResponse, TransportError> {
        let reply = self.reply_for(&request);
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match reply {
            Reply::Response(response) => Ok(response),
            Reply::Fail(error) => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_queued_replies_then_sticky() {
        let mock = MockTransport::new()
            .on(Method::Get, "/a", 200, json!({"n": 1}))
            .on(Method::Get, "/a", 200, json!({"n": 2}));
        let ctx = RequestContext::new();

        let first = mock.execute(&ctx, ApiRequest::get("/a")).await.unwrap();
        let second = mock.execute(&ctx, ApiRequest::get("/a")).await.unwrap();
        let third = mock.execute(&ctx, ApiRequest::get("/a")).await.unwrap();
        assert_eq!(first.body, br#"{"n":1}"#.to_vec());
        assert_eq!(second.body, br#"{"n":2}"#.to_vec());
        assert_eq!(third.body, second.body);
        assert_eq!(mock.request_count(), 3);
    }

    #[tokio::test]
    async fn test_unmatched_route_is_404() {
        let mock = MockTransport::new();
        let resp = mock
            .execute(&RequestContext::new(), ApiRequest::delete("/missing"))
            .await
            .unwrap();
        assert_eq!(resp.status, 404);
        assert_eq!(mock.last_request().unwrap().method, Method::Delete);
    }

    #[tokio::test]
    async fn test_failure_reply() {
        let mock = MockTransport::new().fail(Method::Get, "/a", TransportError::Timeout);
        let err = mock
            .execute(&RequestContext::new(), ApiRequest::get("/a"))
            .await
            .unwrap_err();
        assert_eq!(err, TransportError::Timeout);
    }
}
