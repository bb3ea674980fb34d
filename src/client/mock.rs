//! Scripted transport for testing
//!
//! Register replies per method and path, run the code under test, then
//! inspect the captured requests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Method;

use super::{ApiRequest, RawResponse, Transport};
use crate::error::{ApiError, Result};

/// Reply to hand out for a registered route
#[derive(Debug, Clone)]
enum MockReply {
    Response(RawResponse),
    TransportError(String),
}

/// Mock transport for testing.
///
/// Replies registered for the same route are handed out in order; the last
/// one keeps repeating. A request with no registered route fails with a
/// transport error naming it.
///
/// # Example
/// ```ignore
/// let mock = Arc::new(
///     MockTransport::new().on(Method::GET, "/v1/organization/acme/app", 200, "[]"),
/// );
/// let client = ManagerClient::new(mock.clone());
/// client.list_apps("acme").await?;
/// assert_eq!(mock.requests().len(), 1);
/// ```
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<MockReply>>>,
    captured: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with `status` and `body`.
    pub fn on(self, method: Method, path: &str, status: u16, body: &str) -> Self {
        self.push(method, path, MockReply::Response(RawResponse::new(status, body)))
    }

    /// Fail `method path` without a response.
    pub fn fail(self, method: Method, path: &str, message: &str) -> Self {
        self.push(method, path, MockReply::TransportError(message.to_string()))
    }

    fn push(self, method: Method, path: &str, reply: MockReply) -> Self {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    /// All requests sent so far, in order
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.captured.lock().unwrap().clone()
    }

    /// Number of requests sent to `method path`
    pub fn count(&self, method: &Method, path: &str) -> usize {
        self.captured
            .lock()
            .unwrap()
            .iter()
            .filter(|r| &r.method == method && r.path == path)
            .count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        let key = (request.method.clone(), request.path.clone());
        self.captured.lock().unwrap().push(request);

        let reply = {
            let mut routes = self.routes.lock().unwrap();
            match routes.get_mut(&key) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match reply {
            Some(MockReply::Response(resp)) => Ok(resp),
            Some(MockReply::TransportError(message)) => Err(ApiError::Transport(message).into()),
            None => Err(ApiError::Transport(format!("no mock registered for {} {}", key.0, key.1)).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_in_order_then_repeat_last() {
        let mock = MockTransport::new()
            .on(Method::GET, "/x", 500, "")
            .on(Method::GET, "/x", 200, "ok");

        assert_eq!(mock.send(ApiRequest::get("/x")).await.unwrap().status, 500);
        assert_eq!(mock.send(ApiRequest::get("/x")).await.unwrap().status, 200);
        assert_eq!(mock.send(ApiRequest::get("/x")).await.unwrap().status, 200);
        assert_eq!(mock.count(&Method::GET, "/x"), 3);
    }

    #[tokio::test]
    async fn test_unregistered_route_is_transport_error() {
        let mock = MockTransport::new();
        let err = mock.send(ApiRequest::delete("/nope")).await.unwrap_err();
        assert!(err.to_string().contains("DELETE /nope"));
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_fail_route() {
        let mock = MockTransport::new().fail(Method::GET, "/x", "connection refused");
        let err = mock.send(ApiRequest::get("/x")).await.unwrap_err();
        assert_eq!(err.to_string(), "connection refused");
    }
}
