//! In-memory transport for unit tests

use std::sync::Mutex;

use async_trait::async_trait;
use rwapi_http::{HttpError, StatusCode, Transport, TransportRequest, TransportResponse};

enum Reply {
    Respond(StatusCode, String),
    Fail,
}

/// Records every request and answers each with the same canned reply
pub(crate) struct MockTransport {
    reply: Reply,
    requests: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
    pub(crate) fn ok(body: &str) -> Self {
        Self::status(200, body)
    }

    pub(crate) fn status(status: u16, body: &str) -> Self {
        let status = StatusCode::from_u16(status).unwrap();
        Self {
            reply: Reply::Respond(status, body.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            reply: Reply::Fail,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: TransportRequest) -> rwapi_http::Result<TransportResponse> {
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            Reply::Respond(status, body) => Ok(TransportResponse::new(*status, body.as_bytes())),
            Reply::Fail => Err(HttpError::BuildError("connection refused".to_string())),
        }
    }
}
