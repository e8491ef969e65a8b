// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock HTTP transport for deterministic adapter tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use venice_core::{Credentials, HttpTransport, ProviderResponse, RequestDescriptor, VeniceError};

/// A canned reply for one call.
#[derive(Debug, Clone)]
pub enum MockReply {
    Json(Value),
    Bytes {
        body: Vec<u8>,
        content_type: Option<String>,
    },
    /// Fails with an upstream error carrying this status and message.
    Status(u16, String),
    /// Fails with a transport error.
    Unreachable(String),
}

/// A request the transport received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub credentials: Credentials,
    pub request: RequestDescriptor,
}

/// Replies are popped from a FIFO queue. When the queue is empty the
/// fallback reply is used, or `{}` when none is set.
#[derive(Clone, Default)]
pub struct MockTransport {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    fallback: Option<MockReply>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-loads the reply queue.
    pub fn with_replies(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            ..Self::default()
        }
    }

    /// Answers every call with the same reply.
    pub fn always(reply: MockReply) -> Self {
        Self {
            fallback: Some(reply),
            ..Self::default()
        }
    }

    pub async fn push_reply(&self, reply: MockReply) {
        self.replies.lock().await.push_back(reply);
    }

    /// Every request received so far, in order.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(
        &self,
        credentials: &Credentials,
        request: RequestDescriptor,
    ) -> Result<ProviderResponse, VeniceError> {
        self.requests.lock().await.push(RecordedRequest {
            credentials: credentials.clone(),
            request,
        });

        let reply = self
            .replies
            .lock()
            .await
            .pop_front()
            .or_else(|| self.fallback.clone())
            .unwrap_or_else(|| MockReply::Json(Value::Object(Default::default())));

        match reply {
            MockReply::Json(value) => Ok(ProviderResponse::Json(value)),
            MockReply::Bytes { body, content_type } => {
                Ok(ProviderResponse::Binary { body, content_type })
            }
            MockReply::Status(status, message) => Err(VeniceError::Upstream {
                status: Some(status),
                message,
            }),
            MockReply::Unreachable(message) => Err(VeniceError::Transport {
                message,
                source: None,
            }),
        }
    }
}
