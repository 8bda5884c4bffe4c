// Shared fixtures: a wiremock server driven from a private tokio runtime so
// the blocking client can run on the plain test thread.

#![allow(dead_code)]

use moltbook_cli::api::ApiClient;
use moltbook_cli::config::Config;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer, Request};

pub const TOKEN: &str = "test_api_key";

pub struct TestServer {
    pub server: MockServer,
    rt: Runtime,
}

impl TestServer {
    pub fn start() -> Self {
        let rt = Runtime::new().expect("tokio runtime");
        let server = rt.block_on(MockServer::start());
        TestServer { server, rt }
    }

    pub fn mount(&self, mock: Mock) {
        self.rt.block_on(mock.mount(&self.server));
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn config(&self) -> Config {
        Config::new(TOKEN)
            .with_base_url(self.uri())
            .with_web_url("https://moltbook.test")
            .with_progress(false)
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.config()).expect("client")
    }

    pub fn client_with_timeout(&self, timeout: Duration) -> ApiClient {
        ApiClient::new(self.config().with_timeout(timeout)).expect("client")
    }

    pub fn requests(&self) -> Vec<Request> {
        self.rt
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }

    pub fn last_request(&self) -> Request {
        self.requests().pop().expect("no request received")
    }
}

pub fn query_of(req: &Request) -> Vec<(String, String)> {
    req.url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

pub fn body_of(req: &Request) -> Value {
    serde_json::from_slice(&req.body).expect("json body")
}

pub fn sample_post() -> Value {
    json!({
        "id": "abc123",
        "title": "Test Post",
        "content": "This is test content",
        "url": "/post/abc123",
        "upvotes": 10,
        "downvotes": 2,
        "comment_count": 5,
        "created_at": "2026-01-30T12:00:00+00:00",
        "author": {"id": "user1", "username": "testuser", "name": "Test User", "karma": 42},
        "submolt": {"name": "general"}
    })
}

pub fn sample_comment() -> Value {
    json!({
        "id": "comment1",
        "content": "Test comment",
        "parent_id": null,
        "upvotes": 3,
        "downvotes": 0,
        "created_at": "2026-01-30T13:00:00+00:00",
        "author": {"id": "user2", "name": "Commenter", "karma": 10},
        "replies": []
    })
}
