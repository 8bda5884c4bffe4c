// End-to-end runs of the built binary, checking exit codes and which
// stream each message lands on.

mod common;

use common::TestServer;
use serde_json::json;
use std::io::Write;
use std::net::TcpListener;
use std::process::{Command, Output};
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn credentials() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", common::TOKEN).unwrap();
    file
}

fn moltbook(api_url: &str, creds: &NamedTempFile, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_moltbook"))
        .args(args)
        .env("MOLTBOOK_API_URL", api_url)
        .env("MOLTBOOK_CREDENTIALS", creds.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("run moltbook")
}

fn stdout(o: &Output) -> String {
    String::from_utf8_lossy(&o.stdout).into_owned()
}

fn stderr(o: &Output) -> String {
    String::from_utf8_lossy(&o.stderr).into_owned()
}

#[test]
fn empty_feed_exits_zero() {
    let srv = TestServer::start();
    srv.mount(
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"posts": []}))),
    );
    let creds = credentials();

    let out = moltbook(&srv.uri(), &creds, &["feed"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "No posts found\n");
}

#[test]
fn failure_envelope_exits_one_with_details_on_stderr() {
    let srv = TestServer::start();
    srv.mount(Mock::given(method("POST")).and(path("/posts")).respond_with(
        ResponseTemplate::new(200).set_body_json(json!({
            "success": false, "error": "E", "hint": "H", "retry_after_minutes": 5
        })),
    ));
    let creds = credentials();

    let out = moltbook(&srv.uri(), &creds, &["create", "--title", "t", "--content", "c"]);
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("Error: E"));
    assert!(err.contains("Hint: H"));
    assert!(err.contains("Retry in: 5 minutes"));
    assert!(stdout(&out).is_empty());
}

#[test]
fn unauthorized_exits_one() {
    let srv = TestServer::start();
    srv.mount(Mock::given(path("/posts")).respond_with(ResponseTemplate::new(401)));
    let creds = credentials();

    let out = moltbook(&srv.uri(), &creds, &["feed"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Authentication failed - check your API key"));
}

#[test]
fn missing_content_is_a_usage_error_without_network() {
    let srv = TestServer::start();
    let creds = credentials();

    let out = moltbook(&srv.uri(), &creds, &["create", "--title", "Only Title"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("--content"));
    assert!(srv.requests().is_empty());
}

#[test]
fn missing_credentials_fail_before_network() {
    let srv = TestServer::start();
    let dir = tempfile::tempdir().unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_moltbook"))
        .arg("feed")
        .env("MOLTBOOK_API_URL", srv.uri())
        .env("MOLTBOOK_CREDENTIALS", dir.path().join("absent"))
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("credentials file not found"));
    assert!(err.contains("Create a .credentials file"));
    assert!(srv.requests().is_empty());
}

#[test]
fn refused_connection_exits_one() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let creds = credentials();

    let out = moltbook(&format!("http://127.0.0.1:{}", port), &creds, &["feed"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Could not connect to 127.0.0.1"));
}
