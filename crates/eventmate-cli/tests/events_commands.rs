//! `eventmate events ...` against a mock Event API.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a temp EVENTMATE_HOME directory for test isolation.
fn temp_home() -> TempDir {
    TempDir::new().expect("create temp eventmate home")
}

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn sample_events() -> serde_json::Value {
    json!([
        {
            "_id": "a1",
            "name": "Rust Meetup",
            "date": "2024-05-12T12:00:00.000Z",
            "time": "18:00",
            "place": "Hall A",
            "slot": 3,
            "description": "Talks and pizza"
        },
        {
            "_id": "b2",
            "name": "Hackathon",
            "date": "2024-06-01",
            "time": "09:00",
            "place": "Lab 3",
            "slot": 0,
            "description": "24 hours"
        }
    ])
}

async fn mount_list(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_events_list_prints_table() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;
    mount_list(&server, sample_events()).await;

    cargo_bin_cmd!("eventmate")
        .env("EVENTMATE_HOME", home.path())
        .env("EVENTMATE_API_URL", server.uri())
        .env("TZ", "UTC")
        .args(["events", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rust Meetup"))
        .stdout(predicate::str::contains("5/12/2024"))
        .stdout(predicate::str::contains("Hall A"))
        .stdout(predicate::str::contains("Hackathon"))
        .stdout(predicate::str::contains("6/1/2024"));
}

#[tokio::test]
async fn test_api_url_flag_beats_env() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;
    mount_list(&server, sample_events()).await;

    cargo_bin_cmd!("eventmate")
        .env("EVENTMATE_HOME", home.path())
        .env("EVENTMATE_API_URL", "http://127.0.0.1:1")
        .args(["--api-url", &server.uri(), "events", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rust Meetup"));
}

#[tokio::test]
async fn test_api_url_env_beats_config_file() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    fs::write(home.path().join("config.toml"), "api_url = \"http://127.0.0.1:1\"\n").unwrap();
    let server = MockServer::start().await;
    mount_list(&server, sample_events()).await;

    cargo_bin_cmd!("eventmate")
        .env("EVENTMATE_HOME", home.path())
        .env("EVENTMATE_API_URL", server.uri())
        .args(["events", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rust Meetup"));
}

#[tokio::test]
async fn test_api_url_from_config_file() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;
    mount_list(&server, sample_events()).await;
    fs::write(
        home.path().join("config.toml"),
        format!("api_url = \"{}\"\n", server.uri()),
    )
    .unwrap();

    cargo_bin_cmd!("eventmate")
        .env("EVENTMATE_HOME", home.path())
        .env_remove("EVENTMATE_API_URL")
        .args(["events", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hackathon"));
}

#[tokio::test]
async fn test_events_list_object_body_is_unexpected_format() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;
    mount_list(&server, json!({"events": []})).await;

    cargo_bin_cmd!("eventmate")
        .env("EVENTMATE_HOME", home.path())
        .env("EVENTMATE_API_URL", server.uri())
        .args(["events", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unexpected data format"));
}

#[tokio::test]
async fn test_events_list_server_error_is_fetch_failure() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    cargo_bin_cmd!("eventmate")
        .env("EVENTMATE_HOME", home.path())
        .env("EVENTMATE_API_URL", server.uri())
        .args(["events", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to fetch events"));
}

#[tokio::test]
async fn test_events_show_prints_description() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;
    mount_list(&server, sample_events()).await;

    cargo_bin_cmd!("eventmate")
        .env("EVENTMATE_HOME", home.path())
        .env("EVENTMATE_API_URL", server.uri())
        .args(["events", "show", "a1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rust Meetup"))
        .stdout(predicate::str::contains("Talks and pizza"));
}

#[tokio::test]
async fn test_events_join_sends_decremented_slot() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;
    mount_list(&server, sample_events()).await;
    Mock::given(method("PUT"))
        .and(path("/api/events/a1"))
        .and(body_json(json!({"slot": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("eventmate")
        .env("EVENTMATE_HOME", home.path())
        .env("EVENTMATE_API_URL", server.uri())
        .args(["events", "join", "a1"])
        .assert()
        .success()
        .stdout(predicate::eq("/enroll/a1\n"))
        .stderr(predicate::str::contains("Warning").not());
}

#[tokio::test]
async fn test_events_join_failed_update_still_enrolls() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;
    mount_list(&server, sample_events()).await;
    Mock::given(method("PUT"))
        .and(path("/api/events/a1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("eventmate")
        .env("EVENTMATE_HOME", home.path())
        .env("EVENTMATE_API_URL", server.uri())
        .args(["events", "join", "a1"])
        .assert()
        .success()
        .stdout(predicate::eq("/enroll/a1\n"))
        .stderr(predicate::str::contains("not confirmed"));
}

#[tokio::test]
async fn test_events_join_full_event_sends_nothing() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;
    mount_list(&server, sample_events()).await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    cargo_bin_cmd!("eventmate")
        .env("EVENTMATE_HOME", home.path())
        .env("EVENTMATE_API_URL", server.uri())
        .args(["events", "join", "b2"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Hackathon has no slots left"));
}

#[tokio::test]
async fn test_events_join_unknown_id() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;
    mount_list(&server, sample_events()).await;

    cargo_bin_cmd!("eventmate")
        .env("EVENTMATE_HOME", home.path())
        .env("EVENTMATE_API_URL", server.uri())
        .args(["events", "join", "zz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No event with id 'zz'"));
}
