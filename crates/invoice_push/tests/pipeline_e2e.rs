//! Full run against PostgreSQL and a stub invoice API.
//!
//! Run with:
//!   docker compose -f crates/invoice_push_test_utils/docker/docker-compose.yml up -d
//!   cargo test -p invoice_push --features docker-tests

#![cfg(feature = "docker-tests")]

mod support;

use invoice_push_test_utils::{PostgresTestGuard, StubResponse, StubServer, TestPgPool};
use support::{run_cli, stderr, write_config, ConfigValues};
use tempfile::TempDir;

/// Login succeeds; INV-2 is rejected with 500, every other push accepted.
fn invoice_api() -> StubServer {
    StubServer::start(|req| match (req.path(), req.query()) {
        ("/login", _) => StubResponse::json(200, r#"{"access_token":"abc123"}"#),
        ("/push", Some("invoice_number=INV-2")) => StubResponse::json(500, r#"{"error":"boom"}"#),
        ("/push", _) => StubResponse::empty(200),
        _ => StubResponse::empty(404),
    })
}

async fn seeded_schema(pool: &TestPgPool, rows: &str) -> PostgresTestGuard {
    let guard = PostgresTestGuard::new(pool.pool.clone()).await.unwrap();
    guard
        .execute("CREATE TABLE invoice (number TEXT NOT NULL, status INTEGER NOT NULL)")
        .await
        .unwrap();
    if !rows.is_empty() {
        guard
            .execute(&format!("INSERT INTO invoice (number, status) VALUES {}", rows))
            .await
            .unwrap();
    }
    guard
}

fn run_against(server: &StubServer, pool: &TestPgPool, guard: &PostgresTestGuard) -> std::process::Output {
    let tmp = TempDir::new().unwrap();
    let login_url = server.url("/login");
    let push_url = server.url("/push");
    let config = write_config(
        tmp.path(),
        &ConfigValues {
            login_url: &login_url,
            push_url: &push_url,
            db_host: &pool.config.host,
            db_port: pool.config.port,
            db_user: &pool.config.username,
            db_password: &pool.config.password,
            db_name: &pool.config.database,
            db_schema: Some(guard.schema_name()),
        },
    );
    let config_arg = config.to_string_lossy().to_string();
    run_cli(&["--config", &config_arg], tmp.path())
}

#[tokio::test]
async fn push_failure_is_logged_and_run_exits_zero() {
    let pool = TestPgPool::new().await.unwrap();
    let guard = seeded_schema(&pool, "('INV-1', 1), ('INV-PAID', 2), ('INV-2', 1)").await;
    let server = invoice_api();

    let output = run_against(&server, &pool, &guard);
    let err = stderr(&output);

    assert_eq!(output.status.code(), Some(0), "stderr:\n{}", err);
    assert!(err.contains("Successfully pushed invoice"));
    assert!(err.contains("Failed to push invoice"));
    assert!(err.contains("INV-2"));
    assert!(err.contains("500"));

    let targets: Vec<String> = server.requests().into_iter().map(|r| r.target).collect();
    assert_eq!(
        targets,
        vec![
            "/login",
            "/push?invoice_number=INV-1",
            "/push?invoice_number=INV-2",
        ]
    );
    assert!(server.requests()[1..]
        .iter()
        .all(|r| r.method == "POST" && r.header("authorization") == Some("Bearer abc123")));

    guard.cleanup().await.unwrap();
}

#[tokio::test]
async fn no_pending_invoices_makes_no_push_calls() {
    let pool = TestPgPool::new().await.unwrap();
    let guard = seeded_schema(&pool, "('INV-PAID', 2)").await;
    let server = invoice_api();

    let output = run_against(&server, &pool, &guard);

    assert_eq!(output.status.code(), Some(0), "stderr:\n{}", stderr(&output));
    assert!(!stderr(&output).contains("pushed invoice"));
    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path(), "/login");

    guard.cleanup().await.unwrap();
}

#[tokio::test]
async fn second_run_pushes_the_same_invoices_again() {
    let pool = TestPgPool::new().await.unwrap();
    let guard = seeded_schema(&pool, "('INV-1', 1)").await;
    let server = invoice_api();

    assert_eq!(run_against(&server, &pool, &guard).status.code(), Some(0));
    assert_eq!(run_against(&server, &pool, &guard).status.code(), Some(0));

    let pushes = server
        .requests()
        .into_iter()
        .filter(|r| r.path() == "/push")
        .count();
    assert_eq!(pushes, 2);

    guard.cleanup().await.unwrap();
}
