//! Per-invoice push loop.
//!
//! Delivery is best-effort: every invoice gets exactly one attempt per
//! dispatch, failures are logged and skipped, and nothing is collected.

use invoice_push_api::{ApiClient, PushError, SessionToken};
use invoice_push_db::Invoice;
use tracing::{error, info};

/// Pushes invoices with one session token.
///
/// Built from the token returned by login, so no push can happen before
/// authentication succeeded.
pub struct Dispatcher<'a> {
    client: &'a ApiClient,
    token: SessionToken,
}

impl<'a> Dispatcher<'a> {
    pub fn new(client: &'a ApiClient, token: SessionToken) -> Self {
        Self { client, token }
    }

    /// One authenticated push. No dedup: calling twice pushes twice.
    pub async fn push(&self, invoice: &Invoice) -> Result<(), PushError> {
        self.client
            .push_invoice(&self.token, &invoice.invoice_id)
            .await
    }

    /// Push every invoice in order, never stopping on a failure.
    pub async fn dispatch(&self, invoices: &[Invoice]) {
        for invoice in invoices {
            match self.push(invoice).await {
                Ok(()) => {
                    info!(invoice_id = %invoice.invoice_id, "Successfully pushed invoice");
                }
                Err(e) => {
                    error!(invoice_id = %invoice.invoice_id, error = %e, "Failed to push invoice");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoice_push_api::ApiSettings;
    use invoice_push_test_utils::{StubResponse, StubServer};
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    /// Collects formatted log output for assertions.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn client_for(server: &StubServer) -> ApiClient {
        ApiClient::new(ApiSettings {
            login_url: server.url("/login"),
            push_url: server.url("/push"),
            username: "ops@example.com".to_string(),
            password: "hunter2".to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    /// INV-2 is rejected with 500, everything else accepted.
    fn flaky_server() -> StubServer {
        StubServer::start(|req| match req.query() {
            Some("invoice_number=INV-2") => StubResponse::json(500, r#"{"error":"boom"}"#),
            _ => StubResponse::empty(200),
        })
    }

    fn invoices(ids: &[&str]) -> Vec<Invoice> {
        ids.iter().map(|id| Invoice::new(*id)).collect()
    }

    #[tokio::test]
    async fn test_dispatch_continues_past_failure() {
        let server = flaky_server();
        let client = client_for(&server);
        let dispatcher = Dispatcher::new(&client, SessionToken::new("abc123"));

        dispatcher
            .dispatch(&invoices(&["INV-1", "INV-2", "INV-3"]))
            .await;

        let targets: Vec<String> = server.requests().into_iter().map(|r| r.target).collect();
        assert_eq!(
            targets,
            vec![
                "/push?invoice_number=INV-1",
                "/push?invoice_number=INV-2",
                "/push?invoice_number=INV-3",
            ]
        );
        assert!(server
            .requests()
            .iter()
            .all(|r| r.header("authorization") == Some("Bearer abc123")));
    }

    #[tokio::test]
    async fn test_dispatch_logs_each_outcome() {
        let buffer = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let server = flaky_server();
        let client = client_for(&server);
        let dispatcher = Dispatcher::new(&client, SessionToken::new("abc123"));
        dispatcher.dispatch(&invoices(&["INV-1", "INV-2"])).await;

        let logs = buffer.contents();
        let success = logs
            .lines()
            .find(|l| l.contains("Successfully pushed invoice"))
            .unwrap_or_else(|| panic!("no success line in:\n{}", logs));
        assert!(success.contains("INFO"), "{}", success);
        assert!(success.contains("invoice_id=INV-1"), "{}", success);

        let failure = logs
            .lines()
            .find(|l| l.contains("Failed to push invoice"))
            .unwrap_or_else(|| panic!("no failure line in:\n{}", logs));
        assert!(failure.contains("ERROR"), "{}", failure);
        assert!(failure.contains("invoice_id=INV-2"), "{}", failure);
        assert!(failure.contains("500"), "{}", failure);
        assert!(!logs.contains("abc123"));
    }

    #[tokio::test]
    async fn test_push_reports_per_invoice_outcome() {
        let server = flaky_server();
        let client = client_for(&server);
        let dispatcher = Dispatcher::new(&client, SessionToken::new("abc123"));

        assert!(dispatcher.push(&Invoice::new("INV-1")).await.is_ok());

        let err = dispatcher.push(&Invoice::new("INV-2")).await.unwrap_err();
        assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
    }

    #[tokio::test]
    async fn test_repeated_dispatch_pushes_again() {
        let server = StubServer::always(StubResponse::empty(200));
        let client = client_for(&server);
        let dispatcher = Dispatcher::new(&client, SessionToken::new("abc123"));
        let batch = invoices(&["INV-1"]);

        dispatcher.dispatch(&batch).await;
        dispatcher.dispatch(&batch).await;

        assert_eq!(server.request_count(), 2);
    }

    #[tokio::test]
    async fn test_empty_batch_makes_no_calls() {
        let server = StubServer::always(StubResponse::empty(200));
        let client = client_for(&server);
        let dispatcher = Dispatcher::new(&client, SessionToken::new("abc123"));

        dispatcher.dispatch(&[]).await;

        assert_eq!(server.request_count(), 0);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_does_not_abort() {
        let client = ApiClient::new(ApiSettings {
            login_url: "http://127.0.0.1:1/login".to_string(),
            push_url: "http://127.0.0.1:1/push".to_string(),
            username: "u".to_string(),
            password: "p".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        let dispatcher = Dispatcher::new(&client, SessionToken::new("abc123"));

        // Returns normally even though every push fails.
        dispatcher.dispatch(&invoices(&["INV-1", "INV-2"])).await;
    }
}
