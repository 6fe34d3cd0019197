//! In-flight request harness.
//!
//! Each request runs on its own worker thread with an owned
//! [`RequestSnapshot`]. The UI thread polls [`InFlightRequest::poll`] once per
//! frame; results are only read after the worker has published `Finished`.
//! There is no cancellation: a started request runs to completion.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::thread::{self, JoinHandle};

use quire_domain::RequestSnapshot;
use tracing::{debug, warn};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{HttpClient, HttpClientError, HttpResponse};

/// Lifecycle of a request slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum RequestStatus {
    /// Nothing in flight
    #[default]
    Idle = 0,
    /// Worker is running
    Running = 1,
    /// Worker is done; the result is ready to be collected
    Finished = 2,
}

impl RequestStatus {
    const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Running,
            2 => Self::Finished,
            _ => Self::Idle,
        }
    }
}

type Outcome = Result<HttpResponse, HttpClientError>;

/// Publishes `Finished` when the worker exits, including by unwinding.
struct FinishOnDrop(Arc<AtomicU8>);

impl Drop for FinishOnDrop {
    fn drop(&mut self) {
        self.0.store(RequestStatus::Finished as u8, Ordering::Release);
    }
}

/// A request slot owned by the UI, with at most one worker in flight.
#[derive(Debug, Default)]
pub struct InFlightRequest {
    status: Arc<AtomicU8>,
    worker: Option<JoinHandle<Outcome>>,
}

impl InFlightRequest {
    /// Creates an idle slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts `snapshot` on a new worker thread.
    ///
    /// # Errors
    /// Returns `ApplicationError::Internal` if a request is already in flight
    /// or the thread cannot be spawned.
    pub fn start<C: HttpClient>(
        &mut self,
        client: Arc<C>,
        snapshot: RequestSnapshot,
    ) -> ApplicationResult<()> {
        if self.status() != RequestStatus::Idle {
            return Err(ApplicationError::Internal(
                "a request is already in flight".to_string(),
            ));
        }

        self.status
            .store(RequestStatus::Running as u8, Ordering::Release);
        let finish = FinishOnDrop(Arc::clone(&self.status));
        let spawned = thread::Builder::new()
            .name("quire-request".to_string())
            .spawn(move || {
                let _finish = finish;
                debug!(
                    method = %snapshot.request.method,
                    url = %snapshot.request.url,
                    "Request started"
                );
                let outcome = client.execute(&snapshot);
                match &outcome {
                    Ok(response) => debug!(status = response.status, "Request finished"),
                    Err(err) => warn!(error = %err, "Request failed"),
                }
                outcome
            });

        match spawned {
            Ok(handle) => {
                self.worker = Some(handle);
                Ok(())
            }
            Err(err) => {
                self.status.store(RequestStatus::Idle as u8, Ordering::Release);
                Err(ApplicationError::Internal(format!(
                    "failed to spawn request worker: {err}"
                )))
            }
        }
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> RequestStatus {
        RequestStatus::from_u8(self.status.load(Ordering::Acquire))
    }

    /// Collects the result once the worker has finished.
    ///
    /// Returns `None` while idle or running. After a result is returned the
    /// slot is idle again. A worker that panicked is reported as
    /// `ApplicationError::Internal`.
    pub fn poll(&mut self) -> Option<ApplicationResult<HttpResponse>> {
        let exited = self.worker.as_ref().is_some_and(JoinHandle::is_finished);
        if self.status() != RequestStatus::Finished && !exited {
            return None;
        }
        let worker = self.worker.take()?;
        let result = match worker.join() {
            Ok(outcome) => outcome.map_err(ApplicationError::from),
            Err(_) => Err(ApplicationError::Internal(
                "request worker panicked".to_string(),
            )),
        };
        self.status.store(RequestStatus::Idle as u8, Ordering::Release);
        Some(result)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quire_domain::{Auth, Header, Request};
    use std::sync::Mutex;
    use std::sync::mpsc::{self, Receiver, SyncSender};
    use std::time::Duration;

    /// Client that blocks until the test releases it.
    struct GatedClient {
        gate: Mutex<Receiver<()>>,
        seen: Mutex<Vec<RequestSnapshot>>,
    }

    impl GatedClient {
        fn new() -> (Arc<Self>, SyncSender<()>) {
            let (tx, rx) = mpsc::sync_channel(1);
            let client = Arc::new(Self {
                gate: Mutex::new(rx),
                seen: Mutex::new(Vec::new()),
            });
            (client, tx)
        }
    }

    impl HttpClient for GatedClient {
        fn execute(&self, snapshot: &RequestSnapshot) -> Result<HttpResponse, HttpClientError> {
            self.gate.lock().unwrap().recv().unwrap();
            self.seen.lock().unwrap().push(snapshot.clone());
            if snapshot.request.url.contains("fail") {
                return Err(HttpClientError::Connection("refused".to_string()));
            }
            Ok(HttpResponse {
                status: 200,
                headers: vec![Header::new("Content-Type", "text/plain")],
                body: "pong".to_string(),
            })
        }
    }

    struct PanickingClient;

    impl HttpClient for PanickingClient {
        fn execute(&self, _snapshot: &RequestSnapshot) -> Result<HttpResponse, HttpClientError> {
            panic!("transport blew up");
        }
    }

    fn wait_finished(slot: &InFlightRequest) {
        for _ in 0..2500 {
            if slot.status() == RequestStatus::Finished {
                return;
            }
            thread::sleep(Duration::from_millis(2));
        }
        panic!("worker did not finish");
    }

    fn snapshot(url: &str) -> RequestSnapshot {
        RequestSnapshot {
            request: Request::get(url),
            auth: Auth::bearer("t"),
        }
    }

    #[test]
    fn test_poll_returns_response_after_finished() {
        let (client, release) = GatedClient::new();
        let mut slot = InFlightRequest::new();
        assert_eq!(slot.status(), RequestStatus::Idle);

        slot.start(Arc::clone(&client), snapshot("http://h/ping"))
            .unwrap();
        assert_eq!(slot.status(), RequestStatus::Running);
        assert!(slot.poll().is_none());

        release.send(()).unwrap();
        wait_finished(&slot);
        let response = slot.poll().unwrap().unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, "pong");
        assert_eq!(slot.status(), RequestStatus::Idle);
        assert_eq!(client.seen.lock().unwrap()[0].auth.get("token"), Some("t"));
    }

    #[test]
    fn test_second_start_while_running_is_rejected() {
        let (client, release) = GatedClient::new();
        let mut slot = InFlightRequest::new();
        slot.start(Arc::clone(&client), snapshot("http://h/a"))
            .unwrap();

        let second = slot.start(Arc::clone(&client), snapshot("http://h/b"));
        assert!(matches!(second, Err(ApplicationError::Internal(_))));

        release.send(()).unwrap();
        wait_finished(&slot);
        assert!(slot.poll().unwrap().is_ok());
    }

    #[test]
    fn test_transport_error_is_reported() {
        let (client, release) = GatedClient::new();
        let mut slot = InFlightRequest::new();
        slot.start(client, snapshot("http://h/fail")).unwrap();
        release.send(()).unwrap();
        wait_finished(&slot);

        assert!(matches!(
            slot.poll(),
            Some(Err(ApplicationError::Http(HttpClientError::Connection(_))))
        ));
    }

    #[test]
    fn test_panicking_worker_is_reported_and_slot_reusable() {
        let mut slot = InFlightRequest::new();
        slot.start(Arc::new(PanickingClient), snapshot("http://h/boom"))
            .unwrap();
        wait_finished(&slot);

        assert!(matches!(
            slot.poll(),
            Some(Err(ApplicationError::Internal(_)))
        ));
        assert_eq!(slot.status(), RequestStatus::Idle);

        let (client, release) = GatedClient::new();
        slot.start(client, snapshot("http://h/again")).unwrap();
        release.send(()).unwrap();
        wait_finished(&slot);
        assert!(slot.poll().unwrap().is_ok());
    }
}
