use std::sync::Arc;

use futures::channel::oneshot;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::endpoint::Endpoint;
use crate::error::DispatchError;
use crate::transport::{ReqwestTransport, Transport};

/// Best-effort abort handle for one in-flight request.
///
/// `cancel` asks the transport task to stop; it carries no guarantee that
/// the remote side never saw the request. A cancelled request completes
/// through the normal callback path with [`DispatchError::Cancelled`] —
/// there is no separate cancellation callback. Once the request has
/// completed the handle is inert.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    /// Requests the in-flight operation to abort.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether cancellation has been requested. Reads the token shared with
    /// the transport task, not a locally cached flag.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Executes [`Endpoint`] descriptions against a [`Transport`] and decodes
/// JSON responses into typed results.
///
/// The dispatcher holds only a shared transport reference and creates no
/// per-call state beyond the request itself, so one instance may be used
/// concurrently from any number of tasks without synchronization. Each
/// `send` is a single attempt: no retries, no backoff, no queuing.
#[derive(Clone)]
pub struct RequestDispatcher {
    transport: Arc<dyn Transport>,
}

impl Default for RequestDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl From<reqwest::Client> for RequestDispatcher {
    fn from(client: reqwest::Client) -> Self {
        Self::with_transport(Arc::new(ReqwestTransport::from(client)))
    }
}

impl RequestDispatcher {
    /// Creates a dispatcher over a default [`ReqwestTransport`].
    pub fn new() -> Self {
        Self::with_transport(Arc::new(ReqwestTransport::new()))
    }

    /// Creates a dispatcher over a caller-provided transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Single-shot awaitable form of [`send_with`](Self::send_with).
    ///
    /// Suspends until the response is available and returns the decoded
    /// value or the failure that ended the attempt; it never panics or
    /// propagates an error outside the `Result`. This form exposes no
    /// cancellation handle — callers that need to abort an in-flight
    /// request use the callback form.
    pub async fn send<T, E>(&self, endpoint: E) -> Result<T, DispatchError>
    where
        T: DeserializeOwned + Send + 'static,
        E: Endpoint + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let _handle = self.send_with(endpoint, move |result: Result<T, DispatchError>| {
            // The receiver may have been dropped; the result has nowhere
            // to go then and is discarded.
            let _ = tx.send(result);
        });
        match rx.await {
            Ok(result) => result,
            // Sender dropped without resolving: the dispatch task was torn
            // down before completion, which only happens on runtime
            // shutdown. Report it as a cancellation.
            Err(oneshot::Canceled) => Err(DispatchError::Cancelled),
        }
    }

    /// Builds a request from `endpoint`, executes it asynchronously, and
    /// delivers the decoded result to `on_complete` exactly once.
    ///
    /// Returns immediately. If the endpoint cannot produce a valid request,
    /// `on_complete` is invoked synchronously with
    /// [`DispatchError::InvalidUrl`] and no handle is returned — nothing was
    /// submitted to the transport, so there is nothing to cancel. Otherwise
    /// the returned [`CancelHandle`] tracks the in-flight request.
    ///
    /// Response bytes always go through the endpoint's decoder, including an
    /// empty body on an empty-success response; a non-optional `T` then
    /// surfaces as [`DispatchError::Decode`].
    ///
    /// Must be called from within a Tokio runtime.
    pub fn send_with<T, E, F>(&self, endpoint: E, on_complete: F) -> Option<CancelHandle>
    where
        T: DeserializeOwned + Send + 'static,
        E: Endpoint + 'static,
        F: FnOnce(Result<T, DispatchError>) + Send + 'static,
    {
        let Some(request) = endpoint.build_request() else {
            log::warn!("endpoint produced no valid request, skipping dispatch");
            on_complete(Err(DispatchError::InvalidUrl));
            return None;
        };

        log::debug!("dispatching {} {}", request.method, request.url);
        let token = CancellationToken::new();
        let task_token = token.clone();
        let transport = Arc::clone(&self.transport);
        tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = task_token.cancelled() => {
                    log::debug!("request cancelled before completion");
                    Err(DispatchError::Cancelled)
                }
                executed = transport.execute(request) => match executed {
                    Ok(response) => {
                        log::debug!(
                            "response {} ({} bytes)",
                            response.status,
                            response.body.len()
                        );
                        endpoint.decode(&response.body).map_err(DispatchError::Decode)
                    }
                    Err(cause) => Err(DispatchError::Transport(cause)),
                },
            };
            on_complete(outcome);
        });

        Some(CancelHandle { token })
    }
}
