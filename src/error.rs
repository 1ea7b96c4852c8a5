use thiserror::Error;

/// Boxed error produced by a [`Transport`](crate::Transport) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors delivered through the completion path of a dispatch.
///
/// Every variant is terminal for its `send` call; nothing is retried and no
/// error crosses the dispatcher boundary outside the returned `Result`.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The endpoint could not produce a usable request. The transport was
    /// never contacted and no cancellation handle exists.
    #[error("endpoint did not produce a valid URL")]
    InvalidUrl,
    /// The transport failed before a response body was available (timeout,
    /// refused connection, DNS failure, ...). The cause passes through
    /// unchanged.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),
    /// The in-flight request was aborted through its
    /// [`CancelHandle`](crate::CancelHandle).
    #[error("request cancelled")]
    Cancelled,
    /// The response body could not be decoded into the requested type.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}
