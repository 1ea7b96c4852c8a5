use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;

use crate::endpoint::ConstructedRequest;
use crate::error::BoxError;

/// Raw outcome of one executed request: status line plus collected body
/// bytes. The dispatcher decodes the body without looking at the status,
/// so error payloads decode the same way success payloads do.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// The seam between the dispatcher and whatever performs network I/O.
///
/// Any conforming HTTP client satisfies this: take a request, asynchronously
/// deliver either an error or status + body bytes. The dispatcher owns
/// cancellation by dropping the returned future, so implementations must
/// stop work when dropped mid-flight.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ConstructedRequest) -> Result<TransportResponse, BoxError>;
}

/// Default [`Transport`] backed by a shared `reqwest::Client`.
///
/// The client handles connection pooling and TLS; this adapter only maps a
/// [`ConstructedRequest`] onto it and collects the response.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl From<reqwest::Client> for ReqwestTransport {
    fn from(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: ConstructedRequest) -> Result<TransportResponse, BoxError> {
        let mut builder = self.client.request(request.method, request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok(TransportResponse { status, body })
    }
}
