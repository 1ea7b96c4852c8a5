//! Declarative HTTP endpoints with a typed, cancellable JSON dispatcher.
//!
//! # Overview
//! An [`Endpoint`] describes one logical API call — method, base URL, path,
//! headers, optional query parameters and body — and deterministically
//! builds the wire-level request for it. A [`RequestDispatcher`] executes
//! that request against a pluggable [`Transport`] (backed by `reqwest` by
//! default), decodes the JSON response into the caller's type, and delivers
//! the result either through an awaitable or through a callback paired with
//! a [`CancelHandle`].
//!
//! All failures arrive as [`DispatchError`] values inside the returned
//! `Result`; nothing is retried and no error escapes the completion path.
//!
//! # Example
//! ```no_run
//! use std::collections::HashMap;
//!
//! use http_dispatch::{Endpoint, Headers, Params, RequestDispatcher};
//! use reqwest::Method;
//! use serde::Deserialize;
//!
//! struct SearchShows {
//!     query: String,
//! }
//!
//! impl Endpoint for SearchShows {
//!     fn method(&self) -> Method {
//!         Method::GET
//!     }
//!     fn base_url(&self) -> &str {
//!         "https://api.example.com"
//!     }
//!     fn path(&self) -> &str {
//!         "/v1/shows"
//!     }
//!     fn headers(&self) -> Headers {
//!         HashMap::new()
//!     }
//!     fn parameters(&self) -> Option<Params> {
//!         Some(HashMap::from([("q".to_string(), self.query.clone())]))
//!     }
//! }
//!
//! #[derive(Deserialize)]
//! struct ShowPage {
//!     total: u32,
//! }
//!
//! # async fn run() {
//! let dispatcher = RequestDispatcher::new();
//! let page: Result<ShowPage, _> = dispatcher
//!     .send(SearchShows {
//!         query: "dune".to_string(),
//!     })
//!     .await;
//! # }
//! ```

pub mod dispatcher;
pub mod endpoint;
pub mod error;
pub mod transport;

pub use dispatcher::{CancelHandle, RequestDispatcher};
pub use endpoint::{ConstructedRequest, Endpoint, Headers, Params};
pub use error::{BoxError, DispatchError};
pub use transport::{ReqwestTransport, Transport, TransportResponse};
