use std::collections::HashMap;

use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Header-name to header-value mapping. Duplicate keys resolve
/// last-write-wins through the map itself.
pub type Headers = HashMap<String, String>;

/// Query-key to query-value mapping.
pub type Params = HashMap<String, String>;

/// A trait describing one logical API call.
///
/// Implementors declare where a request goes (`base_url`, `path`), how it is
/// shaped (`method`, `headers`, `parameters`, `body`) and how its response is
/// read back (`decode`). The trait has no behavior beyond turning that
/// description into a [`ConstructedRequest`]; execution belongs to
/// [`RequestDispatcher`](crate::RequestDispatcher).
///
/// `parameters`, `body` and `decode` carry explicit defaults (no query
/// string, no body, plain JSON decoding) because most endpoints need none of
/// them.
pub trait Endpoint: Send + Sync {
    /// The HTTP method for this endpoint.
    fn method(&self) -> Method;

    /// Scheme + host (+ port) portion of the target.
    fn base_url(&self) -> &str;

    /// Path appended to the base URL, replacing any path component the base
    /// already carries.
    fn path(&self) -> &str;

    /// Headers set on the constructed request.
    fn headers(&self) -> Headers;

    /// Query parameters; `None` means no query string.
    fn parameters(&self) -> Option<Params> {
        None
    }

    /// Request body; `None` means no body. The dispatcher never inspects the
    /// value, it only serializes it.
    fn body(&self) -> Option<Value> {
        None
    }

    /// Decodes raw response bytes into the caller's expected type.
    ///
    /// Defaults to plain `serde_json` decoding; endpoints with custom
    /// date or field conventions override this.
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Builds the wire-level request described by this endpoint.
    ///
    /// Parses `base_url`, overwrites its path component with `path`, and
    /// attaches one percent-encoded query pair per `parameters` entry.
    /// Returns `None` when the base does not parse into a URL with an
    /// authority (empty string, missing scheme, `mailto:`-style bases).
    ///
    /// Pure function of the endpoint's fields: the same endpoint always
    /// yields the same request.
    fn build_request(&self) -> Option<ConstructedRequest> {
        let mut url = Url::parse(self.base_url()).ok()?;
        if url.cannot_be_a_base() {
            return None;
        }
        url.set_path(self.path());
        if let Some(params) = self.parameters() {
            if !params.is_empty() {
                url.query_pairs_mut().extend_pairs(params.iter());
            }
        }
        Some(ConstructedRequest {
            method: self.method(),
            url,
            headers: self.headers(),
            body: self.body(),
        })
    }
}

/// A fully assembled request, built fresh on every send and handed to the
/// transport. Never retained across calls.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Headers,
    pub body: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SearchShows {
        query: Option<String>,
    }

    impl Endpoint for SearchShows {
        fn method(&self) -> Method {
            Method::GET
        }

        fn base_url(&self) -> &str {
            "https://api.example.com"
        }

        fn path(&self) -> &str {
            "/v1/shows"
        }

        fn headers(&self) -> Headers {
            let mut headers = Headers::new();
            headers.insert("Accept".to_string(), "application/json".to_string());
            headers
        }

        fn parameters(&self) -> Option<Params> {
            self.query
                .as_ref()
                .map(|q| Params::from([("q".to_string(), q.clone())]))
        }
    }

    struct BrokenBase {
        base: &'static str,
    }

    impl Endpoint for BrokenBase {
        fn method(&self) -> Method {
            Method::GET
        }

        fn base_url(&self) -> &str {
            self.base
        }

        fn path(&self) -> &str {
            "/x"
        }

        fn headers(&self) -> Headers {
            Headers::new()
        }
    }

    #[test]
    fn assembles_url_with_query() {
        let endpoint = SearchShows {
            query: Some("dune".to_string()),
        };
        let request = endpoint.build_request().unwrap();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.url.as_str(), "https://api.example.com/v1/shows?q=dune");
    }

    #[test]
    fn absent_parameters_mean_no_query_string() {
        let endpoint = SearchShows { query: None };
        let request = endpoint.build_request().unwrap();
        assert_eq!(request.url.as_str(), "https://api.example.com/v1/shows");
        assert_eq!(request.url.query(), None);
    }

    #[test]
    fn path_replaces_base_url_path() {
        struct Rebased;
        impl Endpoint for Rebased {
            fn method(&self) -> Method {
                Method::GET
            }
            fn base_url(&self) -> &str {
                "https://api.example.com/old/prefix"
            }
            fn path(&self) -> &str {
                "/v2/things"
            }
            fn headers(&self) -> Headers {
                Headers::new()
            }
        }
        let request = Rebased.build_request().unwrap();
        assert_eq!(request.url.path(), "/v2/things");
    }

    #[test]
    fn query_values_are_percent_encoded_losslessly() {
        struct Spaced;
        impl Endpoint for Spaced {
            fn method(&self) -> Method {
                Method::GET
            }
            fn base_url(&self) -> &str {
                "https://api.example.com"
            }
            fn path(&self) -> &str {
                "/search"
            }
            fn headers(&self) -> Headers {
                Headers::new()
            }
            fn parameters(&self) -> Option<Params> {
                Some(Params::from([(
                    "q".to_string(),
                    "dune part two & more".to_string(),
                )]))
            }
        }
        let request = Spaced.build_request().unwrap();
        let pairs: Vec<(String, String)> = request
            .url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![("q".to_string(), "dune part two & more".to_string())]
        );
    }

    #[test]
    fn headers_carry_over_to_request() {
        let endpoint = SearchShows { query: None };
        let request = endpoint.build_request().unwrap();
        assert_eq!(
            request.headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn duplicate_header_keys_resolve_last_write_wins() {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "text/plain".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());
        assert_eq!(headers.len(), 1);
        assert_eq!(
            headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn build_request_is_idempotent() {
        let endpoint = SearchShows {
            query: Some("dune".to_string()),
        };
        let first = endpoint.build_request().unwrap();
        let second = endpoint.build_request().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unparseable_bases_yield_none() {
        for base in ["", "not a url", "api.example.com", "mailto:ops@example.com"] {
            let endpoint = BrokenBase { base };
            assert!(endpoint.build_request().is_none(), "base {base:?}");
        }
    }

    #[test]
    fn default_body_and_parameters_are_absent() {
        let endpoint = SearchShows { query: None };
        assert!(endpoint.body().is_none());
        let request = endpoint.build_request().unwrap();
        assert!(request.body.is_none());
    }

    #[test]
    fn default_decoder_is_plain_json() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Show {
            title: String,
        }
        let endpoint = SearchShows { query: None };
        let show: Show = endpoint.decode(br#"{"title":"Dune"}"#).unwrap();
        assert_eq!(
            show,
            Show {
                title: "Dune".to_string()
            }
        );
    }
}
