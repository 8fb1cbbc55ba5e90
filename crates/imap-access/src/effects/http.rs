use tracing::debug;

use crate::core::{MAX_REDIRECTS, is_redirect};
use crate::data::{Request, Response};
use crate::error::TransportError;

/// Blocking HTTP client abstraction.
///
/// Implementations return every HTTP status as a [`Response`] and must not
/// follow redirects themselves; only connection-level failures (DNS,
/// refused connection, broken body) are errors. Redirect and status policy
/// lives in [`send`].
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - Mock implementations for testing
pub trait HttpClient: Send + Sync {
    fn execute(&self, request: &Request) -> Result<Response, TransportError>;
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    fn execute(&self, request: &Request) -> Result<Response, TransportError> {
        (**self).execute(request)
    }
}

/// Issue `request`, following `307` redirects with the same method, headers
/// and body, and turn any other non-2xx status into [`TransportError::Http`].
pub fn send<C: HttpClient + ?Sized>(client: &C, request: &Request) -> Result<Response, TransportError> {
    let mut current = request.clone();

    for _ in 0..=MAX_REDIRECTS {
        debug!(method = %current.method, url = %current.url, "sending request");
        let response = client.execute(&current)?;

        if is_redirect(response.status) {
            let location = response
                .header("Location")
                .ok_or(TransportError::MissingLocation {
                    status: response.status,
                })?;
            debug!(from = %current.url, to = %location, "following redirect");
            current = current.redirected(location);
            continue;
        }

        if !response.is_success() {
            return Err(TransportError::Http {
                status: response.status,
                reason: response.reason.clone(),
                message: response.text(),
            });
        }
        return Ok(response);
    }

    Err(TransportError::TooManyRedirects {
        count: MAX_REDIRECTS,
    })
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;
    use crate::data::Method;

    /// Production HTTP client implementation using blocking reqwest.
    pub struct ReqwestClient {
        client: reqwest::blocking::Client,
    }

    impl ReqwestClient {
        /// Create a client with automatic redirects disabled.
        pub fn new() -> Result<Self, TransportError> {
            let client = reqwest::blocking::Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .map_err(|e| TransportError::Connection(e.to_string()))?;
            Ok(Self { client })
        }
    }

    impl HttpClient for ReqwestClient {
        fn execute(&self, request: &Request) -> Result<Response, TransportError> {
            let method = match request.method {
                Method::Get => reqwest::Method::GET,
                Method::Put => reqwest::Method::PUT,
            };

            let mut builder = self.client.request(method, &request.url);
            for (key, value) in &request.headers {
                builder = builder.header(key, value);
            }
            if let Some(body) = &request.body {
                builder = builder.body(body.clone());
            }

            let response = builder
                .send()
                .map_err(|e| TransportError::Connection(e.to_string()))?;

            let status = response.status();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
                .collect();
            let body = response
                .bytes()
                .map_err(|e| TransportError::Connection(e.to_string()))?;

            Ok(Response {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                headers,
                body: body.to_vec(),
            })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;
