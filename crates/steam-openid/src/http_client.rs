use std::future::Future;
use std::pin::Pin;
use std::task::{self, Poll};
use std::time::Duration;

use bytes::Bytes;
use http_body_util::Full;
use tower_service::Service;

/// An HTTP client that can be passed to [`AuthContext::verify()`].
///
/// This is a thin wrapper around [`reqwest::Client`] that makes sure requests to Steam cannot
/// hang forever.
///
/// [`AuthContext::verify()`]: crate::AuthContext::verify
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// The timeout used by [`HttpClient::new()`].
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new() -> reqwest::Result<Self> {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
    }

    /// Creates a client whose requests fail after `timeout`.
    pub fn with_timeout(timeout: Duration) -> reqwest::Result<Self> {
        reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map(|client| Self { client })
    }

    /// The underlying client, for talking to the rest of Steam's Web API.
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

impl From<reqwest::Client> for HttpClient {
    /// Wraps an existing client. Its timeout configuration is used as-is.
    fn from(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Service<http::Request<Bytes>> for HttpClient {
    type Response = http::Response<Full<Bytes>>;
    type Error = reqwest::Error;
    type Future =
        Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn poll_ready(&mut self, _cx: &mut task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: http::Request<Bytes>) -> Self::Future {
        let client = self.client.clone();

        Box::pin(async move {
            let request = reqwest::Request::try_from(request)?;
            let response = client.execute(request).await?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.bytes().await?;

            let mut response = http::Response::new(Full::new(body));
            *response.status_mut() = status;
            *response.headers_mut() = headers;

            Ok(response)
        })
    }
}
