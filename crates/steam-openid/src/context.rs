use http::Method;

use crate::Parameters;

/// The transport a request arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    pub const fn from_tls(is_tls: bool) -> Self {
        if is_tls {
            Self::Https
        } else {
            Self::Http
        }
    }

    /// The scheme prefix used when building URLs, e.g. `https://`.
    pub const fn as_prefix(self) -> &'static str {
        match self {
            Self::Http => "http://",
            Self::Https => "https://",
        }
    }
}

/// Where the parameters of a request came from.
#[derive(Debug, Clone)]
pub enum ParameterSource {
    /// A `GET` request's query string.
    Query(Parameters),

    /// A `POST` request's form-encoded body.
    Form(Parameters),

    /// Any other method. Requests like these carry no parameters we look at.
    Unsupported(Method),
}

impl ParameterSource {
    /// Picks the parameter source based on the request method.
    pub fn from_method(method: &Method, query: Option<&str>, body: &[u8]) -> Self {
        if *method == Method::GET {
            Self::Query(
                query
                    .map(|query| Parameters::from_urlencoded(query.as_bytes()))
                    .unwrap_or_default(),
            )
        } else if *method == Method::POST {
            Self::Form(Parameters::from_urlencoded(body))
        } else {
            Self::Unsupported(method.clone())
        }
    }

    pub fn parameters(&self) -> Option<&Parameters> {
        match self {
            Self::Query(params) | Self::Form(params) => Some(params),
            Self::Unsupported(_) => None,
        }
    }
}

/// Everything we need to know about an incoming request to either start a login or verify
/// Steam's callback.
///
/// Build one per request; it is never mutated afterwards.
#[derive(Debug, Clone)]
pub struct AuthContext {
    realm: String,
    return_url: String,
    source: ParameterSource,
}

impl AuthContext {
    /// Creates a new [`AuthContext`].
    ///
    /// `request_uri` is the raw path + query of the current request. Everything from the
    /// separator in front of the first `openid` onwards is dropped, so a callback request
    /// computes the same return URL as the login request that preceded it.
    pub fn new(protocol: Protocol, host: &str, request_uri: &str, source: ParameterSource) -> Self {
        let realm = format!("{}{host}", protocol.as_prefix());
        let return_url = format!("{realm}{}", strip_openid_segment(request_uri));

        Self { realm, return_url, source }
    }

    /// Adapts an incoming HTTP request.
    ///
    /// The host is taken from the `Host` header, falling back to the request URI's authority.
    /// Whether the request arrived over TLS is something only the server knows, so the caller
    /// has to tell us.
    pub fn from_request<B>(request: &http::Request<B>, protocol: Protocol) -> Self
    where
        B: AsRef<[u8]>,
    {
        let uri = request.uri();
        let host = request
            .headers()
            .get(http::header::HOST)
            .and_then(|value| value.to_str().ok())
            .or_else(|| uri.authority().map(|authority| authority.as_str()))
            .unwrap_or_default();

        let request_uri = uri
            .path_and_query()
            .map_or("/", |path_and_query| path_and_query.as_str());

        let source =
            ParameterSource::from_method(request.method(), uri.query(), request.body().as_ref());

        Self::new(protocol, host, request_uri, source)
    }

    /// The relying party's trust root, e.g. `https://example.com`.
    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// The URL Steam should send the user back to.
    pub fn return_url(&self) -> &str {
        &self.return_url
    }

    pub fn source(&self) -> &ParameterSource {
        &self.source
    }

    /// The request's parameters, if it was a `GET` or `POST` request.
    pub fn parameters(&self) -> Option<&Parameters> {
        self.source.parameters()
    }

    /// The `openid.mode` parameter, if present.
    pub fn mode(&self) -> Option<&str> {
        self.parameters()?.get("openid.mode")
    }
}

fn strip_openid_segment(request_uri: &str) -> &str {
    let Some(idx) = request_uri.find("openid") else {
        return request_uri;
    };

    let end = request_uri
        .get(..idx)
        .and_then(|head| head.char_indices().next_back())
        .map_or(0, |(separator, _)| separator);

    request_uri.get(..end).unwrap_or_default()
}
