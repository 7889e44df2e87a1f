use std::borrow::Cow;
use std::collections::BTreeMap;
use std::future;
use std::str::FromStr;

use bytes::Bytes;
use derive_more::Display;
use http_body::Body as HttpBody;
use http_body_util::BodyExt;
use lazy_regex::{Lazy, Regex, regex};
use tower_service::Service;
use url::form_urlencoded;

use crate::{
    AuthContext,
    BoxError,
    LOGIN_URL,
    OPENID_NS,
    ParameterSource,
    Parameters,
    ParseSteamIdError,
    VerifyError,
};

/// The maximum number of field names we accept in `openid.signed`.
///
/// Steam signs 7 fields; anything far beyond that is not coming from Steam.
pub const MAX_SIGNED_FIELDS: usize = 32;

/// Matches the `openid.claimed_id` URLs Steam hands out.
static CLAIMED_ID_REGEX: &Lazy<Regex> =
    regex!(r"^(http|https)://steamcommunity\.com/openid/id/[0-9]{15,25}$");

static NON_DIGITS_REGEX: &Lazy<Regex> = regex!(r"\D+");

/// A user's 64-bit SteamID, as confirmed by Steam.
///
/// This is kept as the exact digit string Steam sent us.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct SteamId64(String);

impl SteamId64 {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for SteamId64 {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Parses a SteamID that was previously obtained from [`AuthContext::verify()`].
impl FromStr for SteamId64 {
    type Err = ParseSteamIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if (15..=25).contains(&value.len()) && value.bytes().all(|byte| byte.is_ascii_digit()) {
            Ok(Self(value.to_owned()))
        } else {
            Err(ParseSteamIdError)
        }
    }
}

impl AuthContext {
    /// Verifies the OpenID assertion attached to this (callback) request with Steam and
    /// extracts the user's SteamID from it.
    ///
    /// `http_client` is used to send exactly one request to [`LOGIN_URL`]; any timeouts should
    /// be configured on it. Nothing is sent if the parameters are rejected up front.
    #[tracing::instrument(
        skip(self, http_client),
        fields(return_url = self.return_url()),
        ret(Display, level = "debug"),
        err(level = "debug"),
    )]
    pub async fn verify<S, B>(&self, mut http_client: S) -> Result<SteamId64, VerifyError>
    where
        S: Service<http::Request<Bytes>, Response = http::Response<B>>,
        S::Error: Into<BoxError>,
        B: HttpBody,
        B::Error: Into<BoxError>,
    {
        let params = match self.source() {
            ParameterSource::Query(params) | ParameterSource::Form(params) => params,
            ParameterSource::Unsupported(method) => {
                return Err(VerifyError::UnsupportedMethod { method: method.clone() });
            },
        };

        if params.get("openid.mode") != Some("id_res") {
            return Err(VerifyError::InvalidMode);
        }

        if params.get("openid.return_to") != Some(self.return_url()) {
            return Err(VerifyError::ReturnUrlMismatch);
        }

        let payload = check_authentication_payload(params)?;
        let request = http::Request::post(LOGIN_URL)
            .header(http::header::CONTENT_TYPE, mime::APPLICATION_WWW_FORM_URLENCODED.as_ref())
            .body(Bytes::from(payload))
            .map_err(|err| VerifyError::Transport(err.into()))?;

        future::poll_fn(|cx| http_client.poll_ready(cx))
            .await
            .map_err(|err| VerifyError::Transport(err.into()))?;

        let (response, body) = http_client
            .call(request)
            .await
            .map_err(|err| VerifyError::Transport(err.into()))?
            .into_parts();

        let body = body
            .collect()
            .await
            .map_err(|err| VerifyError::Transport(err.into()))?
            .to_bytes();

        let body = String::from_utf8_lossy(&body[..]);

        if !response.status.is_success() {
            tracing::debug!(%body, status = response.status.as_u16(), "Steam returned bad status");
        }

        check_response(&body).inspect_err(|_| {
            tracing::debug!(%body, "Steam did not confirm the payload");
        })?;

        extract_steam_id(params)
    }
}

/// Builds the form we send back to Steam.
///
/// `openid.signed` decides which additional fields get copied over. We only ever read the
/// fields it names, and `openid.mode` is written last so the list can't override it.
fn check_authentication_payload(params: &Parameters) -> Result<String, VerifyError> {
    let signed_fields = params
        .get("openid.signed")
        .unwrap_or_default()
        .split(',')
        .filter(|name| !name.is_empty());

    let count = signed_fields.clone().count();

    if count > MAX_SIGNED_FIELDS {
        return Err(VerifyError::TooManySignedFields { count });
    }

    let mut form = BTreeMap::<Cow<'_, str>, &str>::new();

    for key in ["openid.assoc_handle", "openid.signed", "openid.sig", "openid.ns"] {
        form.insert(Cow::Borrowed(key), params.get(key).unwrap_or_default());
    }

    for name in signed_fields {
        let key = format!("openid.{name}");
        let value = params.get(&key).unwrap_or_default();

        form.insert(Cow::Owned(key), value);
    }

    form.insert(Cow::Borrowed("openid.mode"), "check_authentication");

    Ok(form_urlencoded::Serializer::new(String::new())
        .extend_pairs(form.iter())
        .finish())
}

/// Steam answers with `key:value` lines; the first one is the namespace and the second one
/// says whether the payload is valid.
fn check_response(body: &str) -> Result<(), VerifyError> {
    let mut lines = body.lines();

    if lines.next().and_then(|line| line.strip_prefix("ns:")) != Some(OPENID_NS) {
        return Err(VerifyError::UnexpectedNamespace);
    }

    match lines.next() {
        Some(line) if !line.ends_with("false") => Ok(()),
        _ => Err(VerifyError::ValidationRejected),
    }
}

fn extract_steam_id(params: &Parameters) -> Result<SteamId64, VerifyError> {
    let claimed_id = params.get("openid.claimed_id").unwrap_or_default();

    if !CLAIMED_ID_REGEX.is_match(claimed_id) {
        return Err(VerifyError::MalformedIdentifierUrl);
    }

    Ok(SteamId64(NON_DIGITS_REGEX.replace_all(claimed_id, "").into_owned()))
}
