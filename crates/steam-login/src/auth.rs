use std::sync::Arc;

use axum::Json;
use axum::body;
use axum::extract::{Request, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{self, Router};
use bytes::Bytes;
use http_body::Body as HttpBody;
use steam_openid::profile::{self, PlayerSummary};
use steam_openid::{AuthContext, BoxError, HttpClient, ParameterSource, Protocol, SteamId64};
use tower_service::Service;

use crate::config::SteamAuthConfig;
use crate::response::ErrorResponse;

/// Steam's callback payloads are a handful of short form fields.
const MAX_CALLBACK_BODY_SIZE: usize = 16 * 1024;

#[derive(Debug, Clone)]
struct AuthState<C> {
    /// Sends `check_authentication` requests to Steam.
    openid_client: C,

    /// Used for Web API requests after a user has been verified.
    http_client: HttpClient,

    config: Arc<SteamAuthConfig>,
}

impl<C> AuthState<C> {
    fn protocol(&self) -> Protocol {
        Protocol::from_tls(self.config.assume_https)
    }
}

/// Mounts `/login`.
///
/// Steam sends users back to the URL they started on, so the same route starts a login and
/// verifies Steam's answer. `openid_client` is used for the latter.
pub fn router<S, C, B>(
    openid_client: C,
    http_client: HttpClient,
    config: impl Into<Arc<SteamAuthConfig>>,
) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    C: Service<http::Request<Bytes>, Response = http::Response<B>>
        + Clone
        + Send
        + Sync
        + 'static,
    C::Error: Into<BoxError>,
    C::Future: Send,
    B: HttpBody + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    let state = AuthState { openid_client, http_client, config: config.into() };

    Router::new()
        .route("/login", routing::any(login::<C, B>))
        .with_state(state)
}

#[derive(Debug, serde::Serialize)]
struct LoginResponse {
    steam_id: SteamId64,
    profile: Option<PlayerSummary>,
}

/// Redirects the user to Steam, or verifies the assertion Steam sent them back with.
///
/// A `GET` request without `openid.mode` is the start of a login. Anything else is treated as
/// Steam's callback.
#[tracing::instrument(
    skip_all,
    fields(method = %request.method(), uri = %request.uri()),
    err(Debug, level = "debug"),
)]
async fn login<C, B>(
    State(state): State<AuthState<C>>,
    request: Request,
) -> Result<Response, ErrorResponse>
where
    C: Service<http::Request<Bytes>, Response = http::Response<B>> + Clone,
    C::Error: Into<BoxError>,
    B: HttpBody,
    B::Error: Into<BoxError>,
{
    let (parts, body) = request.into_parts();
    let body = body::to_bytes(body, MAX_CALLBACK_BODY_SIZE)
        .await
        .map_err(|err| {
            tracing::debug!(%err, "failed to buffer callback body");
            ErrorResponse::failed_to_buffer_body()
        })?;

    let request = http::Request::from_parts(parts, body);
    let cx = AuthContext::from_request(&request, state.protocol());

    if matches!(cx.source(), ParameterSource::Query(_)) && cx.mode().is_none() {
        let login_url = cx.login_url();
        tracing::debug!(%login_url, "redirecting user to Steam");

        return Ok(Redirect::to(login_url.as_str()).into_response());
    }

    let steam_id = cx.verify(state.openid_client.clone()).await?;
    let profile = match state.config.web_api_key.as_deref() {
        Some(web_api_key) => {
            profile::fetch_player_summary(state.http_client.client(), web_api_key, &steam_id)
                .await?
        },
        None => None,
    };

    tracing::info!(%steam_id, "user logged in");

    Ok(Json(LoginResponse { steam_id, profile }).into_response())
}
