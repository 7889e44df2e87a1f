use std::panic::Location;

use axum::response::{IntoResponse, Response};
use steam_openid::VerifyError;
use steam_openid::profile::ProfileError;

/// The standard error response returned by handlers.
#[derive(Debug)]
pub struct ErrorResponse(ErrorKind);

#[derive(Debug)]
enum ErrorKind {
    Unauthorized,
    MethodNotAllowed,
    FailedToBufferBody,
    BadGateway,
}

impl ErrorResponse {
    pub(crate) fn unauthorized() -> Self {
        Self(ErrorKind::Unauthorized)
    }

    pub(crate) fn method_not_allowed() -> Self {
        Self(ErrorKind::MethodNotAllowed)
    }

    pub(crate) fn failed_to_buffer_body() -> Self {
        Self(ErrorKind::FailedToBufferBody)
    }

    #[track_caller]
    pub(crate) fn bad_gateway(error: &(dyn std::error::Error + 'static)) -> Self {
        tracing::warn!(error, loc = %Location::caller(), "failed to call external service");

        Self(ErrorKind::BadGateway)
    }
}

impl From<VerifyError> for ErrorResponse {
    #[track_caller]
    fn from(error: VerifyError) -> Self {
        match error {
            VerifyError::UnsupportedMethod { method } => {
                tracing::debug!(%method, "unsupported method for OpenID callback");
                ErrorResponse::method_not_allowed()
            },
            VerifyError::Transport(ref source) => ErrorResponse::bad_gateway(&**source),
            error => {
                tracing::debug!(%error, "rejecting OpenID callback");
                ErrorResponse::unauthorized()
            },
        }
    }
}

impl From<ProfileError> for ErrorResponse {
    #[track_caller]
    fn from(error: ProfileError) -> Self {
        match error {
            ProfileError::Http(ref error) => ErrorResponse::bad_gateway(error),
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        match self.0 {
            ErrorKind::Unauthorized => http::StatusCode::UNAUTHORIZED.into_response(),
            ErrorKind::MethodNotAllowed => http::StatusCode::METHOD_NOT_ALLOWED.into_response(),
            ErrorKind::FailedToBufferBody => http::StatusCode::PAYLOAD_TOO_LARGE.into_response(),
            ErrorKind::BadGateway => http::StatusCode::BAD_GATEWAY.into_response(),
        }
    }
}
