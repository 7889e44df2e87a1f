use http::Method;
use thiserror::Error;

/// A type-erased error, used for whatever the HTTP client fails with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The ways verifying a callback can fail.
///
/// Only [`VerifyError::Transport`] is worth retrying; every other variant is a deterministic
/// function of the callback's parameters.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The callback request was neither `GET` nor `POST`, so there are no parameters to verify.
    #[error("cannot read OpenID parameters from a {method} request")]
    UnsupportedMethod { method: Method },

    #[error("`openid.mode` must be `id_res`")]
    InvalidMode,

    /// `openid.return_to` does not match the URL of the current request.
    #[error("`openid.return_to` does not match the current request")]
    ReturnUrlMismatch,

    #[error(
        "`openid.signed` lists {count} fields (at most {max} are allowed)",
        max = crate::MAX_SIGNED_FIELDS
    )]
    TooManySignedFields { count: usize },

    /// Sending the verification request to Steam, or reading its response, failed.
    #[error("failed to make HTTP request to Steam")]
    Transport(#[source] BoxError),

    #[error("Steam responded with an unexpected OpenID namespace")]
    UnexpectedNamespace,

    /// Steam says the assertion is invalid.
    #[error("Steam rejected the OpenID payload")]
    ValidationRejected,

    #[error("`openid.claimed_id` is not a Steam community ID URL")]
    MalformedIdentifierUrl,
}

impl VerifyError {
    /// Whether retrying the same verification could produce a different outcome.
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Returned when parsing a [`SteamId64`] from a string fails.
///
/// [`SteamId64`]: crate::SteamId64
#[derive(Debug, Clone, Copy, Error)]
#[error("a SteamID must consist of 15 to 25 ASCII digits")]
pub struct ParseSteamIdError;
