/* Copyright (C) 2024  AlphaKeks <alphakeks@dawn.sh>
 *
 * This library is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This library is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this repository.  If not, see <https://www.gnu.org/licenses/>.
 */

//! Helper functions & types for using Steam as an OpenID 2.0 provider.
//!
//! Steam only speaks a small subset of OpenID 2.0, which is why we don't pull in a general
//! purpose OpenID library. The flow looks like this:
//!
//! 1. a user hits a login endpoint; we turn that request into an [`AuthContext`] and redirect
//!    them to [`AuthContext::login_url()`]
//! 2. the user logs in on Steam's website
//! 3. Steam redirects them back to the URL we originally came from, with a signed assertion
//!    attached as `openid.*` parameters
//! 4. we turn that callback request into another [`AuthContext`] and call
//!    [`AuthContext::verify()`], which sends the signed parameters back to Steam ("dumb mode")
//!    and extracts the user's [`SteamId64`] if Steam confirms them
//!
//! Session management is left to the caller.

/// Steam's OpenID endpoint.
///
/// Users are redirected here for login, and callback payloads are sent here for verification.
pub const LOGIN_URL: &str = "https://steamcommunity.com/openid/login";

/// The OpenID 2.0 namespace.
pub const OPENID_NS: &str = "http://specs.openid.net/auth/2.0";

/// The identifier we send to let Steam pick the identity of whoever logs in.
pub const IDENTIFIER_SELECT: &str = "http://specs.openid.net/auth/2.0/identifier_select";

mod parameters;
pub use parameters::Parameters;

mod context;
pub use context::{AuthContext, ParameterSource, Protocol};

mod login_url;
pub use login_url::login_url;

mod error;
pub use error::{BoxError, ParseSteamIdError, VerifyError};

mod verify;
pub use verify::{SteamId64, MAX_SIGNED_FIELDS};

#[cfg(feature = "reqwest")]
mod http_client;

#[cfg(feature = "reqwest")]
pub use http_client::HttpClient;

#[cfg(feature = "reqwest")]
pub mod profile;
