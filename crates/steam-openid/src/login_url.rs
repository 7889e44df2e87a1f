use url::Url;

use crate::{AuthContext, IDENTIFIER_SELECT, LOGIN_URL, OPENID_NS};

/// Constructs a URL for OpenID 2.0 login with Steam.
///
/// Steam will redirect the user to [`AuthContext::return_url()`] after the login process is
/// complete. Parameters are always emitted in this order:
///
/// 1. `openid.claimed_id`
/// 2. `openid.identity`
/// 3. `openid.mode`
/// 4. `openid.ns`
/// 5. `openid.realm`
/// 6. `openid.return_to`
#[tracing::instrument(
    level = "trace",
    skip(cx),
    fields(realm = cx.realm(), return_to = cx.return_url()),
    ret(Display, level = "debug"),
)]
pub fn login_url(cx: &AuthContext) -> Url {
    let mut url = Url::parse(LOGIN_URL).expect("hard-coded URL should be valid");

    url.query_pairs_mut()
        .append_pair("openid.claimed_id", IDENTIFIER_SELECT)
        .append_pair("openid.identity", IDENTIFIER_SELECT)
        .append_pair("openid.mode", "checkid_setup")
        .append_pair("openid.ns", OPENID_NS)
        .append_pair("openid.realm", cx.realm())
        .append_pair("openid.return_to", cx.return_url());

    url
}

impl AuthContext {
    /// See [`login_url()`].
    pub fn login_url(&self) -> Url {
        login_url(self)
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::Protocol;

    fn context() -> AuthContext {
        let request = http::Request::get("/auth/login?next=%2Fhome")
            .header(http::header::HOST, "example.com:3000")
            .body(Bytes::new())
            .unwrap();

        AuthContext::from_request(&request, Protocol::Https)
    }

    #[test]
    fn points_at_steam() {
        let url = context().login_url();

        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("steamcommunity.com"));
        assert_eq!(url.path(), "/openid/login");
    }

    #[test]
    fn contains_every_parameter_once() {
        let url = context().login_url();
        let pairs = url.query_pairs().collect::<Vec<_>>();
        let keys = pairs.iter().map(|(key, _)| key.as_ref()).collect::<Vec<_>>();

        assert_eq!(keys, [
            "openid.claimed_id",
            "openid.identity",
            "openid.mode",
            "openid.ns",
            "openid.realm",
            "openid.return_to",
        ]);

        let values = pairs.iter().map(|(_, value)| value.as_ref()).collect::<Vec<_>>();

        assert_eq!(values, [
            IDENTIFIER_SELECT,
            IDENTIFIER_SELECT,
            "checkid_setup",
            OPENID_NS,
            "https://example.com:3000",
            "https://example.com:3000/auth/login?next=%2Fhome",
        ]);
    }

    #[test]
    fn values_are_percent_encoded() {
        let url = context().login_url();
        let query = url.query().unwrap();

        assert!(query.contains("openid.realm=https%3A%2F%2Fexample.com%3A3000"));
        assert!(!query.contains("next=%2Fhome&"));
    }

    #[test]
    fn is_deterministic() {
        let cx = context();

        assert_eq!(cx.login_url().as_str(), cx.login_url().as_str());
    }
}
