use std::time::Duration;

#[derive(derive_more::Debug, serde::Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SteamAuthConfig {
    /// Steam Web API key used to look up users after they logged in.
    ///
    /// Profile lookups are skipped if this is not set.
    #[debug(skip)]
    pub web_api_key: Option<String>,

    /// How long to wait for Steam to answer a request, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Treat every request as if it arrived over TLS.
    ///
    /// Set this when running behind a reverse proxy that terminates TLS.
    pub assume_https: bool,
}

impl SteamAuthConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Default for SteamAuthConfig {
    fn default() -> Self {
        Self {
            web_api_key: None,
            request_timeout: default_request_timeout(),
            assume_https: false,
        }
    }
}

fn default_request_timeout() -> u64 {
    10
}
