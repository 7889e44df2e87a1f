mod server;
pub use server::ServerConfig;

mod tracing;
pub use tracing::TracingConfig;

mod steam_auth;
pub use steam_auth::SteamAuthConfig;

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Configuration for the HTTP server.
    pub server: ServerConfig,

    /// Configuration for logging.
    pub tracing: TracingConfig,

    /// Configuration for logging in with Steam.
    pub steam_auth: SteamAuthConfig,
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv6Addr};
    use std::time::Duration;

    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = toml::from_str::<Config>("").unwrap();

        assert_eq!(config.server.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.server.worker_threads, None);
        assert!(!config.tracing.enable);
        assert!(!config.steam_auth.assume_https);
        assert_eq!(config.steam_auth.web_api_key, None);
        assert_eq!(config.steam_auth.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn full_file() {
        let config = toml::from_str::<Config>(
            r#"
            [server]
            ip-addr = "::"
            port = 8080
            worker-threads = 2

            [tracing]
            enable = true
            ansi = true
            filter = "debug"

            [steam-auth]
            web-api-key = "ABCDEF"
            request-timeout = 3
            assume-https = true
            "#,
        )
        .unwrap();

        assert_eq!(config.server.ip_addr, IpAddr::V6(Ipv6Addr::UNSPECIFIED));
        assert_eq!(config.server.port, 8080);
        assert!(config.tracing.enable && config.tracing.ansi);
        assert_eq!(config.tracing.filter, "debug");
        assert_eq!(config.server.worker_threads.map(|n| n.get()), Some(2));
        assert_eq!(config.steam_auth.web_api_key.as_deref(), Some("ABCDEF"));
        assert_eq!(config.steam_auth.request_timeout(), Duration::from_secs(3));
        assert!(config.steam_auth.assume_https);
    }

    #[test]
    fn zero_worker_threads_means_default() {
        let config = toml::from_str::<Config>("[server]\nworker-threads = 0").unwrap();

        assert_eq!(config.server.worker_threads, None);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = toml::from_str::<Config>("[steam-auth]\npublic-url = \"https://example.com\"");

        assert!(result.is_err());
    }
}
