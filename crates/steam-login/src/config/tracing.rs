/// The directives used if neither `RUST_LOG` nor the config file specify any.
const DEFAULT_FILTER: &str = "steam_login=info,steam_openid=info,warn";

#[derive(Debug, serde::Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct TracingConfig {
    /// Log to stderr.
    pub enable: bool,

    /// Colored output.
    pub ansi: bool,

    /// [`EnvFilter`] directives. `RUST_LOG` takes precedence over these.
    ///
    /// [`EnvFilter`]: https://docs.rs/tracing-subscriber/0.3/tracing_subscriber/filter/struct.EnvFilter.html
    pub filter: String,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            enable: false,
            ansi: false,
            filter: DEFAULT_FILTER.to_owned(),
        }
    }
}
