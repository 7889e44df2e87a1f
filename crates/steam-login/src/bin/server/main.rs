use std::fs;
use std::path::Path;

use anyhow::Context;
use steam_login::config::TracingConfig;
use steam_openid::{AuthContext, ParameterSource, Parameters, Protocol};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::{Layer as _, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

mod cli;

const DEFAULT_CONFIG_PATH: &str = "./steam-login.toml";

fn main() -> anyhow::Result<()> {
    let cli_args = cli::args();
    let mut config = match cli_args.config_path.as_deref() {
        Some(path) => load_config(path)?,
        None if fs::exists(DEFAULT_CONFIG_PATH)? => load_config(Path::new(DEFAULT_CONFIG_PATH))?,
        None => steam_login::Config::default(),
    };

    cli_args.apply_to_config(&mut config);

    if config.tracing.enable {
        init_tracing(&config.tracing).context("failed to initialize tracing")?;
    }

    if let Some(cli::Command::LoginUrl { host, path, https }) = cli_args.command {
        let source = ParameterSource::Query(Parameters::default());
        let cx = AuthContext::new(Protocol::from_tls(https), &host, &path, source);

        println!("{}", cx.login_url());

        return Ok(());
    }

    tracing::debug!(?config, "starting server");

    steam_login::run(config).context("failed to run server")
}

fn load_config(path: &Path) -> anyhow::Result<steam_login::Config> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration file `{}`", path.display()))?;

    toml::from_str(&text)
        .with_context(|| format!("failed to parse configuration file `{}`", path.display()))
}

fn init_tracing(config: &TracingConfig) -> anyhow::Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter).context("invalid `tracing.filter`")?,
    };

    let stderr = tracing_subscriber::fmt::layer()
        .with_ansi(config.ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr.with_filter(env_filter))
        .try_init()
        .context("a global subscriber is already set")
}
