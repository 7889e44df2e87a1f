//! CLI argument handling.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub fn args() -> Args {
    Args::parse()
}

#[derive(Debug, Parser)]
#[command(about = "Log in with Steam")]
pub struct Args {
    /// Path to the configuration file.
    ///
    /// Defaults to `./steam-login.toml`. If that file does not exist either, every setting keeps
    /// its default value.
    #[arg(short, long = "config", global = true)]
    pub config_path: Option<PathBuf>,

    /// Log to stderr, even if the configuration file says otherwise.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server. This is the default.
    Serve {
        /// Overrides `server.ip-addr`.
        #[arg(long = "ip")]
        ip_addr: Option<IpAddr>,

        /// Overrides `server.port`.
        #[arg(short, long)]
        port: Option<u16>,

        /// Overrides `steam-auth.assume-https`.
        #[arg(long)]
        assume_https: bool,
    },

    /// Print the URL a user visiting `host` + `path` would be sent to.
    LoginUrl {
        /// e.g. `example.com` or `localhost:3000`
        host: String,

        /// The path Steam should redirect back to.
        #[arg(default_value = "/login")]
        path: String,

        #[arg(long)]
        https: bool,
    },
}

impl Args {
    pub fn apply_to_config(&self, config: &mut steam_login::Config) {
        if self.verbose {
            config.tracing.enable = true;
        }

        let Some(Command::Serve { ip_addr, port, assume_https }) = self.command else {
            return;
        };

        if let Some(ip_addr) = ip_addr {
            config.server.ip_addr = ip_addr;
        }

        if let Some(port) = port {
            config.server.port = port;
        }

        if assume_https {
            config.steam_auth.assume_https = true;
        }
    }
}
