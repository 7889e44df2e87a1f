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

//! A small HTTP server that lets users log in with Steam.
//!
//! `GET /login` redirects to Steam, and Steam redirects the user back to `/login`. That second
//! request gets verified, and we respond with the user's SteamID (and their profile, if a Web API
//! key is configured).

use std::io;
use std::sync::Arc;

use axum::{Router, routing};
use steam_openid::HttpClient;
use tokio::net::TcpListener;
use tokio::runtime;

pub mod config;
pub use config::Config;

mod auth;
mod response;
mod signal;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to initialize runtime: {0}")]
    InitializeRuntime(#[source] io::Error),

    #[error("failed to initialize http client: {0}")]
    InitializeHttpClient(#[source] reqwest::Error),

    #[error("failed to bind tcp socket: {0}")]
    BindSocket(#[source] io::Error),

    #[error("failed to run server: {0}")]
    RunServer(#[source] io::Error),
}

/// Builds the HTTP service.
pub fn router(
    http_client: HttpClient,
    steam_auth: impl Into<Arc<config::SteamAuthConfig>>,
) -> Router {
    Router::new()
        .route("/", routing::get("(͡ ͡° ͜ つ ͡͡°)"))
        .merge(auth::router(http_client.clone(), http_client, steam_auth))
}

/// Runs the server.
///
/// This function will initialize its own [`tokio`] runtime and **block** until the server shuts
/// down.
pub fn run(config: Config) -> Result<(), Error> {
    let mut runtime = runtime::Builder::new_multi_thread();
    runtime.enable_all();

    if let Some(n) = config.server.worker_threads {
        runtime.worker_threads(n.get());
    }

    runtime
        .build()
        .map_err(Error::InitializeRuntime)?
        .block_on(async {
            let http_client = HttpClient::with_timeout(config.steam_auth.request_timeout())
                .map_err(Error::InitializeHttpClient)?;

            if config.steam_auth.web_api_key.is_none() {
                tracing::warn!("no Steam Web API key configured; profiles will not be fetched");
            }

            let service = router(http_client, config.steam_auth);
            let socket = TcpListener::bind(config.server.socket_addr())
                .await
                .map_err(Error::BindSocket)?;

            match socket.local_addr() {
                Ok(addr) => tracing::info!(%addr, "listening for requests"),
                Err(error) => tracing::warn!(%error, "failed to get local address"),
            }

            axum::serve(socket, service)
                .with_graceful_shutdown(signal::shutdown())
                .await
                .map_err(Error::RunServer)
        })
}
