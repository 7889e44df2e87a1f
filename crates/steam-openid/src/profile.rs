//! Looking up a verified user on Steam's Web API.
//!
//! This is not part of OpenID; it's what you usually want to do right after
//! [`AuthContext::verify()`] succeeded.

use thiserror::Error;
use url::Url;

use crate::{AuthContext, HttpClient, SteamId64, VerifyError};

/// Steam Web API URL for fetching user information.
const USER_URL: &str = "https://api.steampowered.com/ISteamUser/GetPlayerSummaries/v0002";

/// Public information about a Steam user.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PlayerSummary {
    pub steam_id: SteamId64,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub real_name: Option<String>,

    /// ISO 3166 country code, if the user set one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    pub profile_url: Url,
    pub avatar_url: Url,
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to make http request to Steam's Web API")]
    Http(#[from] reqwest::Error),
}

/// Errors returned by [`AuthContext::verify_and_fetch_user()`].
#[derive(Debug, Error)]
pub enum LoginError {
    #[error(transparent)]
    Verify(#[from] VerifyError),

    #[error(transparent)]
    Profile(#[from] ProfileError),
}

/// Fetches the [`PlayerSummary`] for `steam_id`.
///
/// Returns `None` if Steam doesn't know about the user.
#[tracing::instrument(skip(http_client, web_api_key), ret(level = "debug"), err(level = "debug"))]
pub async fn fetch_player_summary(
    http_client: &reqwest::Client,
    web_api_key: &str,
    steam_id: &SteamId64,
) -> Result<Option<PlayerSummary>, ProfileError> {
    let response = http_client
        .get(USER_URL)
        .query(&[("key", web_api_key), ("steamids", steam_id.as_str())])
        .send()
        .await?;

    if let Err(error) = response.error_for_status_ref() {
        let body = response.text().await.ok();
        tracing::debug!(?body, "failed to fetch player summary");
        return Err(error.into());
    }

    let response = response.json::<FetchPlayerResponse>().await?;

    Ok(response.into_summary(steam_id))
}

impl AuthContext {
    /// Verifies this callback request and looks up the user afterwards.
    ///
    /// Errors from either step are returned unchanged.
    pub async fn verify_and_fetch_user(
        &self,
        http_client: &HttpClient,
        web_api_key: &str,
    ) -> Result<(SteamId64, Option<PlayerSummary>), LoginError> {
        let steam_id = self.verify(http_client.clone()).await?;
        let summary = fetch_player_summary(http_client.client(), web_api_key, &steam_id).await?;

        Ok((steam_id, summary))
    }
}

#[derive(Debug, serde::Deserialize)]
struct FetchPlayerResponse {
    response: Players,
}

#[derive(Debug, serde::Deserialize)]
struct Players {
    players: Vec<PlayerObject>,
}

#[derive(Debug, serde::Deserialize)]
struct PlayerObject {
    personaname: String,
    realname: Option<String>,
    loccountrycode: Option<String>,
    profileurl: Url,
    avatarmedium: Url,
}

impl FetchPlayerResponse {
    fn into_summary(self, steam_id: &SteamId64) -> Option<PlayerSummary> {
        self.response
            .players
            .into_iter()
            .next()
            .map(|player| PlayerSummary {
                steam_id: steam_id.clone(),
                name: player.personaname,
                real_name: player.realname,
                country: player.loccountrycode,
                profile_url: player.profileurl,
                avatar_url: player.avatarmedium,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "response": {
            "players": [
                {
                    "steamid": "76561198282622073",
                    "communityvisibilitystate": 3,
                    "profilestate": 1,
                    "personaname": "AlphaKeks",
                    "profileurl": "https://steamcommunity.com/id/AlphaKeks/",
                    "avatar": "https://avatars.steamstatic.com/abc.jpg",
                    "avatarmedium": "https://avatars.steamstatic.com/abc_medium.jpg",
                    "avatarfull": "https://avatars.steamstatic.com/abc_full.jpg",
                    "personastate": 0,
                    "loccountrycode": "DE"
                }
            ]
        }
    }"#;

    #[test]
    fn parse_player_summary() {
        let steam_id = "76561198282622073".parse::<SteamId64>().unwrap();
        let summary = serde_json::from_str::<FetchPlayerResponse>(RESPONSE)
            .unwrap()
            .into_summary(&steam_id)
            .unwrap();

        assert_eq!(summary.steam_id, steam_id);
        assert_eq!(summary.name, "AlphaKeks");
        assert_eq!(summary.real_name, None);
        assert_eq!(summary.country.as_deref(), Some("DE"));
        assert_eq!(summary.profile_url.as_str(), "https://steamcommunity.com/id/AlphaKeks/");
        assert_eq!(
            summary.avatar_url.as_str(),
            "https://avatars.steamstatic.com/abc_medium.jpg",
        );
    }

    #[test]
    fn unknown_player() {
        let steam_id = "76561198282622073".parse::<SteamId64>().unwrap();
        let response =
            serde_json::from_str::<FetchPlayerResponse>(r#"{ "response": { "players": [] } }"#)
                .unwrap();

        assert!(response.into_summary(&steam_id).is_none());
    }

    #[test]
    fn serializes_steam_id_as_string() {
        let steam_id = "76561198282622073".parse::<SteamId64>().unwrap();
        let summary = serde_json::from_str::<FetchPlayerResponse>(RESPONSE)
            .unwrap()
            .into_summary(&steam_id)
            .unwrap();

        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["steam_id"], "76561198282622073");
        assert_eq!(json["profile_url"], "https://steamcommunity.com/id/AlphaKeks/");
        assert_eq!(json["avatar_url"], "https://avatars.steamstatic.com/abc_medium.jpg");
        assert!(json.get("real_name").is_none());
    }
}
