/*
    spotify-search-rs | Rust CLI tool to search your Liked Songs with metadata filters.
    Copyright (C) 2026  Israel Alberto Roldan Vega

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use rspotify::{prelude::*, scopes, AuthCodeSpotify, Config, Credentials, OAuth};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Failed to initialize Spotify client: {0}")]
    ClientConfig(String),
    #[error("Spotify authentication failed: {0}")]
    Spotify(#[from] rspotify::ClientError),
}

/// Initializes and authenticates a Spotify client using the Authorization Code Flow.
///
/// Credentials (`RSPOTIFY_CLIENT_ID`, `RSPOTIFY_CLIENT_SECRET`) and the redirect
/// URI (`RSPOTIFY_REDIRECT_URI`) come from the environment. Search only reads
/// the library, so the single `user-library-read` scope is requested.
///
/// The token is cached and refreshed automatically; when no valid token is
/// cached the user is prompted (via stdout) to visit an authorization URL.
pub async fn get_spotify_client() -> Result<AuthCodeSpotify, AuthError> {
    // `rspotify` expects RSPOTIFY_CLIENT_ID/SECRET in the environment.
    let creds = Credentials::from_env().ok_or_else(|| {
        AuthError::ClientConfig("Missing RSPOTIFY_CLIENT_ID or RSPOTIFY_CLIENT_SECRET".to_string())
    })?;

    let scopes = scopes!("user-library-read");

    let oauth = OAuth::from_env(scopes)
        .ok_or_else(|| AuthError::ClientConfig("Missing RSPOTIFY_REDIRECT_URI".to_string()))?;

    // `token_cached: true` saves the token to a file (default:
    // .spotify_token_cache.json), so repeated searches skip the browser round
    // trip while the cached token is valid.
    let config = Config {
        token_cached: true,
        token_refreshing: true,
        ..Default::default()
    };

    let spotify = AuthCodeSpotify::with_config(creds, oauth, config);

    let url = spotify.get_authorize_url(false)?;

    // From rspotify's `cli` feature: opens the URL in a browser (or prints it)
    // and waits for the redirect callback to complete the flow.
    spotify.prompt_for_token(&url).await?;

    Ok(spotify)
}
