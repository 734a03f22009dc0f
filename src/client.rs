//! Outbound HTTP surface: login, asset listing, image fetching
//!
//! A [`Session`] is the only way to talk to the service after
//! authentication. It exists only in the success path (rejected credentials
//! or a malformed login body never produce one) and every request it issues
//! carries the server-issued `X-User-Id` / `X-Token-Auth` headers.

use crate::config::{ApiConfig, LoginConfig};
use crate::error::{Error, Result};
use crate::types::AssetDescriptor;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Fixed client-identity fields sent alongside the credentials.
///
/// The service requires an app identity on login; these values identify us
/// as the official frame application and are otherwise meaningless.
const APP_IDENTIFIER: &str = "com.pushd.Framelord";
const DEVICE_PLACEHOLDER: &str = "does-not-matter";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    result: LoginResult,
}

#[derive(Debug, Deserialize)]
struct LoginResult {
    current_user: CurrentUser,
}

#[derive(Debug, Deserialize)]
struct CurrentUser {
    id: String,
    auth_token: String,
}

/// An authenticated session with the frame service
///
/// Owned by one orchestration run and discarded at run end; there is no
/// explicit logout.
#[derive(Debug)]
pub struct Session {
    http: reqwest::Client,
    user_id: String,
    api: ApiConfig,
}

impl Session {
    /// Authenticate against the service and build a session.
    ///
    /// A single attempt, no retry. Any non-success status is reported as
    /// invalid credentials without parsing the body; a success body missing
    /// the user id or auth token is reported the same way.
    pub async fn login(api: &ApiConfig, login: &LoginConfig) -> Result<Self> {
        let login_url = endpoint(&api.base_url, "login.json")?;

        let payload = serde_json::json!({
            "identifier_for_vendor": DEVICE_PLACEHOLDER,
            "client_device_id": DEVICE_PLACEHOLDER,
            "app_identifier": APP_IDENTIFIER,
            "locale": "en",
            "user": {
                "email": login.email,
                "password": login.password,
            },
        });

        let response = reqwest::Client::new()
            .post(login_url)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Authentication(format!(
                "login rejected with status {}: check your credentials",
                response.status()
            )));
        }

        let body: LoginResponse = response.json().await.map_err(|e| {
            Error::Authentication(format!(
                "login response missing user id or auth token: {e}"
            ))
        })?;
        let user = body.result.current_user;

        let mut headers = HeaderMap::new();
        headers.insert("X-User-Id", header_value(&user.id, "user id")?);
        headers.insert("X-Token-Auth", header_value(&user.auth_token, "auth token")?);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        tracing::info!(user_id = %user.id, "login successful");

        Ok(Self {
            http,
            user_id: user.id,
            api: api.clone(),
        })
    }

    /// The server-issued user id bound to this session
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Fetch the full asset listing for a frame.
    ///
    /// Elements are returned as raw JSON values; decoding happens per item in
    /// the orchestrator so one malformed element cannot abort the run. A body
    /// without an `assets` array is [`Error::NoAssets`], which is distinct
    /// from `assets: []` (a valid, empty frame).
    pub async fn list_assets(&self, frame_id: &str) -> Result<Vec<serde_json::Value>> {
        let url = endpoint(
            &self.api.base_url,
            &format!("frames/{frame_id}/assets.json?side_load_users=false"),
        )?;

        let response = self.http.get(url).send().await?;
        let raw = response.text().await?;
        let body: serde_json::Value = serde_json::from_str(&raw)?;

        match body.get("assets").and_then(|a| a.as_array()) {
            Some(assets) => {
                tracing::info!(frame_id, total = assets.len(), "asset listing retrieved");
                Ok(assets.clone())
            }
            None => {
                tracing::error!(frame_id, body = %raw, "listing response has no asset collection");
                Err(Error::NoAssets {
                    frame_id: frame_id.to_string(),
                    body: raw,
                })
            }
        }
    }

    /// Start a streamed fetch of an asset's image bytes.
    ///
    /// The URL is derived from the asset's owning user and stored filename.
    /// A non-success status is an error here; the caller decides whether that
    /// is fatal (it is not; image fetches happen inside the per-asset loop).
    pub async fn fetch_image(
        &self,
        asset: &AssetDescriptor,
        timeout: Duration,
    ) -> Result<reqwest::Response> {
        let url = image_url(&self.api.image_base_url, asset)?;

        let response = self
            .http
            .get(url)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?;

        Ok(response)
    }
}

/// Build an API endpoint URL from the configured base.
fn endpoint(base_url: &str, path: &str) -> Result<Url> {
    let joined = format!("{}/{}", base_url.trim_end_matches('/'), path);
    Url::parse(&joined)
        .map_err(|e| Error::config(format!("invalid API URL '{joined}': {e}"), Some("base_url")))
}

/// Build the image proxy URL for one asset, percent-encoding the stored
/// filename so unusual names cannot break the request path.
fn image_url(image_base_url: &str, asset: &AssetDescriptor) -> Result<Url> {
    let joined = format!(
        "{}/{}/{}",
        image_base_url.trim_end_matches('/'),
        asset.user_id,
        urlencoding::encode(&asset.file_name),
    );
    Url::parse(&joined).map_err(|e| {
        Error::config(
            format!("invalid image URL '{joined}': {e}"),
            Some("image_base_url"),
        )
    })
}

fn header_value(value: &str, what: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| Error::Authentication(format!("login response returned an unusable {what}")))
}
