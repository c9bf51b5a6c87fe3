use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::core::verification::{AccountDirectory, InventoryLookup, RobloxError};

pub const DEFAULT_USERS_API_URL: &str = "https://api.roblox.com";
pub const DEFAULT_INVENTORY_API_URL: &str = "https://inventory.roblox.com";

/// Minimal Roblox web API client: username lookup and shirt inventory.
///
/// Cloning is cheap; the underlying reqwest client is reference counted.
#[derive(Clone)]
pub struct RobloxApiClient {
    client: Client,
    users_base_url: String,
    inventory_base_url: String,
}

impl RobloxApiClient {
    pub fn new(
        users_base_url: impl Into<String>,
        inventory_base_url: impl Into<String>,
    ) -> Result<Self, RobloxError> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers.insert("User-Agent", HeaderValue::from_static("ShirtGateBot/0.1"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| RobloxError::Http(e.to_string()))?;

        Ok(Self {
            client,
            users_base_url: trim_base(users_base_url.into()),
            inventory_base_url: trim_base(inventory_base_url.into()),
        })
    }

    fn username_url(&self) -> String {
        format!("{}/users/get-by-username", self.users_base_url)
    }

    fn collectibles_url(&self, roblox_user_id: u64) -> String {
        format!(
            "{}/v1/users/{}/assets/collectibles",
            self.inventory_base_url, roblox_user_id
        )
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Pull the account id out of a username lookup body. Anything without an `Id` is "no such user".
fn parse_user_id(body: &str) -> Result<Option<u64>, RobloxError> {
    let user: ApiUser =
        serde_json::from_str(body).map_err(|e| RobloxError::Decode(e.to_string()))?;
    Ok(user.id)
}

/// True when the collectibles page lists `asset_id`.
fn page_contains_asset(body: &str, asset_id: &str) -> Result<bool, RobloxError> {
    let page: ApiAssetPage =
        serde_json::from_str(body).map_err(|e| RobloxError::Decode(e.to_string()))?;

    let assets = page
        .data
        .ok_or_else(|| RobloxError::Decode("missing data field".to_string()))?;

    Ok(assets
        .iter()
        .filter_map(|a| a.asset_id)
        .any(|id| id.to_string() == asset_id))
}

#[async_trait]
impl AccountDirectory for RobloxApiClient {
    async fn resolve_username(&self, username: &str) -> Result<Option<u64>, RobloxError> {
        let resp = self
            .client
            .get(self.username_url())
            .query(&[("username", username)])
            .send()
            .await
            .map_err(|e| RobloxError::Http(e.to_string()))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(RobloxError::Status(resp.status().as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| RobloxError::Http(e.to_string()))?;
        parse_user_id(&body)
    }
}

#[async_trait]
impl InventoryLookup for RobloxApiClient {
    async fn owns_asset(&self, roblox_user_id: u64, asset_id: &str) -> Result<bool, RobloxError> {
        let resp = self
            .client
            .get(self.collectibles_url(roblox_user_id))
            .query(&[("assetType", "Shirt")])
            .send()
            .await
            .map_err(|e| RobloxError::Http(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(RobloxError::Status(resp.status().as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| RobloxError::Http(e.to_string()))?;
        page_contains_asset(&body, asset_id)
    }
}

#[derive(Debug, Deserialize)]
struct ApiUser {
    #[serde(rename = "Id")]
    id: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ApiAssetPage {
    data: Option<Vec<ApiAsset>>,
}

#[derive(Debug, Deserialize)]
struct ApiAsset {
    #[serde(rename = "assetId")]
    asset_id: Option<u64>,
}
