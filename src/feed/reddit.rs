//! Reddit client for the hot listing of the joke subreddit.
//!
//! Each fetch exchanges the long-lived refresh token for a short-lived
//! access token and then reads `/r/{subreddit}/hot` from the OAuth API host.

use anyhow::Context as _;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info};
use url::Url;

use super::{ContentItem, JokeFeed};
use crate::core::config::AppConfig;
use crate::errors::SkillError;

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
struct Thing {
    data: Submission,
}

#[derive(Debug, Deserialize)]
struct Submission {
    #[serde(default)]
    title: String,
    #[serde(default)]
    selftext: String,
}

pub struct RedditFeed {
    http: Client,
    client_id: String,
    client_secret: String,
    refresh_token: String,
    token_url: Url,
    listing_url: Url,
}

impl RedditFeed {
    /// Builds the client from config. The HTTP client carries the configured
    /// `User-Agent`, which Reddit requires on every call.
    pub fn new(config: &AppConfig) -> Result<Self, SkillError> {
        let http = Client::builder()
            .user_agent(config.reddit_user_agent.clone())
            .build()
            .map_err(|e| SkillError::ConfigError(format!("HTTP client: {e}")))?;

        let token_url = config.reddit_auth_url.join("api/v1/access_token")?;
        let mut listing_url = config
            .reddit_api_url
            .join(&format!("r/{}/hot", config.subreddit))?;
        listing_url.query_pairs_mut().append_pair("raw_json", "1");

        Ok(Self {
            http,
            client_id: config.reddit_client_id.clone(),
            client_secret: config.reddit_client_secret.clone(),
            refresh_token: config.reddit_refresh_token.clone(),
            token_url,
            listing_url,
        })
    }

    pub fn listing_url(&self) -> &Url {
        &self.listing_url
    }

    async fn access_token(&self) -> Result<String, SkillError> {
        let response = self
            .http
            .post(self.token_url.clone())
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", self.refresh_token.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!(%status, "Reddit token refresh rejected");
            return Err(SkillError::FeedUnavailable(format!(
                "token refresh failed with status {status}"
            )));
        }

        let body: AccessTokenResponse = response.json().await?;
        match (body.access_token, body.error) {
            (Some(token), None) if !token.is_empty() => Ok(token),
            (_, Some(reason)) => Err(SkillError::FeedUnavailable(format!(
                "token refresh failed: {reason}"
            ))),
            _ => Err(SkillError::FeedUnavailable(
                "token refresh returned no access token".to_string(),
            )),
        }
    }
}

#[async_trait]
impl JokeFeed for RedditFeed {
    async fn hot_listing(&self) -> Result<Vec<ContentItem>, SkillError> {
        let token = self.access_token().await?;

        let response = self
            .http
            .get(self.listing_url.clone())
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!(%status, url = %self.listing_url, "Reddit listing request failed");
            return Err(SkillError::FeedUnavailable(format!(
                "listing request failed with status {status}"
            )));
        }

        let body = response.text().await?;
        let items =
            parse_listing(&body).map_err(|e| SkillError::FeedUnavailable(format!("{e:#}")))?;
        info!(count = items.len(), "Parsed Reddit listing");
        Ok(items)
    }
}

/// Parses a Reddit listing body into content items, keeping feed order.
pub fn parse_listing(body: &str) -> anyhow::Result<Vec<ContentItem>> {
    let listing: Listing = serde_json::from_str(body).context("malformed listing body")?;
    Ok(listing
        .data
        .children
        .into_iter()
        .map(|thing| ContentItem::new(thing.data.title, thing.data.selftext))
        .collect())
}
