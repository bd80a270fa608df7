use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::SiteConfig;

#[derive(Debug, Error)]
pub enum BlogError {
    #[error("Blog feed request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Blog feed returned {0}")]
    UpstreamStatus(reqwest::StatusCode),
}

/// A post as published by the external blog-listing collaborator. Only the
/// fields the site and sitemap need are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub published_at: Option<String>,
}

/// Client for the external blog listing. The feed is the collaborator's
/// responsibility; this side only reads it.
pub struct BlogClient {
    client: reqwest::Client,
    feed_url: Option<String>,
}

impl BlogClient {
    pub fn new(site: &SiteConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(site.blog_timeout_secs))
            .build()
            .unwrap_or_default();

        Self { client, feed_url: site.blog_feed_url.clone() }
    }

    /// All published posts. An unconfigured feed reads as an empty listing.
    pub async fn list_posts(&self) -> Result<Vec<BlogPost>, BlogError> {
        let Some(url) = self.feed_url.as_deref() else {
            tracing::debug!("no blog feed configured, returning empty listing");
            return Ok(vec![]);
        };

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(BlogError::UpstreamStatus(response.status()));
        }

        Ok(response.json::<Vec<BlogPost>>().await?)
    }
}
