// gha-bump - Latest release lookup via GitHub's release redirect

use super::{ReleaseLookup, ResolveError};
use crate::config::GitHubConfig;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, LOCATION};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Longest response body excerpt carried in an `UnexpectedStatus` error.
const MAX_BODY_EXCERPT: usize = 512;

/// Resolves the latest release by reading the `Location` of the redirect
/// served at `/{owner}/{repo}/releases/latest`. No API token is needed.
pub struct GitHubReleases {
    client: Client,
    base_url: String,
    accept: String,
}

impl GitHubReleases {
    pub fn new(config: &GitHubConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(format!("gha-bump/{}", crate::VERSION))
            // The redirect itself carries the answer
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            accept: config.accept.clone(),
        })
    }

    fn latest_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/{}/{}/releases/latest", self.base_url, owner, repo)
    }
}

#[async_trait]
impl ReleaseLookup for GitHubReleases {
    async fn latest_tag(&self, owner: &str, repo: &str) -> Result<String, ResolveError> {
        let url = self.latest_url(owner, repo);
        tracing::debug!(url = %url, "Requesting latest release");

        let res = self
            .client
            .get(&url)
            .header(ACCEPT, &self.accept)
            .send()
            .await
            .map_err(|source| ResolveError::Request {
                url: url.clone(),
                source,
            })?;

        let status = res.status();
        tracing::debug!(url = %url, status = %status, "Latest release response");

        if status != StatusCode::FOUND {
            let mut body = res.text().await.unwrap_or_default();
            if body.len() > MAX_BODY_EXCERPT {
                let mut cut = MAX_BODY_EXCERPT;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(ResolveError::UnexpectedStatus { url, status, body });
        }

        let location = res
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ResolveError::MissingLocation { url: url.clone() })?;

        tag_from_location(&url, location)
    }
}

/// Extract the tag from a release redirect such as
/// `https://github.com/actions/checkout/releases/tag/v4.2.1`.
///
/// A redirect to `/{owner}/{repo}/releases` (no release published) does not
/// have enough segments and is rejected.
pub(crate) fn tag_from_location(request_url: &str, location: &str) -> Result<String, ResolveError> {
    let invalid = || ResolveError::InvalidLocation(location.to_string());

    let base = Url::parse(request_url).map_err(|_| invalid())?;
    let target = base.join(location).map_err(|_| invalid())?;

    let segments: Vec<&str> = target
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    if segments.len() < 4 {
        return Err(invalid());
    }

    segments
        .last()
        .map(|tag| tag.to_string())
        .ok_or_else(invalid)
}
