// gha-bump - Action reference resolution and major version comparison

pub mod github;

use async_trait::async_trait;
use semver::Version;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        source: reqwest::Error,
    },
    #[error("failed to get latest version from {url}: {status}, body: {body}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("no location header found in response from {url}")]
    MissingLocation { url: String },
    #[error("invalid location header: {0}")]
    InvalidLocation(String),
    #[error("invalid version {tag:?}: {source}")]
    InvalidVersion { tag: String, source: semver::Error },
}

// ---------------------------------------------------------------------------
// Release lookups
// ---------------------------------------------------------------------------

/// Source of the latest released tag for a repository.
#[async_trait]
pub trait ReleaseLookup: Send + Sync {
    async fn latest_tag(&self, owner: &str, repo: &str) -> Result<String, ResolveError>;
}

// ---------------------------------------------------------------------------
// Action references
// ---------------------------------------------------------------------------

/// A `uses:` value of the form `owner/repo[/path]@ref` that is eligible for
/// resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRef<'a> {
    pub owner: &'a str,
    pub repo: &'a str,
    pub version: &'a str,
}

impl<'a> ActionRef<'a> {
    /// Returns `None` for references that are never resolved: local
    /// actions, `docker://` images, `@master`, and refs without a `v` prefix.
    pub fn parse(uses: &'a str) -> Option<Self> {
        let (path, version) = uses.rsplit_once('@')?;
        if version == "master" || !version.starts_with('v') {
            return None;
        }

        let (owner, rest) = path.split_once('/')?;
        let repo = rest.split('/').next().unwrap_or_default();
        if owner.is_empty() || repo.is_empty() || owner.contains(':') {
            return None;
        }

        Some(Self {
            owner,
            repo,
            version,
        })
    }
}

/// Parse a release tag leniently: `v3` reads as `3.0.0`, `v4.2` as `4.2.0`.
pub fn parse_tag(tag: &str) -> Result<Version, ResolveError> {
    let bare = tag.strip_prefix('v').unwrap_or(tag);
    let split = bare.find(['-', '+']).unwrap_or(bare.len());
    let (core, suffix) = bare.split_at(split);

    let mut normalized = core.to_string();
    for _ in core.split('.').count()..3 {
        normalized.push_str(".0");
    }
    normalized.push_str(suffix);

    Version::parse(&normalized).map_err(|source| ResolveError::InvalidVersion {
        tag: tag.to_string(),
        source,
    })
}

/// Suggest a new major tag (e.g. `"v4"`) for `uses` when the upstream
/// repository has released a newer major version.
pub async fn suggest_major_upgrade(
    lookup: &dyn ReleaseLookup,
    uses: &str,
) -> Result<Option<String>, ResolveError> {
    let Some(action) = ActionRef::parse(uses) else {
        tracing::debug!(uses = %uses, "Skipping reference");
        return Ok(None);
    };

    let current = parse_tag(action.version)?;
    let latest_tag = lookup.latest_tag(action.owner, action.repo).await?;
    let latest = parse_tag(&latest_tag)?;

    tracing::debug!(
        uses = %uses,
        current = %current,
        latest = %latest,
        "Resolved latest release"
    );

    if latest.major > current.major {
        Ok(Some(format!("v{}", latest.major)))
    } else {
        Ok(None)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
