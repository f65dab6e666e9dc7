//! Email resolution through the GitHub users API.

use crate::config::Settings;
use crate::error::Error;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Upper bound on a single user lookup.
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Domain GitHub reserves for private-email commit attribution.
pub const NOREPLY_DOMAIN: &str = "users.noreply.github.com";

/// The part of a GitHub user profile needed to build a trailer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    #[serde(default)]
    pub email: Option<String>,
}

/// Source of user profiles, keyed by handle.
///
/// [`GithubClient`] is the production implementation; tests pass their own.
pub trait UserDirectory {
    /// Fetches the profile for `handle`.
    ///
    /// Implementations return [`Error::UnknownUser`] when the handle does not
    /// exist and [`Error::LookupFailed`] for any other failure.
    fn fetch_user(&self, handle: &str) -> Result<UserProfile, Error>;
}

/// Blocking client for `GET /users/{handle}`.
pub struct GithubClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl GithubClient {
    /// Builds a client from settings. Requests are authenticated when a token
    /// is configured; otherwise GitHub's unauthenticated rate limit applies.
    pub fn new(settings: &Settings) -> Result<Self, Error> {
        Self::with_timeout(settings, LOOKUP_TIMEOUT)
    }

    /// Like [`GithubClient::new`], with a custom bound on each lookup.
    pub fn with_timeout(settings: &Settings, timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("git-cocommit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        if settings.token.is_none() {
            debug!("no GitHub token configured; using unauthenticated API");
        }

        Ok(GithubClient {
            client,
            base_url: settings.api_url.clone(),
            token: settings.token.clone(),
            timeout,
        })
    }

    fn user_url(&self, handle: &str) -> Result<reqwest::Url, String> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| format!("invalid API URL '{}': {}", self.base_url, e))?;
        url.path_segments_mut()
            .map_err(|_| format!("invalid API URL '{}'", self.base_url))?
            .pop_if_empty()
            .push("users")
            .push(handle);
        Ok(url)
    }
}

impl UserDirectory for GithubClient {
    fn fetch_user(&self, handle: &str) -> Result<UserProfile, Error> {
        let failed = |reason: String| Error::LookupFailed {
            handle: handle.to_string(),
            reason,
        };

        let url = self.user_url(handle).map_err(failed)?;
        debug!(%url, "looking up GitHub user");

        let mut req = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().map_err(|e| {
            if e.is_timeout() {
                failed(format!("request timed out after {:?}", self.timeout))
            } else {
                failed(e.to_string())
            }
        })?;

        match resp.status() {
            StatusCode::NOT_FOUND => Err(Error::UnknownUser(handle.to_string())),
            status if !status.is_success() => {
                warn!(%status, handle, "GitHub user lookup rejected");
                Err(failed(format!("GitHub API returned {}", status)))
            }
            _ => resp
                .json::<UserProfile>()
                .map_err(|e| failed(format!("malformed response: {}", e))),
        }
    }
}

/// GitHub's no-reply address for an account without a public email.
pub fn noreply_address(id: u64, handle: &str) -> String {
    format!("{}+{}@{}", id, handle, NOREPLY_DOMAIN)
}

/// Resolves the email to credit for `handle`.
///
/// Uses the profile's public email when there is one, otherwise the
/// account's no-reply address.
pub fn resolve_email<D: UserDirectory + ?Sized>(
    directory: &D,
    handle: &str,
) -> Result<String, Error> {
    let profile = directory.fetch_user(handle)?;
    match profile.email.as_deref().map(str::trim) {
        Some(email) if !email.is_empty() => Ok(email.to_string()),
        _ => {
            debug!(handle, id = profile.id, "no public email; using no-reply address");
            Ok(noreply_address(profile.id, handle))
        }
    }
}

/// Formats a co-author as `"handle <email>"`.
pub fn format_co_author(handle: &str, email: &str) -> String {
    format!("{} <{}>", handle, email)
}
