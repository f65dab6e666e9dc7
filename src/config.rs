//! Environment-driven settings.
//!
//! Everything the pipeline reads from the environment is collected here once,
//! so the rest of the crate never calls [`std::env::var`] directly.

use std::env;

/// Comma-separated GitHub usernames to credit without prompting.
pub const COAUTHORS_VAR: &str = "GIT_COAUTHORS";
/// Personal access token for authenticated GitHub API calls.
pub const TOKEN_VAR: &str = "GITHUB_TOKEN";
/// Override for the GitHub API base URL (GitHub Enterprise, tests).
pub const API_URL_VAR: &str = "GITHUB_API_URL";
/// Filter directive for diagnostic logging, e.g. `debug`.
pub const LOG_VAR: &str = "GIT_COCOMMIT_LOG";

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Editor-related environment variables, in lookup priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorVars {
    pub git_editor: Option<String>,
    pub visual: Option<String>,
    pub editor: Option<String>,
}

impl EditorVars {
    /// First non-empty variable of `GIT_EDITOR`, `VISUAL`, `EDITOR`.
    pub fn first(&self) -> Option<&str> {
        [&self.git_editor, &self.visual, &self.editor]
            .into_iter()
            .flatten()
            .map(|s| s.as_str())
            .next()
    }
}

/// Settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Raw value of `GIT_COAUTHORS`, if set and non-empty. Whitespace-only
    /// still counts as set; parsing it yields no handles.
    pub coauthors: Option<String>,
    pub token: Option<String>,
    pub api_url: String,
    pub editors: EditorVars,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup.
    ///
    /// Blank values are treated as unset, matching how git treats empty
    /// editor variables. `GIT_COAUTHORS` is the exception: any non-empty
    /// value selects environment mode.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Settings {
            coauthors: lookup(COAUTHORS_VAR).filter(|v| !v.is_empty()),
            token: get(TOKEN_VAR).map(|t| t.trim().to_string()),
            api_url: get(API_URL_VAR)
                .map(|u| u.trim().trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            editors: EditorVars {
                git_editor: get("GIT_EDITOR"),
                visual: get("VISUAL"),
                editor: get("EDITOR"),
            },
        }
    }
}
