use thiserror::Error;

/// Every way a `git cocommit` run can fail.
///
/// All of these abort the run: the binary prints `Error: <message>` and
/// exits with status 1 without committing anything.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to get git user {0}: set it with `git config user.{0}`")]
    MissingUserConfig(&'static str),

    #[error("at least one GitHub username is required")]
    NoHandles,

    #[error("no author information found in Git history")]
    EmptyHistory,

    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error("no valid selections made")]
    EmptySelection,

    #[error("GitHub user '{0}' not found")]
    UnknownUser(String),

    #[error("failed to get GitHub user information for '{handle}': {reason}")]
    LookupFailed { handle: String, reason: String },

    #[error("failed to set up HTTP client: {0}")]
    HttpClient(String),

    #[error("prompt error: {0}")]
    Prompt(String),

    #[error("failed to open editor: {0}")]
    Editor(String),

    #[error("aborted commit due to empty commit message")]
    EmptyMessage,

    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("`{command}` {status}")]
    CommandFailed { command: String, status: String },

    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(context: &'static str) -> impl FnOnce(std::io::Error) -> Error {
        move |source| Error::Io { context, source }
    }
}
