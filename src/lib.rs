//! # git-cocommit
//!
//! A `git commit` wrapper that credits co-authors with `Co-Authored-By`
//! trailers.
//!
//! This crate provides functionality to:
//! - Collect co-authors from `GIT_COAUTHORS`, manual entry, or repository history
//! - Resolve GitHub usernames to commit emails (public or no-reply)
//! - Append the trailers to an inline `-m` message or an editor-composed one
//! - Run `git commit` with the result
//!
//! ## Usage
//!
//! ```bash
//! # Inline message, co-authors from the environment
//! GIT_COAUTHORS=alice,bob git-cocommit -m "Fix the widget"
//!
//! # Pick co-authors interactively and write the message in your editor
//! git-cocommit
//! ```
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface and main entry point
//! - [`coauthors`] - Choosing and collecting co-authors
//! - [`commit`] - Building and running the `git commit` invocation
//! - [`message`] - Trailer assembly and the editor flow
//! - [`github`] - Email lookup through the GitHub API
//! - [`git`] - Git command wrappers
//! - [`process`] - Subprocess execution
//! - [`prompt`] - User input abstractions
//! - [`config`] - Environment settings
//! - [`banner`] - Co-author summary box

pub mod banner;
pub mod cli;
pub mod coauthors;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod github;
pub mod message;
pub mod process;
pub mod prompt;

pub use error::Error;
