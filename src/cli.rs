use crate::banner::print_banner;
use crate::coauthors::{self, FuzzyFinder};
use crate::commit;
use crate::config::{LOG_VAR, Settings};
use crate::error::Error;
use crate::github::GithubClient;
use crate::process::SystemRunner;
use crate::prompt::DialoguerPrompter;

use console::style;
use std::env;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// What the command line asks for.
#[derive(Debug, PartialEq, Eq)]
enum Invocation {
    Help,
    Version,
    /// Commit, passing these arguments through to `git commit`.
    Commit(Vec<String>),
}

/// Interprets the arguments after the program name.
///
/// Only `-h/--help` and `-V/--version` are handled here; everything else
/// belongs to `git commit`. Message values and anything after `--` are
/// never interpreted.
fn parse_args(args: &[String]) -> Invocation {
    let mut iter = args.iter().map(String::as_str);
    while let Some(arg) = iter.next() {
        match arg {
            "--" => break,
            "-h" | "--help" => return Invocation::Help,
            "-V" | "--version" => return Invocation::Version,
            "-m" | "--message" => {
                iter.next();
            }
            _ => {}
        }
    }
    Invocation::Commit(args.to_vec())
}

/// Sets up diagnostic logging on stderr, filtered by `GIT_COCOMMIT_LOG`
/// (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Prints usage information to stdout.
fn print_help() {
    println!(
        "\
git-cocommit {}

Run `git commit` with Co-Authored-By trailers.

USAGE:
    git cocommit [GIT COMMIT OPTIONS]

OPTIONS:
    -h, --help       Print help information
    -V, --version    Print version information

    All other options are passed to `git commit`. With -m/--message the
    trailers are appended to that message; otherwise your editor opens.

ENVIRONMENT:
    GIT_COAUTHORS      Comma-separated GitHub usernames; skips the menu
    GITHUB_TOKEN       Token for authenticated GitHub API lookups
    GITHUB_API_URL     GitHub API base URL (default https://api.github.com)
    GIT_COCOMMIT_LOG   Log filter, e.g. `debug`

    The editor is taken from GIT_EDITOR, VISUAL, EDITOR, core.editor, then vi.",
        env!("CARGO_PKG_VERSION")
    );
}

/// Runs the whole pipeline: pick co-authors, resolve them, compose the
/// message and commit.
fn run(args: &[String]) -> Result<(), Error> {
    let settings = Settings::from_env();
    let runner = SystemRunner;
    let mut prompter = DialoguerPrompter;

    if which::which("git").is_err() {
        return Err(Error::Spawn {
            program: "git".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found in PATH"),
        });
    }

    let mode = coauthors::choose_mode(&settings, &mut prompter)?;
    let directory = GithubClient::new(&settings)?;
    let finder = FuzzyFinder::detect();
    debug!(?finder, "fuzzy finder detection");
    let co_authors =
        coauthors::get_co_authors(mode, &mut prompter, &directory, &runner, finder)?;

    let inline = commit::find_message(args).is_some();
    print_banner(&co_authors, inline);

    commit::commit(&runner, args, &co_authors, &settings.editors)
}

/// Main CLI entry point for `git-cocommit`.
///
/// This function:
/// 1. Handles `--help` and `--version`.
/// 2. Initializes logging.
/// 3. Chooses how to collect co-authors (`GIT_COAUTHORS` or the menu).
/// 4. Resolves them to `Name <email>` form.
/// 5. Runs `git commit` with the trailers added.
///
/// Returns `Ok(exit_code)` on success.
///
/// # Errors
///
/// Any failure along the pipeline. Nothing is committed in that case.
pub fn entry() -> Result<i32, Error> {
    let args: Vec<String> = env::args().skip(1).collect();

    match parse_args(&args) {
        Invocation::Help => {
            print_help();
            Ok(0)
        }
        Invocation::Version => {
            println!("git-cocommit {}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
        Invocation::Commit(commit_args) => {
            init_logging();
            run(&commit_args)?;
            Ok(0)
        }
    }
}

/// Formats a pipeline error the way the binary prints it.
pub fn render_error(err: &Error) -> String {
    style(format!("Error: {}", err)).red().bold().to_string()
}

#[cfg(test)]
mod tests {
    use super::{Invocation, parse_args};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn help_and_version_are_handled_locally() {
        assert_eq!(parse_args(&strings(&["-h"])), Invocation::Help);
        assert_eq!(parse_args(&strings(&["-a", "--help"])), Invocation::Help);
        assert_eq!(parse_args(&strings(&["-V"])), Invocation::Version);
    }

    #[test]
    fn other_args_pass_through() {
        let args = strings(&["-a", "-m", "fix bug"]);
        assert_eq!(parse_args(&args), Invocation::Commit(args.clone()));
    }

    #[test]
    fn args_after_double_dash_are_not_interpreted() {
        let args = strings(&["--", "--help"]);
        assert_eq!(parse_args(&args), Invocation::Commit(args.clone()));
    }

    #[test]
    fn message_value_is_not_a_flag() {
        let args = strings(&["-m", "-h"]);
        assert_eq!(parse_args(&args), Invocation::Commit(args.clone()));
    }
}
