//! Deciding who to credit.
//!
//! Co-authors come from exactly one [`AcquisitionMode`], chosen once per run:
//! the `GIT_COAUTHORS` variable when set, otherwise whatever the user picks
//! from the menu. Handles from the environment or manual entry are resolved to
//! emails through a [`UserDirectory`]; entries picked from history are already
//! `"Name <email>"` and are used verbatim.

use crate::config::Settings;
use crate::error::Error;
use crate::git;
use crate::github::{UserDirectory, format_co_author, resolve_email};
use crate::process::Runner;
use crate::prompt::{SelectPrompter, StringPrompter, ask_yes_no};

use console::{Term, style};
use tracing::{debug, info};

const MENU_ITEMS: [&str; 2] = ["Manual input", "Select from Git history"];

/// Where this run's co-authors come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionMode {
    /// Handles listed in `GIT_COAUTHORS`.
    Env(Vec<String>),
    /// Handles typed in one at a time.
    Manual,
    /// Authors picked from `git log`.
    History,
}

/// External incremental-search programs usable for history selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuzzyFinder {
    Peco,
    Fzf,
}

impl FuzzyFinder {
    /// Returns the first supported selector found on `PATH`, preferring `peco`.
    pub fn detect() -> Option<FuzzyFinder> {
        [FuzzyFinder::Peco, FuzzyFinder::Fzf]
            .into_iter()
            .find(|f| which::which(f.program()).is_ok())
    }

    pub fn program(self) -> &'static str {
        match self {
            FuzzyFinder::Peco => "peco",
            FuzzyFinder::Fzf => "fzf",
        }
    }

    fn args(self, prompt: &str) -> Vec<String> {
        match self {
            FuzzyFinder::Peco => vec!["--prompt".to_string(), prompt.to_string()],
            FuzzyFinder::Fzf => vec![
                "--multi".to_string(),
                "--prompt".to_string(),
                format!("{}> ", prompt),
            ],
        }
    }
}

/// Splits a comma-separated handle list, trimming each entry and dropping
/// empty ones. Order and repeats are kept.
///
/// ```
/// use cocommit::coauthors::parse_handles;
///
/// assert_eq!(parse_handles(" alice, ,bob ,alice"), vec!["alice", "bob", "alice"]);
/// ```
pub fn parse_handles(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(|h| h.to_string())
        .collect()
}

/// Picks the acquisition mode: environment first, then the interactive menu
/// (manual entry is the default choice).
pub fn choose_mode<P: SelectPrompter>(
    settings: &Settings,
    prompter: &mut P,
) -> Result<AcquisitionMode, Error> {
    if let Some(raw) = &settings.coauthors {
        debug!("using co-authors from environment");
        return Ok(AcquisitionMode::Env(parse_handles(raw)));
    }

    let choice = prompter
        .select("Select co-author input method", &MENU_ITEMS, 0)
        .map_err(Error::Prompt)?;
    let mode = if choice == 1 {
        AcquisitionMode::History
    } else {
        AcquisitionMode::Manual
    };
    debug!(?mode, "co-author input method chosen");
    Ok(mode)
}

/// Prompts for GitHub usernames until a blank entry or a "no" to
/// "More co-author?".
///
/// # Errors
///
/// Returns [`Error::NoHandles`] if the first entry is blank.
pub fn collect_handles<P: StringPrompter>(prompter: &mut P) -> Result<Vec<String>, Error> {
    let mut handles = Vec::new();
    loop {
        let input = prompter
            .prompt("Enter GitHub username")
            .map_err(Error::Prompt)?;
        let handle = input.trim();
        if handle.is_empty() {
            if handles.is_empty() {
                return Err(Error::NoHandles);
            }
            break;
        }
        handles.push(handle.to_string());

        let more = ask_yes_no(prompter, "More co-author?").map_err(Error::Prompt)?;
        if !more {
            break;
        }
    }
    Ok(handles)
}

/// Resolves every handle to `"handle <email>"`, failing on the first handle
/// that cannot be resolved.
pub fn resolve_handles<D: UserDirectory + ?Sized>(
    directory: &D,
    handles: &[String],
) -> Result<Vec<String>, Error> {
    if handles.is_empty() {
        return Err(Error::NoHandles);
    }
    handles
        .iter()
        .map(|handle| -> Result<String, Error> {
            let email = resolve_email(directory, handle)?;
            info!(handle = %handle, email = %email, "resolved co-author");
            Ok(format_co_author(handle, &email))
        })
        .collect()
}

/// Parses a numbered-list answer: comma-separated 1-based indices, or `all`.
///
/// A single bad token rejects the whole answer.
///
/// # Errors
///
/// * [`Error::InvalidSelection`] for a non-numeric or out-of-range token.
/// * [`Error::EmptySelection`] if no index was given.
pub fn parse_selection(input: &str, items: &[String]) -> Result<Vec<String>, Error> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("all") {
        return Ok(items.to_vec());
    }

    let mut selected = Vec::new();
    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match token.parse::<usize>() {
            Ok(n) if n >= 1 && n <= items.len() => selected.push(items[n - 1].clone()),
            _ => return Err(Error::InvalidSelection(token.to_string())),
        }
    }

    if selected.is_empty() {
        return Err(Error::EmptySelection);
    }
    Ok(selected)
}

/// Lets the user pick from a numbered list printed to the terminal.
pub fn select_from_list<P: StringPrompter>(
    prompter: &mut P,
    items: &[String],
    heading: &str,
) -> Result<Vec<String>, Error> {
    let term = Term::stderr();
    let mut lines = vec![style(heading).bold().to_string()];
    lines.extend(
        items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {}", style(i + 1).cyan(), item)),
    );
    term.write_line(&lines.join("\n"))
        .map_err(Error::io("failed to print author list"))?;

    let answer = prompter
        .prompt("Enter numbers (comma-separated) or 'all' for all items")
        .map_err(Error::Prompt)?;
    parse_selection(&answer, items)
}

/// Lets the user pick through an external fuzzy selector.
pub fn select_with_finder<R: Runner>(
    runner: &R,
    finder: FuzzyFinder,
    items: &[String],
    prompt: &str,
) -> Result<Vec<String>, Error> {
    let args = finder.args(prompt);
    let argv: Vec<&str> = args.iter().map(String::as_str).collect();
    let mut input = items.join("\n");
    input.push('\n');

    let out = runner.output_with_input(finder.program(), &argv, &input)?;
    let selected: Vec<String> = out
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| l.to_string())
        .collect();

    if selected.is_empty() {
        return Err(Error::EmptySelection);
    }
    Ok(selected)
}

/// Picks co-authors from repository history, through `finder` when one is
/// available and a numbered list otherwise.
pub fn select_from_history<P, R>(
    prompter: &mut P,
    runner: &R,
    finder: Option<FuzzyFinder>,
) -> Result<Vec<String>, Error>
where
    P: StringPrompter,
    R: Runner,
{
    let authors = git::authors(runner)?;
    if authors.is_empty() {
        return Err(Error::EmptyHistory);
    }

    match finder {
        Some(f) => {
            debug!(selector = f.program(), "selecting with fuzzy finder");
            select_with_finder(runner, f, &authors, "Select co-authors")
        }
        None => select_from_list(prompter, &authors, "Available co-authors from Git history:"),
    }
}

/// Produces the final `"Name <email>"` list for `mode`.
pub fn get_co_authors<P, D, R>(
    mode: AcquisitionMode,
    prompter: &mut P,
    directory: &D,
    runner: &R,
    finder: Option<FuzzyFinder>,
) -> Result<Vec<String>, Error>
where
    P: StringPrompter,
    D: UserDirectory + ?Sized,
    R: Runner,
{
    match mode {
        AcquisitionMode::Env(handles) => resolve_handles(directory, &handles),
        AcquisitionMode::Manual => {
            let handles = collect_handles(prompter)?;
            resolve_handles(directory, &handles)
        }
        AcquisitionMode::History => select_from_history(prompter, runner, finder),
    }
}
