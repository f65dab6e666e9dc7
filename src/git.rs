use crate::error::Error;
use crate::process::Runner;

use std::collections::HashSet;
use tracing::debug;

/// Branch shown in the editor template when `HEAD` cannot be resolved.
pub const UNKNOWN_BRANCH: &str = "unknown";

/// Runs `git config --get <key>` and returns the trimmed value.
///
/// A missing key makes git exit non-zero; the failure is returned as the
/// error string.
pub fn config_get<R: Runner>(runner: &R, key: &str) -> Result<String, String> {
    runner
        .output("git", &["config", "--get", key])
        .map_err(|e| e.to_string())
}

/// Returns the invoking user's identity as `"Name <email>"`.
///
/// # Errors
///
/// Returns [`Error::MissingUserConfig`] if `user.name` or `user.email` is
/// unset or empty. History selection cannot tell the user apart from other
/// authors without it.
pub fn current_user<R: Runner>(runner: &R) -> Result<String, Error> {
    let name = match config_get(runner, "user.name") {
        Ok(v) if !v.is_empty() => v,
        _ => return Err(Error::MissingUserConfig("name")),
    };
    let email = match config_get(runner, "user.email") {
        Ok(v) if !v.is_empty() => v,
        _ => return Err(Error::MissingUserConfig("email")),
    };
    Ok(format!("{} <{}>", name, email))
}

/// Runs `git log --format=%an <%ae>` and returns one author per commit, in
/// log order.
pub fn log_authors<R: Runner>(runner: &R) -> Result<Vec<String>, Error> {
    let out = runner.output("git", &["log", "--format=%an <%ae>"])?;
    Ok(out.lines().map(|l| l.to_string()).collect())
}

/// Deduplicates `lines`, keeping first occurrences in order and dropping
/// blank lines and any line equal to `current_user`.
///
/// # Examples
///
/// ```
/// use cocommit::git::dedupe_authors;
///
/// let history = ["A", "B", "Self", "A"].map(String::from);
/// assert_eq!(dedupe_authors(&history, "Self"), vec!["A", "B"]);
/// ```
pub fn dedupe_authors(lines: &[String], current_user: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty() && *l != current_user)
        .filter(|l| seen.insert(*l))
        .map(|l| l.to_string())
        .collect()
}

/// Returns the distinct commit authors of the current repository, excluding
/// the invoking user.
pub fn authors<R: Runner>(runner: &R) -> Result<Vec<String>, Error> {
    let me = current_user(runner)?;
    let history = log_authors(runner)?;
    let authors = dedupe_authors(&history, &me);
    debug!(
        commits = history.len(),
        authors = authors.len(),
        "collected history authors"
    );
    Ok(authors)
}

/// Returns the abbreviated name of `HEAD`, or [`UNKNOWN_BRANCH`] if git
/// cannot resolve it (for example before the first commit).
pub fn current_branch<R: Runner>(runner: &R) -> String {
    match runner.output("git", &["rev-parse", "--abbrev-ref", "HEAD"]) {
        Ok(b) if !b.is_empty() => b,
        _ => UNKNOWN_BRANCH.to_string(),
    }
}

/// Returns `core.editor` if configured.
pub fn core_editor<R: Runner>(runner: &R) -> Option<String> {
    config_get(runner, "core.editor")
        .ok()
        .filter(|e| !e.is_empty())
}

/// Runs `git commit <args>` attached to the terminal.
///
/// The user sees git's own output (hooks, summary line) and git can prompt
/// for signing passphrases the usual way.
pub fn commit<R: Runner>(runner: &R, args: &[String]) -> Result<(), Error> {
    let argv: Vec<&str> = std::iter::once("commit")
        .chain(args.iter().map(String::as_str))
        .collect();
    runner.run("git", &argv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Answers `output` calls from a table keyed by the joined argv.
    struct TableRunner {
        outputs: HashMap<String, Result<String, String>>,
        runs: RefCell<Vec<Vec<String>>>,
    }

    impl TableRunner {
        fn new(entries: &[(&str, Result<&str, &str>)]) -> Self {
            let outputs = entries
                .iter()
                .map(|(k, v)| {
                    let v = match v {
                        Ok(s) => Ok(s.to_string()),
                        Err(s) => Err(s.to_string()),
                    };
                    (k.to_string(), v)
                })
                .collect();
            TableRunner {
                outputs,
                runs: RefCell::new(Vec::new()),
            }
        }
    }

    impl Runner for TableRunner {
        fn run(&self, program: &str, args: &[&str]) -> Result<(), Error> {
            let mut call = vec![program.to_string()];
            call.extend(args.iter().map(|a| a.to_string()));
            self.runs.borrow_mut().push(call);
            Ok(())
        }

        fn output(&self, program: &str, args: &[&str]) -> Result<String, Error> {
            let key = crate::process::display_command(program, args);
            match self.outputs.get(&key) {
                Some(Ok(out)) => Ok(out.clone()),
                Some(Err(status)) => Err(Error::CommandFailed {
                    command: key.clone(),
                    status: status.clone(),
                }),
                None => Err(Error::CommandFailed {
                    command: key,
                    status: "exited with status 1".to_string(),
                }),
            }
        }

        fn output_with_input(
            &self,
            _program: &str,
            _args: &[&str],
            _input: &str,
        ) -> Result<String, Error> {
            unreachable!("git queries never pipe input")
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dedupe_keeps_first_seen_order_and_drops_self() {
        let history = strings(&["A", "B", "Self", "A"]);
        assert_eq!(dedupe_authors(&history, "Self"), strings(&["A", "B"]));
    }

    #[test]
    fn dedupe_ignores_blank_lines_and_surrounding_space() {
        let history = strings(&["", "  Bob <b@x>  ", "Bob <b@x>", "   "]);
        assert_eq!(dedupe_authors(&history, "Me <me@x>"), strings(&["Bob <b@x>"]));
    }

    #[test]
    fn current_user_formats_name_and_email() {
        let runner = TableRunner::new(&[
            ("git config --get user.name", Ok("Jane Doe")),
            ("git config --get user.email", Ok("jane@example.com")),
        ]);
        assert_eq!(current_user(&runner).unwrap(), "Jane Doe <jane@example.com>");
    }

    #[test]
    fn current_user_requires_email() {
        let runner = TableRunner::new(&[("git config --get user.name", Ok("Jane Doe"))]);
        match current_user(&runner) {
            Err(Error::MissingUserConfig(field)) => assert_eq!(field, "email"),
            other => panic!("expected missing config, got {:?}", other),
        }
    }

    #[test]
    fn authors_excludes_current_user() {
        let runner = TableRunner::new(&[
            ("git config --get user.name", Ok("Me")),
            ("git config --get user.email", Ok("me@x.com")),
            (
                "git log --format=%an <%ae>",
                Ok("Alice <a@x.com>\nMe <me@x.com>\nBob <b@x.com>\nAlice <a@x.com>"),
            ),
        ]);
        assert_eq!(
            authors(&runner).unwrap(),
            strings(&["Alice <a@x.com>", "Bob <b@x.com>"])
        );
    }

    #[test]
    fn current_branch_falls_back_to_unknown() {
        let runner = TableRunner::new(&[(
            "git rev-parse --abbrev-ref HEAD",
            Err("fatal: ambiguous argument 'HEAD'"),
        )]);
        assert_eq!(current_branch(&runner), UNKNOWN_BRANCH);

        let runner = TableRunner::new(&[("git rev-parse --abbrev-ref HEAD", Ok("main"))]);
        assert_eq!(current_branch(&runner), "main");
    }

    #[test]
    fn commit_prefixes_subcommand() {
        let runner = TableRunner::new(&[]);
        commit(&runner, &strings(&["-F", "/tmp/msg", "--signoff"])).unwrap();
        assert_eq!(
            runner.runs.borrow().as_slice(),
            &[strings(&["git", "commit", "-F", "/tmp/msg", "--signoff"])]
        );
    }
}
