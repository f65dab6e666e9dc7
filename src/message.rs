//! Commit message assembly.
//!
//! Trailers are appended after exactly one blank line:
//!
//! ```text
//! Fix the widget
//!
//! Co-Authored-By: alice <alice@example.com>
//! Co-Authored-By: bob <1+bob@users.noreply.github.com>
//! ```

use crate::config::EditorVars;
use crate::error::Error;
use crate::git;
use crate::process::Runner;

use std::fs;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Literal that starts every trailer line.
pub const TRAILER_PREFIX: &str = "Co-Authored-By: ";

/// Editor used when nothing else is configured.
pub const FALLBACK_EDITOR: &str = "vi";

const COMMENT_MARKER: char = '#';

/// Appends a trailer block for `co_authors` to `body`.
///
/// Repeated co-authors, and trailers the body already carries, are written
/// once. When the body already ends in a trailer paragraph (`Signed-off-by:`
/// and the like) the new lines join it, so git still reads one block.
/// Trailing whitespace is trimmed from the result.
///
/// ```
/// use cocommit::message::append_trailers;
///
/// let msg = append_trailers("fix bug", &["alice <a@x.com>".to_string()]);
/// assert_eq!(msg, "fix bug\n\nCo-Authored-By: alice <a@x.com>");
/// ```
pub fn append_trailers(body: &str, co_authors: &[String]) -> String {
    let body = body.trim_end();
    let existing: Vec<&str> = body.lines().map(str::trim).collect();
    let mut trailers: Vec<String> = Vec::new();
    for co_author in co_authors {
        let line = format!("{}{}", TRAILER_PREFIX, co_author);
        if !trailers.contains(&line) && !existing.contains(&line.as_str()) {
            trailers.push(line);
        }
    }

    if trailers.is_empty() {
        return body.to_string();
    }
    let separator = if ends_with_trailer_block(body) {
        "\n"
    } else {
        "\n\n"
    };
    format!("{}{}{}", body, separator, trailers.join("\n"))
}

/// `Token: value`, where the token is letters, digits and dashes.
fn is_trailer_line(line: &str) -> bool {
    match line.split_once(": ") {
        Some((token, _)) => {
            !token.is_empty() && token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        }
        None => false,
    }
}

/// Whether the last paragraph of `body` is made only of trailer lines.
/// A message with a single paragraph has no trailer block.
fn ends_with_trailer_block(body: &str) -> bool {
    let Some((_, last)) = body.rsplit_once("\n\n") else {
        return false;
    };
    let mut lines = last.lines().peekable();
    lines.peek().is_some() && lines.all(is_trailer_line)
}

/// Drops every line whose trimmed form starts with `#`, then trims the
/// result. Applying it twice gives the same result as applying it once.
pub fn strip_comments(message: &str) -> String {
    message
        .lines()
        .filter(|l| !l.trim().starts_with(COMMENT_MARKER))
        .collect::<Vec<&str>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Initial scratch file contents shown in the editor.
pub fn template(branch: &str) -> String {
    format!(
        "\n\n\
         # Note: Co-Authored-By trailers will be automatically added to your commit message.\n\
         \n\
         # Please enter the commit message for your changes. Lines starting\n\
         # with '#' will be ignored, and an empty message aborts the commit.\n\
         #\n\
         # On branch {}\n\
         #\n",
        branch
    )
}

/// Picks the editor: `GIT_EDITOR`, `VISUAL`, `EDITOR`, `core.editor`, then
/// [`FALLBACK_EDITOR`].
pub fn resolve_editor<R: Runner>(vars: &EditorVars, runner: &R) -> String {
    let editor = vars
        .first()
        .map(|e| e.to_string())
        .or_else(|| git::core_editor(runner))
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string());
    debug!(%editor, "resolved editor");
    editor
}

/// Commit message file handed to the editor and then to `git commit -F`.
///
/// The file is deleted when this value is dropped, on success and on every
/// error path alike.
pub struct ScratchFile {
    file: NamedTempFile,
}

impl ScratchFile {
    pub fn create() -> Result<Self, Error> {
        let file = tempfile::Builder::new()
            .prefix("COMMIT_EDITMSG")
            .tempfile()
            .map_err(Error::io("failed to create temporary commit message file"))?;
        Ok(ScratchFile { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn write(&self, contents: &str) -> Result<(), Error> {
        fs::write(self.file.path(), contents)
            .map_err(Error::io("failed to update commit message file"))
    }

    pub fn read(&self) -> Result<String, Error> {
        fs::read_to_string(self.file.path()).map_err(Error::io("failed to read commit message"))
    }
}

/// Opens `path` in `editor`, attached to the terminal.
///
/// Editor values with arguments (`code --wait`) are run through `sh -c`, the
/// same way git runs them.
pub fn launch_editor<R: Runner>(runner: &R, editor: &str, path: &Path) -> Result<(), Error> {
    let path = path.to_string_lossy().into_owned();
    let result = if editor.contains(char::is_whitespace) {
        let script = format!("{} \"$@\"", editor);
        runner.run("sh", &["-c", script.as_str(), editor, path.as_str()])
    } else {
        runner.run(editor, &[path.as_str()])
    };
    result.map_err(|e| Error::Editor(e.to_string()))
}

/// Has the user write a message in `editor` and returns it with trailers.
///
/// The final message is also written back to `scratch`, ready for
/// `git commit -F`.
///
/// # Errors
///
/// * [`Error::Editor`] if the editor cannot start or exits non-zero.
/// * [`Error::EmptyMessage`] if nothing but comments and whitespace is left.
pub fn compose_in_editor<R: Runner>(
    runner: &R,
    editor: &str,
    scratch: &ScratchFile,
    co_authors: &[String],
) -> Result<String, Error> {
    let branch = git::current_branch(runner);
    scratch.write(&template(&branch))?;

    launch_editor(runner, editor, scratch.path())?;

    let body = strip_comments(&scratch.read()?);
    if body.is_empty() {
        return Err(Error::EmptyMessage);
    }

    let message = append_trailers(&body, co_authors);
    scratch.write(&message)?;
    Ok(message)
}
