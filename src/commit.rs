use crate::config::EditorVars;
use crate::error::Error;
use crate::git;
use crate::message::{ScratchFile, append_trailers, compose_in_editor, resolve_editor};
use crate::process::Runner;

use tracing::info;

const SHORT_MESSAGE: &str = "-m";
const LONG_MESSAGE: &str = "--message";
const LONG_MESSAGE_EQ: &str = "--message=";

/// Returns `true` for the flags that take the inline message as the next
/// argument.
fn is_message_flag(arg: &str) -> bool {
    arg == SHORT_MESSAGE || arg == LONG_MESSAGE
}

/// Byte offset of the message inside an attached form (`-mfix` or
/// `--message=fix`), or `None` if `arg` is not one.
fn attached_message_offset(arg: &str) -> Option<usize> {
    if arg.starts_with(LONG_MESSAGE_EQ) {
        Some(LONG_MESSAGE_EQ.len())
    } else if arg.starts_with(SHORT_MESSAGE) && arg.len() > SHORT_MESSAGE.len() {
        Some(SHORT_MESSAGE.len())
    } else {
        None
    }
}

/// Location of the inline message in a commit argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineMessage {
    /// Index of the argument holding the message.
    pub index: usize,
    /// Where the message starts inside that argument: `0` after a separate
    /// `-m`, past the flag for `-mfix` and `--message=fix`.
    pub offset: usize,
}

/// Finds the inline message: the last `-m`/`--message` that has a value,
/// whether given separately (`-m fix`) or attached (`-mfix`,
/// `--message=fix`). Arguments after `--` are pathspecs and never match.
///
/// # Returns
///
/// The location of the message, or `None` if no inline message was given.
pub fn find_message(args: &[String]) -> Option<InlineMessage> {
    let mut found = None;
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        if arg == "--" {
            break;
        }
        if is_message_flag(arg) {
            if i + 1 < args.len() {
                found = Some(InlineMessage {
                    index: i + 1,
                    offset: 0,
                });
            }
            i += 2;
            continue;
        }
        if let Some(offset) = attached_message_offset(arg) {
            found = Some(InlineMessage { index: i, offset });
        }
        i += 1;
    }
    found
}

/// Commit arguments with the inline message extended by trailers. Any flag
/// prefix attached to the message is kept as is.
pub fn inline_args(
    args: &[String],
    message: InlineMessage,
    co_authors: &[String],
) -> Vec<String> {
    let mut out = args.to_vec();
    let arg = &args[message.index];
    let (flag, body) = arg.split_at(message.offset);
    out[message.index] = format!("{}{}", flag, append_trailers(body, co_authors));
    out
}

/// Pass-through arguments for editor mode: inline-message flags and their
/// values are dropped, in both separate and attached forms, and
/// `-F <message_file>` is added ahead of any `--` pathspec separator.
pub fn editor_args(args: &[String], message_file: &str) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len() + 2);
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--" {
            out.push("-F".to_string());
            out.push(message_file.to_string());
            out.push(arg.clone());
            out.extend(iter.cloned());
            return out;
        }
        if is_message_flag(arg) {
            iter.next();
            continue;
        }
        if attached_message_offset(arg).is_some() {
            continue;
        }
        out.push(arg.clone());
    }
    out.push("-F".to_string());
    out.push(message_file.to_string());
    out
}

/// Commits with `co_authors` credited.
///
/// With an inline message (`-m`), trailers are added to it and `git commit`
/// runs with the rewritten arguments. Otherwise the user writes the message
/// in their editor (see [`resolve_editor`]) and `git commit -F` reads it from
/// a scratch file, which is removed before this function returns.
///
/// # Errors
///
/// Any error from composing the message, in which case `git commit` is never
/// run, or the failure of `git commit` itself.
pub fn commit<R: Runner>(
    runner: &R,
    args: &[String],
    co_authors: &[String],
    editors: &EditorVars,
) -> Result<(), Error> {
    if let Some(message) = find_message(args) {
        info!("adding trailers to inline message");
        return git::commit(runner, &inline_args(args, message, co_authors));
    }

    let editor = resolve_editor(editors, runner);
    let scratch = ScratchFile::create()?;
    compose_in_editor(runner, &editor, &scratch, co_authors)?;
    let path = scratch.path().to_string_lossy().into_owned();
    info!(file = %path, "committing with message file");
    git::commit(runner, &editor_args(args, &path))
}
