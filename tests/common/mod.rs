#![allow(dead_code)]

use cocommit::Error;
use cocommit::github::{UserDirectory, UserProfile};
use cocommit::process::Runner;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Stands in for git and the editor.
///
/// `git` queries are answered from `outputs`; the editor "types" `typed`
/// into the file it is handed; `git commit -F` captures the file contents
/// while the scratch file still exists.
#[derive(Default)]
pub struct FakeRunner {
    pub outputs: HashMap<String, String>,
    pub typed: String,
    pub runs: RefCell<Vec<Vec<String>>>,
    pub committed_file: RefCell<Option<String>>,
}

impl FakeRunner {
    pub fn with_output(mut self, command: &str, out: &str) -> Self {
        self.outputs.insert(command.to_string(), out.to_string());
        self
    }

    pub fn typing(mut self, text: &str) -> Self {
        self.typed = text.to_string();
        self
    }

    pub fn commit_calls(&self) -> Vec<Vec<String>> {
        self.runs
            .borrow()
            .iter()
            .filter(|c| c.len() > 1 && c[0] == "git" && c[1] == "commit")
            .cloned()
            .collect()
    }
}

impl Runner for FakeRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<(), Error> {
        let mut call = vec![program.to_string()];
        call.extend(args.iter().map(|a| a.to_string()));
        self.runs.borrow_mut().push(call);

        if program == "git" {
            if let Some(pos) = args.iter().position(|a| *a == "-F") {
                let contents = fs::read_to_string(args[pos + 1]).expect("message file exists");
                *self.committed_file.borrow_mut() = Some(contents);
            }
            return Ok(());
        }

        let path = args.last().expect("editor gets a path");
        let template = fs::read_to_string(path).expect("scratch file exists");
        fs::write(path, format!("{}{}", self.typed, template)).expect("editor writes");
        Ok(())
    }

    fn output(&self, program: &str, args: &[&str]) -> Result<String, Error> {
        let key = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<&str>>()
            .join(" ");
        self.outputs
            .get(&key)
            .cloned()
            .ok_or_else(|| Error::CommandFailed {
                command: key.clone(),
                status: "exited with status 1".to_string(),
            })
    }

    fn output_with_input(
        &self,
        program: &str,
        _args: &[&str],
        input: &str,
    ) -> Result<String, Error> {
        self.runs
            .borrow_mut()
            .push(vec![program.to_string(), input.to_string()]);
        // Pick the last candidate.
        Ok(input.lines().last().unwrap_or_default().to_string())
    }
}

/// Directory where every user exists; only `public` has a public email.
pub struct StaticDirectory;

impl UserDirectory for StaticDirectory {
    fn fetch_user(&self, handle: &str) -> Result<UserProfile, Error> {
        match handle {
            "public" => Ok(UserProfile {
                id: 1,
                email: Some("public@example.com".to_string()),
            }),
            "ghost" => Err(Error::UnknownUser(handle.to_string())),
            _ => Ok(UserProfile {
                id: 42,
                email: None,
            }),
        }
    }
}
