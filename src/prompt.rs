use dialoguer::{Input, Select, theme::ColorfulTheme};

/// Abstraction over a string input prompt.
///
/// Implementors define how string input is collected from the user,
/// including any styling or interactivity. This trait enables testability
/// by decoupling user input from the logic that consumes it.
pub trait StringPrompter {
    /// Prompt the user for a string input.
    ///
    /// # Parameters
    /// - `prompt`: The message shown to the user.
    ///
    /// # Returns
    /// `Ok(String)` with the raw input (possibly empty), or an `Err(String)`
    /// describing the failure.
    fn prompt(&mut self, prompt: &str) -> Result<String, String>;
}

/// Abstraction over a single-choice menu.
pub trait SelectPrompter {
    /// Show `items` and return the index of the chosen one.
    ///
    /// `default` is preselected so that pressing Enter picks it.
    fn select(&mut self, prompt: &str, items: &[&str], default: usize) -> Result<usize, String>;
}

/// Default implementation of the prompt traits using `dialoguer`.
///
/// Uses the `ColorfulTheme` for user-friendly styling.
pub struct DialoguerPrompter;

impl StringPrompter for DialoguerPrompter {
    fn prompt(&mut self, prompt: &str) -> Result<String, String> {
        let theme = ColorfulTheme::default();
        let input = Input::<String>::with_theme(&theme)
            .with_prompt(prompt)
            .allow_empty(true);
        match input.interact_text() {
            Ok(v) => Ok(v),
            Err(e) => Err(e.to_string()),
        }
    }
}

impl SelectPrompter for DialoguerPrompter {
    fn select(&mut self, prompt: &str, items: &[&str], default: usize) -> Result<usize, String> {
        let theme = ColorfulTheme::default();
        let select = Select::with_theme(&theme)
            .with_prompt(prompt)
            .items(items)
            .default(default);
        match select.interact() {
            Ok(v) => Ok(v),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// Returns `true` only for `y` or `yes`, ignoring case and surrounding space.
///
/// Anything else, including typos, counts as "no".
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    answer == "y" || answer == "yes"
}

/// Ask a yes/no question through a free-text prompt.
///
/// # Returns
/// - `Ok(true)` if the user answered `y`/`yes`.
/// - `Ok(false)` for any other answer.
/// - `Err(String)` if input failed.
pub fn ask_yes_no<P: StringPrompter>(prompter: &mut P, question: &str) -> Result<bool, String> {
    let prompt = format!("{} (y/n)", question);
    prompter.prompt(&prompt).map(|a| is_affirmative(&a))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockStringPrompter {
        pub response: Result<String, String>,
        pub expected_prompt: String,
    }

    impl StringPrompter for MockStringPrompter {
        fn prompt(&mut self, prompt: &str) -> Result<String, String> {
            assert_eq!(prompt, self.expected_prompt);
            self.response.clone()
        }
    }

    #[test]
    fn test_is_affirmative_accepts_y_and_yes() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("Y"));
        assert!(is_affirmative(" yes "));
        assert!(is_affirmative("YES"));
    }

    #[test]
    fn test_is_affirmative_rejects_everything_else() {
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("yep"));
        assert!(!is_affirmative("sure"));
    }

    #[test]
    fn test_ask_yes_no_true() {
        let mut prompter = MockStringPrompter {
            response: Ok("yes".to_string()),
            expected_prompt: "More co-author? (y/n)".to_string(),
        };
        assert_eq!(ask_yes_no(&mut prompter, "More co-author?").unwrap(), true);
    }

    #[test]
    fn test_ask_yes_no_malformed_is_false() {
        let mut prompter = MockStringPrompter {
            response: Ok("maybe".to_string()),
            expected_prompt: "More co-author? (y/n)".to_string(),
        };
        assert_eq!(ask_yes_no(&mut prompter, "More co-author?").unwrap(), false);
    }

    #[test]
    fn test_ask_yes_no_error() {
        let mut prompter = MockStringPrompter {
            response: Err("input failed".to_string()),
            expected_prompt: "More co-author? (y/n)".to_string(),
        };
        assert!(ask_yes_no(&mut prompter, "More co-author?").is_err());
    }
}
