//! Terminal prompts for authentication

use crate::cli::style::Stylize;
use anstream::println;
use dialoguer::{Input, Password};
use eva_sub_cli::auth::Prompter;
use eva_sub_cli::error::{Error, Result};
use supports_hyperlinks::Stream;
use terminal_link::Link;

/// Prompter backed by the controlling terminal
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&self, prompt: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| Error::Internal(format!("Failed to read input: {e}")))
    }

    fn password(&self, prompt: &str) -> Result<String> {
        Password::new()
            .with_prompt(prompt)
            .interact()
            .map_err(|e| Error::Internal(format!("Failed to read password: {e}")))
    }

    fn message(&self, message: &str) {
        println!("{message}");
    }

    fn device_code(&self, verification_uri: &str, user_code: &str) {
        let uri = if supports_hyperlinks::on(Stream::Stdout) {
            Link::new(verification_uri, verification_uri).to_string()
        } else {
            verification_uri.to_string()
        };
        println!(
            "Please visit {} and enter this user code: {}",
            uri.accent(),
            user_code.emphasis()
        );
        println!("{}", "Waiting for the device to be authorized...".muted());
    }
}
