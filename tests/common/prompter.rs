//! Prompter that answers from a script

#![allow(dead_code)]

use eva_sub_cli::auth::Prompter;
use eva_sub_cli::error::{Error, Result};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Answers prompts in order and records everything shown
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
    messages: Mutex<Vec<String>>,
    device_codes: Mutex<Vec<(String, String)>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn device_codes(&self) -> Vec<(String, String)> {
        self.device_codes.lock().unwrap().clone()
    }

    fn next(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Internal(format!("no scripted answer for '{prompt}'")))
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }

    fn password(&self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }

    fn message(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn device_code(&self, verification_uri: &str, user_code: &str) {
        self.device_codes
            .lock()
            .unwrap()
            .push((verification_uri.to_string(), user_code.to_string()));
    }
}
