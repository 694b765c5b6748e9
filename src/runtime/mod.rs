//! Runtime abstraction for process-level operations.
//!
//! Commands reach the environment and the terminal only through [`Runtime`],
//! so they can be driven by a mock in tests.
//!
//! # Structure
//!
//! - `env` - Environment variables and terminal detection
//! - `user` - User interaction (line prompts)

mod env;
mod user;

use anyhow::Result;
use std::env as std_env;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;

    /// Whether standard output is attached to a terminal.
    fn stdout_is_terminal(&self) -> bool;

    // User interaction
    /// Print `prompt` and read one line from the user, without its line ending.
    /// Returns `None` at end of input.
    fn prompt(&self, prompt: &str) -> Result<Option<String>>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    fn stdout_is_terminal(&self) -> bool {
        self.stdout_is_terminal_impl()
    }

    fn prompt(&self, prompt: &str) -> Result<Option<String>> {
        self.prompt_impl(prompt)
    }
}
