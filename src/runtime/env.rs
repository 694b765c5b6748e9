//! Environment and terminal information.

use std::env;
use std::io::IsTerminal;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn env_var_impl(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }

    pub(crate) fn stdout_is_terminal_impl(&self) -> bool {
        std::io::stdout().is_terminal()
    }
}
