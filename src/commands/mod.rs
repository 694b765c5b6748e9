mod analyze;
pub mod config;
mod interactive;
pub mod services;

pub use analyze::{analyze, run_analyze};
pub use config::{Config, ConfigOptions};
pub use interactive::{PROMPT, interactive, run_interactive};
