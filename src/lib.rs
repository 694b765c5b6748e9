pub mod analysis;
pub mod commands;
pub mod dashboard;
pub mod github;
pub mod http;
pub mod render;
pub mod runtime;
