pub mod commands;
pub mod handlers;

pub use commands::{AuthCommands, BackendArg, Cli, Commands, OnboardingCommands};
