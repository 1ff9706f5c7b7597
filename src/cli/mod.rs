pub mod commands;
pub mod form;
mod handlers;

pub use commands::{Cli, Commands, WardrobeCommands};
pub use handlers::dispatch;
