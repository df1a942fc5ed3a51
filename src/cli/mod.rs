pub mod commands;
pub mod logging;
pub mod render;

pub use commands::{Cli, Commands};
