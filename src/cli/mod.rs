//! Command-line interface module.

mod args;
pub mod bake;
pub mod serve;

pub use args::{BakeArgs, Cli, Commands, ServeArgs};
