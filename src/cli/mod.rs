//! CLI module - argument parsing and the batch entry point

mod args;
pub mod convert;

pub use args::Cli;
pub use convert::run_convert;
