//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod apply;
mod completions;
mod inspect;
mod utils;

pub use apply::handle_apply;
pub use completions::handle_completions;
pub use inspect::handle_inspect;
