//! Command-line interface module
//!
//! Argument definitions live in `args`; each command has its own handler.

pub mod args;
pub mod ask;
pub mod generate;
pub mod history;
pub mod init;
pub mod input;
pub mod models;
pub mod segment;
pub mod templates;

pub use args::*;
pub use ask::handle_ask_command;
pub use generate::handle_generate_command;
pub use history::handle_history_command;
pub use init::handle_init_command;
pub use models::handle_models_command;
pub use segment::handle_segment_command;
pub use templates::handle_templates_command;
