mod callbacks;
mod commands;
mod messages;

pub use callbacks::handle_callback;
pub use commands::{handle_command, Command};
pub use messages::handle_message;
