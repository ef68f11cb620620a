//! Pencil mode
//!
//! `ModeController` drives the `/pencil` command: toggling the mode,
//! reconnecting, reporting status, and appending the server instructions
//! to the system prompt while the mode is active.

mod command;
mod prompt;
mod controller;

pub use command::BridgeCommand;
pub use prompt::append_instructions;
pub use controller::ModeController;
