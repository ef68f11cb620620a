//! `/pencil` argument parsing

/// Forms of the `/pencil` command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeCommand {
    /// No argument: switch the mode on or off
    Toggle,
    /// `status`: read-only report
    Status,
    /// `reconnect`: restart the server connection
    Reconnect,
}

impl BridgeCommand {
    /// Anything that is not a known sub-command toggles
    pub fn parse(args: &str) -> Self {
        match args.trim() {
            "status" => BridgeCommand::Status,
            "reconnect" => BridgeCommand::Reconnect,
            _ => BridgeCommand::Toggle,
        }
    }

    /// Whether the command changes connection or mode state
    pub fn is_mutating(&self) -> bool {
        !matches!(self, BridgeCommand::Status)
    }
}
