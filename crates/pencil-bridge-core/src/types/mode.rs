//! Pencil mode state

/// Whether bridge tools are exposed, and which names count as bridge tools
///
/// `tool_names` is the set registered most recently; activation and
/// deactivation deltas are computed against it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeState {
    pub active: bool,
    pub tool_names: Vec<String>,
}
