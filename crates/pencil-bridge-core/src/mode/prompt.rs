//! System prompt augmentation

/// `system_prompt`, a blank line, then `instructions` verbatim
pub fn append_instructions(system_prompt: &str, instructions: &str) -> String {
    format!("{}\n\n{}", system_prompt, instructions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append() {
        assert_eq!(
            append_instructions("You are a coding agent.", "Use batch_design for edits."),
            "You are a coding agent.\n\nUse batch_design for edits."
        );
    }

    #[test]
    fn test_empty_prompt() {
        assert_eq!(append_instructions("", "x"), "\n\nx");
    }
}
