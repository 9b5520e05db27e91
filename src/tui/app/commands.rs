pub const HELP_TEXT: &str = r"Available commands:
/help  - Show this help message
/copy  - Copy the latest reply to the clipboard
/exit  - Exit the application

Keys: Enter send, Shift+Enter newline, Up/Down history,
PgUp/PgDn scroll, Ctrl+Y copy, 1-4 pick a suggestion, Ctrl+C quit";

pub const SLASH_COMMANDS: &[&str] = &["/help", "/copy", "/exit"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Help,
    Copy,
    Exit,
    Unknown(String),
}

impl SlashCommand {
    /// Returns `None` when the input is a prompt rather than a command.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if !trimmed.starts_with('/') {
            return None;
        }

        let cmd = trimmed.split_whitespace().next().unwrap_or(trimmed);
        Some(match cmd {
            "/help" => Self::Help,
            "/copy" => Self::Copy,
            "/exit" | "/quit" => Self::Exit,
            _ => Self::Unknown(cmd.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_commands() {
        assert_eq!(SlashCommand::parse("/help"), Some(SlashCommand::Help));
        assert_eq!(SlashCommand::parse(" /copy "), Some(SlashCommand::Copy));
        assert_eq!(SlashCommand::parse("/exit now"), Some(SlashCommand::Exit));
    }

    #[test]
    fn unknown_command_keeps_its_name() {
        assert_eq!(
            SlashCommand::parse("/model pro"),
            Some(SlashCommand::Unknown("/model".to_string()))
        );
    }

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(SlashCommand::parse("hello /help"), None);
    }

    #[test]
    fn every_listed_command_parses() {
        for cmd in SLASH_COMMANDS {
            assert!(!matches!(
                SlashCommand::parse(cmd),
                Some(SlashCommand::Unknown(_)) | None
            ));
        }
    }
}
