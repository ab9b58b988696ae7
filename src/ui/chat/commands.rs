use std::str::FromStr;

use crate::events::Page;
use crate::i18n::Language;

use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Commands invoked by starting a message with a leading slash.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, AsRefStr, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum SlashCommand {
    /// Switch the interface language (zh, en)
    Lang,
    /// Jump to a site section (home, solutions, products, about, contact)
    Page,
    /// Minimize or restore the chat panel
    Chat,
    /// Show help
    Help,
    /// Exit the application
    Bye,
}

pub fn command_entries() -> Vec<CommandEntry> {
    SlashCommand::iter()
        .map(|command| CommandEntry {
            command,
            keyword: command.command(),
            description: command.description(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub command: SlashCommand,
    pub argument: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandEntry {
    pub command: SlashCommand,
    pub keyword: &'static str,
    pub description: &'static str,
}

impl ParsedCommand {
    pub fn argument(&self) -> Option<&str> {
        self.argument.as_deref()
    }

    pub fn language_target(&self) -> Option<Language> {
        if self.command != SlashCommand::Lang {
            return None;
        }
        self.argument()?.parse().ok()
    }

    pub fn page_target(&self) -> Option<Page> {
        if self.command != SlashCommand::Page {
            return None;
        }

        let arg = self.argument()?.trim().to_lowercase();
        match arg.as_str() {
            "h" | "home" => Some(Page::Home),
            "s" | "solutions" => Some(Page::Solutions),
            "p" | "products" => Some(Page::Products),
            "a" | "about" => Some(Page::About),
            "c" | "contact" => Some(Page::Contact),
            _ => None,
        }
    }
}

impl SlashCommand {
    /// User-visible description shown in help.
    pub fn description(self) -> &'static str {
        match self {
            SlashCommand::Lang => "switch the interface language (zh, en)",
            SlashCommand::Page => "jump to a site section (home, solutions, products, about, contact)",
            SlashCommand::Chat => "minimize or restore the chat panel",
            SlashCommand::Help => "show available commands",
            SlashCommand::Bye => "exit the application",
        }
    }

    /// Command string without the leading '/'.
    pub fn command(self) -> &'static str {
        self.into()
    }
}

/// Return all built-in commands paired with their command string.
pub fn built_in_slash_commands() -> Vec<(&'static str, SlashCommand)> {
    SlashCommand::iter().map(|c| (c.command(), c)).collect()
}

/// Parse a slash command from user input.
pub fn parse_slash_command(input: &str) -> Option<ParsedCommand> {
    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].split_whitespace();
    let head = parts.next()?;
    let rest: Vec<String> = parts.map(|s| s.to_string()).collect();

    let command = SlashCommand::from_str(head)
        .ok()
        .or_else(|| match head.to_lowercase().as_str() {
            "q" | "quit" | "exit" => Some(SlashCommand::Bye),
            "l" | "language" => Some(SlashCommand::Lang),
            "p" | "goto" => Some(SlashCommand::Page),
            "h" | "?" => Some(SlashCommand::Help),
            _ => None,
        })?;

    let argument = if rest.is_empty() {
        None
    } else {
        Some(rest.join(" "))
    };

    Some(ParsedCommand { command, argument })
}

/// Help text listing all available commands.
pub fn get_help_text() -> String {
    let mut help = String::from("Available commands:\n\n");
    for (command_str, command) in built_in_slash_commands() {
        help.push_str(&format!("/{} - {}\n", command_str, command.description()));
    }

    help.push_str("\nAliases: /l for /lang, /p for /page, /q for /bye, /? for /help");
    help.push_str("\nUse /page <h|s|p|a|c> to jump directly to a section.");

    help
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_arguments_and_aliases() {
        let parsed = parse_slash_command("/lang en").unwrap();
        assert_eq!(parsed.command, SlashCommand::Lang);
        assert_eq!(parsed.language_target(), Some(Language::En));

        let parsed = parse_slash_command("/p contact").unwrap();
        assert_eq!(parsed.command, SlashCommand::Page);
        assert_eq!(parsed.page_target(), Some(Page::Contact));

        assert_eq!(
            parse_slash_command("/q").unwrap().command,
            SlashCommand::Bye
        );
    }

    #[test]
    fn rejects_non_commands_and_unknown_keywords() {
        assert!(parse_slash_command("hello").is_none());
        assert!(parse_slash_command("/frobnicate").is_none());
    }

    #[test]
    fn target_helpers_ignore_other_commands() {
        let parsed = parse_slash_command("/chat en").unwrap();
        assert_eq!(parsed.language_target(), None);
        assert_eq!(parsed.page_target(), None);
    }
}
