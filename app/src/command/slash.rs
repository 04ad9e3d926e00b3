use std::fmt::Write as _;

/// Commands understood by the chat REPL. Anything else is sent as a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlashCommand {
    New,
    Save,
    Quick(usize),
    Upgrade,
    Help,
    Exit,
    Unknown(String),
}

impl SlashCommand {
    /// Parse a REPL line. Returns `None` for ordinary chat input.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if matches!(line, "exit" | "quit") {
            return Some(Self::Exit);
        }

        let rest = line.strip_prefix('/')?;
        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts.next();

        let command = match name.as_str() {
            "new" | "home" => Self::New,
            "save" => Self::Save,
            "quick" => match arg.and_then(|a| a.parse::<usize>().ok()) {
                Some(n) => Self::Quick(n),
                None => Self::Unknown(line.to_string()),
            },
            "upgrade" => Self::Upgrade,
            "help" => Self::Help,
            "exit" | "quit" => Self::Exit,
            _ => Self::Unknown(line.to_string()),
        };
        Some(command)
    }

    #[must_use]
    pub fn help_text(quick_prompts: &[String]) -> String {
        let mut text = String::from(
            "Commands:\n  \
             /new        start a new conversation\n  \
             /save       save assistant replies to a text file\n  \
             /quick N    send preset prompt N\n  \
             /upgrade    upgrade to Pro\n  \
             /help       show this help\n  \
             /exit       leave\n",
        );
        if !quick_prompts.is_empty() {
            text.push_str("\nPresets:\n");
            for (i, prompt) in quick_prompts.iter().enumerate() {
                let _ = writeln!(text, "  {}. {prompt}", i + 1);
            }
        }
        text
    }
}
