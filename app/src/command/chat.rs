//! Interactive conversation command.
//!
//! The REPL is the presentation layer: it feeds typed lines into the
//! controller's draft, maps slash commands onto controller operations and
//! renders whatever the controller reports through its event stream.

use super::slash::SlashCommand;
use super::upgrade::run_wizard;
use ghat_config::Config;
use ghat_conversation::{ExportError, SessionController, SessionEvent, export_assistant_messages};
use ghat_core::{Message, Transport};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tokio::sync::broadcast::Receiver;
use tracing::{info, warn};

/// Input parameters for the Chat command strategy.
#[derive(Debug, Clone)]
pub struct ChatInput {
    /// Optional endpoint override
    pub endpoint: Option<String>,
}

/// Strategy for executing the Chat command.
#[derive(Debug, Clone, Copy)]
pub struct ChatStrategy;

impl super::CommandStrategy for ChatStrategy {
    type Input = ChatInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let settings = ReplSettings {
            quick_prompts: config.chat.quick_prompts.clone(),
            notify: config.chat.notify,
            export_dir: config.export.resolve_directory()?,
        };
        let mut controller = super::build_controller(&config, input.endpoint);

        let stdin = std::io::stdin();
        let mut stdin = stdin.lock();
        let mut stdout = std::io::stdout();
        run_repl(&mut controller, &settings, &mut stdin, &mut stdout).await?;

        info!(
            "Conversation ended: {} messages",
            controller.session().message_count()
        );
        Ok(())
    }
}

/// Presentation settings resolved from config.
#[derive(Debug, Clone)]
pub struct ReplSettings {
    pub quick_prompts: Vec<String>,
    pub notify: bool,
    pub export_dir: PathBuf,
}

/// Run the chat loop until `exit` or end of input.
pub async fn run_repl<T, R, W>(
    controller: &mut SessionController<T>,
    settings: &ReplSettings,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    let mut events = controller.subscribe();

    writeln!(out, "=== ghat ===")?;
    writeln!(out, "Type /help for commands, 'exit' to leave.\n")?;
    if let Some(greeting) = controller.session().log().first() {
        writeln!(out, "{}\n", greeting.text())?;
    }

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        match SlashCommand::parse(&line) {
            None => {
                controller.set_draft(line.trim_end_matches(['\r', '\n']));
                controller.submit_draft().await;
            }
            Some(SlashCommand::Exit) => break,
            Some(SlashCommand::New) => controller.reset(),
            Some(SlashCommand::Save) => save(controller, settings, out)?,
            Some(SlashCommand::Quick(n)) => {
                match n.checked_sub(1).and_then(|i| settings.quick_prompts.get(i)) {
                    Some(prompt) => {
                        writeln!(out, "> {prompt}")?;
                        controller.quick_query(prompt).await;
                    }
                    None => writeln!(out, "No preset prompt #{n}.")?,
                }
            }
            Some(SlashCommand::Upgrade) => {
                run_wizard(input, out)?;
            }
            Some(SlashCommand::Help) => {
                write!(out, "{}", SlashCommand::help_text(&settings.quick_prompts))?;
            }
            Some(SlashCommand::Unknown(text)) => {
                writeln!(out, "Unknown command: {text}. Type /help for commands.")?;
            }
        }

        render_events(&mut events, controller, settings, out)?;
    }

    writeln!(
        out,
        "\nSession ended. Total messages: {}",
        controller.session().message_count()
    )?;
    Ok(())
}

fn save<T: Transport, W: Write>(
    controller: &SessionController<T>,
    settings: &ReplSettings,
    out: &mut W,
) -> anyhow::Result<()> {
    let artifact = match export_assistant_messages(controller.session().log()) {
        Ok(artifact) => artifact,
        Err(e @ ExportError::NoContent) => {
            writeln!(out, "{e}")?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    match artifact.write_to(&settings.export_dir) {
        Ok(path) => writeln!(out, "Saved to {}", path.display())?,
        Err(e) => {
            warn!("Export failed: {e}");
            writeln!(out, "Could not save: {e}")?;
        }
    }
    Ok(())
}

/// Drain pending events and print what the user has not seen yet.
fn render_events<T: Transport, W: Write>(
    events: &mut Receiver<SessionEvent>,
    controller: &SessionController<T>,
    settings: &ReplSettings,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut new_reply = false;
    while let Ok(event) = events.try_recv() {
        match event {
            SessionEvent::MessageAppended(message) if message.is_assistant() => {
                writeln!(out, "\n{}\n", message.text())?;
                new_reply = true;
            }
            SessionEvent::Reset => {
                writeln!(out, "\n--- New conversation ---\n")?;
                if let Some(greeting) = controller.session().log().first() {
                    writeln!(out, "{}\n", greeting.text())?;
                }
            }
            SessionEvent::MessageAppended(_) | SessionEvent::BusyChanged(_) => {}
        }
    }

    let newest_is_assistant = controller
        .session()
        .last_message()
        .is_some_and(Message::is_assistant);
    if settings.notify && new_reply && newest_is_assistant {
        write!(out, "\x07")?;
    }
    out.flush()?;
    Ok(())
}
