#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use std::io::Write;

use anyhow::Result;
use tokio::io::AsyncBufRead;
use tokio::io::AsyncBufReadExt;
use yansi::Paint;

use super::render::render_message;
use crate::domain::models::SlashCommand;
use crate::domain::services::ChatOutcome;
use crate::domain::services::ConversationStore;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /history (/hist) - Prints the conversation so far.
- /reset (/clear) - Forgets the conversation and starts a new one.
- /quit /exit (/q) - Exit the chat.
- /help (/h) - Provides this help menu.
        "#;

    return text.trim().to_string();
}

fn print_transcript<W: Write>(store: &ConversationStore, out: &mut W) -> Result<()> {
    let history = store.history();
    if history.is_empty() {
        writeln!(out, "The conversation is empty.")?;
        return Ok(());
    }

    for message in history.iter() {
        writeln!(out, "{}", render_message(message))?;
    }

    return Ok(());
}

fn print_outcome<W: Write>(outcome: ChatOutcome, out: &mut W) -> Result<()> {
    match outcome {
        ChatOutcome::Replied(message) | ChatOutcome::Fallback(message) => {
            writeln!(out, "{}", render_message(&message))?;
        }
        ChatOutcome::Failed(err) => {
            writeln!(
                out,
                "{}",
                Paint::red(format!("The assistant could not be reached: {err}"))
            )?;
        }
        ChatOutcome::Busy => {
            writeln!(out, "Still waiting for the previous reply.")?;
        }
        ChatOutcome::Empty | ChatOutcome::Discarded => {}
    }

    return Ok(());
}

/// Line-oriented chat loop. Each non-command line is sent to the assistant
/// and awaited before the next one is read.
pub async fn start<R, W>(store: &ConversationStore, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(
        out,
        "{}",
        Paint::new("Symptom chat. Describe how you feel, or type /help for commands.").bold()
    )?;

    let mut lines = input.lines();
    loop {
        write!(out, "{} ", Paint::cyan(">"))?;
        out.flush()?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };

        if let Some(command) = SlashCommand::parse(&line) {
            if command.is_quit() {
                break;
            }
            if command.is_reset() {
                store.reset();
                writeln!(out, "Started a new conversation.")?;
            }
            if command.is_help() {
                writeln!(out, "{}", help_text())?;
            }
            if command.is_transcript() {
                print_transcript(store, out)?;
            }
            continue;
        }

        let outcome = store.send(&line).await;
        print_outcome(outcome, out)?;
    }

    return Ok(());
}
