//! Line commands typed by the user and their hand-off to the viewer worker.

use client_core::ViewerCommand;
use crossbeam_channel::{Sender, TrySendError};

pub const USAGE: &str = "\
commands:
  load | dogs        fetch a new batch of random dogs
  breeds             reload the breed list
  search <text>      filter loaded dogs by breed text (empty clears)
  breed <name>       load images of one breed
  breed all | breed  show all breeds again
  clear              drop everything and reset inputs
  help               show this text
  quit | exit        leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(ViewerCommand),
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_line(line: &str) -> Input {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Empty;
    }

    let (verb, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (trimmed, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "load" | "dogs" => Input::Command(ViewerCommand::LoadRandomBatch),
        "breeds" => Input::Command(ViewerCommand::LoadBreedList),
        "search" => Input::Command(ViewerCommand::SetSearchText(rest.to_string())),
        "breed" => {
            let value = if rest.eq_ignore_ascii_case("all") {
                ""
            } else {
                rest
            };
            Input::Command(ViewerCommand::SelectBreed(value.to_string()))
        }
        "clear" => Input::Command(ViewerCommand::Clear),
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        _ => Input::Unknown(trimmed.to_string()),
    }
}

pub fn dispatch_command(cmd_tx: &Sender<ViewerCommand>, cmd: ViewerCommand, status: &mut String) {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued viewer command"),
        Err(TrySendError::Full(_)) => {
            *status = "Command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Viewer worker stopped; restart dog-viewer".to_string();
        }
    }
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
