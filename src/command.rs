use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, warn};

use crate::geometry::{TAB_WIDTH, Viewport};
use crate::key::{KeyEvent, format_chord};
use crate::keymap::KeyOutcome;
use crate::state::AppState;

/// Every command a chord can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
	MoveUp,
	MoveDown,
	MoveLeft,
	MoveRight,
	PageUp,
	PageDown,
	MoveBeginningOfLine,
	MoveEndOfLine,
	MoveBeginningOfBuffer,
	MoveEndOfBuffer,
	DeleteChar,
	DeleteCharRight,
	InsertTab,
	NewLine,
	KillLine,
	Cut,
	Copy,
	Paste,
	StartSelection,
	Save,
	Quit,
}

impl Command {
	pub const ALL: [Command; 21] = [
		Command::MoveUp,
		Command::MoveDown,
		Command::MoveLeft,
		Command::MoveRight,
		Command::PageUp,
		Command::PageDown,
		Command::MoveBeginningOfLine,
		Command::MoveEndOfLine,
		Command::MoveBeginningOfBuffer,
		Command::MoveEndOfBuffer,
		Command::DeleteChar,
		Command::DeleteCharRight,
		Command::InsertTab,
		Command::NewLine,
		Command::KillLine,
		Command::Cut,
		Command::Copy,
		Command::Paste,
		Command::StartSelection,
		Command::Save,
		Command::Quit,
	];

	pub const fn name(self) -> &'static str {
		match self {
			Command::MoveUp => "move-up",
			Command::MoveDown => "move-down",
			Command::MoveLeft => "move-left",
			Command::MoveRight => "move-right",
			Command::PageUp => "page-up",
			Command::PageDown => "page-down",
			Command::MoveBeginningOfLine => "move-beginning-of-line",
			Command::MoveEndOfLine => "move-end-of-line",
			Command::MoveBeginningOfBuffer => "move-beginning-of-buffer",
			Command::MoveEndOfBuffer => "move-end-of-buffer",
			Command::DeleteChar => "delete-char",
			Command::DeleteCharRight => "delete-char-right",
			Command::InsertTab => "insert-tab",
			Command::NewLine => "new-line",
			Command::KillLine => "kill-line",
			Command::Cut => "cut",
			Command::Copy => "copy",
			Command::Paste => "paste",
			Command::StartSelection => "start-selection",
			Command::Save => "save",
			Command::Quit => "quit",
		}
	}
}

impl fmt::Display for Command {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown command `{0}`")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
	type Err = UnknownCommand;

	fn from_str(name: &str) -> Result<Self, Self::Err> {
		Command::ALL
			.into_iter()
			.find(|command| command.name() == name)
			.ok_or_else(|| UnknownCommand(name.to_string()))
	}
}

/// How the editing loop goes on after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
	Continue(AppState),
	/// Continue with this state once the buffer has been written out.
	Save(AppState),
	Terminate,
}

/// Applies the outcome of one key press to `state`.
pub fn dispatch(state: &AppState, outcome: &KeyOutcome, viewport: Viewport) -> CommandResult {
	match outcome {
		KeyOutcome::Resolved(command) => eval_command(state, *command, viewport),
		KeyOutcome::SelfInsert(ch) => CommandResult::Continue(eval_insert_char(state, *ch, viewport)),
		KeyOutcome::Unbound(keys) => CommandResult::Continue(eval_unbound(state, keys)),
		KeyOutcome::Pending => CommandResult::Continue(state.clone()),
	}
}

/// Runs `command` against `state`, then scrolls the result so the cursor is
/// visible in `viewport`.
pub fn eval_command(state: &AppState, command: Command, viewport: Viewport) -> CommandResult {
	debug!("eval {}", command);
	let buffer = &state.buffer;
	let next = match command {
		Command::MoveUp => state.with_buffer(buffer.move_up()),
		Command::MoveDown => state.with_buffer(buffer.move_down()),
		Command::MoveLeft => state.with_buffer(buffer.move_left()),
		Command::MoveRight => state.with_buffer(buffer.move_right()),
		Command::PageUp => state.with_buffer(buffer.page_up(viewport)),
		Command::PageDown => state.with_buffer(buffer.page_down(viewport)),
		Command::MoveBeginningOfLine => state.with_buffer(buffer.move_line_start()),
		Command::MoveEndOfLine => state.with_buffer(buffer.move_line_end()),
		Command::MoveBeginningOfBuffer => state.with_buffer(buffer.move_buffer_start()),
		Command::MoveEndOfBuffer => state.with_buffer(buffer.move_buffer_end()),
		Command::DeleteChar => state.with_buffer(buffer.delete_char()),
		Command::DeleteCharRight => state.with_buffer(buffer.delete_char_right()),
		Command::InsertTab => state.with_buffer(buffer.insert_char('\t')),
		Command::NewLine => state.with_buffer(buffer.new_line()),
		Command::KillLine => match buffer.kill_line() {
			Some((buffer, killed)) => state.with_buffer(buffer).put_clipboard(killed),
			None => state.put_message("end of buffer"),
		},
		Command::Cut => match buffer.cut() {
			Some((buffer, text)) => state.with_buffer(buffer).put_clipboard(text),
			None => state.put_message("no active selection"),
		},
		Command::Copy => match buffer.copy() {
			Some((buffer, text)) => state.with_buffer(buffer).put_clipboard(text),
			None => state.put_message("no active selection"),
		},
		Command::Paste => match &state.clipboard {
			Some(text) => state.with_buffer(buffer.paste(text)),
			None => state.put_message("clipboard is empty"),
		},
		Command::StartSelection => state.with_buffer(buffer.start_selection()).put_message("mark set"),
		Command::Save => return CommandResult::Save(scrolled(state.clone(), viewport)),
		Command::Quit => return CommandResult::Terminate,
	};
	CommandResult::Continue(scrolled(next, viewport))
}

/// Inserts `ch` at the cursor and reports it in the message log.
pub fn eval_insert_char(state: &AppState, ch: char, viewport: Viewport) -> AppState {
	let next = state.put_message(format!("adding character: {}", char_name(ch)));
	scrolled(next.with_buffer(next.buffer.insert_char(ch)), viewport)
}

/// Reports a key sequence with no binding; the buffer is left alone.
pub fn eval_unbound(state: &AppState, keys: &[KeyEvent]) -> AppState {
	let chord = format_chord(keys);
	warn!("unbound key sequence: {}", chord);
	state.put_message(format!("unbound key sequence: {chord}"))
}

fn scrolled(state: AppState, viewport: Viewport) -> AppState {
	let buffer = state.buffer.scroll_to_cursor(viewport, TAB_WIDTH);
	state.with_buffer(buffer)
}

fn char_name(ch: char) -> String {
	match ch {
		' ' => "SPC".to_string(),
		ch => ch.to_string(),
	}
}
