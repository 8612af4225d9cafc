use std::ops::ControlFlow;

use tracing::{error, info};

use crate::command::{CommandResult, dispatch};
use crate::file_io::save_file;
use crate::geometry::Viewport;
use crate::key::KeyEvent;
use crate::keymap::{KeyHandler, KeyMap};
use crate::state::{AppState, FileBuffer};
use crate::ui::{TerminalSession, TerminalSessionError};

/// Editing loop: read a key, resolve it, evaluate, redraw.
pub struct App {
	state:       AppState,
	key_handler: KeyHandler,
}

impl App {
	pub fn new(buffer: FileBuffer, keymap: KeyMap) -> Self {
		Self { state: AppState::new(buffer), key_handler: KeyHandler::new(keymap) }
	}

	pub fn state(&self) -> &AppState {
		&self.state
	}

	pub fn run(mut self) -> Result<(), TerminalSessionError> {
		let title = format!("imed - {}", self.state.buffer.file_name);
		let mut session = TerminalSession::enter(&title)?;
		info!("editing {}", self.state.buffer.file_name);

		loop {
			session.present(&self.state)?;
			let Some(key) = session.next_key()? else {
				continue;
			};
			let viewport = session.size()?;
			if self.handle_key(key, viewport).is_break() {
				break;
			}
		}

		info!("quit {}", self.state.buffer.file_name);
		Ok(())
	}

	/// Feeds one key through the chord matcher and evaluates whatever it
	/// resolves to. Breaks once a quit command is evaluated.
	pub fn handle_key(&mut self, key: KeyEvent, viewport: Viewport) -> ControlFlow<()> {
		for outcome in self.key_handler.handle_key(key) {
			self.state = match dispatch(&self.state, &outcome, viewport) {
				CommandResult::Continue(state) => state,
				CommandResult::Save(state) => match save_file(&state.buffer) {
					Ok(()) => state.saved(),
					Err(err) => {
						error!(?err, "save {} failed", state.buffer.file_name);
						let message = format!("save failed: {}", state.buffer.file_name);
						state.put_message(message)
					}
				},
				CommandResult::Terminate => return ControlFlow::Break(()),
			};
		}
		ControlFlow::Continue(())
	}
}
