use std::io;

use crossterm::event;
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use tracing::trace;

use super::Renderer;
use crate::geometry::Viewport;
use crate::input::InputHandler;
use crate::key::KeyEvent;
use crate::state::AppState;

#[derive(Debug, Error)]
pub enum TerminalSessionError {
	#[error("enable raw mode failed")]
	EnableRawMode {
		#[source]
		source: io::Error,
	},
	#[error("enter alternate screen failed")]
	EnterAlternateScreen {
		#[source]
		source: io::Error,
	},
	#[error("create terminal backend failed")]
	CreateTerminal {
		#[source]
		source: io::Error,
	},
	#[error("terminal draw failed")]
	Draw {
		#[source]
		source: io::Error,
	},
	#[error("read terminal event failed")]
	ReadEvent {
		#[source]
		source: io::Error,
	},
	#[error("query terminal size failed")]
	QuerySize {
		#[source]
		source: io::Error,
	},
}

struct TerminalModeGuard;

impl Drop for TerminalModeGuard {
	fn drop(&mut self) {
		let _ = disable_raw_mode();
		let mut stdout = io::stdout();
		let _ = execute!(stdout, LeaveAlternateScreen);
	}
}

/// Raw-mode, alternate-screen terminal. Dropping it restores the terminal,
/// including on early return and unwinding.
pub struct TerminalSession {
	terminal:    Terminal<CrosstermBackend<io::Stdout>>,
	input:       InputHandler,
	renderer:    Renderer,
	_mode_guard: TerminalModeGuard,
}

impl TerminalSession {
	pub fn enter(title: &str) -> Result<Self, TerminalSessionError> {
		enable_raw_mode().map_err(|source| TerminalSessionError::EnableRawMode { source })?;
		let mode_guard = TerminalModeGuard;
		let mut stdout = io::stdout();
		execute!(stdout, EnterAlternateScreen, SetTitle(title))
			.map_err(|source| TerminalSessionError::EnterAlternateScreen { source })?;
		let backend = CrosstermBackend::new(stdout);
		let terminal =
			Terminal::new(backend).map_err(|source| TerminalSessionError::CreateTerminal { source })?;
		Ok(Self { terminal, input: InputHandler::new(), renderer: Renderer::new(), _mode_guard: mode_guard })
	}

	/// Text area available to the buffer.
	pub fn size(&self) -> Result<Viewport, TerminalSessionError> {
		let (width, height) = terminal::size().map_err(|source| TerminalSessionError::QuerySize { source })?;
		Ok(Viewport::from_terminal(width, height))
	}

	/// Blocks for the next terminal event. `None` when the event is not a key
	/// the editor understands, e.g. a resize; callers just redraw.
	pub fn next_key(&mut self) -> Result<Option<KeyEvent>, TerminalSessionError> {
		let event = event::read().map_err(|source| TerminalSessionError::ReadEvent { source })?;
		let key = self.input.key(&event);
		trace!(?event, ?key, "terminal event");
		Ok(key)
	}

	pub fn present(&mut self, state: &AppState) -> Result<(), TerminalSessionError> {
		let renderer = &self.renderer;
		self.terminal
			.draw(|frame| renderer.render(frame, state))
			.map_err(|source| TerminalSessionError::Draw { source })?;
		Ok(())
	}
}
