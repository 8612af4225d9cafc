mod status_bar;
mod terminal_session;
mod window_area;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::state::AppState;
use status_bar::{MessageLineWidget, ModeLineWidget};
pub use terminal_session::{TerminalSession, TerminalSessionError};
use window_area::WindowAreaWidget;

/// Draws an [`AppState`]: the text area, then the mode line and the message
/// line in the two reserved rows at the bottom.
#[derive(Debug, Default)]
pub struct Renderer;

impl Renderer {
	pub fn new() -> Self {
		Self
	}

	pub fn render(&self, frame: &mut Frame<'_>, state: &AppState) {
		let [text_area, mode_line, message_line] =
			Layout::vertical([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)]).areas(frame.area());

		let (window_area, cursor_position) = WindowAreaWidget::from_state(state, text_area);
		frame.render_widget(window_area, text_area);
		frame.render_widget(ModeLineWidget::from_state(state), mode_line);
		frame.render_widget(MessageLineWidget::from_state(state), message_line);
		if let Some(cursor) = cursor_position {
			frame.set_cursor_position(cursor);
		}
	}
}
