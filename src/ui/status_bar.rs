use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::state::AppState;

/// Reverse-video line with the dirty marker, file name and cursor position.
pub(super) struct ModeLineWidget {
	text: String,
}

impl ModeLineWidget {
	pub(super) fn from_state(state: &AppState) -> Self {
		let buffer = &state.buffer;
		let marker = if buffer.is_dirty() { "**" } else { "--" };
		Self { text: format!(" {marker} {}  ({}, {})", buffer.file_name, buffer.cursor.col, buffer.cursor.row) }
	}
}

impl Widget for ModeLineWidget {
	fn render(self, area: Rect, buf: &mut Buffer) {
		let style = Style::default().add_modifier(Modifier::REVERSED);
		buf.set_style(area, style);
		Paragraph::new(Line::from(Span::styled(self.text, style))).render(area, buf);
	}
}

/// Most recent message, if any.
pub(super) struct MessageLineWidget {
	message: Option<String>,
}

impl MessageLineWidget {
	pub(super) fn from_state(state: &AppState) -> Self {
		Self { message: state.last_message().map(|message| message.content.clone()) }
	}
}

impl Widget for MessageLineWidget {
	fn render(self, area: Rect, buf: &mut Buffer) {
		let Some(message) = self.message else {
			return;
		};
		Paragraph::new(Line::from(vec![
			Span::styled("message: ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
			Span::raw(message),
		]))
		.render(area, buf);
	}
}
