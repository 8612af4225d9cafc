use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

use crate::geometry::{Coord, TAB_WIDTH, display_col, display_line_fill};
use crate::state::{AppState, FileBuffer};

/// How much of one visible row the selection covers, in window columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum RowSelection {
	None,
	Full,
	/// From the column to the right edge.
	From(usize),
	/// From the left edge up to the column.
	To(usize),
	Between(usize, usize),
}

#[derive(Debug)]
struct RowView {
	text:      String,
	selection: RowSelection,
}

pub(super) struct WindowAreaWidget {
	rows: Vec<RowView>,
}

impl WindowAreaWidget {
	/// Builds the visible rows of the buffer, and the screen position of the
	/// cursor when it falls inside `area`.
	pub(super) fn from_state(state: &AppState, area: Rect) -> (Self, Option<(u16, u16)>) {
		let buffer = &state.buffer;
		let (visible_rows, visible_cols) = (usize::from(area.height), usize::from(area.width));
		let region = display_region(buffer);

		let rows = buffer
			.content
			.lines()
			.enumerate()
			.skip(buffer.scroll.row)
			.take(visible_rows)
			.map(|(row, line)| RowView {
				text:      display_line_fill(line, buffer.scroll.col, visible_cols, TAB_WIDTH),
				selection: region.map_or(RowSelection::None, |(start, end)| {
					row_selection(row, start, end, buffer.scroll.col)
				}),
			})
			.collect();

		let cursor = buffer.display_cursor(TAB_WIDTH);
		let cursor_position = (cursor.row >= buffer.scroll.row
			&& cursor.col >= buffer.scroll.col
			&& cursor.row < buffer.scroll.row + visible_rows
			&& cursor.col < buffer.scroll.col + visible_cols)
			.then(|| {
				(
					area.x + (cursor.col - buffer.scroll.col) as u16,
					area.y + (cursor.row - buffer.scroll.row) as u16,
				)
			});

		(Self { rows }, cursor_position)
	}
}

impl Widget for WindowAreaWidget {
	fn render(self, area: Rect, buf: &mut Buffer) {
		let selected = Style::default().fg(Color::Black).bg(Color::Yellow);
		let width = usize::from(area.width);

		for (offset, row) in self.rows.into_iter().enumerate() {
			let y = area.y + offset as u16;
			buf.set_string(area.x, y, &row.text, Style::default());

			let columns = match row.selection {
				RowSelection::None => continue,
				RowSelection::Full => 0..width,
				RowSelection::From(start) => start..width,
				RowSelection::To(end) => 0..end,
				RowSelection::Between(start, end) => start..end,
			};
			let (start, end) = (columns.start.min(width), columns.end.min(width));
			if start < end {
				buf.set_style(Rect::new(area.x + start as u16, y, (end - start) as u16, 1), selected);
			}
		}
	}
}

/// Selected region with columns converted to display space.
fn display_region(buffer: &FileBuffer) -> Option<(Coord, Coord)> {
	let (start, end) = buffer.selected_region()?;
	let to_display = |at: Coord| {
		let line = buffer.content.line_or_empty(at.row);
		Coord::new(at.row, display_col(&line, at.col, TAB_WIDTH))
	};
	Some((to_display(start), to_display(end)))
}

pub(super) fn row_selection(row: usize, start: Coord, end: Coord, scroll_col: usize) -> RowSelection {
	let window_col = |col: usize| col.saturating_sub(scroll_col);
	if row < start.row || row > end.row || start == end {
		RowSelection::None
	} else if start.row == end.row {
		RowSelection::Between(window_col(start.col), window_col(end.col))
	} else if row == start.row {
		RowSelection::From(window_col(start.col))
	} else if row == end.row {
		RowSelection::To(window_col(end.col))
	} else {
		RowSelection::Full
	}
}

#[cfg(test)]
mod tests;
