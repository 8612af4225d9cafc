use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;

use super::{RowSelection, WindowAreaWidget, row_selection};
use crate::geometry::Coord;
use crate::state::{AppState, FileBuffer, FileIdentity};

fn state(lines: &[&str], cursor: Coord, selection: Option<Coord>) -> AppState {
	let buffer = FileBuffer::new(FileIdentity::new("view.txt"), lines.iter().copied().collect());
	AppState::new(FileBuffer { cursor, selection, ..buffer })
}

fn render(state: &AppState, area: Rect) -> (Buffer, Option<(u16, u16)>) {
	let (widget, cursor) = WindowAreaWidget::from_state(state, area);
	let mut buf = Buffer::empty(area);
	widget.render(area, &mut buf);
	(buf, cursor)
}

fn row_text(buf: &Buffer, y: u16) -> String {
	let area = buf.area;
	(area.x..area.x + area.width).map(|x| buf[(x, y)].symbol()).collect()
}

#[test]
fn rows_should_render_with_tabs_expanded() {
	let state = state(&["a\tb", "xy"], Coord::default(), None);
	let (buf, _) = render(&state, Rect::new(0, 0, 12, 3));

	assert_eq!(row_text(&buf, 0), "a       b   ");
	assert_eq!(row_text(&buf, 1), "xy          ");
	assert_eq!(row_text(&buf, 2), "            ");
}

#[test]
fn rows_should_follow_scroll_offset() {
	let state = state(&["one", "two", "three"], Coord::new(2, 0), None);
	let state = state.with_buffer(FileBuffer { scroll: Coord::new(1, 1), ..state.buffer.clone() });
	let (buf, _) = render(&state, Rect::new(0, 0, 4, 2));

	assert_eq!(row_text(&buf, 0), "wo  ");
	assert_eq!(row_text(&buf, 1), "hree");
}

#[test]
fn cursor_should_land_after_expanded_tab() {
	let state = state(&["\tx"], Coord::new(0, 1), None);
	let (_, cursor) = render(&state, Rect::new(2, 1, 20, 4));
	assert_eq!(cursor, Some((10, 1)));
}

#[test]
fn cursor_outside_the_window_should_be_hidden() {
	let state = state(&["one", "two"], Coord::new(0, 0), None);
	let state = state.with_buffer(FileBuffer { scroll: Coord::new(1, 0), ..state.buffer.clone() });
	let (_, cursor) = render(&state, Rect::new(0, 0, 10, 1));
	assert_eq!(cursor, None);
}

#[test]
fn cursor_on_trailing_row_should_be_visible() {
	let state = state(&["one"], Coord::new(1, 0), None);
	let (buf, cursor) = render(&state, Rect::new(0, 0, 5, 3));
	assert_eq!(cursor, Some((0, 1)));
	assert_eq!(row_text(&buf, 1), "     ");
}

#[test]
fn row_selection_should_classify_each_row() {
	let (start, end) = (Coord::new(1, 2), Coord::new(3, 4));
	assert_eq!(row_selection(0, start, end, 0), RowSelection::None);
	assert_eq!(row_selection(1, start, end, 0), RowSelection::From(2));
	assert_eq!(row_selection(2, start, end, 0), RowSelection::Full);
	assert_eq!(row_selection(3, start, end, 0), RowSelection::To(4));
	assert_eq!(row_selection(4, start, end, 0), RowSelection::None);
	assert_eq!(row_selection(1, Coord::new(1, 2), Coord::new(1, 5), 1), RowSelection::Between(1, 4));
	assert_eq!(row_selection(1, Coord::new(1, 2), Coord::new(1, 2), 0), RowSelection::None);
}

#[test]
fn selection_should_be_highlighted() {
	let state = state(&["hello", "world"], Coord::new(1, 2), Some(Coord::new(0, 1)));
	let (buf, _) = render(&state, Rect::new(0, 0, 8, 2));

	assert_eq!(buf[(0, 0)].bg, Color::Reset);
	assert_eq!(buf[(1, 0)].bg, Color::Yellow);
	assert_eq!(buf[(7, 0)].bg, Color::Yellow);
	assert_eq!(buf[(1, 1)].bg, Color::Yellow);
	assert_eq!(buf[(2, 1)].bg, Color::Reset);
}

#[test]
fn selection_columns_should_account_for_tabs() {
	let state = state(&["\tab"], Coord::new(0, 2), Some(Coord::new(0, 1)));
	let (buf, _) = render(&state, Rect::new(0, 0, 12, 1));

	assert_eq!(buf[(7, 0)].bg, Color::Reset);
	assert_eq!(buf[(8, 0)].bg, Color::Yellow);
	assert_eq!(buf[(9, 0)].bg, Color::Reset);
}
