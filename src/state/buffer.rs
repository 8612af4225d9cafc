use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::geometry::{Coord, Viewport, display_col};
use crate::text::{Document, Text};

/// Path a buffer was loaded from, fixed for the buffer's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileIdentity {
	path: Arc<Path>,
}

impl FileIdentity {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: Arc::from(path.into()) }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl fmt::Display for FileIdentity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.path.display())
	}
}

/// One snapshot of an open file.
///
/// Every operation returns a new snapshot; `self` is never modified, so older
/// snapshots can be kept and inspected freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBuffer {
	pub content:       Document,
	/// Content as last loaded or saved.
	pub file_content:  Document,
	pub file_name:     FileIdentity,
	pub cursor:        Coord,
	/// Top-left visible display position.
	pub scroll:        Coord,
	/// Selection anchor; the region runs between it and the cursor.
	pub selection:     Option<Coord>,
	/// Column vertical moves try to return to.
	pub preferred_col: Option<usize>,
}

impl FileBuffer {
	pub fn new(file_name: FileIdentity, content: Document) -> Self {
		Self {
			file_content: content.clone(),
			content,
			file_name,
			cursor: Coord::default(),
			scroll: Coord::default(),
			selection: None,
			preferred_col: None,
		}
	}

	pub fn is_dirty(&self) -> bool {
		self.content != self.file_content
	}

	/// Snapshot whose baseline is the current content, as after a save.
	pub fn mark_saved(&self) -> Self {
		Self { file_content: self.content.clone(), ..self.clone() }
	}

	pub fn move_left(&self) -> Self {
		self.moved_horizontally(Coord::new(self.cursor.row, self.cursor.col.saturating_sub(1)))
	}

	pub fn move_right(&self) -> Self {
		let col = (self.cursor.col + 1).min(self.content.line_len(self.cursor.row));
		self.moved_horizontally(Coord::new(self.cursor.row, col))
	}

	pub fn move_line_start(&self) -> Self {
		self.moved_horizontally(Coord::new(self.cursor.row, 0))
	}

	pub fn move_line_end(&self) -> Self {
		self.moved_horizontally(Coord::new(self.cursor.row, self.content.line_len(self.cursor.row)))
	}

	pub fn move_buffer_start(&self) -> Self {
		self.moved_horizontally(Coord::default())
	}

	pub fn move_buffer_end(&self) -> Self {
		self.moved_horizontally(self.content.end())
	}

	pub fn move_up(&self) -> Self {
		self.moved_vertically(self.cursor.row.saturating_sub(1))
	}

	pub fn move_down(&self) -> Self {
		self.moved_vertically(self.cursor.row + 1)
	}

	pub fn page_up(&self, viewport: Viewport) -> Self {
		self.moved_vertically(self.cursor.row.saturating_sub(viewport.rows.max(1)))
	}

	pub fn page_down(&self, viewport: Viewport) -> Self {
		self.moved_vertically(self.cursor.row + viewport.rows.max(1))
	}

	pub fn insert_char(&self, ch: char) -> Self {
		let content = self.content.insert_char(self.cursor, ch);
		self.edited(content, Coord::new(self.cursor.row, self.cursor.col + 1))
	}

	pub fn new_line(&self) -> Self {
		let content = self.content.split_line(self.cursor);
		self.edited(content, Coord::new(self.cursor.row + 1, 0))
	}

	/// Backspace: removes the character before the cursor, joining with the
	/// previous line at column 0.
	pub fn delete_char(&self) -> Self {
		let Coord { row, col } = self.cursor;
		if col > 0 {
			let at = Coord::new(row, col - 1);
			return self.edited(self.content.remove_char(at), at);
		}
		if row == 0 {
			return self.clone();
		}
		let joined_at = Coord::new(row - 1, self.content.line_len(row - 1));
		self.edited(self.content.join_with_next(row - 1), joined_at)
	}

	/// Forward delete: removes the character under the cursor, joining the
	/// next line at the line end.
	pub fn delete_char_right(&self) -> Self {
		let Coord { row, col } = self.cursor;
		if col < self.content.line_len(row) {
			return self.edited(self.content.remove_char(self.cursor), self.cursor);
		}
		if row + 1 >= self.content.len() {
			return self.clone();
		}
		self.edited(self.content.join_with_next(row), self.cursor)
	}

	/// Removes the rest of the line, or the line break when the cursor is
	/// already at the line end. Returns the removed text, or `None` at the end
	/// of the buffer.
	pub fn kill_line(&self) -> Option<(Self, Text)> {
		let Coord { row, col } = self.cursor;
		let line_len = self.content.line_len(row);
		let end = if col < line_len {
			Coord::new(row, line_len)
		} else if row + 1 < self.content.len() {
			Coord::new(row + 1, 0)
		} else {
			return None;
		};
		let killed = self.content.region(self.cursor, end);
		Some((self.edited(self.content.erase_region(self.cursor, end), self.cursor), killed))
	}

	pub fn start_selection(&self) -> Self {
		Self { selection: Some(self.cursor), ..self.clone() }
	}

	/// Active region as `(start, end)` with `start <= end`, whichever side
	/// the anchor is on.
	pub fn selected_region(&self) -> Option<(Coord, Coord)> {
		let anchor = self.selection?;
		assert!(self.content.contains(anchor), "invariant: selection anchor {anchor} is outside the document");
		Some((anchor.min(self.cursor), anchor.max(self.cursor)))
	}

	/// Removes the active region, returning it. `None` without a selection.
	pub fn cut(&self) -> Option<(Self, Text)> {
		let (start, end) = self.selected_region()?;
		let text = self.content.region(start, end);
		Some((self.edited(self.content.erase_region(start, end), start), text))
	}

	/// Copies the active region and drops the selection. `None` without a
	/// selection.
	pub fn copy(&self) -> Option<(Self, Text)> {
		let (start, end) = self.selected_region()?;
		let text = self.content.region(start, end);
		Some((Self { selection: None, ..self.clone() }, text))
	}

	pub fn paste(&self, text: &Text) -> Self {
		let (content, end) = self.content.insert_text(self.cursor, text);
		self.edited(content, end)
	}

	/// Cursor in display space, with tabs before it expanded.
	pub fn display_cursor(&self, tab_width: usize) -> Coord {
		let line = self.content.line_or_empty(self.cursor.row);
		Coord::new(self.cursor.row, display_col(&line, self.cursor.col, tab_width))
	}

	/// Shifts the scroll offset the least amount that brings the display
	/// cursor into `viewport`.
	pub fn scroll_to_cursor(&self, viewport: Viewport, tab_width: usize) -> Self {
		let cursor = self.display_cursor(tab_width);
		let scroll = Coord::new(
			follow(self.scroll.row, cursor.row, viewport.rows),
			follow(self.scroll.col, cursor.col, viewport.cols),
		);
		if scroll == self.scroll {
			return self.clone();
		}
		Self { scroll, ..self.clone() }
	}

	fn moved_horizontally(&self, cursor: Coord) -> Self {
		Self { cursor, preferred_col: None, ..self.clone() }
	}

	fn moved_vertically(&self, row: usize) -> Self {
		let row = row.min(self.content.len());
		let preferred = self.preferred_col.unwrap_or(self.cursor.col);
		let col = preferred.min(self.content.line_len(row));
		Self { cursor: Coord::new(row, col), preferred_col: Some(preferred), ..self.clone() }
	}

	fn edited(&self, content: Document, cursor: Coord) -> Self {
		debug_assert!(content.contains(cursor), "invariant: edit left cursor {cursor} outside the document");
		Self { content, cursor, selection: None, preferred_col: None, ..self.clone() }
	}
}

fn follow(scroll: usize, cursor: usize, visible: usize) -> usize {
	let visible = visible.max(1);
	if cursor < scroll {
		cursor
	} else if cursor >= scroll + visible {
		cursor + 1 - visible
	} else {
		scroll
	}
}
