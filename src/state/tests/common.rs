use crate::geometry::Coord;
use crate::state::{AppState, FileBuffer, FileIdentity};
use crate::text::Document;

pub(super) fn test_buffer(lines: &[&str]) -> FileBuffer {
	FileBuffer::new(FileIdentity::new("test.txt"), lines.iter().copied().collect())
}

pub(super) fn test_state(lines: &[&str]) -> AppState {
	AppState::new(test_buffer(lines))
}

pub(super) fn doc(lines: &[&str]) -> Document {
	lines.iter().copied().collect()
}

pub(super) fn at(row: usize, col: usize) -> Coord {
	Coord::new(row, col)
}

pub(super) fn with_cursor(buffer: FileBuffer, cursor: Coord) -> FileBuffer {
	FileBuffer { cursor, ..buffer }
}
