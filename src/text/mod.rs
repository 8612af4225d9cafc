//! Persistent text model.
//!
//! A [`Document`] is an immutable RRB vector of [`Line`]s. Every edit returns
//! a new document; rows the edit does not touch are shared with the input,
//! so old snapshots stay valid and cheap to keep around.

use std::fmt;
use std::ops::{Deref, Range};
use std::sync::Arc;

use crate::geometry::Coord;

/// An immutable run of code points without a line terminator.
///
/// Clones share storage; an edit builds a fresh line and leaves the original
/// untouched.
#[derive(Clone)]
pub struct Line(Arc<[char]>);

impl Line {
	pub fn new() -> Self {
		Self(Arc::from(Vec::new()))
	}

	/// Whether both values share the same storage, not merely equal contents.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}

	pub fn insert(&self, col: usize, ch: char) -> Self {
		let mut chars = Vec::with_capacity(self.len() + 1);
		chars.extend_from_slice(&self[..col]);
		chars.push(ch);
		chars.extend_from_slice(&self[col..]);
		Self::from(chars)
	}

	/// First `col` characters.
	pub fn take(&self, col: usize) -> Self {
		if col >= self.len() { self.clone() } else { Self::from(&self[..col]) }
	}

	/// Everything from `col` on.
	pub fn skip(&self, col: usize) -> Self {
		if col == 0 { self.clone() } else { Self::from(&self[col.min(self.len())..]) }
	}

	pub fn slice(&self, range: Range<usize>) -> Self {
		Self::from(&self[range])
	}

	pub fn concat(&self, other: &Self) -> Self {
		if other.is_empty() {
			return self.clone();
		}
		if self.is_empty() {
			return other.clone();
		}
		let mut chars = Vec::with_capacity(self.len() + other.len());
		chars.extend_from_slice(self);
		chars.extend_from_slice(other);
		Self::from(chars)
	}
}

impl Default for Line {
	fn default() -> Self {
		Self::new()
	}
}

impl Deref for Line {
	type Target = [char];

	fn deref(&self) -> &[char] {
		&self.0
	}
}

impl From<Vec<char>> for Line {
	fn from(chars: Vec<char>) -> Self {
		Self(Arc::from(chars))
	}
}

impl From<&[char]> for Line {
	fn from(chars: &[char]) -> Self {
		Self(Arc::from(chars))
	}
}

impl From<&str> for Line {
	fn from(text: &str) -> Self {
		Self::from(text.chars().collect::<Vec<_>>())
	}
}

impl PartialEq for Line {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other) || self.0 == other.0
	}
}

impl Eq for Line {}

impl std::hash::Hash for Line {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.0.hash(state);
	}
}

impl fmt::Display for Line {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.iter().try_for_each(|ch| fmt::Write::write_char(f, *ch))
	}
}

impl fmt::Debug for Line {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Line({:?})", self.to_string())
	}
}

/// An immutable sequence of lines indexed by row.
///
/// Row `len()` is addressable as an empty trailing line: edits at that row
/// append it, reads see an empty line.
#[derive(Clone, Default)]
pub struct Document {
	lines: im::Vector<Line>,
}

/// A fragment of text as cut, copied or pasted: one line per row, so
/// `["ab"]` has no line break and `["", ""]` is a single line break.
pub type Text = Document;

impl Document {
	pub fn new() -> Self {
		Self { lines: im::Vector::new() }
	}

	/// Splits file contents into lines. A trailing line terminator does not
	/// start another line.
	pub fn parse(contents: &str) -> Self {
		contents.lines().map(Line::from).collect()
	}

	/// Contents as written back to disk, each line terminated by `\n`.
	pub fn to_file_string(&self) -> String {
		let mut out = String::new();
		for line in &self.lines {
			out.extend(line.iter());
			out.push('\n');
		}
		out
	}

	pub fn len(&self) -> usize {
		self.lines.len()
	}

	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}

	pub fn line(&self, row: usize) -> Option<&Line> {
		self.lines.get(row)
	}

	/// Line at `row`, or an empty line for the trailing position.
	pub fn line_or_empty(&self, row: usize) -> Line {
		self.lines.get(row).cloned().unwrap_or_default()
	}

	pub fn line_len(&self, row: usize) -> usize {
		self.lines.get(row).map_or(0, |line| line.len())
	}

	pub fn lines(&self) -> impl Iterator<Item = &Line> {
		self.lines.iter()
	}

	/// Whether both documents share the same root, not merely equal contents.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		self.lines.ptr_eq(&other.lines)
	}

	/// Whether `at` addresses a character boundary of this document.
	pub fn contains(&self, at: Coord) -> bool {
		at.row <= self.len() && at.col <= self.line_len(at.row)
	}

	/// Position just past the last character.
	pub fn end(&self) -> Coord {
		match self.len() {
			0 => Coord::default(),
			len => Coord::new(len - 1, self.line_len(len - 1)),
		}
	}

	pub fn insert_char(&self, at: Coord, ch: char) -> Self {
		self.check(at);
		self.with_line(at.row, self.line_or_empty(at.row).insert(at.col, ch))
	}

	/// Inserts `text` at `at`, returning the new document and the position
	/// right after the inserted text.
	pub fn insert_text(&self, at: Coord, text: &Text) -> (Self, Coord) {
		self.check(at);
		let (Some(first), Some(last)) = (text.lines.front(), text.lines.back()) else {
			return (self.clone(), at);
		};
		let current = self.line_or_empty(at.row);
		let head = current.take(at.col);
		let tail = current.skip(at.col);

		if text.len() == 1 {
			let line = head.concat(first).concat(&tail);
			return (self.with_line(at.row, line), Coord::new(at.row, at.col + first.len()));
		}

		let mut lines = self.lines.take(at.row);
		lines.push_back(head.concat(first));
		lines.append(text.lines.skip(1).take(text.len() - 2));
		lines.push_back(last.concat(&tail));
		lines.append(self.rows_after(at.row));
		(Self { lines }, Coord::new(at.row + text.len() - 1, last.len()))
	}

	/// Splits the line at `at`, moving the text after it onto a new line.
	pub fn split_line(&self, at: Coord) -> Self {
		self.insert_text(at, &Self::line_break()).0
	}

	/// Removes the character at `at`, which must not be past the line end.
	pub fn remove_char(&self, at: Coord) -> Self {
		assert!(
			at.col < self.line_len(at.row),
			"invariant: no character at {at} to remove"
		);
		self.erase_region(at, Coord::new(at.row, at.col + 1))
	}

	/// Appends the line below `row` onto it.
	pub fn join_with_next(&self, row: usize) -> Self {
		if row + 1 >= self.len() {
			return self.clone();
		}
		self.erase_region(Coord::new(row, self.line_len(row)), Coord::new(row + 1, 0))
	}

	/// Removes `[start, end)` in a single pass.
	pub fn erase_region(&self, start: Coord, end: Coord) -> Self {
		self.check_region(start, end);
		if start == end {
			return self.clone();
		}
		let joined = self.line_or_empty(start.row).take(start.col).concat(&self.line_or_empty(end.row).skip(end.col));
		if start.row == end.row {
			return self.with_line(start.row, joined);
		}
		let mut lines = self.lines.take(start.row);
		lines.push_back(joined);
		lines.append(self.rows_after(end.row));
		Self { lines }
	}

	/// Copy of `[start, end)` as a text fragment.
	pub fn region(&self, start: Coord, end: Coord) -> Text {
		self.check_region(start, end);
		if start.row == end.row {
			return Self::single(self.line_or_empty(start.row).slice(start.col..end.col));
		}
		let mut lines = im::Vector::new();
		lines.push_back(self.line_or_empty(start.row).skip(start.col));
		lines.append(self.lines.skip(start.row + 1).take(end.row - start.row - 1));
		lines.push_back(self.line_or_empty(end.row).take(end.col));
		Self { lines }
	}

	/// Fragment holding a single line break.
	pub fn line_break() -> Text {
		[Line::new(), Line::new()].into_iter().collect()
	}

	/// Fragment holding one line of text without a line break.
	pub fn single(line: Line) -> Text {
		std::iter::once(line).collect()
	}

	fn with_line(&self, row: usize, line: Line) -> Self {
		if row == self.len() {
			let mut lines = self.lines.clone();
			lines.push_back(line);
			Self { lines }
		} else {
			Self { lines: self.lines.update(row, line) }
		}
	}

	fn rows_after(&self, row: usize) -> im::Vector<Line> {
		if row + 1 < self.len() { self.lines.skip(row + 1) } else { im::Vector::new() }
	}

	fn check(&self, at: Coord) {
		assert!(self.contains(at), "invariant: {at} is outside a document of {} lines", self.len());
	}

	fn check_region(&self, start: Coord, end: Coord) {
		assert!(start <= end, "invariant: region start {start} is after end {end}");
		self.check(start);
		self.check(end);
	}
}

impl PartialEq for Document {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other) || self.lines == other.lines
	}
}

impl Eq for Document {}

impl fmt::Debug for Document {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.lines.iter()).finish()
	}
}

impl FromIterator<Line> for Document {
	fn from_iter<I: IntoIterator<Item = Line>>(iter: I) -> Self {
		Self { lines: iter.into_iter().collect() }
	}
}

impl<'a> FromIterator<&'a str> for Document {
	fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
		iter.into_iter().map(Line::from).collect()
	}
}

#[cfg(test)]
mod tests;
