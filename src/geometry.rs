use std::fmt;

/// Columns a tab advances to the next multiple of.
pub const TAB_WIDTH: usize = 8;

/// A row/column position, either in content space (raw characters) or in
/// display space (terminal columns after tab expansion).
///
/// Ordering is row-major, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Coord {
	pub row: usize,
	pub col: usize,
}

impl Coord {
	pub const fn new(row: usize, col: usize) -> Self {
		Self { row, col }
	}
}

impl fmt::Display for Coord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.row, self.col)
	}
}

/// Text area available to the buffer, excluding the mode and message lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
	pub rows: usize,
	pub cols: usize,
}

impl Viewport {
	/// Lines reserved below the text area for the mode line and the message line.
	pub const RESERVED_ROWS: usize = 2;

	pub const fn new(rows: usize, cols: usize) -> Self {
		Self { rows, cols }
	}

	/// Viewport left for text on a terminal of the given size.
	pub fn from_terminal(width: u16, height: u16) -> Self {
		Self {
			rows: usize::from(height).saturating_sub(Self::RESERVED_ROWS),
			cols: usize::from(width),
		}
	}
}

/// Renders display columns `[first_col, first_col + num_col)` of `line`,
/// expanding tabs to the next multiple of `tab_width`.
///
/// A tab straddling either window edge contributes only its in-window spaces.
/// The result is shorter than `num_col` when the line ends inside the window.
pub fn display_line_fill(line: &[char], first_col: usize, num_col: usize, tab_width: usize) -> String {
	let last_col = first_col.saturating_add(num_col);
	let mut out = String::with_capacity(num_col);
	let mut filled = 0usize;
	let mut cur_col = 0usize;

	for &ch in line {
		if filled == num_col {
			break;
		}
		if ch == '\t' {
			let next_col = cur_col + tab_width - (cur_col % tab_width);
			let to_fill = next_col.min(last_col).saturating_sub(cur_col.max(first_col));
			out.extend(std::iter::repeat_n(' ', to_fill));
			filled += to_fill;
			cur_col = next_col;
		} else {
			if cur_col >= first_col {
				out.push(ch);
				filled += 1;
			}
			cur_col += 1;
		}
	}
	out
}

/// Display column of content column `col`, expanding every tab strictly before it.
pub fn display_col(line: &[char], col: usize, tab_width: usize) -> usize {
	line.iter().take(col).fold(0, |cur_col, &ch| {
		if ch == '\t' { cur_col + tab_width - (cur_col % tab_width) } else { cur_col + 1 }
	})
}
