use super::{Document, Line, Text};
use crate::geometry::Coord;

fn doc(lines: &[&str]) -> Document {
	lines.iter().copied().collect()
}

fn at(row: usize, col: usize) -> Coord {
	Coord::new(row, col)
}

#[test]
fn parse_should_drop_trailing_terminator() {
	assert_eq!(Document::parse("ab\tc\nde\n"), doc(&["ab\tc", "de"]));
	assert_eq!(Document::parse(""), Document::new());
	assert_eq!(Document::parse("x\n\ny"), doc(&["x", "", "y"]));
}

#[test]
fn file_string_should_terminate_every_line() {
	assert_eq!(doc(&["a", "", "b"]).to_file_string(), "a\n\nb\n");
	assert_eq!(Document::new().to_file_string(), "");
}

#[test]
fn editing_one_line_should_share_all_other_lines() {
	let original: Document = (0..100).map(|i| Line::from(format!("line {i}").as_str())).collect();
	let edited = original.insert_char(at(42, 0), '>');

	assert_eq!(edited.line(42).map(ToString::to_string).as_deref(), Some(">line 42"));
	for row in (0..100).filter(|row| *row != 42) {
		let (before, after) = (original.line(row).unwrap(), edited.line(row).unwrap());
		assert!(before.ptr_eq(after), "row {row} was reallocated");
	}
	assert_eq!(original.line(42).map(ToString::to_string).as_deref(), Some("line 42"));
}

#[test]
fn multi_row_erase_should_share_rows_outside_region() {
	let original = doc(&["keep", "abc", "middle", "xyz", "tail"]);
	let edited = original.erase_region(at(1, 1), at(3, 2));

	assert_eq!(edited, doc(&["keep", "az", "tail"]));
	assert!(original.line(0).unwrap().ptr_eq(edited.line(0).unwrap()));
	assert!(original.line(4).unwrap().ptr_eq(edited.line(2).unwrap()));
}

#[test]
fn erase_region_should_match_single_pass_result() {
	let original = doc(&["one", "two", "three"]);
	assert_eq!(original.erase_region(at(0, 3), at(1, 0)), doc(&["onetwo", "three"]));
	assert_eq!(original.erase_region(at(0, 0), at(2, 5)), doc(&[""]));
	assert_eq!(original.erase_region(at(1, 1), at(1, 1)), original);
}

#[test]
fn erase_up_to_trailing_position_should_drop_remaining_rows() {
	let original = doc(&["ab", "cd"]);
	assert_eq!(original.erase_region(at(0, 1), at(2, 0)), doc(&["a"]));
}

#[test]
fn region_should_copy_partial_and_through_rows() {
	let original = doc(&["abc", "def", "ghi"]);
	assert_eq!(original.region(at(0, 1), at(0, 3)), doc(&["bc"]));
	assert_eq!(original.region(at(0, 2), at(2, 1)), doc(&["c", "def", "g"]));
	assert_eq!(original.region(at(0, 3), at(1, 0)), Document::line_break());
}

#[test]
fn insert_text_should_return_position_after_insertion() {
	let original = doc(&["hello world"]);
	let single: Text = doc(&["big "]);
	let (edited, end) = original.insert_text(at(0, 6), &single);
	assert_eq!(edited, doc(&["hello big world"]));
	assert_eq!(end, at(0, 10));

	let multi: Text = doc(&["X", "mid", "Y"]);
	let (edited, end) = original.insert_text(at(0, 5), &multi);
	assert_eq!(edited, doc(&["helloX", "mid", "Y world"]));
	assert_eq!(end, at(2, 1));
}

#[test]
fn region_then_insert_should_restore_content() {
	let original = doc(&["alpha", "beta", "gamma"]);
	let (start, end) = (at(0, 2), at(2, 3));
	let cut = original.region(start, end);
	let erased = original.erase_region(start, end);
	let (restored, restored_end) = erased.insert_text(start, &cut);
	assert_eq!(restored, original);
	assert_eq!(restored_end, end);
}

#[test]
fn split_and_join_should_be_inverse() {
	let original = doc(&["abcdef", "next"]);
	let split = original.split_line(at(0, 3));
	assert_eq!(split, doc(&["abc", "def", "next"]));
	assert_eq!(split.join_with_next(0), original);
	assert_eq!(original.join_with_next(1), original);
}

#[test]
fn insert_at_trailing_row_should_append_line() {
	let original = doc(&["a"]);
	assert_eq!(original.insert_char(at(1, 0), 'b'), doc(&["a", "b"]));
	assert_eq!(Document::new().insert_char(at(0, 0), 'z'), doc(&["z"]));
}

#[test]
fn remove_char_should_leave_input_untouched() {
	let original = doc(&["abc"]);
	let edited = original.remove_char(at(0, 1));
	assert_eq!(edited, doc(&["ac"]));
	assert_eq!(original, doc(&["abc"]));
}

#[test]
fn equality_should_be_by_value() {
	let original = doc(&["same", "text"]);
	let rebuilt = original.insert_char(at(0, 0), 'x').remove_char(at(0, 0));
	assert!(!original.ptr_eq(&rebuilt));
	assert_eq!(original, rebuilt);
	assert_ne!(original, doc(&["same", "text", ""]));
}

#[test]
fn end_should_point_past_last_character() {
	assert_eq!(doc(&["ab", "xyz"]).end(), at(1, 3));
	assert_eq!(Document::new().end(), at(0, 0));
}

#[test]
#[should_panic(expected = "invariant")]
fn edit_outside_document_should_fail_fast() {
	let _ = doc(&["ab"]).insert_char(at(0, 5), 'x');
}
