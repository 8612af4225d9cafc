use std::ops::ControlFlow;
use std::path::Path;

use imed::app::App;
use imed::config::Config;
use imed::file_io::load_file;
use imed::geometry::{Coord, Viewport};
use imed::key::KeyEvent;
use imed::keymap::KeyMap;
use imed::text::Document;

const VIEWPORT: Viewport = Viewport::new(20, 80);

fn open(path: &Path, keymap: KeyMap) -> App {
	App::new(load_file(path).expect("load file"), keymap)
}

fn feed(app: &mut App, keys: &[KeyEvent]) -> ControlFlow<()> {
	for key in keys {
		if app.handle_key(*key, VIEWPORT).is_break() {
			return ControlFlow::Break(());
		}
	}
	ControlFlow::Continue(())
}

fn typed(text: &str) -> Vec<KeyEvent> {
	text.chars().map(KeyEvent::ordinary).collect()
}

fn last_message(app: &App) -> Option<String> {
	app.state().last_message().map(|message| message.content.clone())
}

fn doc(lines: &[&str]) -> Document {
	lines.iter().copied().collect()
}

#[test]
fn type_save_and_quit_should_write_file() {
	let dir = tempfile::tempdir().expect("create temp dir");
	let path = dir.path().join("notes.txt");
	std::fs::write(&path, "one\n").expect("write file");
	let mut app = open(&path, KeyMap::emacs());

	assert!(feed(&mut app, &typed("xy")).is_continue());
	assert!(app.state().buffer.is_dirty());
	assert_eq!(last_message(&app).as_deref(), Some("adding character: y"));

	assert!(feed(&mut app, &[KeyEvent::ctrl('X'), KeyEvent::ctrl('S')]).is_continue());
	assert_eq!(std::fs::read_to_string(&path).expect("read back"), "xyone\n");
	assert!(!app.state().buffer.is_dirty());
	assert_eq!(last_message(&app).as_deref(), Some("file saved"));

	assert!(feed(&mut app, &[KeyEvent::ctrl('X'), KeyEvent::ctrl('C')]).is_break());
}

#[test]
fn failed_save_should_keep_buffer_dirty() {
	let dir = tempfile::tempdir().expect("create temp dir");
	let sub = dir.path().join("gone");
	std::fs::create_dir(&sub).expect("create sub dir");
	let path = sub.join("notes.txt");
	std::fs::write(&path, "one\n").expect("write file");
	let mut app = open(&path, KeyMap::emacs());
	std::fs::remove_dir_all(&sub).expect("remove sub dir");

	assert!(feed(&mut app, &typed("z")).is_continue());
	assert!(feed(&mut app, &[KeyEvent::ctrl('X'), KeyEvent::ctrl('S')]).is_continue());
	assert!(app.state().buffer.is_dirty());
	assert_eq!(last_message(&app), Some(format!("save failed: {}", path.display())));
}

#[test]
fn selection_copy_and_paste_should_duplicate_region() {
	let dir = tempfile::tempdir().expect("create temp dir");
	let path = dir.path().join("words.txt");
	std::fs::write(&path, "alpha beta\n").expect("write file");
	let mut app = open(&path, KeyMap::emacs());

	assert!(feed(&mut app, &[KeyEvent::ctrl('@')]).is_continue());
	assert!(feed(&mut app, &[KeyEvent::RIGHT; 5]).is_continue());
	assert!(feed(&mut app, &[KeyEvent::alt('w'), KeyEvent::ctrl('E'), KeyEvent::ctrl('Y')]).is_continue());

	assert_eq!(app.state().buffer.content, doc(&["alpha betaalpha"]));
	assert_eq!(app.state().buffer.cursor, Coord::new(0, 15));
	assert_eq!(app.state().buffer.selection, None);
}

#[test]
fn broken_chord_should_report_and_not_insert() {
	let dir = tempfile::tempdir().expect("create temp dir");
	let path = dir.path().join("a.txt");
	std::fs::write(&path, "abc\n").expect("write file");
	let mut app = open(&path, KeyMap::emacs());

	assert!(feed(&mut app, &[KeyEvent::ctrl('X'), KeyEvent::ordinary('z')]).is_continue());
	assert_eq!(app.state().buffer.content, doc(&["abc"]));
	assert_eq!(last_message(&app).as_deref(), Some("unbound key sequence: C-x z"));
}

#[test]
fn earlier_snapshots_should_survive_later_edits() {
	let dir = tempfile::tempdir().expect("create temp dir");
	let path = dir.path().join("lines.txt");
	std::fs::write(&path, "first\nsecond\nthird\n").expect("write file");
	let mut app = open(&path, KeyMap::emacs());

	let before = app.state().clone();
	assert!(feed(&mut app, &[KeyEvent::DOWN, KeyEvent::ctrl('K'), KeyEvent::ctrl('K')]).is_continue());
	assert_eq!(app.state().buffer.content, doc(&["first", "third"]));
	assert_eq!(before.buffer.content, doc(&["first", "second", "third"]));

	let first = |content: &Document| content.line(0).cloned().expect("first line");
	assert!(first(&before.buffer.content).ptr_eq(&first(&app.state().buffer.content)));
}

#[test]
fn configured_binding_should_drive_the_loop() {
	let dir = tempfile::tempdir().expect("create temp dir");
	let path = dir.path().join("cfg.txt");
	std::fs::write(&path, "abc\n").expect("write file");
	let config = Config::parse("[bindings]\n\"<f10>\" = \"quit\"\n").expect("parse config");
	let mut app = open(&path, config.keymap);

	assert!(feed(&mut app, &[KeyEvent::ctrl('E')]).is_continue());
	assert_eq!(app.state().buffer.cursor, Coord::new(0, 3));
	assert!(feed(&mut app, &[KeyEvent::function(10)]).is_break());
}
