//! Chord matching.
//!
//! A [`KeyMap`] is a trie flattened into a map from key sequences to
//! entries: every proper prefix of a bound chord has an entry marking that
//! longer chords continue from it. [`KeyHandler`] feeds key events through
//! the map one at a time.

use std::collections::HashMap;

use tracing::trace;

use crate::command::Command;
use crate::key::{KeyEvent, format_chord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Entry {
	command:   Option<Command>,
	continues: bool,
}

/// Result of looking a key sequence up in a [`KeyMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
	/// Nothing is bound to the sequence or any extension of it.
	Unbound,
	/// Longer chords start with the sequence. Carries the command bound to
	/// the sequence itself, if any.
	Prefix(Option<Command>),
	/// The sequence is bound and nothing longer starts with it.
	Command(Command),
}

/// Immutable mapping from chords to commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyMap {
	entries: HashMap<Vec<KeyEvent>, Entry>,
}

impl KeyMap {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_bindings<I>(bindings: I) -> Self
	where
		I: IntoIterator<Item = (Vec<KeyEvent>, Command)>,
	{
		bindings.into_iter().fold(Self::new(), |map, (keys, command)| map.bind(&keys, command))
	}

	/// Map with `keys` bound to `command`, replacing any previous binding of
	/// exactly that chord.
	pub fn bind(&self, keys: &[KeyEvent], command: Command) -> Self {
		if keys.is_empty() {
			return self.clone();
		}
		let mut entries = self.entries.clone();
		for len in 1..keys.len() {
			entries.entry(keys[..len].to_vec()).or_default().continues = true;
		}
		entries.entry(keys.to_vec()).or_default().command = Some(command);
		Self { entries }
	}

	pub fn lookup(&self, keys: &[KeyEvent]) -> Lookup {
		match self.entries.get(keys) {
			None => Lookup::Unbound,
			Some(Entry { command, continues: true }) => Lookup::Prefix(*command),
			Some(Entry { command: Some(command), continues: false }) => Lookup::Command(*command),
			Some(Entry { command: None, continues: false }) => Lookup::Unbound,
		}
	}

	/// Every command reachable through some chord.
	pub fn commands(&self) -> impl Iterator<Item = Command> + '_ {
		self.entries.values().filter_map(|entry| entry.command)
	}

	/// Every bound chord with its command, in no particular order.
	pub fn bindings(&self) -> impl Iterator<Item = (&[KeyEvent], Command)> + '_ {
		self.entries.iter().filter_map(|(keys, entry)| entry.command.map(|command| (keys.as_slice(), command)))
	}

	/// Emacs-flavoured default bindings.
	pub fn emacs() -> Self {
		use Command as C;
		use KeyEvent as K;

		Self::from_bindings([
			(vec![K::UP], C::MoveUp),
			(vec![K::ctrl('P')], C::MoveUp),
			(vec![K::DOWN], C::MoveDown),
			(vec![K::ctrl('N')], C::MoveDown),
			(vec![K::LEFT], C::MoveLeft),
			(vec![K::ctrl('B')], C::MoveLeft),
			(vec![K::RIGHT], C::MoveRight),
			(vec![K::ctrl('F')], C::MoveRight),
			(vec![K::PAGE_DOWN], C::PageDown),
			(vec![K::ctrl('V')], C::PageDown),
			(vec![K::PAGE_UP], C::PageUp),
			(vec![K::alt('v')], C::PageUp),
			(vec![K::HOME], C::MoveBeginningOfLine),
			(vec![K::ctrl('A')], C::MoveBeginningOfLine),
			(vec![K::END], C::MoveEndOfLine),
			(vec![K::ctrl('E')], C::MoveEndOfLine),
			(vec![K::CTRL_HOME], C::MoveBeginningOfBuffer),
			(vec![K::alt('<')], C::MoveBeginningOfBuffer),
			(vec![K::CTRL_END], C::MoveEndOfBuffer),
			(vec![K::alt('>')], C::MoveEndOfBuffer),
			(vec![K::BACKSPACE], C::DeleteChar),
			(vec![K::ordinary('\u{7f}')], C::DeleteChar),
			(vec![K::DELETE], C::DeleteCharRight),
			(vec![K::ctrl('D')], C::DeleteCharRight),
			(vec![K::TAB], C::InsertTab),
			(vec![K::ENTER], C::NewLine),
			(vec![K::ctrl('K')], C::KillLine),
			(vec![K::ctrl('W')], C::Cut),
			(vec![K::alt('w')], C::Copy),
			(vec![K::ctrl('Y')], C::Paste),
			(vec![K::ctrl('@')], C::StartSelection),
			(vec![K::ctrl('X'), K::ctrl('S')], C::Save),
			(vec![K::ctrl('X'), K::ctrl('C')], C::Quit),
		])
	}
}

/// What a single key press amounts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
	/// A complete chord was typed.
	Resolved(Command),
	/// The keys so far start a longer chord.
	Pending,
	/// A lone printable key with no binding.
	SelfInsert(char),
	/// The keys typed match nothing.
	Unbound(Vec<KeyEvent>),
}

/// Accumulates key events until they resolve against a [`KeyMap`].
#[derive(Debug, Clone)]
pub struct KeyHandler {
	keymap:   KeyMap,
	sequence: Vec<KeyEvent>,
	/// Longest chord in `sequence` bound in its own right, as its command and
	/// length.
	fallback: Option<(Command, usize)>,
}

impl KeyHandler {
	pub fn new(keymap: KeyMap) -> Self {
		Self { keymap, sequence: Vec::new(), fallback: None }
	}

	/// Keys typed since the last resolved chord.
	pub fn pending_keys(&self) -> &[KeyEvent] {
		&self.sequence
	}

	/// Feeds one key. Usually yields one outcome. When the keys stop matching
	/// after passing a chord that is bound in its own right, that chord
	/// resolves and the keys typed after it are matched afresh, so several
	/// outcomes come back.
	pub fn handle_key(&mut self, key: KeyEvent) -> Vec<KeyOutcome> {
		self.sequence.push(key);
		trace!("key {} -> sequence {}", key, format_chord(&self.sequence));

		match self.keymap.lookup(&self.sequence) {
			Lookup::Command(command) => {
				self.reset();
				vec![KeyOutcome::Resolved(command)]
			}
			Lookup::Prefix(bound) => {
				if let Some(command) = bound {
					self.fallback = Some((command, self.sequence.len()));
				}
				vec![KeyOutcome::Pending]
			}
			Lookup::Unbound => {
				let sequence = std::mem::take(&mut self.sequence);
				if let Some((command, len)) = self.fallback.take() {
					trace!("falling back to {} after {}", command, format_chord(&sequence[..len]));
					let mut outcomes = vec![KeyOutcome::Resolved(command)];
					for key in &sequence[len..] {
						outcomes.extend(self.handle_key(*key));
					}
					return outcomes;
				}
				if sequence.len() == 1 {
					if let Some(ch) = key.printable_char() {
						return vec![KeyOutcome::SelfInsert(ch)];
					}
				}
				vec![KeyOutcome::Unbound(sequence)]
			}
		}
	}

	fn reset(&mut self) {
		self.sequence.clear();
		self.fallback = None;
	}
}
