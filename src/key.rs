use std::fmt;

use thiserror::Error;

/// Whether a key arrived as a plain character read or as a decoded special key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyClass {
	Ordinary,
	Special,
}

/// One key press as seen by the chord matcher.
///
/// Ordinary codes are Unicode scalar values, with control characters standing
/// for Ctrl-letter chords (`C-a` is code 1). Special codes name decoded keys
/// such as arrows, and Alt-modified characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyEvent {
	pub class: KeyClass,
	pub code:  u32,
}

const ALT_FLAG: u32 = 0x0100_0000;
const FUNCTION_BASE: u32 = 0x100;

impl KeyEvent {
	pub const UP: Self = Self::special(1);
	pub const DOWN: Self = Self::special(2);
	pub const LEFT: Self = Self::special(3);
	pub const RIGHT: Self = Self::special(4);
	pub const PAGE_UP: Self = Self::special(5);
	pub const PAGE_DOWN: Self = Self::special(6);
	pub const HOME: Self = Self::special(7);
	pub const END: Self = Self::special(8);
	pub const BACKSPACE: Self = Self::special(9);
	pub const DELETE: Self = Self::special(10);
	pub const INSERT: Self = Self::special(11);
	pub const CTRL_HOME: Self = Self::special(12);
	pub const CTRL_END: Self = Self::special(13);

	pub const TAB: Self = Self::ctrl('I');
	pub const ENTER: Self = Self::ctrl('J');
	pub const ESCAPE: Self = Self::ordinary('\u{1b}');

	pub const fn ordinary(ch: char) -> Self {
		Self { class: KeyClass::Ordinary, code: ch as u32 }
	}

	pub const fn special(code: u32) -> Self {
		Self { class: KeyClass::Special, code }
	}

	/// Ctrl chord for an ASCII character, as a terminal reports it: `ctrl('A')`
	/// and `ctrl('a')` are both code 1, `ctrl('@')` (Ctrl-Space) is code 0.
	pub const fn ctrl(ch: char) -> Self {
		Self { class: KeyClass::Ordinary, code: ch as u32 & 0x1f }
	}

	pub const fn alt(ch: char) -> Self {
		Self::special(ALT_FLAG | ch as u32)
	}

	pub const fn function(n: u8) -> Self {
		Self::special(FUNCTION_BASE + n as u32)
	}

	/// The character a lone press of this key inserts, if any.
	pub fn printable_char(&self) -> Option<char> {
		match self.class {
			KeyClass::Ordinary => char::from_u32(self.code).filter(|ch| !ch.is_control()),
			KeyClass::Special => None,
		}
	}
}

impl fmt::Display for KeyEvent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.class {
			KeyClass::Ordinary => match self.code {
				0 => f.write_str("C-SPC"),
				9 => f.write_str("TAB"),
				10 => f.write_str("RET"),
				27 => f.write_str("ESC"),
				32 => f.write_str("SPC"),
				127 => f.write_str("DEL"),
				code @ 1..=26 => write!(f, "C-{}", char::from(b'a' + (code as u8 - 1))),
				code @ 28..=31 => write!(f, "C-{}", char::from(code as u8 + 0x40)),
				code => match char::from_u32(code) {
					Some(ch) => write!(f, "{ch}"),
					None => write!(f, "<{code:#x}>"),
				},
			},
			KeyClass::Special => {
				if self.code & ALT_FLAG != 0 {
					return match char::from_u32(self.code & !ALT_FLAG) {
						Some(ch) => write!(f, "M-{ch}"),
						None => write!(f, "M-<{:#x}>", self.code & !ALT_FLAG),
					};
				}
				if self.code > FUNCTION_BASE {
					return write!(f, "<f{}>", self.code - FUNCTION_BASE);
				}
				match special_name(*self) {
					Some(name) => f.write_str(name),
					None => write!(f, "<special {}>", self.code),
				}
			}
		}
	}
}

const SPECIAL_NAMES: [(KeyEvent, &str); 13] = [
	(KeyEvent::UP, "<up>"),
	(KeyEvent::DOWN, "<down>"),
	(KeyEvent::LEFT, "<left>"),
	(KeyEvent::RIGHT, "<right>"),
	(KeyEvent::PAGE_UP, "<prior>"),
	(KeyEvent::PAGE_DOWN, "<next>"),
	(KeyEvent::HOME, "<home>"),
	(KeyEvent::END, "<end>"),
	(KeyEvent::BACKSPACE, "<backspace>"),
	(KeyEvent::DELETE, "<delete>"),
	(KeyEvent::INSERT, "<insert>"),
	(KeyEvent::CTRL_HOME, "C-<home>"),
	(KeyEvent::CTRL_END, "C-<end>"),
];

fn special_name(key: KeyEvent) -> Option<&'static str> {
	SPECIAL_NAMES.iter().find(|(candidate, _)| *candidate == key).map(|(_, name)| *name)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChordParseError {
	#[error("empty key sequence")]
	Empty,
	#[error("unknown key `{0}`")]
	UnknownKey(String),
}

/// Renders a key sequence the way [`parse_chord`] reads it, e.g. `C-x C-c`.
pub fn format_chord(keys: &[KeyEvent]) -> String {
	keys.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

/// Parses a space separated key sequence such as `C-x C-s`, `M-w` or `<prior>`.
pub fn parse_chord(text: &str) -> Result<Vec<KeyEvent>, ChordParseError> {
	let keys = text.split_whitespace().map(parse_key).collect::<Result<Vec<_>, _>>()?;
	if keys.is_empty() {
		return Err(ChordParseError::Empty);
	}
	Ok(keys)
}

fn parse_key(token: &str) -> Result<KeyEvent, ChordParseError> {
	let unknown = || ChordParseError::UnknownKey(token.to_string());

	if let Some(key) = SPECIAL_NAMES.iter().find(|(_, name)| *name == token).map(|(key, _)| *key) {
		return Ok(key);
	}
	let named = match token {
		"TAB" | "tab" => Some(KeyEvent::TAB),
		"RET" | "ret" => Some(KeyEvent::ENTER),
		"ESC" | "esc" => Some(KeyEvent::ESCAPE),
		"SPC" | "spc" => Some(KeyEvent::ordinary(' ')),
		"DEL" => Some(KeyEvent::ordinary('\u{7f}')),
		"C-SPC" => Some(KeyEvent::ctrl('@')),
		"up" => Some(KeyEvent::UP),
		"down" => Some(KeyEvent::DOWN),
		"left" => Some(KeyEvent::LEFT),
		"right" => Some(KeyEvent::RIGHT),
		"prior" => Some(KeyEvent::PAGE_UP),
		"next" => Some(KeyEvent::PAGE_DOWN),
		"home" => Some(KeyEvent::HOME),
		"end" => Some(KeyEvent::END),
		"backspace" => Some(KeyEvent::BACKSPACE),
		"delete" => Some(KeyEvent::DELETE),
		"insert" => Some(KeyEvent::INSERT),
		_ => None,
	};
	if let Some(key) = named {
		return Ok(key);
	}
	if let Some(n) = token.strip_prefix("<f").and_then(|rest| rest.strip_suffix('>')) {
		return n.parse::<u8>().ok().filter(|n| *n > 0).map(KeyEvent::function).ok_or_else(unknown);
	}
	if let Some(rest) = token.strip_prefix("C-") {
		return match single_char(rest) {
			Some(ch) if ch.is_ascii() && ('@'..='_').contains(&ch.to_ascii_uppercase()) => Ok(KeyEvent::ctrl(ch)),
			_ => Err(unknown()),
		};
	}
	if let Some(rest) = token.strip_prefix("M-") {
		return single_char(rest).map(KeyEvent::alt).ok_or_else(unknown);
	}
	single_char(token).map(KeyEvent::ordinary).ok_or_else(unknown)
}

fn single_char(text: &str) -> Option<char> {
	let mut chars = text.chars();
	match (chars.next(), chars.next()) {
		(Some(ch), None) => Some(ch),
		_ => None,
	}
}
