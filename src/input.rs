use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::key::KeyEvent;

/// Decodes crossterm events into chord-matcher key events.
pub struct InputHandler;

impl InputHandler {
	pub fn new() -> Self {
		Self
	}

	/// Key event for a terminal event, or `None` for events the editor does
	/// not react to (releases, mouse, focus, paste).
	pub fn key(&self, event: &Event) -> Option<KeyEvent> {
		let Event::Key(key) = event else {
			return None;
		};
		if key.kind == KeyEventKind::Release {
			return None;
		}
		decode(key.code, key.modifiers)
	}
}

impl Default for InputHandler {
	fn default() -> Self {
		Self::new()
	}
}

fn decode(code: KeyCode, modifiers: KeyModifiers) -> Option<KeyEvent> {
	let ctrl = modifiers.contains(KeyModifiers::CONTROL);
	let alt = modifiers.contains(KeyModifiers::ALT);

	let key = match code {
		KeyCode::Char(' ') | KeyCode::Char('@') if ctrl => KeyEvent::ctrl('@'),
		KeyCode::Char(ch) if ctrl => {
			if !ch.is_ascii() || !('@'..='_').contains(&ch.to_ascii_uppercase()) {
				return None;
			}
			KeyEvent::ctrl(ch)
		}
		KeyCode::Char(ch) if alt => KeyEvent::alt(ch),
		KeyCode::Char(ch) => KeyEvent::ordinary(ch),
		KeyCode::Enter => KeyEvent::ENTER,
		KeyCode::Tab => KeyEvent::TAB,
		KeyCode::Esc => KeyEvent::ESCAPE,
		KeyCode::Backspace => KeyEvent::BACKSPACE,
		KeyCode::Delete => KeyEvent::DELETE,
		KeyCode::Insert => KeyEvent::INSERT,
		KeyCode::Up => KeyEvent::UP,
		KeyCode::Down => KeyEvent::DOWN,
		KeyCode::Left => KeyEvent::LEFT,
		KeyCode::Right => KeyEvent::RIGHT,
		KeyCode::PageUp => KeyEvent::PAGE_UP,
		KeyCode::PageDown => KeyEvent::PAGE_DOWN,
		KeyCode::Home if ctrl => KeyEvent::CTRL_HOME,
		KeyCode::End if ctrl => KeyEvent::CTRL_END,
		KeyCode::Home => KeyEvent::HOME,
		KeyCode::End => KeyEvent::END,
		KeyCode::F(n) if n > 0 => KeyEvent::function(n),
		_ => return None,
	};
	Some(key)
}
