mod buffer;

pub use buffer::{FileBuffer, FileIdentity};

use crate::text::Text;

/// One transient status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
	pub content: String,
}

/// Everything a command reads and produces.
///
/// Like [`FileBuffer`], an `AppState` is a value: commands build the next
/// state and leave this one as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
	pub buffer:    FileBuffer,
	/// Oldest first; the renderer shows the last one.
	pub messages:  im::Vector<Message>,
	/// Most recently cut, copied or killed text.
	pub clipboard: Option<Text>,
}

impl AppState {
	pub const MAX_MESSAGES: usize = 128;

	pub fn new(buffer: FileBuffer) -> Self {
		Self { buffer, messages: im::Vector::new(), clipboard: None }
	}

	pub fn with_buffer(&self, buffer: FileBuffer) -> Self {
		Self { buffer, ..self.clone() }
	}

	pub fn put_message(&self, content: impl Into<String>) -> Self {
		let mut messages = self.messages.clone();
		messages.push_back(Message { content: content.into() });
		while messages.len() > Self::MAX_MESSAGES {
			messages.pop_front();
		}
		Self { messages, ..self.clone() }
	}

	pub fn put_clipboard(&self, text: Text) -> Self {
		Self { clipboard: Some(text), ..self.clone() }
	}

	pub fn last_message(&self) -> Option<&Message> {
		self.messages.back()
	}

	/// State after the buffer has been written to disk.
	pub fn saved(&self) -> Self {
		let state = self.with_buffer(self.buffer.mark_saved());
		state.put_message("file saved")
	}
}

#[cfg(test)]
mod tests;
