use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::state::{FileBuffer, FileIdentity};
use crate::text::Document;

#[derive(Debug, Error)]
pub enum FileAccessError {
	#[error("read {path} failed")]
	Read {
		path:   PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("{path} is not valid UTF-8")]
	InvalidUtf8 {
		path:   PathBuf,
		#[source]
		source: std::string::FromUtf8Error,
	},
	#[error("write {path} failed")]
	Write {
		path:   PathBuf,
		#[source]
		source: io::Error,
	},
}

/// Loads `path` into a clean buffer with the cursor at the start.
pub fn load_file(path: impl AsRef<Path>) -> Result<FileBuffer, FileAccessError> {
	let path = path.as_ref();
	let bytes = std::fs::read(path).map_err(|source| FileAccessError::Read { path: path.to_path_buf(), source })?;
	let text =
		String::from_utf8(bytes).map_err(|source| FileAccessError::InvalidUtf8 { path: path.to_path_buf(), source })?;
	let content = Document::parse(&text);
	info!("loaded {}: {} lines", path.display(), content.len());
	Ok(FileBuffer::new(FileIdentity::new(path), content))
}

/// Writes the buffer content back to the file it was loaded from.
pub fn save_file(buffer: &FileBuffer) -> Result<(), FileAccessError> {
	let path = buffer.file_name.path();
	std::fs::write(path, buffer.content.to_file_string())
		.map_err(|source| FileAccessError::Write { path: path.to_path_buf(), source })?;
	info!("saved {}: {} lines", path.display(), buffer.content.len());
	Ok(())
}
