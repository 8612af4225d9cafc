use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::command::{Command, UnknownCommand};
use crate::key::{ChordParseError, format_chord, parse_chord};
use crate::keymap::KeyMap;

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("read config {path} failed")]
	Read {
		path:   PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("parse config failed")]
	Parse {
		#[source]
		source: toml::de::Error,
	},
	#[error("invalid key sequence `{chord}`")]
	InvalidChord {
		chord:  String,
		#[source]
		source: ChordParseError,
	},
	#[error("key sequence `{chord}` is bound to an unknown command")]
	UnknownCommand {
		chord:  String,
		#[source]
		source: UnknownCommand,
	},
}

/// On-disk layout of `config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
	/// Chord to command name, e.g. `"C-x C-s" = "save"`.
	bindings: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	pub keymap: KeyMap,
}

impl Default for Config {
	fn default() -> Self {
		Self { keymap: KeyMap::emacs() }
	}
}

impl Config {
	/// Reads `explicit` if given, otherwise the per-user config file when it
	/// exists. Falls back to the default bindings.
	pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
		let path = match explicit {
			Some(path) => Some(path.to_path_buf()),
			None => user_config_path().filter(|path| path.is_file()),
		};
		let config = match path {
			Some(path) => {
				let text = std::fs::read_to_string(&path)
					.map_err(|source| ConfigError::Read { path: path.clone(), source })?;
				let config = Self::parse(&text)?;
				info!("loaded config {}", path.display());
				config
			}
			None => {
				debug!("no config file, using default bindings");
				Self::default()
			}
		};
		let mut bindings = config.keymap.bindings().collect::<Vec<_>>();
		bindings.sort_by_key(|(keys, _)| *keys);
		for (keys, command) in bindings {
			debug!("bind {} -> {}", format_chord(keys), command);
		}
		Ok(config)
	}

	/// Layers the bindings in `text` over the default key map.
	pub fn parse(text: &str) -> Result<Self, ConfigError> {
		let file: ConfigFile = toml::from_str(text).map_err(|source| ConfigError::Parse { source })?;
		let keymap = file.bindings.iter().try_fold(KeyMap::emacs(), |keymap, (chord, name)| {
			let keys = parse_chord(chord).map_err(|source| ConfigError::InvalidChord { chord: chord.clone(), source })?;
			let command = name
				.parse::<Command>()
				.map_err(|source| ConfigError::UnknownCommand { chord: chord.clone(), source })?;
			Ok::<_, ConfigError>(keymap.bind(&keys, command))
		})?;
		Ok(Self { keymap })
	}
}

fn user_config_path() -> Option<PathBuf> {
	#[cfg(target_os = "windows")]
	{
		std::env::var_os("APPDATA").map(PathBuf::from).map(|dir| dir.join("imed").join("config.toml"))
	}

	#[cfg(not(target_os = "windows"))]
	{
		if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
			return Some(config_home.join("imed").join("config.toml"));
		}
		std::env::var_os("HOME").map(PathBuf::from).map(|home| home.join(".config").join("imed").join("config.toml"))
	}
}
