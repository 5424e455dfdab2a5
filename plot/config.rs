/*!
This module defines the `Config` struct, which controls the size of rendered figures, where fonts come from, and which program displays them.
*/

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Overrides `Config::viewer`. Set it to an empty string to disable display.
pub const VIEWER_ENV: &str = "TANGRAM_PLOT_VIEWER";
/// Overrides `Config::font_path`.
pub const FONT_ENV: &str = "TANGRAM_PLOT_FONT";

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct Config {
	/// The width of rendered figures in pixels.
	pub width: u32,
	/// The height of rendered figures in pixels.
	pub height: u32,
	/// Pixels per inch, used to convert marker sizes given in points.
	pub dpi: f64,
	/// A TrueType font to draw text with. If unset, well known system locations are searched.
	pub font_path: Option<PathBuf>,
	/// The program used to display rendered images. It is run with the image path as its last argument.
	pub viewer: Option<String>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			width: 800,
			height: 600,
			dpi: 100.0,
			font_path: None,
			viewer: default_viewer(),
		}
	}
}

impl Config {
	pub fn from_path(path: &Path) -> Result<Self> {
		let config = std::fs::read_to_string(path)
			.with_context(|| format!("failed to read config file {}", path.display()))?;
		let config = serde_yaml::from_str(&config)
			.with_context(|| format!("failed to parse config file {}", path.display()))?;
		Ok(config)
	}

	/// Apply overrides from the environment.
	pub fn with_env(self) -> Self {
		self.with_overrides(
			std::env::var(VIEWER_ENV).ok(),
			std::env::var_os(FONT_ENV).map(PathBuf::from),
		)
	}

	fn with_overrides(mut self, viewer: Option<String>, font_path: Option<PathBuf>) -> Self {
		if let Some(viewer) = viewer {
			self.viewer = if viewer.trim().is_empty() {
				None
			} else {
				Some(viewer)
			};
		}
		if let Some(font_path) = font_path {
			self.font_path = Some(font_path);
		}
		self
	}
}

fn default_viewer() -> Option<String> {
	if cfg!(target_os = "macos") {
		Some("open".to_owned())
	} else if cfg!(target_os = "windows") {
		None
	} else {
		Some("xdg-open".to_owned())
	}
}

#[test]
fn test_parse_partial_config() {
	let config: Config = serde_yaml::from_str("width: 640\nviewer: eog\n").unwrap();
	assert_eq!(config.width, 640);
	assert_eq!(config.height, 600);
	assert_eq!(config.viewer.as_deref(), Some("eog"));
	assert_eq!(config.font_path, None);
}

#[test]
fn test_from_path() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("plot.yaml");
	std::fs::write(&path, "dpi: 72\nfont_path: /fonts/a.ttf\n").unwrap();
	let config = Config::from_path(&path).unwrap();
	assert_eq!(config.dpi, 72.0);
	assert_eq!(config.font_path, Some(PathBuf::from("/fonts/a.ttf")));
	assert!(Config::from_path(&dir.path().join("missing.yaml")).is_err());
}

#[test]
fn test_overrides() {
	let config = Config {
		viewer: Some("feh".to_owned()),
		..Default::default()
	};
	let config = config.with_overrides(Some(" ".to_owned()), Some(PathBuf::from("/a.ttf")));
	assert_eq!(config.viewer, None);
	assert_eq!(config.font_path, Some(PathBuf::from("/a.ttf")));
	let config = config.with_overrides(Some("eog".to_owned()), None);
	assert_eq!(config.viewer.as_deref(), Some("eog"));
	assert_eq!(config.font_path, Some(PathBuf::from("/a.ttf")));
}
