use crate::{Error, Figure, Plotter, Result};
use std::{
	path::{Path, PathBuf},
	process::Command,
};

/// The image format of an output file, chosen by its extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
	Svg,
	Bitmap,
}

const BITMAP_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

impl OutputFormat {
	pub fn from_path(path: &Path) -> Result<OutputFormat> {
		let extension = path
			.extension()
			.and_then(|extension| extension.to_str())
			.map(|extension| extension.to_ascii_lowercase());
		match extension.as_deref() {
			Some("svg") => Ok(OutputFormat::Svg),
			Some(extension) if BITMAP_EXTENSIONS.contains(&extension) => Ok(OutputFormat::Bitmap),
			_ => Err(Error::UnsupportedFormat {
				path: path.to_owned(),
			}),
		}
	}
}

impl Plotter {
	/// Write `figure` to `outfile` if one was given, then display it and block until the viewer exits if `wait` is set.
	pub(crate) fn output(&self, figure: &Figure, outfile: Option<&Path>, wait: bool) -> Result<()> {
		if let Some(outfile) = outfile {
			figure.save(outfile, &self.config)?;
			log::debug!("wrote \"{}\" to {}", figure.title, outfile.display());
		}
		if !wait {
			return Ok(());
		}
		let viewer = match self.config.viewer.as_deref() {
			Some(viewer) => viewer,
			None => {
				log::warn!("no viewer is configured, not displaying \"{}\"", figure.title);
				return Ok(());
			}
		};
		let path = match outfile {
			Some(outfile) => outfile.to_owned(),
			None => {
				let path = temporary_path("plot-", ".png")?;
				figure.save(&path, &self.config)?;
				path
			}
		};
		show(viewer, &path, true)
	}
}

/// Create an empty file in the temporary directory that outlives the process.
pub(crate) fn temporary_path(prefix: &str, suffix: &str) -> Result<PathBuf> {
	let file = tempfile::Builder::new()
		.prefix(prefix)
		.suffix(suffix)
		.tempfile()?;
	let (_, path) = file.keep().map_err(|error| error.error)?;
	Ok(path)
}

/// Open `path` with `viewer`. The viewer may include arguments, which are passed before the path.
pub(crate) fn show(viewer: &str, path: &Path, wait: bool) -> Result<()> {
	let mut words = viewer.split_whitespace();
	let program = match words.next() {
		Some(program) => program,
		None => return Ok(()),
	};
	let mut command = Command::new(program);
	command.args(words).arg(path);
	if wait {
		let status = command.status()?;
		if !status.success() {
			log::warn!("{} exited with {}", program, status);
		}
	} else {
		command.spawn()?;
	}
	Ok(())
}

#[test]
fn test_output_format() {
	assert_eq!(
		OutputFormat::from_path(Path::new("roc.svg")).unwrap(),
		OutputFormat::Svg
	);
	assert_eq!(
		OutputFormat::from_path(Path::new("/tmp/errors.PNG")).unwrap(),
		OutputFormat::Bitmap
	);
	assert!(matches!(
		OutputFormat::from_path(Path::new("errors")),
		Err(Error::UnsupportedFormat { .. })
	));
	assert!(matches!(
		OutputFormat::from_path(Path::new("errors.pdf")),
		Err(Error::UnsupportedFormat { .. })
	));
}

#[test]
fn test_temporary_path_is_kept() {
	let path = temporary_path("plot-test-", ".svg").unwrap();
	assert!(path.exists());
	assert_eq!(path.extension().and_then(|e| e.to_str()), Some("svg"));
	std::fs::remove_file(path).unwrap();
}

#[cfg(unix)]
#[test]
fn test_show_waits_for_viewer() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("errors.png");
	std::fs::write(&path, b"").unwrap();
	show("true", &path, true).unwrap();
	// A viewer that fails is only logged.
	show("false", &path, true).unwrap();
	show("", &path, true).unwrap();
	assert!(show("tangram-plot-missing-viewer", &path, true).is_err());
}

#[cfg(unix)]
#[test]
fn test_output_waits_for_viewer() {
	let config = crate::Config {
		viewer: Some("true".to_owned()),
		..Default::default()
	};
	if !crate::Capability::detect(&config).is_available() {
		return;
	}
	let dir = tempfile::tempdir().unwrap();
	let outfile = dir.path().join("errors.svg");
	let plotter = Plotter::with_capability(config, crate::Capability::Available);
	let figure = Figure {
		title: String::new(),
		x_label: String::new(),
		y_label: String::new(),
		x_range: 0.0..1.0,
		y_range: 0.0..1.0,
		series: Vec::new(),
		reference_line: None,
		grid: false,
	};
	plotter.output(&figure, Some(&outfile), true).unwrap();
	assert!(outfile.exists());
}
