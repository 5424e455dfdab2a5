use crate::Config;
use once_cell::sync::OnceCell;
use plotters::style::{register_font, FontStyle};
use std::path::{Path, PathBuf};

/// Whether figures can be drawn in the current environment.
#[derive(Debug, Clone, PartialEq)]
pub enum Capability {
	Available,
	Unavailable { reason: String },
}

/// Locations searched for a font when `Config::font_path` is not set.
const FONT_SEARCH_PATHS: &[&str] = &[
	"/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
	"/usr/share/fonts/dejavu/DejaVuSans.ttf",
	"/usr/share/fonts/TTF/DejaVuSans.ttf",
	"/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
	"/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
	"/usr/share/fonts/truetype/freefont/FreeSans.ttf",
	"/System/Library/Fonts/Supplemental/Arial.ttf",
	"/Library/Fonts/Arial.ttf",
	"C:\\Windows\\Fonts\\arial.ttf",
];

/// The font family every figure draws its text with.
pub(crate) const FONT_FAMILY: &str = "sans-serif";

static REGISTERED_FONT: OnceCell<PathBuf> = OnceCell::new();

impl Capability {
	/// Detect whether plotting is available by registering a font for drawing text. Only the first font registered in a process is used.
	pub fn detect(config: &Config) -> Capability {
		if let Some(path) = REGISTERED_FONT.get() {
			log::debug!("using font {}", path.display());
			return Capability::Available;
		}
		let candidates = config
			.font_path
			.iter()
			.cloned()
			.chain(FONT_SEARCH_PATHS.iter().map(PathBuf::from));
		for path in candidates {
			match register(&path) {
				Ok(()) => return Capability::Available,
				Err(error) => log::debug!("skipping font {}: {}", path.display(), error),
			}
		}
		Capability::Unavailable {
			reason: "no usable TrueType font was found, set font_path in the config".to_owned(),
		}
	}

	pub fn is_available(&self) -> bool {
		matches!(self, Capability::Available)
	}
}

fn register(path: &Path) -> Result<(), String> {
	REGISTERED_FONT
		.get_or_try_init(|| {
			let bytes = std::fs::read(path).map_err(|error| error.to_string())?;
			// Registered font data must live for the rest of the process.
			let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
			register_font(FONT_FAMILY, FontStyle::Normal, bytes)
				.map_err(|_| format!("invalid font {}", path.display()))?;
			Ok(path.to_owned())
		})
		.map(|_| ())
}

