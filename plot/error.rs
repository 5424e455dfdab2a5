use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
	#[error("prediction {index} is not of the same kind as the first prediction")]
	MixedPredictionKinds { index: usize },
	#[error("degenerate size range: all residuals lie in [{min}, {max}]")]
	DegenerateSizeRange { min: f64, max: f64 },
	#[error("the max relative size must be positive, got {0}")]
	InvalidMaxRelativeSize(f64),
	#[error("column \"{name}\" not found")]
	ColumnNotFound { name: String },
	#[error("column \"{name}\" is not a number column")]
	NotANumberColumn { name: String },
	#[error("failed to parse graph: {0}")]
	GraphParse(String),
	#[error("the graphviz dot executable was not found")]
	GraphvizNotFound,
	#[error("cannot infer an output format from {}", .path.display())]
	UnsupportedFormat { path: PathBuf },
	#[error("failed to render: {0}")]
	Render(String),
	#[error(transparent)]
	Backend(anyhow::Error),
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl Error {
	pub(crate) fn render<E>(error: E) -> Self
	where
		E: std::fmt::Display,
	{
		Error::Render(error.to_string())
	}
}
