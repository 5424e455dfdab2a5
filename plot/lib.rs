/*!
This crate plots the results of evaluating a model: a scatter plot of prediction errors, ROC and precision-recall curves, and renderings of graphs written in the dot language.

All plotting goes through a [`Plotter`](struct.Plotter.html), which holds the [`Config`](struct.Config.html) and the [`Capability`](enum.Capability.html) detected for the current environment. When plotting is unavailable, every plot function logs an error and returns `Ok(None)`.

Threshold curves and ROC areas are not computed here. They come from an [`EvaluationBackend`](trait.EvaluationBackend.html).

```no_run
use tangram_plot::{ClassifierErrorsOptions, Config, NumericPrediction, Plotter, Prediction};

let plotter = Plotter::new(Config::default().with_env());
let predictions = vec![
	Prediction::Numeric(NumericPrediction::new(1.0, 1.5)),
	Prediction::Numeric(NumericPrediction::new(2.0, 1.0)),
];
plotter
	.plot_classifier_errors(&predictions, &ClassifierErrorsOptions::default())
	.unwrap();
```
*/

mod capability;
mod classifier_errors;
mod config;
mod curves;
mod error;
mod figure;
mod graph;
mod output;
mod prediction;
mod threshold_curve;

pub use self::capability::Capability;
pub use self::classifier_errors::{
	compute_error_scatter_data, rescale_sizes, ClassifierErrorsOptions, ErrorScatterData,
	PointMarks,
};
pub use self::config::{Config, FONT_ENV, VIEWER_ENV};
pub use self::curves::{prc_title, roc_title, CurveOptions};
pub use self::error::{Error, Result};
pub use self::figure::{Figure, ScatterPoint, Series};
pub use self::graph::render_dot_graph;
pub use self::output::OutputFormat;
pub use self::prediction::{NominalPrediction, NumericPrediction, Prediction, PredictionKind};
pub use self::threshold_curve::*;

/// A `Plotter` draws figures according to its `Config`, provided the environment is capable of plotting.
#[derive(Debug, Clone)]
pub struct Plotter {
	config: Config,
	capability: Capability,
}

impl Plotter {
	/// Create a plotter, detecting whether plotting is available.
	pub fn new(config: Config) -> Self {
		let capability = Capability::detect(&config);
		Self { config, capability }
	}

	/// Create a plotter with an explicit capability instead of detecting one.
	pub fn with_capability(config: Config, capability: Capability) -> Self {
		Self { config, capability }
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn capability(&self) -> &Capability {
		&self.capability
	}

	fn ensure_available(&self) -> bool {
		match &self.capability {
			Capability::Available => true,
			Capability::Unavailable { reason } => {
				log::error!("plotting unavailable: {}", reason);
				false
			}
		}
	}
}
