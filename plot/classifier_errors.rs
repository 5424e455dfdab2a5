use crate::{
	figure::{autoscale, reference_line},
	Error, Figure, Plotter, Prediction, PredictionKind, Result, ScatterPoint, Series,
};
use plotters::style::RGBColor;
use std::path::PathBuf;

const DEFAULT_TITLE: &str = "Classifier errors";

const UNIFORM_COLOR: RGBColor = RGBColor(31, 119, 180);
const CORRECT_COLOR: RGBColor = RGBColor(68, 1, 84);
const MISCLASSIFIED_COLOR: RGBColor = RGBColor(253, 231, 37);

#[derive(Clone, Debug, PartialEq)]
pub struct ClassifierErrorsOptions {
	/// Use the absolute residuals as marker sizes. Otherwise they are rescaled relative to `max_relative_size`.
	pub absolute: bool,
	/// The scale for relative marker sizes, in points squared.
	pub max_relative_size: f64,
	/// The marker size used when markers are not sized by residual, in points squared.
	pub absolute_size: f64,
	pub title: Option<String>,
	pub outfile: Option<PathBuf>,
	pub wait: bool,
}

impl Default for ClassifierErrorsOptions {
	fn default() -> Self {
		Self {
			absolute: true,
			max_relative_size: 50.0,
			absolute_size: 50.0,
			title: None,
			outfile: None,
			wait: true,
		}
	}
}

/// The coordinates and markers of an error scatter plot, one entry per prediction in input order.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorScatterData {
	pub actual: Vec<f64>,
	pub predicted: Vec<f64>,
	pub marks: PointMarks,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PointMarks {
	/// Every point has the same size and color.
	Uniform { size: f64 },
	/// Points are sized by residual.
	Sized { sizes: Vec<f64> },
	/// Points have the same size and are colored by whether they were misclassified.
	Misclassified { flags: Vec<u8>, size: f64 },
}

/**
Extract the coordinates of each prediction and compute its marker.

The kind of the first prediction decides how points are marked: numeric predictions are sized by the absolute value of their residual and nominal predictions are colored by whether they were misclassified. Every prediction must be of the same kind.
*/
pub fn compute_error_scatter_data(
	predictions: &[Prediction],
	options: &ClassifierErrorsOptions,
) -> Result<ErrorScatterData> {
	let kind = predictions.first().map(|prediction| prediction.kind());
	let mut actual = Vec::with_capacity(predictions.len());
	let mut predicted = Vec::with_capacity(predictions.len());
	let mut residuals = Vec::new();
	let mut flags = Vec::new();
	for (index, prediction) in predictions.iter().enumerate() {
		if Some(prediction.kind()) != kind {
			return Err(Error::MixedPredictionKinds { index });
		}
		actual.push(prediction.actual());
		predicted.push(prediction.predicted());
		match prediction {
			Prediction::Numeric(prediction) => residuals.push(prediction.error().abs()),
			Prediction::Nominal(prediction) => flags.push(prediction.is_misclassified() as u8),
		}
	}
	let marks = match kind {
		None => PointMarks::Uniform {
			size: options.absolute_size,
		},
		Some(PredictionKind::Nominal) => PointMarks::Misclassified {
			flags,
			size: options.absolute_size,
		},
		Some(PredictionKind::Numeric) if options.absolute => PointMarks::Sized { sizes: residuals },
		Some(PredictionKind::Numeric) => PointMarks::Sized {
			sizes: rescale_sizes(&residuals, options.max_relative_size)?,
		},
	};
	Ok(ErrorScatterData {
		actual,
		predicted,
		marks,
	})
}

/// Rescale residuals to marker sizes with `r / ((max - min) / max_relative_size) * max_relative_size`. The operations are applied in exactly this order.
pub fn rescale_sizes(residuals: &[f64], max_relative_size: f64) -> Result<Vec<f64>> {
	if !(max_relative_size > 0.0) {
		return Err(Error::InvalidMaxRelativeSize(max_relative_size));
	}
	let (min, max) = residuals
		.iter()
		.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), residual| {
			(min.min(*residual), max.max(*residual))
		});
	let factor = (max - min) / max_relative_size;
	if !(factor > 0.0 && factor.is_finite()) {
		return Err(Error::DegenerateSizeRange { min, max });
	}
	Ok(residuals
		.iter()
		.map(|residual| residual / factor * max_relative_size)
		.collect())
}

impl ErrorScatterData {
	fn points(&self) -> Vec<ScatterPoint> {
		self.actual
			.iter()
			.zip(self.predicted.iter())
			.enumerate()
			.map(|(index, (x, y))| {
				let (size, color) = match &self.marks {
					PointMarks::Uniform { size } => (*size, UNIFORM_COLOR),
					PointMarks::Sized { sizes } => (sizes[index], UNIFORM_COLOR),
					PointMarks::Misclassified { flags, size } => {
						let color = if flags[index] == 1 {
							MISCLASSIFIED_COLOR
						} else {
							CORRECT_COLOR
						};
						(*size, color)
					}
				};
				ScatterPoint {
					x: *x,
					y: *y,
					size,
					color,
				}
			})
			.collect()
	}
}

impl Plotter {
	/// Plot actual against predicted values, marking each point by the size of its error or by whether it was misclassified.
	pub fn plot_classifier_errors(
		&self,
		predictions: &[Prediction],
		options: &ClassifierErrorsOptions,
	) -> Result<Option<Figure>> {
		if !self.ensure_available() {
			return Ok(None);
		}
		let data = compute_error_scatter_data(predictions, options)?;
		let x_range = autoscale(&data.actual);
		let y_range = autoscale(&data.predicted);
		let figure = Figure {
			title: options
				.title
				.clone()
				.unwrap_or_else(|| DEFAULT_TITLE.to_owned()),
			x_label: "actual".to_owned(),
			y_label: "predicted".to_owned(),
			reference_line: Some(reference_line(&x_range, &y_range)),
			x_range,
			y_range,
			series: vec![Series::Scatter(data.points())],
			grid: true,
		};
		self.output(&figure, options.outfile.as_deref(), options.wait)?;
		Ok(Some(figure))
	}
}

#[cfg(test)]
fn numeric(actual: f64, predicted: f64) -> Prediction {
	Prediction::Numeric(crate::NumericPrediction::new(actual, predicted))
}

#[cfg(test)]
fn nominal(actual: usize, predicted: usize) -> Prediction {
	Prediction::Nominal(crate::NominalPrediction::new(actual, predicted))
}

#[cfg(test)]
fn no_wait() -> ClassifierErrorsOptions {
	ClassifierErrorsOptions {
		wait: false,
		..Default::default()
	}
}

#[test]
fn test_numeric_predictions_are_sized_by_absolute_error() {
	let predictions = vec![numeric(1.0, 2.0), numeric(2.0, 1.5), numeric(4.0, 4.0)];
	let data = compute_error_scatter_data(&predictions, &no_wait()).unwrap();
	assert_eq!(data.actual, vec![1.0, 2.0, 4.0]);
	assert_eq!(data.predicted, vec![2.0, 1.5, 4.0]);
	assert_eq!(
		data.marks,
		PointMarks::Sized {
			sizes: vec![1.0, 0.5, 0.0]
		}
	);
}

#[test]
fn test_nominal_predictions_are_flagged() {
	let predictions = vec![nominal(0, 0), nominal(1, 0), nominal(2, 2), nominal(0, 1)];
	let data = compute_error_scatter_data(&predictions, &no_wait()).unwrap();
	assert_eq!(data.actual, vec![0.0, 1.0, 2.0, 0.0]);
	insta::assert_debug_snapshot!(data.marks, @r###"
 Misclassified {
     flags: [
         0,
         1,
         0,
         1,
     ],
     size: 50.0,
 }
 "###);
}

#[test]
fn test_relative_sizes() {
	let sizes = rescale_sizes(&[1.0, 2.0, 3.0], 50.0).unwrap();
	let expected: Vec<f64> = [1.0f64, 2.0, 3.0]
		.iter()
		.map(|r| r / ((3.0 - 1.0) / 50.0) * 50.0)
		.collect();
	assert_eq!(sizes, expected);
	for (size, expected) in sizes.iter().zip([1250.0, 2500.0, 3750.0].iter()) {
		assert!((size - expected).abs() < 1e-9);
	}
}

#[test]
fn test_relative_sizes_through_options() {
	let predictions = vec![numeric(0.0, 1.0), numeric(0.0, -2.0), numeric(0.0, 3.0)];
	let options = ClassifierErrorsOptions {
		absolute: false,
		..no_wait()
	};
	let data = compute_error_scatter_data(&predictions, &options).unwrap();
	match data.marks {
		PointMarks::Sized { sizes } => assert_eq!(sizes.len(), 3),
		marks => panic!("unexpected marks {:?}", marks),
	}
}

#[test]
fn test_degenerate_size_range() {
	let result = rescale_sizes(&[2.0, 2.0, 2.0], 50.0);
	assert!(matches!(
		result,
		Err(Error::DegenerateSizeRange { min, max }) if min == 2.0 && max == 2.0
	));
	assert!(matches!(
		rescale_sizes(&[1.0, 2.0], 0.0),
		Err(Error::InvalidMaxRelativeSize(_))
	));
}

#[test]
fn test_mixed_kinds() {
	let predictions = vec![numeric(1.0, 1.0), numeric(1.0, 2.0), nominal(0, 1)];
	assert!(matches!(
		compute_error_scatter_data(&predictions, &no_wait()),
		Err(Error::MixedPredictionKinds { index: 2 })
	));
}

#[test]
fn test_empty_predictions_are_uniform() {
	let data = compute_error_scatter_data(&[], &no_wait()).unwrap();
	assert!(data.actual.is_empty());
	assert_eq!(data.marks, PointMarks::Uniform { size: 50.0 });
}

#[test]
fn test_unavailable_plots_nothing() {
	let dir = tempfile::tempdir().unwrap();
	let outfile = dir.path().join("errors.png");
	let plotter = Plotter::with_capability(
		crate::Config {
			viewer: None,
			..Default::default()
		},
		crate::Capability::Unavailable {
			reason: "test".to_owned(),
		},
	);
	let options = ClassifierErrorsOptions {
		outfile: Some(outfile.clone()),
		..no_wait()
	};
	let figure = plotter
		.plot_classifier_errors(&[numeric(1.0, 2.0)], &options)
		.unwrap();
	assert!(figure.is_none());
	assert!(!outfile.exists());
}

#[test]
fn test_plot_classifier_errors() {
	let config = crate::Config {
		viewer: None,
		..Default::default()
	};
	let plotter = Plotter::new(config);
	if !plotter.capability().is_available() {
		return;
	}
	let dir = tempfile::tempdir().unwrap();
	let outfile = dir.path().join("errors.svg");
	let options = ClassifierErrorsOptions {
		outfile: Some(outfile.clone()),
		..no_wait()
	};
	let predictions = vec![numeric(1.0, 2.0), numeric(2.0, 1.5), numeric(3.0, 3.5)];
	let figure = plotter
		.plot_classifier_errors(&predictions, &options)
		.unwrap()
		.unwrap();
	assert_eq!(figure.title, DEFAULT_TITLE);
	assert_eq!(figure.x_label, "actual");
	assert_eq!(figure.y_label, "predicted");
	assert!(figure.grid);
	match &figure.series[..] {
		[Series::Scatter(points)] => assert_eq!(points.len(), 3),
		series => panic!("unexpected series {:?}", series),
	}
	assert!(std::fs::metadata(&outfile).unwrap().len() > 0);
}
