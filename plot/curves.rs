use crate::{
	figure::{autoscale, reference_line},
	generate_threshold_curve_data, get_threshold_curve_data, Error, EvaluationBackend, Figure,
	Plotter, Result, Series, FALSE_POSITIVE_RATE, PRECISION, RECALL, TRUE_POSITIVE_RATE,
};
use std::path::PathBuf;

/// Curves are displayed slightly beyond [0, 1] on both axes.
const CURVE_RANGE: std::ops::Range<f64> = -0.05..1.05;

#[derive(Clone, Debug, PartialEq)]
pub struct CurveOptions {
	/// The zero-based index of the class to plot the curve for.
	pub class_index: usize,
	pub title: Option<String>,
	pub outfile: Option<PathBuf>,
	pub wait: bool,
}

impl Default for CurveOptions {
	fn default() -> Self {
		Self {
			class_index: 0,
			title: None,
			outfile: None,
			wait: true,
		}
	}
}

/// The title of an ROC plot always ends with the area under the curve.
pub fn roc_title(title: Option<&str>, area: f64) -> String {
	format!("{} ({:.4})", title.unwrap_or("ROC"), area)
}

pub fn prc_title(title: Option<&str>) -> String {
	title.unwrap_or("PRC").to_owned()
}

impl Plotter {
	/// Plot the receiver operating characteristic curve for a class.
	pub fn plot_roc<B>(
		&self,
		backend: &B,
		evaluation: &B::Evaluation,
		options: &CurveOptions,
	) -> Result<Option<Figure>>
	where
		B: EvaluationBackend + ?Sized,
	{
		if !self.ensure_available() {
			return Ok(None);
		}
		let table = generate_threshold_curve_data(backend, evaluation, options.class_index)?;
		let area = backend.roc_area(&table).map_err(Error::Backend)?;
		let (x, y) = get_threshold_curve_data(&table, FALSE_POSITIVE_RATE, TRUE_POSITIVE_RATE)?;
		let figure = curve_figure(
			roc_title(options.title.as_deref(), area),
			FALSE_POSITIVE_RATE,
			TRUE_POSITIVE_RATE,
			x,
			y,
		);
		self.output(&figure, options.outfile.as_deref(), options.wait)?;
		Ok(Some(figure))
	}

	/// Plot the precision-recall curve for a class.
	pub fn plot_prc<B>(
		&self,
		backend: &B,
		evaluation: &B::Evaluation,
		options: &CurveOptions,
	) -> Result<Option<Figure>>
	where
		B: EvaluationBackend + ?Sized,
	{
		if !self.ensure_available() {
			return Ok(None);
		}
		let table = generate_threshold_curve_data(backend, evaluation, options.class_index)?;
		let (x, y) = get_threshold_curve_data(&table, RECALL, PRECISION)?;
		let figure = curve_figure(prc_title(options.title.as_deref()), RECALL, PRECISION, x, y);
		self.output(&figure, options.outfile.as_deref(), options.wait)?;
		Ok(Some(figure))
	}
}

/// The reference line spans the limits fit to the data, while the displayed range is fixed.
fn curve_figure(title: String, x_label: &str, y_label: &str, x: Vec<f64>, y: Vec<f64>) -> Figure {
	let reference_line = reference_line(&autoscale(&x), &autoscale(&y));
	Figure {
		title,
		x_label: x_label.to_owned(),
		y_label: y_label.to_owned(),
		x_range: CURVE_RANGE,
		y_range: CURVE_RANGE,
		series: vec![Series::Line(x.into_iter().zip(y.into_iter()).collect())],
		reference_line: Some(reference_line),
		grid: true,
	}
}

#[cfg(test)]
use crate::threshold_curve::test::{curve_table, FakeBackend};

#[cfg(test)]
fn test_plotter(capability: crate::Capability) -> Plotter {
	Plotter::with_capability(
		crate::Config {
			viewer: None,
			..Default::default()
		},
		capability,
	)
}

#[cfg(test)]
fn no_wait() -> CurveOptions {
	CurveOptions {
		wait: false,
		..Default::default()
	}
}

#[test]
fn test_titles() {
	assert_eq!(roc_title(None, 0.8765), "ROC (0.8765)");
	assert_eq!(roc_title(Some("Model A"), 0.5), "Model A (0.5000)");
	assert_eq!(prc_title(None), "PRC");
	assert_eq!(prc_title(Some("Model A")), "Model A");
}

#[test]
fn test_roc_figure() {
	let backend = FakeBackend {
		table: curve_table(),
		area: 0.8765,
	};
	let figure = test_plotter(crate::Capability::Available)
		.plot_roc(&backend, &vec![1.0], &no_wait())
		.unwrap()
		.unwrap();
	assert_eq!(figure.title, "ROC (0.8765)");
	assert_eq!(figure.x_label, FALSE_POSITIVE_RATE);
	assert_eq!(figure.y_label, TRUE_POSITIVE_RATE);
	assert_eq!(figure.x_range, -0.05..1.05);
	assert_eq!(figure.y_range, -0.05..1.05);
	assert_eq!(
		figure.series,
		vec![Series::Line(vec![(0.0, 0.0), (0.25, 0.75), (1.0, 1.0)])]
	);
	let [from, to] = figure.reference_line.unwrap();
	assert!((from.0 + 0.05).abs() < 1e-12 && (from.1 + 0.05).abs() < 1e-12);
	assert!((to.0 - 1.05).abs() < 1e-12 && (to.1 - 1.05).abs() < 1e-12);
}

#[test]
fn test_prc_figure() {
	let backend = FakeBackend {
		table: curve_table(),
		area: 0.0,
	};
	let options = CurveOptions {
		title: Some("Precision".to_owned()),
		..no_wait()
	};
	let figure = test_plotter(crate::Capability::Available)
		.plot_prc(&backend, &vec![1.0], &options)
		.unwrap()
		.unwrap();
	assert_eq!(figure.title, "Precision");
	assert_eq!(
		figure.series,
		vec![Series::Line(vec![(0.1, 0.9), (0.5, 0.6), (1.0, 0.2)])]
	);
}

#[test]
fn test_curve_errors_propagate() {
	let backend = FakeBackend {
		table: curve_table(),
		area: 0.5,
	};
	let plotter = test_plotter(crate::Capability::Available);
	let options = CurveOptions {
		class_index: 1,
		..no_wait()
	};
	assert!(matches!(
		plotter.plot_roc(&backend, &vec![1.0], &options),
		Err(Error::Backend(_))
	));
	assert!(matches!(
		plotter.plot_prc(&backend, &vec![], &no_wait()),
		Err(Error::Backend(_))
	));
}

#[test]
fn test_unavailable_curves_plot_nothing() {
	let backend = FakeBackend {
		table: curve_table(),
		area: 0.5,
	};
	let dir = tempfile::tempdir().unwrap();
	let outfile = dir.path().join("roc.png");
	let plotter = test_plotter(crate::Capability::Unavailable {
		reason: "test".to_owned(),
	});
	let options = CurveOptions {
		outfile: Some(outfile.clone()),
		..no_wait()
	};
	assert_eq!(plotter.plot_roc(&backend, &vec![1.0], &options).unwrap(), None);
	assert_eq!(plotter.plot_prc(&backend, &vec![1.0], &options).unwrap(), None);
	assert!(!outfile.exists());
}

#[test]
fn test_save_roc() {
	let plotter = Plotter::new(crate::Config {
		viewer: None,
		..Default::default()
	});
	if !plotter.capability().is_available() {
		return;
	}
	let backend = FakeBackend {
		table: curve_table(),
		area: 0.75,
	};
	let dir = tempfile::tempdir().unwrap();
	let outfile = dir.path().join("roc.png");
	let options = CurveOptions {
		outfile: Some(outfile.clone()),
		..no_wait()
	};
	plotter.plot_roc(&backend, &vec![1.0], &options).unwrap();
	assert!(std::fs::metadata(&outfile).unwrap().len() > 0);
}
