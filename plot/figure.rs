use crate::{capability::FONT_FAMILY, output::OutputFormat, Config, Error, Result};
use plotters::{coord::Shift, prelude::*};
use std::{ops::Range, path::Path};

/// The fraction of the data range added on each side of an axis when its limits are computed from the data.
pub(crate) const AXIS_MARGIN: f64 = 0.05;

const REFERENCE_LINE_COLOR: RGBColor = RGBColor(77, 77, 77);
const REFERENCE_LINE_DASHES: usize = 40;
const LINE_COLOR: RGBColor = RGBColor(31, 119, 180);
const POINT_ALPHA: f64 = 0.5;

/// A figure is a single chart, fully described so it can be inspected before or after it is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
	pub title: String,
	pub x_label: String,
	pub y_label: String,
	/// The displayed range of the x axis.
	pub x_range: Range<f64>,
	/// The displayed range of the y axis.
	pub y_range: Range<f64>,
	pub series: Vec<Series>,
	/// The endpoints of a dashed reference line.
	pub reference_line: Option<[(f64, f64); 2]>,
	pub grid: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Series {
	Scatter(Vec<ScatterPoint>),
	Line(Vec<(f64, f64)>),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScatterPoint {
	pub x: f64,
	pub y: f64,
	/// The marker area in points squared.
	pub size: f64,
	pub color: RGBColor,
}

impl Figure {
	/// Draw the figure to `path`, choosing the format from the extension.
	pub fn save(&self, path: &Path, config: &Config) -> Result<()> {
		let size = (config.width, config.height);
		match OutputFormat::from_path(path)? {
			OutputFormat::Svg => self.draw(SVGBackend::new(path, size).into_drawing_area(), config),
			OutputFormat::Bitmap => {
				self.draw(BitMapBackend::new(path, size).into_drawing_area(), config)
			}
		}
	}

	fn draw<DB>(&self, root: DrawingArea<DB, Shift>, config: &Config) -> Result<()>
	where
		DB: DrawingBackend,
	{
		root.fill(&WHITE).map_err(Error::render)?;
		let mut chart = ChartBuilder::on(&root)
			.caption(self.title.as_str(), (FONT_FAMILY, 20).into_font())
			.margin(10)
			.x_label_area_size(40)
			.y_label_area_size(50)
			.build_cartesian_2d(self.x_range.clone(), self.y_range.clone())
			.map_err(Error::render)?;
		let mut mesh = chart.configure_mesh();
		if !self.grid {
			mesh.disable_mesh();
		}
		mesh.x_desc(self.x_label.as_str())
			.y_desc(self.y_label.as_str())
			.label_style((FONT_FAMILY, 12).into_font())
			.draw()
			.map_err(Error::render)?;
		for series in self.series.iter() {
			match series {
				Series::Scatter(points) => {
					chart
						.draw_series(points.iter().map(|point| {
							Circle::new(
								(point.x, point.y),
								marker_radius(point.size, config.dpi),
								point.color.mix(POINT_ALPHA).filled(),
							)
						}))
						.map_err(Error::render)?;
				}
				Series::Line(points) => {
					chart
						.draw_series(LineSeries::new(
							points.iter().copied(),
							LINE_COLOR.stroke_width(2),
						))
						.map_err(Error::render)?;
				}
			}
		}
		if let Some([from, to]) = self.reference_line {
			chart
				.draw_series(
					dashes(from, to, REFERENCE_LINE_DASHES)
						.map(|dash| PathElement::new(dash, REFERENCE_LINE_COLOR.stroke_width(1))),
				)
				.map_err(Error::render)?;
		}
		drop(chart);
		root.present().map_err(Error::render)?;
		Ok(())
	}
}

/// Compute axis limits covering `values` with a margin on each side. Non-finite values are ignored.
pub(crate) fn autoscale(values: &[f64]) -> Range<f64> {
	let (min, max) = values
		.iter()
		.copied()
		.filter(|value| value.is_finite())
		.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
			(min.min(value), max.max(value))
		});
	if min > max {
		return 0.0..1.0;
	}
	#[allow(clippy::float_cmp)]
	let (min, max) = if min == max {
		if min == 0.0 {
			(-AXIS_MARGIN, AXIS_MARGIN)
		} else {
			(min - AXIS_MARGIN * min.abs(), max + AXIS_MARGIN * max.abs())
		}
	} else {
		(min, max)
	};
	let margin = (max - min) * AXIS_MARGIN;
	(min - margin)..(max + margin)
}

/// The reference line runs from the lower left to the upper right corner of the given limits.
pub(crate) fn reference_line(x_range: &Range<f64>, y_range: &Range<f64>) -> [(f64, f64); 2] {
	[(x_range.start, y_range.start), (x_range.end, y_range.end)]
}

/// Convert a marker area in points squared to a circle radius in pixels.
fn marker_radius(size: f64, dpi: f64) -> u32 {
	if !(size > 0.0) {
		return 0;
	}
	let radius = size.sqrt() / 2.0 * dpi / 72.0;
	radius.round().max(1.0) as u32
}

/// Split the segment from `from` to `to` into `count` pieces and yield every other one.
fn dashes(
	from: (f64, f64),
	to: (f64, f64),
	count: usize,
) -> impl Iterator<Item = Vec<(f64, f64)>> {
	let point = move |i: usize| {
		let t = i as f64 / count as f64;
		(from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t)
	};
	(0..count)
		.step_by(2)
		.map(move |i| vec![point(i), point(i + 1)])
}

#[test]
fn test_autoscale() {
	let range = autoscale(&[1.0, 3.0, f64::NAN, 2.0]);
	assert!((range.start - 0.9).abs() < 1e-12);
	assert!((range.end - 3.1).abs() < 1e-12);
	assert_eq!(autoscale(&[]), 0.0..1.0);
	let range = autoscale(&[0.0, 0.0]);
	assert!(range.start < 0.0 && range.end > 0.0);
	let range = autoscale(&[2.0]);
	assert!(range.start < 2.0 && range.end > 2.0);
}

#[test]
fn test_dashes() {
	let dashes: Vec<_> = dashes((0.0, 0.0), (4.0, 8.0), 4).collect();
	assert_eq!(
		dashes,
		vec![vec![(0.0, 0.0), (1.0, 2.0)], vec![(2.0, 4.0), (3.0, 6.0)]]
	);
}

#[test]
fn test_marker_radius() {
	assert_eq!(marker_radius(0.0, 100.0), 0);
	assert_eq!(marker_radius(f64::NAN, 100.0), 0);
	// 36 square points is a 6 point wide marker, 3 points or 3 pixels at 72 dpi in radius.
	assert_eq!(marker_radius(36.0, 72.0), 3);
	assert_eq!(marker_radius(0.01, 72.0), 1);
}
