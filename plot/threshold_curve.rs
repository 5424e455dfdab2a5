/*!
Threshold curves are tables of classifier statistics swept across decision thresholds, one row per threshold. They are produced by an [`EvaluationBackend`](trait.EvaluationBackend.html) and read here by column name.
*/

use crate::{Error, Result};
use tangram_dataframe::DataFrame;

pub const TRUE_POSITIVES: &str = "True Positives";
pub const FALSE_NEGATIVES: &str = "False Negatives";
pub const FALSE_POSITIVES: &str = "False Positives";
pub const TRUE_NEGATIVES: &str = "True Negatives";
pub const FALSE_POSITIVE_RATE: &str = "False Positive Rate";
pub const TRUE_POSITIVE_RATE: &str = "True Positive Rate";
pub const PRECISION: &str = "Precision";
pub const RECALL: &str = "Recall";
pub const FALLOUT: &str = "Fallout";
pub const FMEASURE: &str = "FMeasure";
pub const SAMPLE_SIZE: &str = "Sample Size";
pub const LIFT: &str = "Lift";
pub const THRESHOLD: &str = "Threshold";

/// The columns of a threshold curve, in the order backends produce them.
pub const THRESHOLD_CURVE_COLUMNS: &[&str] = &[
	TRUE_POSITIVES,
	FALSE_NEGATIVES,
	FALSE_POSITIVES,
	TRUE_NEGATIVES,
	FALSE_POSITIVE_RATE,
	TRUE_POSITIVE_RATE,
	PRECISION,
	RECALL,
	FALLOUT,
	FMEASURE,
	SAMPLE_SIZE,
	LIFT,
	THRESHOLD,
];

/**
The `EvaluationBackend` trait is the interface to the library that evaluated a model. Plotting only needs two things from it: the threshold curve for a class, and the area under the ROC curve of a threshold curve.
*/
pub trait EvaluationBackend {
	/// The evaluation result holding the predictions of a model.
	type Evaluation;
	/// Generate the threshold curve for the class at the zero-based `class_index`. This fails if the evaluation has no predictions or the class index is out of range.
	fn curve_table(
		&self,
		evaluation: &Self::Evaluation,
		class_index: usize,
	) -> anyhow::Result<DataFrame>;
	/// Compute the area under the ROC curve described by `table`.
	fn roc_area(&self, table: &DataFrame) -> anyhow::Result<f64>;
}

/// Generate the threshold curve for `class_index` from the predictions held by `evaluation`.
pub fn generate_threshold_curve_data<B>(
	backend: &B,
	evaluation: &B::Evaluation,
	class_index: usize,
) -> Result<DataFrame>
where
	B: EvaluationBackend + ?Sized,
{
	backend
		.curve_table(evaluation, class_index)
		.map_err(Error::Backend)
}

/// Read the columns named `x_name` and `y_name` from a threshold curve, in row order.
pub fn get_threshold_curve_data(
	table: &DataFrame,
	x_name: &str,
	y_name: &str,
) -> Result<(Vec<f64>, Vec<f64>)> {
	let x = number_column(table, x_name)?;
	let y = number_column(table, y_name)?;
	Ok(x.iter().zip(y.iter()).map(|(x, y)| (*x, *y)).unzip())
}

fn number_column<'a>(table: &'a DataFrame, name: &str) -> Result<&'a [f64]> {
	let column = table.column(name).ok_or_else(|| Error::ColumnNotFound {
		name: name.to_owned(),
	})?;
	let column = column.as_number().ok_or_else(|| Error::NotANumberColumn {
		name: name.to_owned(),
	})?;
	Ok(column.data.as_slice())
}

#[cfg(test)]
pub(crate) mod test {
	use super::*;
	use tangram_dataframe::{Column, NumberColumn};

	/// A backend that returns a fixed table for class 0 of a non-empty evaluation.
	pub struct FakeBackend {
		pub table: DataFrame,
		pub area: f64,
	}

	impl EvaluationBackend for FakeBackend {
		type Evaluation = Vec<f64>;

		fn curve_table(
			&self,
			evaluation: &Self::Evaluation,
			class_index: usize,
		) -> anyhow::Result<DataFrame> {
			if evaluation.is_empty() {
				anyhow::bail!("no predictions available");
			}
			if class_index > 0 {
				anyhow::bail!("class index {} out of range", class_index);
			}
			Ok(self.table.clone())
		}

		fn roc_area(&self, _table: &DataFrame) -> anyhow::Result<f64> {
			Ok(self.area)
		}
	}

	/// A threshold curve with every column a backend produces, three thresholds long.
	pub fn curve_table() -> DataFrame {
		let columns = THRESHOLD_CURVE_COLUMNS
			.iter()
			.map(|name| {
				let data = match *name {
					FALSE_POSITIVE_RATE => vec![0.0, 0.25, 1.0],
					TRUE_POSITIVE_RATE => vec![0.0, 0.75, 1.0],
					RECALL => vec![0.1, 0.5, 1.0],
					PRECISION => vec![0.9, 0.6, 0.2],
					THRESHOLD => vec![0.9, 0.5, 0.1],
					_ => vec![0.0; 3],
				};
				Column::Number(NumberColumn::with_data(*name, data))
			})
			.collect();
		DataFrame { columns }
	}

	#[test]
	fn test_get_threshold_curve_data() {
		let (x, y) = get_threshold_curve_data(&curve_table(), RECALL, PRECISION).unwrap();
		assert_eq!(x, vec![0.1, 0.5, 1.0]);
		assert_eq!(y, vec![0.9, 0.6, 0.2]);
	}

	#[test]
	fn test_missing_column() {
		let result = get_threshold_curve_data(&curve_table(), RECALL, "Cost");
		assert!(matches!(result, Err(Error::ColumnNotFound { name }) if name == "Cost"));
	}

	#[test]
	fn test_not_a_number_column() {
		let mut table = curve_table();
		table.columns.insert(
			0,
			Column::Text(tangram_dataframe::TextColumn {
				name: "Label".to_owned(),
				data: vec!["a".to_owned(), "b".to_owned(), "c".to_owned()],
			}),
		);
		let result = get_threshold_curve_data(&table, "Label", PRECISION);
		assert!(matches!(result, Err(Error::NotANumberColumn { name }) if name == "Label"));
	}

	#[test]
	fn test_backend_errors_propagate() {
		let backend = FakeBackend {
			table: curve_table(),
			area: 0.5,
		};
		let table = generate_threshold_curve_data(&backend, &vec![0.5], 0).unwrap();
		assert_eq!(
			table.column_names().collect::<Vec<_>>(),
			THRESHOLD_CURVE_COLUMNS.to_vec()
		);
		let error = generate_threshold_curve_data(&backend, &vec![], 0).unwrap_err();
		assert_eq!(error.to_string(), "no predictions available");
		let error = generate_threshold_curve_data(&backend, &vec![0.5], 3).unwrap_err();
		assert!(matches!(error, Error::Backend(_)));
	}
}
