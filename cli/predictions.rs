use anyhow::{format_err, Result};
use tangram_dataframe::{Column, DataFrame, EnumColumn};
use tangram_plot::{NominalPrediction, NumericPrediction, Prediction};

/**
Read predictions from the `actual` and `predicted` columns of a dataframe. Two number columns produce numeric predictions. Two enum columns produce nominal predictions, whose class indexes refer to the options of the actual column followed by any options only the predicted column has.
*/
pub fn from_dataframe(
	dataframe: &DataFrame,
	actual: &str,
	predicted: &str,
) -> Result<Vec<Prediction>> {
	let actual_column = dataframe
		.column(actual)
		.ok_or_else(|| format_err!("column \"{}\" not found", actual))?;
	let predicted_column = dataframe
		.column(predicted)
		.ok_or_else(|| format_err!("column \"{}\" not found", predicted))?;
	match (actual_column, predicted_column) {
		(Column::Number(actual), Column::Number(predicted)) => Ok(actual
			.data
			.iter()
			.zip(predicted.data.iter())
			.map(|(actual, predicted)| {
				Prediction::Numeric(NumericPrediction::new(*actual, *predicted))
			})
			.collect()),
		(Column::Enum(actual), Column::Enum(predicted)) => nominal_predictions(actual, predicted),
		_ => Err(format_err!(
			"columns \"{}\" and \"{}\" must both be number columns or both be enum columns",
			actual,
			predicted
		)),
	}
}

fn nominal_predictions(actual: &EnumColumn, predicted: &EnumColumn) -> Result<Vec<Prediction>> {
	let mut classes: Vec<&str> = actual.options.iter().map(|option| option.as_str()).collect();
	for option in predicted.options.iter() {
		if !classes.contains(&option.as_str()) {
			classes.push(option);
		}
	}
	let class_index = |column: &EnumColumn, row: usize| -> Result<usize> {
		column
			.option(row)
			.and_then(|option| classes.iter().position(|class| *class == option))
			.ok_or_else(|| format_err!("row {} of column \"{}\" has no valid value", row, column.name))
	};
	(0..actual.data.len().min(predicted.data.len()))
		.map(|row| {
			Ok(Prediction::Nominal(NominalPrediction::new(
				class_index(actual, row)?,
				class_index(predicted, row)?,
			)))
		})
		.collect()
}

#[test]
fn test_numeric_predictions() {
	let csv = "actual,predicted\n1,1.5\n2,1\n";
	let dataframe = DataFrame::from_csv(
		&mut csv::Reader::from_reader(std::io::Cursor::new(csv)),
		Default::default(),
	)
	.unwrap();
	let predictions = from_dataframe(&dataframe, "actual", "predicted").unwrap();
	assert_eq!(
		predictions,
		vec![
			Prediction::Numeric(NumericPrediction::new(1.0, 1.5)),
			Prediction::Numeric(NumericPrediction::new(2.0, 1.0)),
		]
	);
}

#[test]
fn test_nominal_predictions() {
	let csv = "actual,predicted\ncat,cat\ndog,cat\ncat,bird\n";
	let dataframe = DataFrame::from_csv(
		&mut csv::Reader::from_reader(std::io::Cursor::new(csv)),
		Default::default(),
	)
	.unwrap();
	let predictions = from_dataframe(&dataframe, "actual", "predicted").unwrap();
	// Classes are [cat, dog] from the actual column, then bird.
	assert_eq!(
		predictions,
		vec![
			Prediction::Nominal(NominalPrediction::new(0, 0)),
			Prediction::Nominal(NominalPrediction::new(1, 0)),
			Prediction::Nominal(NominalPrediction::new(0, 2)),
		]
	);
}

#[test]
fn test_mismatched_columns() {
	let csv = "actual,predicted\ncat,1\ndog,2\n";
	let dataframe = DataFrame::from_csv(
		&mut csv::Reader::from_reader(std::io::Cursor::new(csv)),
		Default::default(),
	)
	.unwrap();
	assert!(from_dataframe(&dataframe, "actual", "predicted").is_err());
	assert!(from_dataframe(&dataframe, "actual", "missing").is_err());
}
