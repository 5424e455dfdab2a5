/*!
This crate provides a basic implementation of dataframes, which are two dimensional arrays of data where each column has a name and can have a different data type, like a spreadsheet. The plotting crate uses dataframes to hold threshold curves produced by an evaluation backend and predictions loaded from csv files.
*/

use std::num::NonZeroUsize;

pub mod load;

pub use self::load::*;

#[derive(Debug, Clone, PartialEq)]
pub struct DataFrame {
	pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
	Unknown(UnknownColumn),
	Number(NumberColumn),
	Enum(EnumColumn),
	Text(TextColumn),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnknownColumn {
	pub name: String,
	pub len: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberColumn {
	pub name: String,
	pub data: Vec<f64>,
}

/// The values of an enum column are 1-based indexes into `options`. `None` marks an invalid value.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumColumn {
	pub name: String,
	pub options: Vec<String>,
	pub data: Vec<Option<NonZeroUsize>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextColumn {
	pub name: String,
	pub data: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnType {
	Unknown,
	Number,
	Enum { options: Vec<String> },
	Text,
}

impl DataFrame {
	pub fn new(column_names: Vec<String>, column_types: Vec<ColumnType>) -> Self {
		let columns = column_names
			.into_iter()
			.zip(column_types.into_iter())
			.map(|(column_name, column_type)| match column_type {
				ColumnType::Unknown => Column::Unknown(UnknownColumn::new(column_name)),
				ColumnType::Number => Column::Number(NumberColumn::new(column_name)),
				ColumnType::Enum { options } => Column::Enum(EnumColumn::new(column_name, options)),
				ColumnType::Text => Column::Text(TextColumn::new(column_name)),
			})
			.collect();
		Self { columns }
	}

	pub fn ncols(&self) -> usize {
		self.columns.len()
	}

	pub fn nrows(&self) -> usize {
		self.columns.first().map(|column| column.len()).unwrap_or(0)
	}

	pub fn column_names(&self) -> impl Iterator<Item = &str> {
		self.columns.iter().map(|column| column.name())
	}

	/// Return the index of the first column named `name`.
	pub fn column_index(&self, name: &str) -> Option<usize> {
		self.columns.iter().position(|column| column.name() == name)
	}

	pub fn column(&self, name: &str) -> Option<&Column> {
		self.column_index(name).map(|index| &self.columns[index])
	}
}

impl Column {
	pub fn len(&self) -> usize {
		match self {
			Self::Unknown(s) => s.len,
			Self::Number(s) => s.data.len(),
			Self::Enum(s) => s.data.len(),
			Self::Text(s) => s.data.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn name(&self) -> &str {
		match self {
			Self::Unknown(s) => s.name.as_str(),
			Self::Number(s) => s.name.as_str(),
			Self::Enum(s) => s.name.as_str(),
			Self::Text(s) => s.name.as_str(),
		}
	}

	pub fn as_number(&self) -> Option<&NumberColumn> {
		match self {
			Self::Number(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_enum(&self) -> Option<&EnumColumn> {
		match self {
			Self::Enum(s) => Some(s),
			_ => None,
		}
	}
}

impl UnknownColumn {
	pub fn new(name: String) -> Self {
		Self { name, len: 0 }
	}
}

impl NumberColumn {
	pub fn new(name: String) -> Self {
		Self {
			name,
			data: Vec::new(),
		}
	}

	pub fn with_data(name: impl Into<String>, data: Vec<f64>) -> Self {
		Self {
			name: name.into(),
			data,
		}
	}
}

impl EnumColumn {
	pub fn new(name: String, options: Vec<String>) -> Self {
		Self {
			name,
			options,
			data: Vec::new(),
		}
	}

	/// Return the option for the value at `index`, if it is valid.
	pub fn option(&self, index: usize) -> Option<&str> {
		self.data
			.get(index)
			.copied()
			.flatten()
			.and_then(|value| self.options.get(value.get() - 1))
			.map(|option| option.as_str())
	}
}

impl TextColumn {
	pub fn new(name: String) -> Self {
		Self {
			name,
			data: Vec::new(),
		}
	}
}

#[test]
fn test_column_lookup() {
	let df = DataFrame {
		columns: vec![
			Column::Number(NumberColumn::with_data("Recall", vec![0.1, 0.5, 1.0])),
			Column::Number(NumberColumn::with_data("Precision", vec![0.9, 0.6, 0.2])),
		],
	};
	assert_eq!(df.ncols(), 2);
	assert_eq!(df.nrows(), 3);
	assert_eq!(df.column_index("Precision"), Some(1));
	assert_eq!(df.column_index("Lift"), None);
	assert_eq!(
		df.column("Precision").and_then(|column| column.as_number()),
		Some(&NumberColumn::with_data("Precision", vec![0.9, 0.6, 0.2]))
	);
	assert!(df.column("Recall").unwrap().as_enum().is_none());
	assert_eq!(
		df.column_names().collect::<Vec<_>>(),
		vec!["Recall", "Precision"]
	);
}

#[test]
fn test_enum_option() {
	let column = EnumColumn {
		name: "class".to_owned(),
		options: vec!["no".to_owned(), "yes".to_owned()],
		data: vec![NonZeroUsize::new(2), None, NonZeroUsize::new(1)],
	};
	assert_eq!(column.option(0), Some("yes"));
	assert_eq!(column.option(1), None);
	assert_eq!(column.option(2), Some("no"));
	assert_eq!(column.option(3), None);
}
