/// A single model output paired with its ground truth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Prediction {
	Numeric(NumericPrediction),
	Nominal(NominalPrediction),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PredictionKind {
	Numeric,
	Nominal,
}

/// A prediction of a regressor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumericPrediction {
	pub actual: f64,
	pub predicted: f64,
}

/// A prediction of a classifier. `actual` and `predicted` are class indexes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NominalPrediction {
	pub actual: f64,
	pub predicted: f64,
}

impl Prediction {
	pub fn actual(&self) -> f64 {
		match self {
			Prediction::Numeric(prediction) => prediction.actual,
			Prediction::Nominal(prediction) => prediction.actual,
		}
	}

	pub fn predicted(&self) -> f64 {
		match self {
			Prediction::Numeric(prediction) => prediction.predicted,
			Prediction::Nominal(prediction) => prediction.predicted,
		}
	}

	/// The signed residual, for numeric predictions only.
	pub fn error(&self) -> Option<f64> {
		match self {
			Prediction::Numeric(prediction) => Some(prediction.error()),
			Prediction::Nominal(_) => None,
		}
	}

	pub fn kind(&self) -> PredictionKind {
		match self {
			Prediction::Numeric(_) => PredictionKind::Numeric,
			Prediction::Nominal(_) => PredictionKind::Nominal,
		}
	}
}

impl NumericPrediction {
	pub fn new(actual: f64, predicted: f64) -> Self {
		Self { actual, predicted }
	}

	pub fn error(&self) -> f64 {
		self.predicted - self.actual
	}
}

impl NominalPrediction {
	pub fn new(actual: usize, predicted: usize) -> Self {
		Self {
			actual: actual as f64,
			predicted: predicted as f64,
		}
	}

	#[allow(clippy::float_cmp)]
	pub fn is_misclassified(&self) -> bool {
		self.actual != self.predicted
	}
}

impl From<NumericPrediction> for Prediction {
	fn from(value: NumericPrediction) -> Self {
		Prediction::Numeric(value)
	}
}

impl From<NominalPrediction> for Prediction {
	fn from(value: NominalPrediction) -> Self {
		Prediction::Nominal(value)
	}
}

#[test]
fn test_accessors() {
	let numeric = Prediction::from(NumericPrediction::new(3.0, 2.5));
	assert_eq!(numeric.kind(), PredictionKind::Numeric);
	assert_eq!(numeric.error(), Some(-0.5));
	let nominal = Prediction::from(NominalPrediction::new(1, 0));
	assert_eq!(nominal.kind(), PredictionKind::Nominal);
	assert_eq!(nominal.actual(), 1.0);
	assert_eq!(nominal.predicted(), 0.0);
	assert_eq!(nominal.error(), None);
}
