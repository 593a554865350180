use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

// Settings models
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpensesSettings {
	/// Remote flow address. `None` means offline mode.
	#[serde(default, alias = "flowUrl", alias = "flow-url")]
	pub flow_url: Option<String>,
	/// Optional JSON file tried before the built-in payload.
	#[serde(default, alias = "localDataPath", alias = "local-data")]
	pub local_data_path: Option<PathBuf>,
}

// Raw input entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDayEntry {
	pub day: String,
	pub amount: f64,
}

impl RawDayEntry {
	pub fn new(day: impl Into<String>, amount: f64) -> Self {
		Self { day: day.into(), amount }
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyExpensesPayload {
	#[serde(alias = "data")]
	pub entries: Vec<RawDayEntry>,
	pub balance: f64,
	pub month_total: f64,
	pub month_change: f64,
}

// Output models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedDayEntry {
	pub day: String,
	pub amount: f64,
	pub is_max_amount: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyExpenses {
	pub expenses_data: Vec<AnnotatedDayEntry>,
	pub max_amount: f64,
	pub balance: f64,
	pub month_total: f64,
	pub month_change: f64,
}

/// Which tier of the retrieval chain produced a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadOrigin {
	Remote,
	LocalFile,
	Fallback,
}

impl PayloadOrigin {
	pub fn as_str(&self) -> &'static str {
		match self {
			PayloadOrigin::Remote => "remote",
			PayloadOrigin::LocalFile => "local_file",
			PayloadOrigin::Fallback => "fallback",
		}
	}
}

impl fmt::Display for PayloadOrigin {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
