use models::{AnnotatedDayEntry, RawDayEntry, WeeklyExpenses, WeeklyExpensesPayload};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnnotateError {
    /// There is no maximum over zero entries, so no annotation can be produced.
    #[error("cannot annotate an empty expenses sequence")]
    EmptyInput,
}

pub type Result<T> = std::result::Result<T, AnnotateError>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub annotated: Vec<AnnotatedDayEntry>,
    pub max: f64,
}

/// Flags every entry whose amount equals the sequence maximum.
///
/// Comparison is exact floating-point equality, so ties are all flagged and
/// values that differ only by rounding noise are not.
pub fn annotate(entries: &[RawDayEntry]) -> Result<Annotation> {
    let max = entries
        .iter()
        .map(|e| e.amount)
        .reduce(f64::max)
        .ok_or(AnnotateError::EmptyInput)?;

    let annotated = entries
        .iter()
        .map(|e| AnnotatedDayEntry {
            day: e.day.clone(),
            amount: e.amount,
            is_max_amount: e.amount == max,
        })
        .collect();

    Ok(Annotation { annotated, max })
}

/// Annotates the payload entries and passes the summary scalars through.
pub fn compose(payload: &WeeklyExpensesPayload) -> Result<WeeklyExpenses> {
    let Annotation { annotated, max } = annotate(&payload.entries)?;
    Ok(WeeklyExpenses {
        expenses_data: annotated,
        max_amount: max,
        balance: payload.balance,
        month_total: payload.month_total,
        month_change: payload.month_change,
    })
}
