pub mod client;
pub mod error;
pub mod source;

pub use client::{fetch_weekly_expenses, get_weekly_expenses, WeeklyExpensesClient};
pub use error::{Result, SourceError};
pub use source::{fallback_payload, ExpensesSource, LocalFallback, LocalFileSource, RemoteSource};
