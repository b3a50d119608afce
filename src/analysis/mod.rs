pub mod aggregate;
pub mod filter;

pub use aggregate::{
    round2, CardSummary, CategoryTotal, ExpensesBreakdown, IncomeBreakdown, TopTransaction,
    WeekdayAverage,
};
pub use filter::{AmountSign, LedgerFilter};
