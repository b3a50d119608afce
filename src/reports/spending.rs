use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{
    analysis::{
        aggregate::{self, WeekdayAverage},
        filter::{AmountSign, LedgerFilter},
        round2,
    },
    ledger::{DateInput, TimeWindow, Transaction},
    reports::persist::{
        ReportSink, SPENDING_BY_CATEGORY_FILE, SPENDING_BY_WEEKDAY_FILE, SPENDING_BY_WORKDAY_FILE,
    },
};

/// One ledger row projected into the spending-by-category report shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingRecord {
    pub date: String,
    pub card: Option<String>,
    pub amount: f64,
    pub currency: String,
    pub category: String,
    pub description: String,
}

impl SpendingRecord {
    fn from_transaction(txn: &Transaction) -> Self {
        Self {
            date: txn.operation_date.format("%d.%m.%Y %H:%M:%S").to_string(),
            card: txn.card.clone(),
            amount: round2(txn.amount),
            currency: txn.currency.clone(),
            category: txn.category.clone(),
            description: txn.description.clone(),
        }
    }
}

fn rolling_expenses<'a>(
    rows: &'a [Transaction],
    date: &DateInput,
    now: NaiveDateTime,
) -> Vec<&'a Transaction> {
    let reference = date.resolve(now);
    LedgerFilter::new()
        .within(TimeWindow::rolling_quarter(reference))
        .sign(AmountSign::Expense)
        .apply(rows)
}

/// Expense rows in one category over the three months before `date`.
/// A non-empty result is also written to the report sink as JSON.
pub fn spending_by_category(
    rows: &[Transaction],
    category: &str,
    date: DateInput,
    now: NaiveDateTime,
    sink: &ReportSink,
) -> Vec<SpendingRecord> {
    tracing::info!(category, "computing spending by category");
    let reference = date.resolve(now);
    let matched = LedgerFilter::new()
        .within(TimeWindow::rolling_quarter(reference))
        .sign(AmountSign::Expense)
        .category(category)
        .apply(rows);
    let records: Vec<SpendingRecord> = matched
        .into_iter()
        .map(SpendingRecord::from_transaction)
        .collect();
    if !records.is_empty() {
        sink.persist(SPENDING_BY_CATEGORY_FILE, &records);
    }
    records
}

/// Average expense per weekday over the three months before `date`.
pub fn spending_by_weekday(
    rows: &[Transaction],
    date: DateInput,
    now: NaiveDateTime,
    sink: &ReportSink,
) -> Vec<WeekdayAverage> {
    tracing::info!("computing spending by weekday");
    let averages = aggregate::mean_by_weekday(&rolling_expenses(rows, &date, now));
    if !averages.is_empty() {
        sink.persist(SPENDING_BY_WEEKDAY_FILE, &averages);
    }
    averages
}

/// Average expense for working days versus days off over the three months
/// before `date`.
pub fn spending_by_workday(
    rows: &[Transaction],
    date: DateInput,
    now: NaiveDateTime,
    sink: &ReportSink,
) -> Vec<WeekdayAverage> {
    tracing::info!("computing spending by workday");
    let averages = aggregate::mean_by_workday(&rolling_expenses(rows, &date, now));
    if !averages.is_empty() {
        sink.persist(SPENDING_BY_WORKDAY_FILE, &averages);
    }
    averages
}
