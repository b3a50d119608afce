use serde_json::{Map, Value};

use crate::{
    analysis::{
        aggregate::{self, OVERFLOW_CATEGORY, TRANSFER_CATEGORIES},
        filter::{AmountSign, LedgerFilter},
    },
    ledger::{TimeWindow, Transaction},
    reports::persist::{ReportSink, PROFITABLE_CATEGORIES_FILE},
};

/// Ranks categories by spend inside one calendar month and converts the
/// totals into potential cashback units (spend / 100).
///
/// The mapping keeps its descending order when serialized. An empty ledger,
/// a month outside `1..=12`, or a filter that matches nothing all yield the
/// empty mapping; nothing is ever raised for data-shape problems.
pub fn profitable_categories(
    rows: &[Transaction],
    year: i32,
    month: u32,
    sink: &ReportSink,
) -> Map<String, Value> {
    tracing::info!(year, month, "computing profitable cashback categories");
    if rows.is_empty() {
        tracing::warn!("ledger is empty, returning empty mapping");
        return Map::new();
    }
    let Some(window) = TimeWindow::calendar_month(year, month) else {
        tracing::warn!(month, "month out of range, returning empty mapping");
        return Map::new();
    };

    let matched = LedgerFilter::new()
        .within(window)
        .sign(AmountSign::Expense)
        .exclude_categories(TRANSFER_CATEGORIES)
        .exclude_categories([OVERFLOW_CATEGORY])
        .apply(rows);
    if matched.is_empty() {
        return Map::new();
    }

    let mut mapping = Map::new();
    for total in aggregate::cashback_by_category(&matched) {
        mapping.insert(total.category, Value::from(total.amount));
    }
    sink.persist(PROFITABLE_CATEGORIES_FILE, &mapping);
    mapping
}
