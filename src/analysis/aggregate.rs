use std::collections::HashMap;

use chrono::Datelike;
use serde::Serialize;

use crate::ledger::Transaction;

/// Fixed ISO-weekday labels, Monday first.
pub const WEEKDAY_LABELS: [&str; 7] = [
    "1. ПН", "2. ВТ", "3. СР", "4. ЧТ", "5. ПТ", "6. СБ", "7. ВС",
];

pub const WORKING_LABEL: &str = "Working";
pub const DAY_OFF_LABEL: &str = "Day off";

/// Synthetic category folding everything past the per-page category limit.
pub const OVERFLOW_CATEGORY: &str = "Other";

/// Categories reported separately from the main expense buckets and never
/// folded into the overflow bucket.
pub const TRANSFER_CATEGORIES: [&str; 2] = ["Transfers", "Cash"];

pub const TOP_TRANSACTION_COUNT: usize = 5;
pub const MAIN_CATEGORY_LIMIT: usize = 7;

/// Currency-unit rounding used by every aggregate output.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardSummary {
    pub last_digits: String,
    pub total_spent: f64,
    pub cashback: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopTransaction {
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayAverage {
    pub weekday: String,
    pub average_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpensesBreakdown {
    pub total_amount: f64,
    pub main: Vec<CategoryTotal>,
    pub transfers_and_cash: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeBreakdown {
    pub total_amount: f64,
    pub main: Vec<CategoryTotal>,
}

/// Signed per-category sums in first-seen ledger order. The stable sorts
/// applied on top keep that order for equal magnitudes.
fn category_sums(rows: &[&Transaction]) -> Vec<(String, f64)> {
    let mut order: Vec<(String, f64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for txn in rows {
        match index.get(&txn.category) {
            Some(&slot) => order[slot].1 += txn.amount,
            None => {
                index.insert(txn.category.clone(), order.len());
                order.push((txn.category.clone(), txn.amount));
            }
        }
    }
    order
}

/// Per-category expense magnitudes, descending, 2-decimal rounded.
pub fn sum_by_category(rows: &[&Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = category_sums(rows)
        .into_iter()
        .map(|(category, sum)| CategoryTotal {
            category,
            amount: round2(sum.abs()),
        })
        .collect();
    totals.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    totals
}

/// Per-category income sums, sign preserved, descending.
pub fn income_by_category(rows: &[&Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = category_sums(rows)
        .into_iter()
        .map(|(category, sum)| CategoryTotal {
            category,
            amount: round2(sum),
        })
        .collect();
    totals.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    totals
}

/// Potential cashback per category: expense magnitude divided by 100.
pub fn cashback_by_category(rows: &[&Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = category_sums(rows)
        .into_iter()
        .map(|(category, sum)| CategoryTotal {
            category,
            amount: round2(sum.abs() / 100.0),
        })
        .collect();
    totals.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    totals
}

/// Spend and cashback per card, masking prefix stripped, ordered by card id.
pub fn sum_by_card(rows: &[&Transaction]) -> Vec<CardSummary> {
    let mut order: Vec<(String, f64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for txn in rows {
        let Some(digits) = txn.card_digits() else {
            continue;
        };
        match index.get(digits) {
            Some(&slot) => order[slot].1 += txn.amount,
            None => {
                index.insert(digits.to_string(), order.len());
                order.push((digits.to_string(), txn.amount));
            }
        }
    }
    order.sort_by(|a, b| a.0.cmp(&b.0));
    order
        .into_iter()
        .map(|(last_digits, sum)| {
            let total_spent = round2(sum.abs());
            CardSummary {
                last_digits,
                total_spent,
                cashback: round2(total_spent / 100.0),
            }
        })
        .collect()
}

/// The `n` largest operations by payment magnitude, sign preserved.
pub fn top_by_magnitude(rows: &[&Transaction], n: usize) -> Vec<TopTransaction> {
    let mut sorted: Vec<&&Transaction> = rows.iter().collect();
    sorted.sort_by(|a, b| b.amount.abs().total_cmp(&a.amount.abs()));
    sorted
        .into_iter()
        .take(n)
        .map(|txn| TopTransaction {
            date: txn.operation_date.format("%d.%m.%Y").to_string(),
            amount: round2(txn.amount),
            category: txn.category.clone(),
            description: txn.description.clone(),
        })
        .collect()
}

/// Average expense magnitude per ISO weekday. Weekdays with no rows are
/// absent, never zero-filled; at most seven groups come back.
pub fn mean_by_weekday(rows: &[&Transaction]) -> Vec<WeekdayAverage> {
    mean_by_labels(rows, |txn| {
        WEEKDAY_LABELS[txn.operation_date.weekday().num_days_from_monday() as usize]
    })
}

/// Average expense magnitude for working days versus days off.
pub fn mean_by_workday(rows: &[&Transaction]) -> Vec<WeekdayAverage> {
    mean_by_labels(rows, |txn| {
        if txn.operation_date.weekday().num_days_from_monday() < 5 {
            WORKING_LABEL
        } else {
            DAY_OFF_LABEL
        }
    })
}

fn mean_by_labels(
    rows: &[&Transaction],
    label_of: impl Fn(&Transaction) -> &'static str,
) -> Vec<WeekdayAverage> {
    let mut sums: HashMap<&'static str, (f64, usize)> = HashMap::new();
    for txn in rows {
        let entry = sums.entry(label_of(txn)).or_insert((0.0, 0));
        entry.0 += txn.amount;
        entry.1 += 1;
    }
    let mut averages: Vec<WeekdayAverage> = sums
        .into_iter()
        .map(|(label, (sum, count))| WeekdayAverage {
            weekday: label.to_string(),
            average_amount: round2((sum / count as f64).abs()),
        })
        .collect();
    averages.sort_by(|a, b| a.weekday.cmp(&b.weekday));
    averages
}

/// Expense totals with the top-7-plus-overflow collapsing used by the events
/// page. Transfers and cash withdrawals are reported under their own key and
/// never folded into the overflow bucket.
pub fn expenses_breakdown(rows: &[&Transaction]) -> Option<ExpensesBreakdown> {
    if rows.is_empty() {
        return None;
    }
    let total_amount = round2(rows.iter().map(|txn| txn.amount).sum::<f64>().abs());
    let totals = sum_by_category(rows);

    let (transfers_and_cash, ranked): (Vec<CategoryTotal>, Vec<CategoryTotal>) = totals
        .into_iter()
        .partition(|total| TRANSFER_CATEGORIES.contains(&total.category.as_str()));

    let main = if ranked.len() > MAIN_CATEGORY_LIMIT {
        let mut main: Vec<CategoryTotal> = ranked[..MAIN_CATEGORY_LIMIT].to_vec();
        let folded = round2(
            ranked[MAIN_CATEGORY_LIMIT..]
                .iter()
                .map(|total| total.amount)
                .sum(),
        );
        main.push(CategoryTotal {
            category: OVERFLOW_CATEGORY.to_string(),
            amount: folded,
        });
        main
    } else {
        ranked
    };

    Some(ExpensesBreakdown {
        total_amount,
        main,
        transfers_and_cash,
    })
}

/// Income totals by category, no overflow collapsing.
pub fn income_breakdown(rows: &[&Transaction]) -> Option<IncomeBreakdown> {
    if rows.is_empty() {
        return None;
    }
    Some(IncomeBreakdown {
        total_amount: round2(rows.iter().map(|txn| txn.amount).sum()),
        main: income_by_category(rows),
    })
}
