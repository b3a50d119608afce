use std::path::Path;

use chrono::NaiveDateTime;
use serde::Deserialize;

use super::transaction::Transaction;

/// Date layout used by the bank's spreadsheet export (day first).
const EXPORT_DATE_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Raw CSV row with the export's original column headers.
#[derive(Debug, Deserialize)]
struct RawOperation {
    #[serde(rename = "Дата операции")]
    operation_date: String,
    #[serde(rename = "Номер карты")]
    card: Option<String>,
    #[serde(rename = "Сумма платежа")]
    amount: f64,
    #[serde(rename = "Валюта платежа")]
    currency: String,
    #[serde(rename = "Статус")]
    status: String,
    #[serde(rename = "Категория")]
    category: Option<String>,
    #[serde(rename = "Описание")]
    description: Option<String>,
}

impl RawOperation {
    fn into_transaction(self) -> Option<Transaction> {
        let operation_date =
            NaiveDateTime::parse_from_str(self.operation_date.trim(), EXPORT_DATE_FORMAT).ok()?;
        Some(Transaction {
            operation_date,
            card: self.card.filter(|card| !card.trim().is_empty()),
            amount: self.amount,
            currency: self.currency,
            status: self.status,
            category: self.category.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
        })
    }
}

/// Reads the ledger export into typed transactions.
///
/// A missing or unreadable file yields an empty ledger rather than an error;
/// every consuming report then degrades to its documented empty result.
/// Rows that fail date or amount coercion are skipped with a warning.
pub fn load_operations(path: &Path) -> Vec<Transaction> {
    tracing::info!(file = %path.display(), "loading ledger operations");
    let mut reader = match csv::Reader::from_path(path) {
        Ok(reader) => reader,
        Err(err) => {
            tracing::error!(file = %path.display(), %err, "ledger file unavailable, using empty ledger");
            return Vec::new();
        }
    };

    let mut operations = Vec::new();
    for record in reader.deserialize::<RawOperation>() {
        match record {
            Ok(raw) => match raw.into_transaction() {
                Some(txn) => operations.push(txn),
                None => tracing::warn!("skipping row with unparseable operation date"),
            },
            Err(err) => tracing::warn!(%err, "skipping malformed ledger row"),
        }
    }
    tracing::info!(rows = operations.len(), "ledger loaded");
    operations
}
