use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Status literal a row must carry to be counted by any report.
pub const SUCCESS_STATUS: &str = "OK";

/// The single payment currency the reports operate on.
pub const HOME_CURRENCY: &str = "RUB";

/// One row of the account ledger.
///
/// The amount sign is the sole income/expense discriminator: negative rows
/// are expenses, positive rows are income. No separate type field exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub operation_date: NaiveDateTime,
    pub card: Option<String>,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    pub category: String,
    pub description: String,
}

impl Transaction {
    pub fn is_settled(&self) -> bool {
        self.status == SUCCESS_STATUS
    }

    pub fn is_home_currency(&self) -> bool {
        self.currency == HOME_CURRENCY
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    /// Card identifiers carry a one-character masking prefix (e.g. `*1234`);
    /// this returns the digits with that prefix stripped.
    pub fn card_digits(&self) -> Option<&str> {
        self.card.as_deref().map(|card| {
            let mut chars = card.chars();
            chars.next();
            chars.as_str()
        })
    }
}
