use crate::ledger::{TimeWindow, Transaction};

/// Which side of the ledger a report looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountSign {
    Expense,
    Income,
}

/// Conjunction of row predicates applied to the ledger.
///
/// The home-currency and success-status checks are always part of the
/// conjunction; the remaining predicates are opt-in per report. Filtering
/// never mutates the input and an empty match is a result, not an error.
#[derive(Debug, Clone, Default)]
pub struct LedgerFilter {
    window: Option<TimeWindow>,
    sign: Option<AmountSign>,
    category: Option<String>,
    excluded_categories: Vec<String>,
    require_card: bool,
}

impl LedgerFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn within(mut self, window: TimeWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn sign(mut self, sign: AmountSign) -> Self {
        self.sign = Some(sign);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn exclude_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_categories
            .extend(categories.into_iter().map(Into::into));
        self
    }

    pub fn with_card_only(mut self) -> Self {
        self.require_card = true;
        self
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        if !txn.is_home_currency() || !txn.is_settled() {
            return false;
        }
        if let Some(window) = &self.window {
            if !window.contains(txn.operation_date) {
                return false;
            }
        }
        match self.sign {
            Some(AmountSign::Expense) if !txn.is_expense() => return false,
            Some(AmountSign::Income) if !txn.is_income() => return false,
            _ => {}
        }
        if let Some(category) = &self.category {
            if txn.category != *category {
                return false;
            }
        }
        if self.excluded_categories.iter().any(|c| txn.category == *c) {
            return false;
        }
        if self.require_card && txn.card.is_none() {
            return false;
        }
        true
    }

    /// Applies the conjunction, preserving ledger order.
    pub fn apply<'a>(&self, rows: &'a [Transaction]) -> Vec<&'a Transaction> {
        if rows.is_empty() {
            tracing::info!("filter received an empty ledger");
            return Vec::new();
        }
        let matched: Vec<&Transaction> = rows.iter().filter(|txn| self.matches(txn)).collect();
        if matched.is_empty() {
            tracing::warn!("filter produced no rows from a non-empty ledger");
        } else {
            tracing::debug!(matched = matched.len(), "filter applied");
        }
        matched
    }
}
