use bankscope::ledger::{Transaction, HOME_CURRENCY, SUCCESS_STATUS};
use chrono::{NaiveDate, NaiveDateTime};

pub fn instant(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

pub fn txn(
    operation_date: NaiveDateTime,
    card: Option<&str>,
    amount: f64,
    category: &str,
    description: &str,
) -> Transaction {
    Transaction {
        operation_date,
        card: card.map(str::to_string),
        amount,
        currency: HOME_CURRENCY.to_string(),
        status: SUCCESS_STATUS.to_string(),
        category: category.to_string(),
        description: description.to_string(),
    }
}
