mod common;

use std::cell::{Cell, RefCell};

use bankscope::{
    ledger::{DateInput, Period},
    market::{CurrencyRate, MarketValue, QuoteProvider, RateProvider, StockPrice, NO_DATA},
    pages::{dashboard_page, events_page, AFTERNOON_GREETING, MORNING_GREETING},
    settings::UserSettings,
};
use common::{instant, txn};
use serde_json::json;

#[derive(Default)]
struct StubRates {
    calls: Cell<usize>,
    requested: RefCell<Vec<String>>,
}

impl RateProvider for StubRates {
    fn exchange_rates(&self, _base: &str, currencies: &[String]) -> Vec<CurrencyRate> {
        self.calls.set(self.calls.get() + 1);
        self.requested.borrow_mut().extend(currencies.to_vec());
        currencies
            .iter()
            .map(|currency| CurrencyRate {
                currency: currency.clone(),
                rate: MarketValue::Amount(73.21),
            })
            .collect()
    }
}

#[derive(Default)]
struct StubQuotes {
    calls: Cell<usize>,
}

impl QuoteProvider for StubQuotes {
    fn stock_prices(&self, symbols: &[String]) -> Vec<StockPrice> {
        self.calls.set(self.calls.get() + 1);
        symbols
            .iter()
            .map(|symbol| StockPrice {
                stock: symbol.clone(),
                price: MarketValue::Amount(150.12),
            })
            .collect()
    }
}

fn watchlist_settings() -> UserSettings {
    UserSettings {
        user_currencies: Some(vec!["USD".into(), "EUR".into()]),
        user_stocks: Some(vec!["AAPL".into()]),
    }
}

#[test]
fn dashboard_assembles_cards_top_and_market_data() {
    let rows = vec![
        txn(
            instant(2021, 12, 10, 10, 0, 0),
            Some("*1234"),
            -200.0,
            "Супермаркеты",
            "store",
        ),
        txn(
            instant(2021, 12, 12, 10, 0, 0),
            None,
            5000.0,
            "Зарплата",
            "salary",
        ),
        // November: outside the month window.
        txn(
            instant(2021, 11, 30, 10, 0, 0),
            Some("*1234"),
            -900.0,
            "Супермаркеты",
            "old",
        ),
    ];
    let rates = StubRates::default();
    let quotes = StubQuotes::default();
    let page = dashboard_page(
        &rows,
        DateInput::from("2021-12-31 09:42:13"),
        instant(2024, 1, 1, 0, 0, 0),
        &watchlist_settings(),
        &rates,
        &quotes,
    );

    assert_eq!(page.greeting, MORNING_GREETING);
    assert_eq!(page.cards.len(), 1);
    assert_eq!(page.cards[0].last_digits, "1234");
    assert_eq!(page.cards[0].total_spent, 200.0);
    assert_eq!(page.cards[0].cashback, 2.0);

    // Top transactions keep both signs, largest magnitude first.
    assert_eq!(page.top_transactions.len(), 2);
    assert_eq!(page.top_transactions[0].amount, 5000.0);
    assert_eq!(page.top_transactions[1].amount, -200.0);

    assert_eq!(page.currency_rates.len(), 2);
    assert_eq!(page.stock_prices.len(), 1);
    assert_eq!(page.stock_prices[0].stock, "AAPL");
}

#[test]
fn dashboard_on_empty_ledger_still_fetches_market_data() {
    let rates = StubRates::default();
    let quotes = StubQuotes::default();
    let page = dashboard_page(
        &[],
        DateInput::from("2021-12-31 13:00:00"),
        instant(2024, 1, 1, 0, 0, 0),
        &watchlist_settings(),
        &rates,
        &quotes,
    );

    assert_eq!(page.greeting, AFTERNOON_GREETING);
    assert!(page.cards.is_empty());
    assert!(page.top_transactions.is_empty());
    assert_eq!(rates.calls.get(), 1);
    assert_eq!(quotes.calls.get(), 1);
}

#[test]
fn missing_settings_fall_back_to_default_lists() {
    let rates = StubRates::default();
    let quotes = StubQuotes::default();
    let page = dashboard_page(
        &[],
        DateInput::from("2021-12-31 13:00:00"),
        instant(2024, 1, 1, 0, 0, 0),
        &UserSettings::default(),
        &rates,
        &quotes,
    );

    assert_eq!(*rates.requested.borrow(), vec!["USD", "EUR"]);
    // No symbols configured: the provider is never called, the sentinel
    // single-entry list stands in.
    assert_eq!(quotes.calls.get(), 0);
    assert_eq!(page.stock_prices.len(), 1);
    assert_eq!(page.stock_prices[0].stock, NO_DATA);
    assert!(page.stock_prices[0].price.is_missing());
}

#[test]
fn events_page_builds_expense_and_income_sections() {
    let rows = vec![
        txn(instant(2021, 12, 5, 10, 0, 0), None, -300.0, "Супермаркеты", "store"),
        txn(instant(2021, 12, 6, 10, 0, 0), None, -100.0, "Переводы-детям", "gift"),
        txn(instant(2021, 12, 7, 10, 0, 0), None, -50.0, "Transfers", "transfer"),
        txn(instant(2021, 12, 8, 10, 0, 0), None, 7000.0, "Зарплата", "salary"),
    ];
    let rates = StubRates::default();
    let quotes = StubQuotes::default();
    let page = events_page(
        &rows,
        DateInput::from("2021-12-31 12:00:00"),
        Period::Month,
        instant(2024, 1, 1, 0, 0, 0),
        &watchlist_settings(),
        &rates,
        &quotes,
    );

    assert_eq!(page.expenses["total_amount"], json!(450.0));
    let main = page.expenses["main"].as_array().expect("main buckets");
    assert_eq!(main.len(), 2);
    assert_eq!(main[0]["category"], json!("Супермаркеты"));
    let transfers = page.expenses["transfers_and_cash"]
        .as_array()
        .expect("transfers bucket");
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0]["category"], json!("Transfers"));

    assert_eq!(page.income["total_amount"], json!(7000.0));
    assert_eq!(page.income["main"][0]["category"], json!("Зарплата"));
}

#[test]
fn events_page_degrades_to_empty_objects() {
    let rates = StubRates::default();
    let quotes = StubQuotes::default();
    // Full-history period over an empty ledger: the window cannot resolve.
    let page = events_page(
        &[],
        DateInput::from("2021-12-31 12:00:00"),
        Period::All,
        instant(2024, 1, 1, 0, 0, 0),
        &watchlist_settings(),
        &rates,
        &quotes,
    );

    assert_eq!(page.expenses, json!({}));
    assert_eq!(page.income, json!({}));
    assert_eq!(rates.calls.get(), 1);
    assert_eq!(quotes.calls.get(), 1);
}

#[test]
fn events_full_history_spans_the_whole_ledger() {
    let rows = vec![
        txn(instant(2018, 1, 1, 0, 0, 0), None, -10.0, "Еда", "ancient"),
        txn(instant(2021, 12, 5, 10, 0, 0), None, -20.0, "Еда", "recent"),
    ];
    let rates = StubRates::default();
    let quotes = StubQuotes::default();
    let page = events_page(
        &rows,
        DateInput::from("2021-12-31 12:00:00"),
        Period::All,
        instant(2024, 1, 1, 0, 0, 0),
        &watchlist_settings(),
        &rates,
        &quotes,
    );

    assert_eq!(page.expenses["total_amount"], json!(30.0));
}
