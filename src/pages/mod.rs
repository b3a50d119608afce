use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;
use serde_json::Value;

use crate::{
    analysis::{
        aggregate::{self, TOP_TRANSACTION_COUNT},
        filter::{AmountSign, LedgerFilter},
        CardSummary, TopTransaction,
    },
    ledger::{DateInput, Period, TimeWindow, Transaction, HOME_CURRENCY},
    market::{self, CurrencyRate, QuoteProvider, RateProvider, StockPrice},
    settings::UserSettings,
};

pub const MORNING_GREETING: &str = "Good morning";
pub const AFTERNOON_GREETING: &str = "Good afternoon";
pub const EVENING_GREETING: &str = "Good evening";
pub const NIGHT_GREETING: &str = "Good night";

/// Picks the greeting for the dashboard from the hour of day.
pub fn greeting(instant: NaiveDateTime) -> &'static str {
    match instant.hour() {
        5..=11 => MORNING_GREETING,
        12..=17 => AFTERNOON_GREETING,
        18..=22 => EVENING_GREETING,
        _ => NIGHT_GREETING,
    }
}

/// Payload backing the bank's main page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardPage {
    pub greeting: String,
    pub cards: Vec<CardSummary>,
    pub top_transactions: Vec<TopTransaction>,
    pub currency_rates: Vec<CurrencyRate>,
    pub stock_prices: Vec<StockPrice>,
}

/// Payload backing the "Events" page. The expense and income sections are
/// plain JSON values so an empty computation shows up as `{}` exactly as the
/// page contract documents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventsPage {
    pub expenses: Value,
    pub income: Value,
    pub currency_rates: Vec<CurrencyRate>,
    pub stock_prices: Vec<StockPrice>,
}

/// Assembles the dashboard: greeting, per-card spend for the reference
/// month, the top spending operations, and the market watchlists. Market
/// data is fetched even when the ledger is empty.
pub fn dashboard_page(
    rows: &[Transaction],
    date: DateInput,
    now: NaiveDateTime,
    settings: &UserSettings,
    rates: &dyn RateProvider,
    quotes: &dyn QuoteProvider,
) -> DashboardPage {
    tracing::info!("assembling dashboard page");
    let reference = date.resolve(now);
    let window = TimeWindow::month(reference);

    let (cards, top_transactions) = if rows.is_empty() {
        (Vec::new(), Vec::new())
    } else {
        let card_expenses = LedgerFilter::new()
            .within(window)
            .sign(AmountSign::Expense)
            .with_card_only()
            .apply(rows);
        let windowed = LedgerFilter::new().within(window).apply(rows);
        (
            aggregate::sum_by_card(&card_expenses),
            aggregate::top_by_magnitude(&windowed, TOP_TRANSACTION_COUNT),
        )
    };

    let (currency_rates, stock_prices) = market_watchlists(settings, rates, quotes);
    DashboardPage {
        greeting: greeting(reference).to_string(),
        cards,
        top_transactions,
        currency_rates,
        stock_prices,
    }
}

/// Assembles the events page for a selectable period (week, month, year, or
/// the full ledger history).
pub fn events_page(
    rows: &[Transaction],
    date: DateInput,
    period: Period,
    now: NaiveDateTime,
    settings: &UserSettings,
    rates: &dyn RateProvider,
    quotes: &dyn QuoteProvider,
) -> EventsPage {
    tracing::info!(?period, "assembling events page");
    let reference = date.resolve(now);

    let (expenses, income) = match TimeWindow::resolve(period, reference, rows) {
        Some(window) => {
            let expense_rows = LedgerFilter::new()
                .within(window)
                .sign(AmountSign::Expense)
                .apply(rows);
            let income_rows = LedgerFilter::new()
                .within(window)
                .sign(AmountSign::Income)
                .apply(rows);
            (
                section_value(aggregate::expenses_breakdown(&expense_rows)),
                section_value(aggregate::income_breakdown(&income_rows)),
            )
        }
        None => (empty_section(), empty_section()),
    };

    let (currency_rates, stock_prices) = market_watchlists(settings, rates, quotes);
    EventsPage {
        expenses,
        income,
        currency_rates,
        stock_prices,
    }
}

fn market_watchlists(
    settings: &UserSettings,
    rates: &dyn RateProvider,
    quotes: &dyn QuoteProvider,
) -> (Vec<CurrencyRate>, Vec<StockPrice>) {
    let currencies = market::currencies_or_default(settings.user_currencies.as_deref());
    let currency_rates = rates.exchange_rates(HOME_CURRENCY, &currencies);
    let stock_prices = match settings.user_stocks.as_deref() {
        Some(symbols) if !symbols.is_empty() => quotes.stock_prices(symbols),
        _ => {
            tracing::warn!("no stock symbols configured, reporting sentinel entry");
            market::sentinel_stocks()
        }
    };
    (currency_rates, stock_prices)
}

fn section_value<T: Serialize>(section: Option<T>) -> Value {
    section
        .and_then(|payload| serde_json::to_value(payload).ok())
        .unwrap_or_else(empty_section)
}

fn empty_section() -> Value {
    Value::Object(serde_json::Map::new())
}
