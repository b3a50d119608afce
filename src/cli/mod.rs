use chrono::Local;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input};

use crate::{
    errors::ReportError,
    ledger::{load_operations, DateInput, Period},
    market::{AlphaVantageQuotes, ApiLayerRates},
    pages,
    reports::{self, render_json, ReportSink},
    settings::{self, UserSettings},
};

const MENU: &str = "Select a report:
1. Dashboard page JSON.
2. Events page JSON.
3. Profitable cashback categories.
4. Spending by category over three months.
5. Average spending by weekday over three months.
6. Average spending by workday over three months.";

/// Runs the interactive report menu once and prints the selected report.
pub fn run() -> Result<(), ReportError> {
    let theme = ColorfulTheme::default();
    println!("{}", MENU.bold());
    let selection = prompt_menu_selection(&theme)?;

    let now = Local::now().naive_local();
    let rows = load_operations(&settings::operations_file());
    let sink = ReportSink::default();

    let rendered = match selection {
        1 => {
            let date = prompt_date(&theme)?;
            let user_settings = UserSettings::load(&settings::settings_file());
            let page = pages::dashboard_page(
                &rows,
                date,
                now,
                &user_settings,
                &ApiLayerRates::from_env(),
                &AlphaVantageQuotes::from_env(),
            );
            render_json(&page)?
        }
        2 => {
            let date = prompt_date(&theme)?;
            let period: String = Input::with_theme(&theme)
                .with_prompt("Period (W - week, M - month, Y - year, ALL - full history)")
                .interact_text()?;
            let user_settings = UserSettings::load(&settings::settings_file());
            let page = pages::events_page(
                &rows,
                date,
                Period::from_code(&period),
                now,
                &user_settings,
                &ApiLayerRates::from_env(),
                &AlphaVantageQuotes::from_env(),
            );
            render_json(&page)?
        }
        3 => {
            let year: i32 = Input::with_theme(&theme).with_prompt("Year").interact_text()?;
            let month: u32 = Input::with_theme(&theme)
                .with_prompt("Month")
                .interact_text()?;
            let mapping = reports::profitable_categories(&rows, year, month, &sink);
            render_json(&mapping)?
        }
        4 => {
            let category: String = Input::with_theme(&theme)
                .with_prompt("Expense category")
                .interact_text()?;
            let date = prompt_date(&theme)?;
            let records = reports::spending_by_category(&rows, &category, date, now, &sink);
            render_json(&records)?
        }
        5 => {
            let date = prompt_date(&theme)?;
            let averages = reports::spending_by_weekday(&rows, date, now, &sink);
            render_json(&averages)?
        }
        _ => {
            let date = prompt_date(&theme)?;
            let averages = reports::spending_by_workday(&rows, date, now, &sink);
            render_json(&averages)?
        }
    };

    println!("\n{}\n", "Report for the selected parameters".bold());
    println!("{rendered}");
    Ok(())
}

/// Menu selection with a reprompt for anything outside 1..=6.
fn prompt_menu_selection(theme: &ColorfulTheme) -> Result<u8, ReportError> {
    let selection = Input::with_theme(theme)
        .with_prompt("Enter the report number")
        .validate_with(|value: &u8| {
            if (1..=6).contains(value) {
                Ok(())
            } else {
                Err("enter a number between 1 and 6")
            }
        })
        .interact_text()?;
    Ok(selection)
}

fn prompt_date(theme: &ColorfulTheme) -> Result<DateInput, ReportError> {
    let raw: String = Input::with_theme(theme)
        .with_prompt("Date (YYYY-MM-DD HH:MM:SS)")
        .allow_empty(true)
        .interact_text()?;
    Ok(DateInput::from(raw))
}
