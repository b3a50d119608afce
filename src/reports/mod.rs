pub mod cashback;
pub mod persist;
pub mod spending;

pub use cashback::profitable_categories;
pub use persist::{render_json, ReportSink};
pub use spending::{
    spending_by_category, spending_by_weekday, spending_by_workday, SpendingRecord,
};
