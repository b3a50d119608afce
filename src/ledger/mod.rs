pub mod loader;
pub mod transaction;
pub mod window;

pub use loader::load_operations;
pub use transaction::{Transaction, HOME_CURRENCY, SUCCESS_STATUS};
pub use window::{DateInput, Period, TimeWindow};
