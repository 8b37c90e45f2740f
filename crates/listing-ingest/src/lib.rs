pub mod cell;
pub mod loader;

pub use cell::{any_to_f64, any_to_string, any_to_trimmed, format_numeric, parse_f64};
pub use loader::load_csv;
