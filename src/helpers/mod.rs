//! Helper functions for dates and text
//!
//! These are shared by the views and by the command-line output.

pub mod date;
mod text;

pub use date::{format_datetime, format_day, parse_calendar_date, relative_date};
pub use text::*;
