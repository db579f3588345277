//! Flat-file export of converted records.

mod csv;

pub use self::csv::{load_to_csv, write_records};
