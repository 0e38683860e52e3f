//! Cell-level helpers: values, formats, borders, the styler, serial dates and row splicing

pub mod border;
pub mod date;
pub mod format;
pub mod rows;
pub mod styler;
pub mod values;

pub use border::BorderConf;
pub use date::{SERIAL_EPOCH, datetime_from_serial, parse_date, serial_date, strftime_layout};
pub use rows::remove_row;
pub use styler::Styler;
pub use values::{bool_value, display_value, formula_value, number_value, text_value};
