pub mod auth;
pub mod invoices;
pub mod read;
pub mod serial_date;
