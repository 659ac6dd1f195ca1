//! Pure domain helpers

pub mod calendar_date;
