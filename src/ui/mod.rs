// UI module exports
// Text rendering of the calendar views

pub mod views;

pub use views::{render_month, render_week};
