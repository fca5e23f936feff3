// Module exports for models

pub mod category;
pub mod event;
pub mod hours;
pub mod session;
pub mod settings;
pub mod ui;
