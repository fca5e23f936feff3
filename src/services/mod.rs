// Service module exports

pub mod calendar_grid;
pub mod database;
pub mod event;
pub mod hours;
pub mod schedule;
pub mod settings;
pub mod store;
