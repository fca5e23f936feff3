// Settings service module
// Persisted view preferences

mod mapper;
mod service;

pub use service::SettingsService;
