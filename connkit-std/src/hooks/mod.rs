//! Standard customizer hooks.

pub mod logging;

pub use logging::LoggingHook;
