pub mod action;
pub mod app;
pub mod config;
pub mod event;
pub mod format;
pub mod layout;
pub mod system;
#[cfg(feature = "trace-log")]
pub mod trace;
pub mod ui;
