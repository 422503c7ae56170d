//! UI layer for the desktop GUI: app shell and the add/edit item form.

pub mod app;
pub mod forms;

pub use app::{DashboardApp, StartupConfig};
