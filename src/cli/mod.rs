//! Command-line surface: argument parsing, telemetry, and the actions that
//! drive an [`App`](crate::app::App) session.

pub mod actions;
pub mod commands;
pub mod dispatch;
pub mod start;
pub mod telemetry;

pub use start::start;
