pub mod action;
pub mod api;
pub mod app;
pub mod chart;
pub mod config;
pub mod event;
pub mod logging;
pub mod mood;
pub mod moodboard;
pub mod ui;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use chart::{chart_config, ChartConfig, ChartError, Distribution};
pub use mood::Mood;
