mod app;
mod chart;

pub use app::TrendlabApp;
