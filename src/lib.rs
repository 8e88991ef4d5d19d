pub mod api;
pub mod app;
pub mod cache;
pub mod ui;
pub mod util;
