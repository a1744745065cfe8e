//! HTTP API handlers for movies-dash

pub mod buildinfo;
pub mod dashboard;
pub mod health;
pub mod ui;

pub use buildinfo::get_build_info;
pub use dashboard::{get_dashboard, list_genres};
pub use health::health_routes;
pub use ui::{serve_app_js, serve_index};
