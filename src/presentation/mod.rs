// Presentation layer - HTTP surface of the dashboard
pub mod app_state;
pub mod handlers;
pub mod routes;
pub mod views;
