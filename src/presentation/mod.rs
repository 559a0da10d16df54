// Presentation layer - HTTP handlers, routing and error responses
pub mod app_state;
pub mod error_response;
pub mod handlers;
pub mod routes;
