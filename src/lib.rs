// HOS/ELD trip planning - library root shared by the server binary and tests
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
