// Domain layer - Trucking entities, HOS value types and regulatory constants
pub mod driver;
pub mod duty_status;
pub mod eld_log;
pub mod hos;
pub mod regulations;
pub mod route;
