// Application layer - HOS calculators, collaborator seams and use cases
pub mod driver_service;
pub mod eld_synthesizer;
pub mod hos_evaluator;
pub mod log_service;
pub mod mapping_service;
pub mod service_error;
pub mod stop_planner;
pub mod trip_planning_service;
pub mod trucking_repository;
pub mod violation_service;
