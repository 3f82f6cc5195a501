// Application layer - Window resolution and report aggregation
pub mod delay_index;
pub mod error;
pub mod report_service;
pub mod telemetry_repository;
pub mod window;
