// Domain layer - Telemetry inputs and report value objects
pub mod report;
pub mod telemetry;
