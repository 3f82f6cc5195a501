// Infrastructure layer - Configuration and telemetry store adapters
pub mod config;
pub mod http_response;
pub mod memory_repository;
