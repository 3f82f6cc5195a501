//! Time-windowed reporting over train position telemetry.
//!
//! Aggregates raw position samples into KPI snapshots, hourly delay trends,
//! per-class throughput and section x time hotspot grids.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
