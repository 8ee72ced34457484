//! Readiness scoring for exporters preparing shipments under the EU Deforestation
//! Regulation (EU 2023/1115).
//!
//! The crate is organized around the assessment workflow: form intake and alias
//! normalization, the point-deduction scoring engine, persistence contracts, portfolio
//! reporting, and the due diligence statement renderer.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
