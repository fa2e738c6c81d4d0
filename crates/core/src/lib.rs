//! `cartaporte-core` -- shipment manifest model and compliance rules.
//!
//! Contains no network or database dependencies. The orchestration layer
//! (`cartaporte-engine`) feeds manifest snapshots in and merges the local
//! result with the authority's verdict.

pub mod error;
pub mod manifest;
pub mod types;
pub mod validation;
