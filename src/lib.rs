//! Crisol — combinatorial custom-resource generation.
//!
//! Enumerates the full Cartesian product of per-field value generators with
//! an odometer-style composer and renders each combination as a
//! Kubernetes-style custom-resource manifest, optionally filtered against a
//! CRD schema document.

pub mod cli;
pub mod core;
pub mod manifest;
pub mod schema;
