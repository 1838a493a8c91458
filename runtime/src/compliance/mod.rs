//! Heuristic storefront compliance scoring.
//!
//! Pipeline: [`platform`] classifies the raw body, [`rules`] runs the
//! fixed battery over the extracted page, and [`scoring`] folds the
//! outcomes into a [`types::ScanResult`].

pub mod platform;
pub mod rules;
pub mod scoring;
pub mod types;
