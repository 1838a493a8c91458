// Copyright 2026 Compliance Shield Contributors
// SPDX-License-Identifier: Apache-2.0

//! Compliance Shield: heuristic compliance scoring for online stores.
//!
//! Fetches a single store page and scores it against a fixed battery of
//! lexical checks: physical address, policy links, GPSR responsible person,
//! contact method, placeholder text, scarcity language, and more. See
//! [`scanner::Scanner::scan`] for the entry point.

#![allow(clippy::new_without_default)]

pub mod acquisition;
pub mod cli;
pub mod compliance;
pub mod config;
pub mod error;
pub mod rest;
pub mod scanner;

pub use compliance::types::{Platform, ScanMeta, ScanReport, ScanResult};
pub use config::{RuleProfile, ScanConfig};
pub use error::ScanError;
pub use scanner::Scanner;
