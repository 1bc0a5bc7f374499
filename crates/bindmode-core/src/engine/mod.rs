//! # Engine Module
//!
//! This module implements the interaction detection engine: the configuration that
//! bounds every geometric test, the classifiers that apply those tests, and the
//! aggregator that turns their output into a report.
//!
//! ## Overview
//!
//! An analysis reads two immutable molecules and one spatial index shared by every
//! classifier. Each classifier is a pure function of an [`context::AnalysisContext`]; none
//! of them mutates the molecules or sees another classifier's output, so they can run in
//! any order or concurrently without changing the result.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Distance cutoffs, angle tolerances and perception
//!   parameters, validated once at construction
//! - **Interaction Records** ([`interaction`]) - The record type shared by all classifiers,
//!   with canonical participant keys for deduplication
//! - **Reporting** ([`report`]) - Merging classifier output into a deterministic,
//!   per-type and per-residue report
//! - **Progress Monitoring** ([`progress`]) - Stage transitions and task events for callers
//! - **Error Handling** ([`error`]) - The fatal errors an analysis can end with

pub mod config;
pub(crate) mod context;
pub mod error;
pub mod interaction;
pub mod progress;
pub mod report;
pub(crate) mod tasks;
