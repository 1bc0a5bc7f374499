//! # Workflows Module
//!
//! High-level entry points that run a complete binding-mode analysis.
//!
//! ## Overview
//!
//! A workflow loads the receptor and ligand, builds the shared spatial index, runs every
//! interaction classifier and aggregates their records into an
//! [`InteractionReport`](crate::engine::report::InteractionReport). Progress is reported
//! through a [`ProgressReporter`](crate::engine::progress::ProgressReporter) as the run
//! moves through its stages; non-fatal loader problems travel with the result as
//! warnings.
//!
//! - **Analysis Workflow** ([`analyze`]) - Receptor-ligand interaction profiling from
//!   structure files or already loaded molecules.

pub mod analyze;
