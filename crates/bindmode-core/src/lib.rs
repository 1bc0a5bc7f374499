//! # BindMode Core Library
//!
//! A library for detecting and classifying the non-covalent interactions between a
//! receptor (typically a protein) and a bound ligand from their 3D structures.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture to keep parsing, geometry and
//! orchestration apart.
//!
//! - **[`core`]: The Foundation.** Immutable molecule models, the PDB/PDBQT loader with
//!   bond, ring and charge perception, residue templates, and the cell-list spatial index.
//!
//! - **[`engine`]: The Logic Core.** Analysis configuration, the interaction classifiers
//!   (hydrogen bonds, salt bridges, hydrophobic contacts, pi stacking, pi-cation, metal
//!   complexes and close contacts) and the report aggregator.
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `engine` together into a single
//!   call that turns two structure files into an interaction report.

pub mod core;
pub mod engine;
pub mod workflows;
