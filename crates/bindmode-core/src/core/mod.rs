//! # Core Module
//!
//! The stateless foundation of the library: molecular data models, structure file
//! input, chemical perception and spatial indexing.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, residues, rings, charged groups and molecules
//! - **File I/O** ([`io`]) - PDB/PDBQT atom records and molecule loading
//! - **Chemical Perception** ([`chem`]) - Bond inference, ring detection, atom typing and charges
//! - **Structural Knowledge** ([`topology`]) - Residue templates for standard amino acids and water
//! - **Spatial Indexing** ([`spatial`]) - Cell-list neighbor queries
//! - **Diagnostics** ([`diagnostics`]) - Non-fatal warnings raised while loading
//!
//! Everything in this module is built once per structure and read-only afterwards; the
//! [`engine`](crate::engine) layer only ever borrows it.

pub mod chem;
pub mod diagnostics;
pub mod io;
pub mod models;
pub mod spatial;
pub mod topology;
pub mod utils;
