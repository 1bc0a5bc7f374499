//! # Core Models Module
//!
//! This module contains the data structures used to represent the receptor and ligand
//! of a binding-mode analysis.
//!
//! ## Overview
//!
//! A [`molecule::Molecule`] owns its atoms and residues in slot-map arenas and records
//! covalent connectivity as an index-based adjacency list. Rings and charged groups are
//! perceived once, while the molecule is being built, and are stored alongside the atoms
//! so classifiers never need to recompute them. Once built, a molecule is read-only.
//!
//! ## Key Components
//!
//! - [`atom`] - Individual atom with coordinates, element, source type code and chemical flags
//! - [`element`] - Chemical elements with covalent radii and AutoDock type mapping
//! - [`residue`] - Residues and the `ResidueKey` used to group interactions
//! - [`ring`] - Aromatic rings and charged groups with their derived geometry
//! - [`topology`] - Covalent bonds
//! - [`molecule`] - The molecule container and its role in an analysis
//! - [`builder`] - Assembles a molecule from parsed atom records
//! - [`ids`] - Unique identifier types for atoms and residues
//!
//! ## Usage
//!
//! ```ignore
//! use bindmode::core::io::load_molecule;
//! use bindmode::core::models::molecule::MoleculeRole;
//!
//! let loaded = load_molecule("receptor.pdbqt", MoleculeRole::Receptor, &registry, &params)?;
//! for ring in loaded.molecule.rings() {
//!     println!("ring of {} atoms at {}", ring.size(), ring.centroid());
//! }
//! ```

pub mod atom;
pub mod builder;
pub mod element;
pub mod ids;
pub mod molecule;
pub mod residue;
pub mod ring;
pub mod topology;
