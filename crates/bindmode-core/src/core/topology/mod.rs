//! # Topology Module
//!
//! Residue templates describing the chemistry of standard residues.
//!
//! ## Overview
//!
//! A template names, per residue type, the heavy atoms a complete residue should carry,
//! which atoms donate or accept hydrogen bonds, which atoms form a charged group and
//! which atoms make up aromatic rings. The loader uses templates to flag atoms of
//! standard residues and to report missing atoms; residues without a template are typed
//! with ligand heuristics instead.
//!
//! ## Key Components
//!
//! - [`registry`] - Template registry, built from compiled-in tables or loaded from TOML
//!
//! ## Usage
//!
//! ```ignore
//! use bindmode::core::topology::registry::TemplateRegistry;
//!
//! let mut registry = TemplateRegistry::standard();
//! registry.merge(TemplateRegistry::load(Path::new("modified_residues.toml"))?);
//! let arg = registry.get("ARG").unwrap();
//! ```

pub mod registry;
mod templates;
