//! Interaction classifiers.
//!
//! Each submodule detects one interaction category. Every classifier has the same
//! shape, `fn run(&AnalysisContext) -> Vec<InteractionRecord>`: it reads only the
//! immutable molecules, the shared atom index and the configuration, applies its own
//! geometric criteria, and returns records that are already unique per participant key.
//! Classifiers share no state, so the workflow may run them concurrently.

pub mod close_contacts;
pub mod hydrogen_bonds;
pub mod hydrophobic;
pub mod metal_complexes;
pub mod pi_cation;
pub mod pi_stacking;
pub mod salt_bridges;

#[cfg(test)]
pub(crate) mod testing;

use super::context::AnalysisContext;
use super::interaction::{InteractionKind, InteractionRecord};
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::{AtomRef, Molecule};
use crate::core::spatial::grid::CellGrid;
use nalgebra::Point3;
use tracing::debug;

pub type Classifier = fn(&AnalysisContext) -> Vec<InteractionRecord>;

/// Every classifier with the kind it produces, in report order.
pub const CLASSIFIERS: [(InteractionKind, Classifier); 7] = [
    (InteractionKind::HydrogenBond, hydrogen_bonds::run),
    (InteractionKind::SaltBridge, salt_bridges::run),
    (InteractionKind::HydrophobicContact, hydrophobic::run),
    (InteractionKind::PiPiStacking, pi_stacking::run),
    (InteractionKind::PiCation, pi_cation::run),
    (InteractionKind::MetalComplex, metal_complexes::run),
    (InteractionKind::CloseContact, close_contacts::run),
];

/// Builds a grid over ring or charged-group centroids, tagged with their position in
/// the source slice.
pub(crate) fn centroid_grid<'a>(
    centroids: impl IntoIterator<Item = &'a Point3<f64>>,
    cell_size: f64,
) -> Option<CellGrid<usize>> {
    let entries = centroids
        .into_iter()
        .enumerate()
        .map(|(i, p)| (*p, i))
        .collect();
    match CellGrid::new(entries, cell_size) {
        Ok(grid) => Some(grid),
        Err(e) => {
            debug!(error = %e, "Skipping centroid grid.");
            None
        }
    }
}

pub(crate) fn atom_refs(molecule: &Molecule, ids: &[AtomId]) -> Vec<AtomRef> {
    ids.iter().map(|&id| molecule.atom_ref(id)).collect()
}
