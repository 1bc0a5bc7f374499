//! Radius-bounded proximity queries.
//!
//! [`grid::CellGrid`] hashes points into a uniform cell list. The analysis builds one
//! [`AtomIndex`] over the atoms of both molecules, with the cell size set to the largest
//! configured cutoff, and every classifier queries it with its own smaller cutoff.
//! Classifiers that work on ring or charged-group centroids build small grids of the
//! same type over those points.

pub mod grid;

use crate::core::models::molecule::{AtomRef, Molecule};
use grid::{CellGrid, SpatialError};

/// Cell grid over the atoms of every molecule in an analysis.
pub type AtomIndex = CellGrid<AtomRef>;

/// Builds an [`AtomIndex`] over the union of atoms in `molecules`.
pub fn build_atom_index(molecules: &[&Molecule], cell_size: f64) -> Result<AtomIndex, SpatialError> {
    let entries = molecules
        .iter()
        .flat_map(|molecule| {
            molecule
                .atoms_iter()
                .map(move |(id, atom)| (atom.position, molecule.atom_ref(id)))
        })
        .collect();
    CellGrid::new(entries, cell_size)
}
