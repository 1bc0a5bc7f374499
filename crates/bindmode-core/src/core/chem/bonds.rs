use crate::core::models::ids::AtomId;
use crate::core::models::molecule::Molecule;
use crate::core::spatial::grid::{CellGrid, SpatialError};
use std::collections::HashMap;

/// Interatomic distances at or below this are treated as overlapping records, not bonds.
const MIN_BOND_DISTANCE: f64 = 0.4;

/// Infers covalent bonds from interatomic distances.
///
/// Two atoms are bonded when `0.4 < d <= r_a + r_b + tolerance`, with `r` the covalent
/// radius of each element. A hydrogen keeps only its closest partner. Metal ions never
/// receive covalent bonds; their contacts are reported as metal coordination instead.
/// Returns the number of bonds added.
pub(crate) fn infer_bonds(molecule: &mut Molecule, tolerance: f64) -> Result<usize, SpatialError> {
    let entries: Vec<_> = molecule
        .atoms_iter()
        .filter(|(_, atom)| !atom.element.is_metal())
        .map(|(id, atom)| (atom.position, id))
        .collect();
    if entries.len() < 2 {
        return Ok(0);
    }

    let max_radius = molecule
        .atoms_iter()
        .map(|(_, atom)| atom.element.covalent_radius())
        .fold(0.0, f64::max);
    let grid = CellGrid::new(entries, 2.0 * max_radius + tolerance)?;

    let mut pairs: Vec<(AtomId, AtomId, f64)> = Vec::new();
    for (index, (position, id)) in grid.entries().iter().enumerate() {
        let Some(atom) = molecule.atom(*id) else {
            continue;
        };
        let radius = atom.element.covalent_radius();
        for neighbor in grid.neighbors(position, radius + max_radius + tolerance) {
            if neighbor.index <= index || neighbor.distance <= MIN_BOND_DISTANCE {
                continue;
            }
            let Some(other) = molecule.atom(neighbor.item) else {
                continue;
            };
            if neighbor.distance <= radius + other.element.covalent_radius() + tolerance {
                pairs.push((*id, neighbor.item, neighbor.distance));
            }
        }
    }

    let is_hydrogen = |id: AtomId| molecule.atom(id).is_some_and(|atom| atom.is_hydrogen());
    let mut closest: HashMap<AtomId, (f64, AtomId)> = HashMap::new();
    for &(a, b, distance) in &pairs {
        for (hydrogen, partner) in [(a, b), (b, a)] {
            if !is_hydrogen(hydrogen) {
                continue;
            }
            closest
                .entry(hydrogen)
                .and_modify(|best| {
                    if (distance, partner) < *best {
                        *best = (distance, partner);
                    }
                })
                .or_insert((distance, partner));
        }
    }
    let keeps = |hydrogen: AtomId, partner: AtomId| {
        !is_hydrogen(hydrogen) || closest.get(&hydrogen).is_some_and(|&(_, best)| best == partner)
    };

    let mut bonds: Vec<(AtomId, AtomId)> = pairs
        .into_iter()
        .filter(|&(a, b, _)| keeps(a, b) && keeps(b, a))
        .map(|(a, b, _)| (a, b))
        .collect();
    bonds.sort_unstable();
    let mut added = 0;
    for (a, b) in bonds {
        if molecule.add_bond(a, b).is_some() {
            added += 1;
        }
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::element::Element;
    use crate::core::models::molecule::MoleculeRole;
    use nalgebra::Point3;

    fn molecule_with(atoms: &[(&str, Element, [f64; 3])]) -> (Molecule, Vec<AtomId>) {
        let mut molecule = Molecule::new(MoleculeRole::Ligand);
        let residue_id = molecule.add_residue(' ', 1, "UNL");
        let ids = atoms
            .iter()
            .enumerate()
            .map(|(i, (name, element, p))| {
                let atom = Atom::new(i + 1, name, *element, residue_id, Point3::new(p[0], p[1], p[2]));
                molecule.add_atom(atom).unwrap()
            })
            .collect();
        (molecule, ids)
    }

    #[test]
    fn ethanol_backbone_is_bonded() {
        let (mut molecule, ids) = molecule_with(&[
            ("C1", Element::C, [0.0, 0.0, 0.0]),
            ("C2", Element::C, [1.52, 0.0, 0.0]),
            ("O1", Element::O, [2.0, 1.35, 0.0]),
        ]);
        let added = infer_bonds(&mut molecule, 0.45).unwrap();
        assert_eq!(added, 2);
        assert_eq!(molecule.bonded_neighbors(ids[1]).len(), 2);
        assert!(molecule.bonded_neighbors(ids[0]).contains(&ids[1]));
        assert!(!molecule.bonded_neighbors(ids[0]).contains(&ids[2]));
    }

    #[test]
    fn overlapping_and_distant_atoms_are_not_bonded() {
        let (mut molecule, _) = molecule_with(&[
            ("C1", Element::C, [0.0, 0.0, 0.0]),
            ("C2", Element::C, [0.3, 0.0, 0.0]),
            ("C3", Element::C, [5.0, 0.0, 0.0]),
        ]);
        assert_eq!(infer_bonds(&mut molecule, 0.45).unwrap(), 0);
    }

    #[test]
    fn metals_are_never_covalently_bonded() {
        let (mut molecule, ids) = molecule_with(&[
            ("ZN", Element::Zn, [0.0, 0.0, 0.0]),
            ("O1", Element::O, [2.0, 0.0, 0.0]),
        ]);
        assert_eq!(infer_bonds(&mut molecule, 0.45).unwrap(), 0);
        assert!(molecule.bonded_neighbors(ids[0]).is_empty());
    }

    #[test]
    fn hydrogens_bond_to_nearest_heavy_atom_only() {
        let (mut molecule, ids) = molecule_with(&[
            ("N1", Element::N, [0.0, 0.0, 0.0]),
            ("H1", Element::H, [1.01, 0.0, 0.0]),
            ("C1", Element::C, [-1.47, 0.0, 0.0]),
        ]);
        infer_bonds(&mut molecule, 0.45).unwrap();
        assert_eq!(molecule.bonded_neighbors(ids[1]), &[ids[0]]);
        assert_eq!(molecule.bonded_hydrogens(ids[0]).count(), 1);
    }

    #[test]
    fn hydrogen_within_reach_of_two_heavy_atoms_keeps_the_closer() {
        let (mut molecule, ids) = molecule_with(&[
            ("N1", Element::N, [0.0, 0.0, 0.0]),
            ("H1", Element::H, [1.01, 0.0, 0.0]),
            ("C1", Element::C, [2.10, 0.0, 0.0]),
        ]);
        infer_bonds(&mut molecule, 0.45).unwrap();
        assert_eq!(molecule.bonded_neighbors(ids[1]), &[ids[0]]);
        assert!(molecule.bonded_neighbors(ids[2]).is_empty());
        assert_eq!(molecule.bonds().len(), 1);
    }
}
