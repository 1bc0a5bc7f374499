use crate::core::models::element::Element;
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::Molecule;
use crate::core::models::ring::Ring;
use crate::core::topology::registry::TemplateRegistry;
use std::collections::HashSet;

const MIN_RING_SIZE: usize = 5;
const MAX_RING_SIZE: usize = 6;

/// Whether an atom may take part in an aromatic ring.
///
/// Template residues name their ring atoms explicitly. Elsewhere an AutoDock
/// aromatic carbon (`A`) or any N/O/S heteroatom qualifies when type codes are
/// present, and any C/N/O/S atom qualifies when they are not.
fn is_ring_candidate(molecule: &Molecule, id: AtomId, registry: &TemplateRegistry) -> bool {
    let Some(atom) = molecule.atom(id) else {
        return false;
    };
    let template = molecule
        .residue_of(id)
        .and_then(|residue| registry.get(&residue.name));
    if let Some(template) = template {
        return template.is_aromatic(&atom.name);
    }
    match atom.type_code.as_deref() {
        Some("A") => true,
        Some(_) => atom.element.is_polar(),
        None => matches!(atom.element, Element::C | Element::N | Element::O | Element::S),
    }
}

/// Finds planar, chordless five- and six-membered rings of aromatic candidates.
///
/// Rings are returned in a deterministic order: by smallest member ID, then by the
/// order in which the bond walk closes them.
pub(crate) fn perceive_rings(
    molecule: &Molecule,
    registry: &TemplateRegistry,
    planarity_tolerance: f64,
) -> Vec<Ring> {
    let candidates: HashSet<AtomId> = molecule
        .atoms_iter()
        .map(|(id, _)| id)
        .filter(|&id| is_ring_candidate(molecule, id, registry))
        .collect();

    let mut starts: Vec<AtomId> = candidates.iter().copied().collect();
    starts.sort_unstable();

    let mut seen: HashSet<Vec<AtomId>> = HashSet::new();
    let mut cycles: Vec<Vec<AtomId>> = Vec::new();
    for start in starts {
        let mut path = vec![start];
        walk(molecule, &candidates, &mut path, &mut seen, &mut cycles);
    }

    cycles
        .into_iter()
        .filter_map(|members| {
            let positions: Vec<_> = members
                .iter()
                .filter_map(|&id| molecule.atom(id).map(|atom| atom.position))
                .collect();
            Ring::from_members(members, &positions)
        })
        .filter(|ring| ring.max_deviation() <= planarity_tolerance)
        .collect()
}

/// Extends `path` through candidate atoms with IDs above the start atom, recording
/// every chordless cycle that closes back onto the start.
fn walk(
    molecule: &Molecule,
    candidates: &HashSet<AtomId>,
    path: &mut Vec<AtomId>,
    seen: &mut HashSet<Vec<AtomId>>,
    cycles: &mut Vec<Vec<AtomId>>,
) {
    let start = path[0];
    let Some(&last) = path.last() else {
        return;
    };
    for &next in molecule.bonded_neighbors(last) {
        if next == start {
            if path.len() >= MIN_RING_SIZE && is_chordless(molecule, path) {
                let mut key = path.clone();
                key.sort_unstable();
                if seen.insert(key) {
                    cycles.push(path.clone());
                }
            }
            continue;
        }
        if next < start
            || path.len() == MAX_RING_SIZE
            || !candidates.contains(&next)
            || path.contains(&next)
        {
            continue;
        }
        path.push(next);
        walk(molecule, candidates, path, seen, cycles);
        path.pop();
    }
}

fn is_chordless(molecule: &Molecule, cycle: &[AtomId]) -> bool {
    let n = cycle.len();
    for i in 0..n {
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            if molecule.bonded_neighbors(cycle[i]).contains(&cycle[j]) {
                return false;
            }
        }
    }
    true
}
