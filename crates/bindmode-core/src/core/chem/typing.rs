use crate::core::models::atom::AtomFlags;
use crate::core::models::element::Element;
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::Molecule;
use crate::core::topology::registry::TemplateRegistry;
use std::collections::HashSet;

/// Assigns donor, acceptor, aromatic and metal flags to every atom.
///
/// Must run after bonds and rings have been perceived. The `charged` flag is left
/// untouched; charged-group perception sets it.
pub(crate) fn assign_flags(molecule: &mut Molecule, registry: &TemplateRegistry) {
    let ring_atoms: HashSet<AtomId> = molecule
        .rings()
        .iter()
        .flat_map(|ring| ring.atoms().iter().copied())
        .collect();
    let molecule_has_hydrogens = molecule.has_hydrogens();

    let assigned: Vec<(AtomId, AtomFlags)> = molecule
        .atoms_iter()
        .map(|(id, atom)| {
            let template = molecule
                .residue_of(id)
                .and_then(|residue| registry.get(&residue.name));
            let (hydrogen_donor, hydrogen_acceptor) = match template {
                Some(template) => (template.is_donor(&atom.name), template.is_acceptor(&atom.name)),
                None => (
                    is_ligand_donor(molecule, id, molecule_has_hydrogens),
                    is_ligand_acceptor(molecule, id),
                ),
            };
            let flags = AtomFlags {
                hydrogen_donor,
                hydrogen_acceptor,
                aromatic: ring_atoms.contains(&id),
                charged: atom.flags.charged,
                metal: atom.element.is_metal(),
            };
            (id, flags)
        })
        .collect();

    for (id, flags) in assigned {
        if let Some(atom) = molecule.atom_mut(id) {
            atom.flags = flags;
        }
    }
}

/// An N or O carrying a hydrogen. Structures without any hydrogens treat every
/// N and O as a potential donor.
fn is_ligand_donor(molecule: &Molecule, id: AtomId, molecule_has_hydrogens: bool) -> bool {
    let Some(atom) = molecule.atom(id) else {
        return false;
    };
    if !matches!(atom.element, Element::N | Element::O) {
        return false;
    }
    if molecule_has_hydrogens {
        molecule.bonded_hydrogens(id).next().is_some()
    } else {
        true
    }
}

fn is_ligand_acceptor(molecule: &Molecule, id: AtomId) -> bool {
    let Some(atom) = molecule.atom(id) else {
        return false;
    };
    let code = atom.type_code.as_deref();
    match atom.element {
        Element::O => true,
        Element::N => match code {
            Some("NA") | Some("NS") => true,
            Some(_) => false,
            // Amine and amide nitrogens (three heavy neighbors or a bound hydrogen)
            // are not counted as acceptors.
            None => {
                molecule.heavy_degree(id) < 3 && molecule.bonded_hydrogens(id).next().is_none()
            }
        },
        Element::S => match code {
            Some("SA") => true,
            Some(_) => false,
            None => molecule.heavy_degree(id) <= 2,
        },
        _ => false,
    }
}
