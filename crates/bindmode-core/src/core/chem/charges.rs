use crate::core::models::element::Element;
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::Molecule;
use crate::core::models::residue::Residue;
use crate::core::models::ring::{ChargeSign, ChargedGroup};
use crate::core::topology::registry::{ResidueTemplate, TemplateRegistry};
use crate::core::utils::geometry::centroid;

/// Finds the formally charged groups of a molecule and marks their atoms as charged.
///
/// Template residues contribute the groups their template names, plus the C-terminal
/// carboxylate when `OXT` is present. Other residues are searched for carboxylate,
/// phosphate and sulfonate oxygens, quaternary or protonated amines, and
/// amidine/guanidine carbons; metal ions are always positive.
pub(crate) fn assign_charged_groups(molecule: &mut Molecule, registry: &TemplateRegistry) {
    let mut groups = Vec::new();
    for (_, residue) in molecule.residues_iter() {
        match registry.get(&residue.name) {
            Some(template) => template_groups(molecule, residue, template, &mut groups),
            None => heuristic_groups(molecule, residue, &mut groups),
        }
    }

    for group in &groups {
        for &id in group.atoms() {
            if let Some(atom) = molecule.atom_mut(id) {
                atom.flags.charged = true;
            }
        }
    }
    molecule.charged_groups = groups;
}

fn make_group(molecule: &Molecule, sign: ChargeSign, atoms: Vec<AtomId>) -> Option<ChargedGroup> {
    let positions: Vec<_> = atoms
        .iter()
        .filter_map(|&id| molecule.atom(id).map(|atom| atom.position))
        .collect();
    let center = centroid(&positions)?;
    Some(ChargedGroup::new(sign, atoms, center))
}

fn template_groups(
    molecule: &Molecule,
    residue: &Residue,
    template: &ResidueTemplate,
    groups: &mut Vec<ChargedGroup>,
) {
    let present = |names: &[String]| -> Vec<AtomId> {
        names
            .iter()
            .filter_map(|name| residue.atom_id_by_name(name))
            .collect()
    };

    for (sign, names) in [
        (ChargeSign::Positive, &template.positive),
        (ChargeSign::Negative, &template.negative),
    ] {
        let atoms = present(names);
        if let Some(group) = make_group(molecule, sign, atoms) {
            groups.push(group);
        }
    }

    if let (Some(o), Some(oxt)) = (residue.atom_id_by_name("O"), residue.atom_id_by_name("OXT")) {
        if let Some(group) = make_group(molecule, ChargeSign::Negative, vec![o, oxt]) {
            groups.push(group);
        }
    }
}

/// Oxygens bonded only to `center` and carrying no hydrogen.
fn terminal_oxygens(molecule: &Molecule, center: AtomId) -> Vec<AtomId> {
    molecule
        .bonded_neighbors(center)
        .iter()
        .copied()
        .filter(|&id| {
            molecule.atom(id).is_some_and(|atom| atom.element == Element::O)
                && molecule.bonded_neighbors(id).len() == 1
        })
        .collect()
}

fn heuristic_groups(molecule: &Molecule, residue: &Residue, groups: &mut Vec<ChargedGroup>) {
    let has_hydrogens = molecule.has_hydrogens();
    let in_ring = |id: AtomId| molecule.rings().iter().any(|ring| ring.contains(id));

    for &id in residue.atoms() {
        let Some(atom) = molecule.atom(id) else {
            continue;
        };
        let neighbors = molecule.bonded_neighbors(id);
        let heavy_degree = molecule.heavy_degree(id);

        let candidate = match atom.element {
            element if element.is_metal() => Some((ChargeSign::Positive, vec![id])),
            Element::C => {
                let oxygens = terminal_oxygens(molecule, id);
                let nitrogens: Vec<AtomId> = neighbors
                    .iter()
                    .copied()
                    .filter(|&n| {
                        molecule.atom(n).is_some_and(|a| a.element == Element::N) && !in_ring(n)
                    })
                    .collect();
                let has_oxygen = neighbors
                    .iter()
                    .any(|&n| molecule.atom(n).is_some_and(|a| a.element == Element::O));
                if oxygens.len() == 2 && heavy_degree == 3 {
                    Some((ChargeSign::Negative, oxygens))
                } else if nitrogens.len() >= 2 && heavy_degree == 3 && !has_oxygen {
                    let mut atoms = vec![id];
                    atoms.extend(nitrogens);
                    Some((ChargeSign::Positive, atoms))
                } else {
                    None
                }
            }
            Element::P => {
                let oxygens = terminal_oxygens(molecule, id);
                (oxygens.len() >= 2).then_some((ChargeSign::Negative, oxygens))
            }
            Element::S => {
                let oxygens = terminal_oxygens(molecule, id);
                (oxygens.len() >= 3).then_some((ChargeSign::Negative, oxygens))
            }
            Element::N => {
                let connections = if has_hydrogens { neighbors.len() } else { heavy_degree };
                (connections == 4).then_some((ChargeSign::Positive, vec![id]))
            }
            _ => None,
        };

        if let Some((sign, atoms)) = candidate {
            if let Some(group) = make_group(molecule, sign, atoms) {
                groups.push(group);
            }
        }
    }
}
