use super::atom::Atom;
use super::ids::{AtomId, ResidueId};
use super::molecule::{Molecule, MoleculeRole};
use crate::core::chem::bonds::infer_bonds;
use crate::core::chem::charges::assign_charged_groups;
use crate::core::chem::rings::perceive_rings;
use crate::core::chem::typing::assign_flags;
use crate::core::chem::PerceptionParams;
use crate::core::diagnostics::Warning;
use crate::core::spatial::grid::SpatialError;
use crate::core::topology::registry::TemplateRegistry;
use tracing::debug;

/// Assembles a [`Molecule`] from atom records, then runs structure perception.
///
/// Records are added residue by residue; [`MoleculeBuilder::build`] consumes the
/// builder, infers bonds, rings, atom flags and charged groups, and checks template
/// residues for missing heavy atoms.
pub struct MoleculeBuilder {
    molecule: Molecule,
    current_residue: Option<ResidueId>,
}

impl MoleculeBuilder {
    pub fn new(role: MoleculeRole) -> Self {
        Self {
            molecule: Molecule::new(role),
            current_residue: None,
        }
    }

    /// Makes the residue identified by chain, number and name current, creating it on
    /// first use.
    pub fn start_residue(&mut self, chain_id: char, number: isize, name: &str) -> ResidueId {
        let residue_id = self.molecule.add_residue(chain_id, number, name);
        self.current_residue = Some(residue_id);
        residue_id
    }

    /// Adds an atom to the current residue.
    ///
    /// Returns `None` when no residue has been started.
    pub fn add_atom(&mut self, mut atom: Atom) -> Option<AtomId> {
        let residue_id = self.current_residue?;
        let chain_id = self.molecule.residue(residue_id)?.chain_id;
        atom.residue_id = residue_id;
        atom.chain_id = chain_id;
        self.molecule.add_atom(atom)
    }

    pub fn atom_count(&self) -> usize {
        self.molecule.atom_count()
    }

    pub fn build(
        self,
        registry: &TemplateRegistry,
        params: &PerceptionParams,
    ) -> Result<(Molecule, Vec<Warning>), SpatialError> {
        let mut molecule = self.molecule;
        let role = molecule.role();

        let bond_count = infer_bonds(&mut molecule, params.bond_tolerance)?;
        molecule.rings = perceive_rings(&molecule, registry, params.ring_planarity_tolerance);
        assign_flags(&mut molecule, registry);
        assign_charged_groups(&mut molecule, registry);
        debug!(
            %role,
            atoms = molecule.atom_count(),
            residues = molecule.residue_count(),
            bonds = bond_count,
            rings = molecule.rings().len(),
            charged_groups = molecule.charged_groups().len(),
            "Structure perception complete."
        );

        let warnings = missing_atom_warnings(&molecule, registry);
        Ok((molecule, warnings))
    }
}

fn missing_atom_warnings(molecule: &Molecule, registry: &TemplateRegistry) -> Vec<Warning> {
    let mut warnings = Vec::new();
    for (_, residue) in molecule.residues_iter() {
        let Some(template) = registry.get(&residue.name) else {
            continue;
        };
        for atom_name in &template.heavy_atoms {
            if residue.atom_id_by_name(atom_name).is_none() {
                warnings.push(Warning::MissingAtom {
                    role: molecule.role(),
                    residue: residue.key(),
                    atom: atom_name.clone(),
                });
            }
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::element::Element;
    use crate::core::models::residue::ResidueKey;
    use nalgebra::Point3;

    fn atom(serial: usize, name: &str, element: Element, p: [f64; 3]) -> Atom {
        Atom::new(serial, name, element, ResidueId::default(), Point3::new(p[0], p[1], p[2]))
    }

    #[test]
    fn add_atom_requires_a_started_residue() {
        let mut builder = MoleculeBuilder::new(MoleculeRole::Ligand);
        assert!(builder.add_atom(atom(1, "C1", Element::C, [0.0; 3])).is_none());
        builder.start_residue('B', 1, "UNL");
        let id = builder.add_atom(atom(1, "C1", Element::C, [0.0; 3]));
        assert!(id.is_some());
        assert_eq!(builder.atom_count(), 1);
    }

    #[test]
    fn build_assigns_chain_and_perceives_rings() {
        let mut builder = MoleculeBuilder::new(MoleculeRole::Ligand);
        builder.start_residue('L', 1, "BNZ");
        for i in 0..6 {
            let theta = (i as f64) * std::f64::consts::PI / 3.0;
            builder.add_atom(atom(i + 1, &format!("C{}", i + 1), Element::C, [1.39 * theta.cos(), 1.39 * theta.sin(), 0.0]));
        }
        let (molecule, warnings) = builder
            .build(&TemplateRegistry::standard(), &PerceptionParams::default())
            .unwrap();
        assert!(warnings.is_empty());
        assert_eq!(molecule.bonds().len(), 6);
        assert_eq!(molecule.rings().len(), 1);
        assert!(molecule.atoms_iter().all(|(_, a)| a.flags.aromatic && a.chain_id == 'L'));
    }

    #[test]
    fn incomplete_template_residue_reports_missing_atoms() {
        let mut builder = MoleculeBuilder::new(MoleculeRole::Receptor);
        builder.start_residue('A', 12, "SER");
        builder.add_atom(atom(1, "N", Element::N, [0.0, 0.0, 0.0]));
        builder.add_atom(atom(2, "CA", Element::C, [1.46, 0.0, 0.0]));
        builder.add_atom(atom(3, "C", Element::C, [2.0, 1.42, 0.0]));
        builder.add_atom(atom(4, "O", Element::O, [3.2, 1.5, 0.0]));
        let (_, warnings) = builder
            .build(&TemplateRegistry::standard(), &PerceptionParams::default())
            .unwrap();
        let missing: Vec<_> = warnings
            .iter()
            .map(|w| match w {
                Warning::MissingAtom { residue, atom, .. } => (residue.clone(), atom.clone()),
                other => panic!("unexpected warning: {other}"),
            })
            .collect();
        assert_eq!(
            missing,
            vec![
                (ResidueKey::new('A', 12, "SER"), "CB".to_string()),
                (ResidueKey::new('A', 12, "SER"), "OG".to_string()),
            ]
        );
    }
}
