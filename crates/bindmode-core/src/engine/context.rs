use super::config::AnalysisConfig;
use super::interaction::AtomSite;
use crate::core::models::atom::Atom;
use crate::core::models::molecule::{AtomRef, Molecule, MoleculeRole};
use crate::core::spatial::AtomIndex;

/// Everything a classifier may read: both molecules, the shared atom index and the
/// configuration. All borrows are shared, so classifiers can run concurrently.
#[derive(Clone, Copy)]
pub struct AnalysisContext<'a> {
    pub receptor: &'a Molecule,
    pub ligand: &'a Molecule,
    pub index: &'a AtomIndex,
    pub config: &'a AnalysisConfig,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(
        receptor: &'a Molecule,
        ligand: &'a Molecule,
        index: &'a AtomIndex,
        config: &'a AnalysisConfig,
    ) -> Self {
        Self {
            receptor,
            ligand,
            index,
            config,
        }
    }

    pub fn molecule(&self, role: MoleculeRole) -> &'a Molecule {
        match role {
            MoleculeRole::Receptor => self.receptor,
            MoleculeRole::Ligand => self.ligand,
        }
    }

    pub fn atom(&self, atom_ref: AtomRef) -> Option<&'a Atom> {
        self.molecule(atom_ref.role).atom(atom_ref.id)
    }

    /// Snapshot of the referenced atom for inclusion in a record.
    pub fn site(&self, atom_ref: AtomRef) -> Option<AtomSite> {
        let molecule = self.molecule(atom_ref.role);
        molecule
            .atom(atom_ref.id)
            .map(|atom| AtomSite::new(molecule, atom_ref.id, atom))
    }

    /// Snapshots of several atoms, skipping unknown references.
    pub fn sites(&self, atoms: impl IntoIterator<Item = AtomRef>) -> Vec<AtomSite> {
        atoms.into_iter().filter_map(|a| self.site(a)).collect()
    }
}
