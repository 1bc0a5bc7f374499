use super::atom::Atom;
use super::ids::{AtomId, ResidueId};
use super::residue::{Residue, ResidueKey};
use super::ring::{ChargedGroup, Ring};
use super::topology::Bond;
use serde::Serialize;
use slotmap::{SecondaryMap, SlotMap};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The role a molecule plays in a binding analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoleculeRole {
    Receptor,
    Ligand,
}

impl MoleculeRole {
    pub fn other(&self) -> Self {
        match self {
            MoleculeRole::Receptor => MoleculeRole::Ligand,
            MoleculeRole::Ligand => MoleculeRole::Receptor,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid molecule role '{0}' (expected 'receptor' or 'ligand')")]
pub struct ParseMoleculeRoleError(pub String);

impl FromStr for MoleculeRole {
    type Err = ParseMoleculeRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "receptor" | "protein" => Ok(MoleculeRole::Receptor),
            "ligand" => Ok(MoleculeRole::Ligand),
            other => Err(ParseMoleculeRoleError(other.to_string())),
        }
    }
}

impl fmt::Display for MoleculeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoleculeRole::Receptor => write!(f, "receptor"),
            MoleculeRole::Ligand => write!(f, "ligand"),
        }
    }
}

/// Identifies an atom across the two molecules of an analysis.
///
/// Ordering is by role first (receptor before ligand), then by atom ID, which gives
/// classifiers a canonical key for deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomRef {
    pub role: MoleculeRole,
    pub id: AtomId,
}

impl AtomRef {
    pub fn new(role: MoleculeRole, id: AtomId) -> Self {
        Self { role, id }
    }
}

/// A parsed receptor or ligand structure.
///
/// Atoms and residues live in slot-map arenas; bonds are stored as an index-based
/// adjacency list, so ring perception and other graph walks never need pointer
/// cycles. A `Molecule` is assembled by the structure loader and is read-only
/// afterwards: every public accessor hands out shared references.
#[derive(Debug, Clone)]
pub struct Molecule {
    role: MoleculeRole,
    /// Primary storage for atoms.
    pub(crate) atoms: SlotMap<AtomId, Atom>,
    /// Primary storage for residues, in order of first appearance.
    pub(crate) residues: SlotMap<ResidueId, Residue>,
    /// Lookup map for finding residues by chain, number and name.
    residue_id_map: HashMap<(char, isize, String), ResidueId>,
    /// List of all inferred bonds.
    pub(crate) bonds: Vec<Bond>,
    /// Bonded neighbors per atom.
    pub(crate) bond_adjacency: SecondaryMap<AtomId, Vec<AtomId>>,
    pub(crate) rings: Vec<Ring>,
    pub(crate) charged_groups: Vec<ChargedGroup>,
}

impl Molecule {
    pub(crate) fn new(role: MoleculeRole) -> Self {
        Self {
            role,
            atoms: SlotMap::with_key(),
            residues: SlotMap::with_key(),
            residue_id_map: HashMap::new(),
            bonds: Vec::new(),
            bond_adjacency: SecondaryMap::new(),
            rings: Vec::new(),
            charged_groups: Vec::new(),
        }
    }

    pub fn role(&self) -> MoleculeRole {
        self.role
    }

    /// Retrieves an atom by its ID.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Returns an iterator over all atoms in record order.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn atom_ref(&self, id: AtomId) -> AtomRef {
        AtomRef::new(self.role, id)
    }

    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    /// Returns an iterator over all residues in order of first appearance.
    pub fn residues_iter(&self) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.residues.iter()
    }

    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    pub fn find_residue(&self, key: &ResidueKey) -> Option<ResidueId> {
        self.residue_id_map
            .get(&(key.chain_id, key.number, key.name.clone()))
            .copied()
    }

    /// Returns the residue owning `atom_id`.
    pub fn residue_of(&self, atom_id: AtomId) -> Option<&Residue> {
        self.atoms
            .get(atom_id)
            .and_then(|atom| self.residues.get(atom.residue_id))
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Retrieves the atoms bonded to `atom_id`; empty for unknown atoms.
    pub fn bonded_neighbors(&self, atom_id: AtomId) -> &[AtomId] {
        self.bond_adjacency
            .get(atom_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Returns the hydrogens bonded to `atom_id`.
    pub fn bonded_hydrogens(&self, atom_id: AtomId) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.bonded_neighbors(atom_id)
            .iter()
            .filter_map(|&id| self.atoms.get(id).map(|atom| (id, atom)))
            .filter(|(_, atom)| atom.is_hydrogen())
    }

    /// Number of non-hydrogen atoms bonded to `atom_id`.
    pub fn heavy_degree(&self, atom_id: AtomId) -> usize {
        self.bonded_neighbors(atom_id)
            .iter()
            .filter(|&&id| self.atoms.get(id).is_some_and(|atom| atom.is_heavy()))
            .count()
    }

    /// Whether the structure carries any explicit hydrogen positions.
    pub fn has_hydrogens(&self) -> bool {
        self.atoms.values().any(|atom| atom.is_hydrogen())
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn charged_groups(&self) -> &[ChargedGroup] {
        &self.charged_groups
    }

    pub(crate) fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(id)
    }

    /// Adds a residue or returns the existing one with the same chain, number and name.
    pub(crate) fn add_residue(&mut self, chain_id: char, number: isize, name: &str) -> ResidueId {
        let key = (chain_id, number, name.to_string());
        *self
            .residue_id_map
            .entry(key)
            .or_insert_with(|| self.residues.insert(Residue::new(name, chain_id, number)))
    }

    /// Inserts an atom into an existing residue.
    pub(crate) fn add_atom(&mut self, atom: Atom) -> Option<AtomId> {
        if !self.residues.contains_key(atom.residue_id) {
            return None;
        }
        let residue_id = atom.residue_id;
        let name = atom.name.clone();
        let atom_id = self.atoms.insert(atom);
        self.bond_adjacency.insert(atom_id, Vec::new());
        self.residues.get_mut(residue_id)?.add_atom(&name, atom_id);
        Some(atom_id)
    }

    /// Adds a bond between two atoms. Adding an existing bond is a no-op.
    pub(crate) fn add_bond(&mut self, a: AtomId, b: AtomId) -> Option<()> {
        if a == b || !self.atoms.contains_key(a) || !self.atoms.contains_key(b) {
            return None;
        }
        if self.bonded_neighbors(a).contains(&b) {
            return Some(());
        }
        self.bonds.push(Bond::new(a, b));
        self.bond_adjacency.get_mut(a)?.push(b);
        self.bond_adjacency.get_mut(b)?.push(a);
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::element::Element;
    use nalgebra::Point3;

    fn water_molecule() -> (Molecule, AtomId, AtomId, AtomId) {
        let mut molecule = Molecule::new(MoleculeRole::Receptor);
        let residue_id = molecule.add_residue('W', 1, "HOH");
        let o = molecule
            .add_atom(Atom::new(1, "O", Element::O, residue_id, Point3::origin()))
            .unwrap();
        let h1 = molecule
            .add_atom(Atom::new(2, "H1", Element::H, residue_id, Point3::new(0.96, 0.0, 0.0)))
            .unwrap();
        let h2 = molecule
            .add_atom(Atom::new(3, "H2", Element::H, residue_id, Point3::new(-0.24, 0.93, 0.0)))
            .unwrap();
        molecule.add_bond(o, h1).unwrap();
        molecule.add_bond(o, h2).unwrap();
        (molecule, o, h1, h2)
    }

    #[test]
    fn role_parsing_and_display_round_trip_names() {
        assert_eq!("Receptor".parse::<MoleculeRole>(), Ok(MoleculeRole::Receptor));
        assert_eq!("ligand".parse::<MoleculeRole>(), Ok(MoleculeRole::Ligand));
        assert!("solvent".parse::<MoleculeRole>().is_err());
        assert_eq!(MoleculeRole::Ligand.to_string(), "ligand");
        assert_eq!(MoleculeRole::Ligand.other(), MoleculeRole::Receptor);
    }

    #[test]
    fn add_residue_is_idempotent() {
        let mut molecule = Molecule::new(MoleculeRole::Ligand);
        let first = molecule.add_residue('A', 1, "UNL");
        let second = molecule.add_residue('A', 1, "UNL");
        let other = molecule.add_residue('A', 1, "HOH");
        assert_eq!(first, second);
        assert_ne!(first, other);
        assert_eq!(molecule.residue_count(), 2);
        assert_eq!(
            molecule.find_residue(&ResidueKey::new('A', 1, "UNL")),
            Some(first)
        );
    }

    #[test]
    fn add_atom_fails_for_unknown_residue() {
        let mut molecule = Molecule::new(MoleculeRole::Ligand);
        let atom = Atom::new(1, "C1", Element::C, ResidueId::default(), Point3::origin());
        assert!(molecule.add_atom(atom).is_none());
    }

    #[test]
    fn bonds_update_adjacency_and_are_deduplicated() {
        let (mut molecule, o, h1, h2) = water_molecule();
        molecule.add_bond(h1, o).unwrap();
        assert_eq!(molecule.bonds().len(), 2);
        assert_eq!(molecule.bonded_neighbors(o), &[h1, h2]);
        assert_eq!(molecule.bonded_neighbors(h1), &[o]);
        assert!(molecule.add_bond(o, o).is_none());
    }

    #[test]
    fn hydrogen_queries_follow_bonds() {
        let (molecule, o, h1, _) = water_molecule();
        assert!(molecule.has_hydrogens());
        assert_eq!(molecule.bonded_hydrogens(o).count(), 2);
        assert_eq!(molecule.heavy_degree(o), 0);
        assert_eq!(molecule.heavy_degree(h1), 1);
        assert_eq!(molecule.residue_of(o).unwrap().name, "HOH");
    }
}
