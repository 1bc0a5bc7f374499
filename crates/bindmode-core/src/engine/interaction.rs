use crate::core::models::atom::Atom;
use crate::core::models::element::Element;
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::{AtomRef, Molecule, MoleculeRole};
use crate::core::models::residue::ResidueKey;
use serde::Serialize;
use std::fmt;

/// Interaction categories, in the order they are classified and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum InteractionKind {
    #[serde(rename = "hydrogen_bonds")]
    HydrogenBond,
    #[serde(rename = "salt_bridges")]
    SaltBridge,
    #[serde(rename = "hydrophobic_contacts")]
    HydrophobicContact,
    #[serde(rename = "pi_pi_stackings")]
    PiPiStacking,
    #[serde(rename = "pi_cation_interactions")]
    PiCation,
    #[serde(rename = "metal_complexes")]
    MetalComplex,
    #[serde(rename = "close_contacts")]
    CloseContact,
}

impl InteractionKind {
    pub const ALL: [InteractionKind; 7] = [
        InteractionKind::HydrogenBond,
        InteractionKind::SaltBridge,
        InteractionKind::HydrophobicContact,
        InteractionKind::PiPiStacking,
        InteractionKind::PiCation,
        InteractionKind::MetalComplex,
        InteractionKind::CloseContact,
    ];

    /// The report key of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::HydrogenBond => "hydrogen_bonds",
            InteractionKind::SaltBridge => "salt_bridges",
            InteractionKind::HydrophobicContact => "hydrophobic_contacts",
            InteractionKind::PiPiStacking => "pi_pi_stackings",
            InteractionKind::PiCation => "pi_cation_interactions",
            InteractionKind::MetalComplex => "metal_complexes",
            InteractionKind::CloseContact => "close_contacts",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionSubtype {
    /// Hydrogen bond donated by the receptor.
    ReceptorDonor,
    /// Hydrogen bond donated by the ligand.
    LigandDonor,
    /// Face-to-face ring stacking.
    Stacked,
    /// Edge-to-face ring stacking.
    TShaped,
    /// Pi-cation contact with the aromatic ring on the receptor.
    RingInReceptor,
    /// Pi-cation contact with the aromatic ring on the ligand.
    RingInLigand,
}

/// Snapshot of an atom taking part in an interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtomSite {
    #[serde(skip)]
    pub id: AtomId,
    pub role: MoleculeRole,
    pub serial: usize,
    pub name: String,
    pub element: Element,
    pub residue_name: String,
    pub residue_number: isize,
    pub chain_id: char,
    pub position: [f64; 3],
}

impl AtomSite {
    pub fn new(molecule: &Molecule, id: AtomId, atom: &Atom) -> Self {
        let (residue_name, residue_number) = molecule
            .residue_of(id)
            .map(|residue| (residue.name.clone(), residue.number))
            .unwrap_or_default();
        Self {
            id,
            role: molecule.role(),
            serial: atom.serial,
            name: atom.name.clone(),
            element: atom.element,
            residue_name,
            residue_number,
            chain_id: atom.chain_id,
            position: [atom.position.x, atom.position.y, atom.position.z],
        }
    }

    pub fn atom_ref(&self) -> AtomRef {
        AtomRef::new(self.role, self.id)
    }

    pub fn residue_key(&self) -> ResidueKey {
        ResidueKey::new(self.chain_id, self.residue_number, &self.residue_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleKind {
    /// Donor-hydrogen-acceptor angle.
    DonorHydrogenAcceptor,
    /// Angle between two ring normals, folded to [0, 90].
    RingNormals,
    /// Angle between a ring normal and the ring-to-cation vector, folded to [0, 90].
    NormalToCation,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Angle {
    pub kind: AngleKind,
    pub degrees: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurements {
    /// Distance between the interacting atoms or centroids, in Angstroms.
    pub distance: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub angles: Vec<Angle>,
}

impl Measurements {
    pub fn distance(distance: f64) -> Self {
        Self {
            distance,
            angles: Vec::new(),
        }
    }

    pub fn with_angle(mut self, kind: AngleKind, degrees: f64) -> Self {
        self.angles.push(Angle { kind, degrees });
        self
    }

    pub fn angle(&self, kind: AngleKind) -> Option<f64> {
        self.angles.iter().find(|a| a.kind == kind).map(|a| a.degrees)
    }
}

/// Canonical identity of an interaction: its sorted, deduplicated participants.
///
/// Two records with the same key under one kind describe the same interaction,
/// regardless of the order in which the participants were discovered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantKey(Vec<AtomRef>);

impl ParticipantKey {
    pub fn new(participants: impl IntoIterator<Item = AtomRef>) -> Self {
        let mut atoms: Vec<AtomRef> = participants.into_iter().collect();
        atoms.sort_unstable();
        atoms.dedup();
        Self(atoms)
    }

    pub fn atoms(&self) -> &[AtomRef] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionRecord {
    pub kind: InteractionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<InteractionSubtype>,
    pub receptor_atoms: Vec<AtomSite>,
    pub ligand_atoms: Vec<AtomSite>,
    pub measurements: Measurements,
    #[serde(skip)]
    key: ParticipantKey,
}

impl InteractionRecord {
    /// Creates a record keyed on `key_atoms`, or on every participant when `None`.
    pub fn new(
        kind: InteractionKind,
        subtype: Option<InteractionSubtype>,
        receptor_atoms: Vec<AtomSite>,
        ligand_atoms: Vec<AtomSite>,
        measurements: Measurements,
        key_atoms: Option<Vec<AtomRef>>,
    ) -> Self {
        let key = match key_atoms {
            Some(atoms) => ParticipantKey::new(atoms),
            None => ParticipantKey::new(
                receptor_atoms
                    .iter()
                    .chain(&ligand_atoms)
                    .map(AtomSite::atom_ref),
            ),
        };
        Self {
            kind,
            subtype,
            receptor_atoms,
            ligand_atoms,
            measurements,
            key,
        }
    }

    pub fn key(&self) -> &ParticipantKey {
        &self.key
    }

    /// Distinct receptor residues touched by this interaction, in key order.
    pub fn receptor_residues(&self) -> Vec<ResidueKey> {
        let mut residues: Vec<ResidueKey> =
            self.receptor_atoms.iter().map(AtomSite::residue_key).collect();
        residues.sort();
        residues.dedup();
        residues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn atom_ref(role: MoleculeRole, n: u64) -> AtomRef {
        AtomRef::new(role, AtomId::from(KeyData::from_ffi(n)))
    }

    fn site(role: MoleculeRole, n: u64, residue: &str, number: isize) -> AtomSite {
        AtomSite {
            id: AtomId::from(KeyData::from_ffi(n)),
            role,
            serial: n as usize,
            name: "X".to_string(),
            element: Element::C,
            residue_name: residue.to_string(),
            residue_number: number,
            chain_id: 'A',
            position: [0.0; 3],
        }
    }

    #[test]
    fn kinds_serialize_to_report_keys() {
        for kind in InteractionKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn participant_key_ignores_order_and_duplicates() {
        let a = atom_ref(MoleculeRole::Receptor, 3);
        let b = atom_ref(MoleculeRole::Ligand, 1);
        assert_eq!(ParticipantKey::new([b, a, b]), ParticipantKey::new([a, b]));
        assert_eq!(ParticipantKey::new([b, a]).atoms(), &[a, b]);
    }

    #[test]
    fn record_key_defaults_to_all_participants() {
        let record = InteractionRecord::new(
            InteractionKind::CloseContact,
            None,
            vec![site(MoleculeRole::Receptor, 1, "ALA", 5)],
            vec![site(MoleculeRole::Ligand, 2, "UNL", 1)],
            Measurements::distance(2.0),
            None,
        );
        assert_eq!(record.key().atoms().len(), 2);
        assert_eq!(record.receptor_residues(), vec![ResidueKey::new('A', 5, "ALA")]);
    }

    #[test]
    fn measurements_find_angles_by_kind() {
        let m = Measurements::distance(3.1).with_angle(AngleKind::DonorHydrogenAcceptor, 165.0);
        assert_eq!(m.angle(AngleKind::DonorHydrogenAcceptor), Some(165.0));
        assert_eq!(m.angle(AngleKind::RingNormals), None);
    }
}
